use serde::{Deserialize, Serialize};

/// Role attached to a signed-in user. Unrecognised tags are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Agent,
    Student,
    Unknown(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Agent => "agent",
            Role::Student => "student",
            Role::Unknown(tag) => tag,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Agent => "Property Agent",
            Role::Student | Role::Unknown(_) => "Student User",
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "agent" => Role::Agent,
            "student" => Role::Student,
            _ => Role::Unknown(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// Signed-in user as handed to the router after login.
///
/// Only `role` drives routing; `id` may arrive as a number and `name` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "crate::marketplace::wire::string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: impl Into<Role>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role: Some(role.into()),
        }
    }
}

/// Named screens the router can hand off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    AgentDashboard,
    StudentDashboard,
    Login,
}

impl Destination {
    pub const fn screen(self) -> &'static str {
        match self {
            Destination::AgentDashboard => "AgentDashboard",
            Destination::StudentDashboard => "StudentDashboard",
            Destination::Login => "LoginScreen",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Destination::AgentDashboard => "Agent Portal",
            Destination::StudentDashboard => "Find Accommodation",
            Destination::Login => "BNB Accommodations",
        }
    }
}

/// Navigation request: a destination plus the payload the next screen receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub destination: Destination,
    pub screen: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

impl Transition {
    pub fn to(destination: Destination, user: Option<User>) -> Self {
        Self {
            destination,
            screen: destination.screen(),
            user,
        }
    }
}

/// Total mapping from a (possibly absent) user to a landing screen.
///
/// Agents land on the agent dashboard, a missing user goes back to login, and
/// every other case (student, unknown tag, missing role) lands on the student
/// dashboard.
pub fn route(user: Option<&User>) -> Destination {
    match user {
        None => Destination::Login,
        Some(User {
            role: Some(Role::Agent),
            ..
        }) => Destination::AgentDashboard,
        Some(_) => Destination::StudentDashboard,
    }
}

/// Same decision as [`route`], carrying the user into the dashboard.
pub fn transition_for(user: Option<User>) -> Transition {
    let destination = route(user.as_ref());
    let payload = match destination {
        Destination::Login => None,
        _ => user,
    };
    Transition::to(destination, payload)
}
