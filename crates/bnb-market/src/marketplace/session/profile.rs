use serde::Serialize;

use super::role::{Destination, Transition, User};

/// Account header shown on the shared profile screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub name: String,
    pub role_label: &'static str,
}

impl ProfileView {
    pub fn for_user(user: &User) -> Self {
        let role_label = user
            .role
            .as_ref()
            .map(|role| role.label())
            .unwrap_or("Student User");

        Self {
            name: user.name.clone(),
            role_label,
        }
    }
}

/// Logging out always replaces the stack with the login screen.
pub fn logout() -> Transition {
    Transition::to(Destination::Login, None)
}
