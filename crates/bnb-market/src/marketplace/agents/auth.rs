use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Email/password pair collected by the agent form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Account created by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountHandle {
    pub uid: String,
    pub email: String,
}

/// Signed-in session returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Identity provider used for agent sign-up and sign-in.
pub trait AuthProvider: Send + Sync {
    fn create_account(&self, email: &str, password: &str) -> Result<AccountHandle, AuthError>;
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
}

/// Provider failure classes the form knows how to explain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCode {
    WeakPassword,
    EmailAlreadyInUse,
    UserNotFound,
    WrongPassword,
    Other(String),
}

impl ProviderCode {
    /// Providers prefix codes (`auth/weak-password`), so matching is by containment.
    pub fn from_code(code: &str) -> Self {
        if code.contains("weak-password") {
            Self::WeakPassword
        } else if code.contains("email-already-in-use") {
            Self::EmailAlreadyInUse
        } else if code.contains("user-not-found") {
            Self::UserNotFound
        } else if code.contains("wrong-password") {
            Self::WrongPassword
        } else {
            Self::Other(code.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::WeakPassword => "auth/weak-password",
            Self::EmailAlreadyInUse => "auth/email-already-in-use",
            Self::UserNotFound => "auth/user-not-found",
            Self::WrongPassword => "auth/wrong-password",
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({})", .code.as_str())]
pub struct AuthError {
    pub code: ProviderCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: ProviderCode::from_code(code),
            message: message.into(),
        }
    }

    /// Copy shown to the agent; unknown codes fall back to the provider's message.
    pub fn friendly_message(&self) -> String {
        match self.code {
            ProviderCode::WeakPassword => "Password must be at least 6 characters long.".to_string(),
            ProviderCode::EmailAlreadyInUse => "This email is already registered.".to_string(),
            ProviderCode::UserNotFound | ProviderCode::WrongPassword => {
                "Invalid email or password.".to_string()
            }
            ProviderCode::Other(_) => self.message.clone(),
        }
    }
}
