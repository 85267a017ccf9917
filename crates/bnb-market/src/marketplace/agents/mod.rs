//! Agent onboarding and listing management.

pub mod auth;
pub mod form;
pub mod properties;
pub mod service;

pub use auth::{AccountHandle, AuthError, AuthProvider, Credentials, ProviderCode, Session};
pub use form::{AgentAuthForm, AuthFormView, AuthMode, Notice, NoticeKind};
pub use properties::{
    ListingSummary, PropertyDesk, PropertyDraft, PropertySubmission, SubmissionError,
    SubmissionStatus, SUBMITTED_MESSAGE,
};
pub use service::{
    AgentAuthError, AgentAuthService, AuthOutcome, AGENT_DASHBOARD_PATH, REGISTERED_MESSAGE,
};
