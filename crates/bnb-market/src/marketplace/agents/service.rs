use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

use super::auth::{AccountHandle, AuthError, AuthProvider, Credentials, Session};
use super::form::{AgentAuthForm, AuthMode, Notice, NoticeKind};
use crate::marketplace::store::{DocumentStore, Fields, StoreError, AGENTS_COLLECTION};

pub const REGISTERED_MESSAGE: &str = "Registration successful! You can now log in.";
pub const AGENT_DASHBOARD_PATH: &str = "agent-dashboard.html";

#[derive(Debug, thiserror::Error)]
pub enum AgentAuthError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AgentAuthError {
    pub fn friendly_message(&self) -> String {
        match self {
            AgentAuthError::Auth(err) => err.friendly_message(),
            AgentAuthError::Store(err) => err.to_string(),
        }
    }
}

/// Result of one form submission.
#[derive(Debug)]
pub enum AuthOutcome {
    Registered {
        account: AccountHandle,
        message: &'static str,
    },
    SignedIn {
        session: Session,
        redirect: &'static str,
    },
    Failed {
        error: AgentAuthError,
        message: String,
    },
}

/// Agent sign-up/sign-in against the identity provider plus the agent directory.
pub struct AgentAuthService<P, S> {
    provider: Arc<P>,
    store: Arc<S>,
    notice_ttl: Duration,
}

impl<P, S> AgentAuthService<P, S>
where
    P: AuthProvider + 'static,
    S: DocumentStore + 'static,
{
    pub fn new(provider: Arc<P>, store: Arc<S>, notice_ttl: Duration) -> Self {
        Self {
            provider,
            store,
            notice_ttl,
        }
    }

    /// Creates the account and records an unverified agent profile keyed by uid.
    pub fn register(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<AccountHandle, AgentAuthError> {
        let account = self
            .provider
            .create_account(&credentials.email, &credentials.password)?;

        self.store.set_document(
            AGENTS_COLLECTION,
            &account.uid,
            agent_profile_fields(&account, now),
        )?;

        info!(uid = %account.uid, "agent registered");
        Ok(account)
    }

    pub fn login(&self, credentials: &Credentials) -> Result<Session, AgentAuthError> {
        let session = self
            .provider
            .sign_in(&credentials.email, &credentials.password)?;
        info!(uid = %session.uid, "agent signed in");
        Ok(session)
    }

    /// Runs the form's current mode and leaves it ready for the next attempt.
    ///
    /// Successful registration flips the form back to login mode.
    pub fn submit(
        &self,
        form: &mut AgentAuthForm,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> AuthOutcome {
        form.begin_submit();

        let outcome = match form.mode() {
            AuthMode::Register => match self.register(credentials, now) {
                Ok(account) => AuthOutcome::Registered {
                    account,
                    message: REGISTERED_MESSAGE,
                },
                Err(error) => failed(error),
            },
            AuthMode::Login => match self.login(credentials) {
                Ok(session) => AuthOutcome::SignedIn {
                    session,
                    redirect: AGENT_DASHBOARD_PATH,
                },
                Err(error) => failed(error),
            },
        };

        let notice = match &outcome {
            AuthOutcome::Registered { message, .. } => {
                form.toggle();
                Some(Notice::new(NoticeKind::Success, *message, now, self.notice_ttl))
            }
            AuthOutcome::SignedIn { .. } => None,
            AuthOutcome::Failed { message, .. } => Some(Notice::new(
                NoticeKind::Error,
                message.clone(),
                now,
                self.notice_ttl,
            )),
        };
        form.finish_submit(notice);

        outcome
    }
}

fn failed(error: AgentAuthError) -> AuthOutcome {
    warn!(error = %error, "agent authentication failed");
    let message = error.friendly_message();
    AuthOutcome::Failed { error, message }
}

fn agent_profile_fields(account: &AccountHandle, now: DateTime<Utc>) -> Fields {
    let mut fields = Fields::new();
    fields.insert("email".to_string(), json!(account.email));
    fields.insert("isVerified".to_string(), Value::Bool(false));
    fields.insert("dateJoined".to_string(), json!(now.to_rfc3339()));
    fields
}
