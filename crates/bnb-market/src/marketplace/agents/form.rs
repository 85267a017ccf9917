use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Login => "Agent Login",
            Self::Register => "Agent Registration",
        }
    }

    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    pub const fn pending_label(self) -> &'static str {
        match self {
            Self::Login => "Logging in...",
            Self::Register => "Registering...",
        }
    }

    pub const fn toggle_label(self) -> &'static str {
        match self {
            Self::Login => "Register here",
            Self::Register => "Login here",
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Error,
    Success,
}

/// Transient banner under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: now,
            expires_at: now + ttl,
        }
    }

    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// State of the standalone agent login/registration form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgentAuthForm {
    mode: AuthMode,
    submitting: bool,
    notice: Option<Notice>,
}

impl AgentAuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Switches between login and registration and hides any banner.
    pub fn toggle(&mut self) {
        self.mode = self.mode.flipped();
        self.notice = None;
    }

    pub fn button_label(&self) -> &'static str {
        if self.submitting {
            self.mode.pending_label()
        } else {
            self.mode.button_label()
        }
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submitting = true;
        self.notice = None;
    }

    /// Re-enables the button; every submission path ends here.
    pub(crate) fn finish_submit(&mut self, notice: Option<Notice>) {
        self.submitting = false;
        if notice.is_some() {
            self.notice = notice;
        }
    }

    pub fn visible_notice(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notice.as_ref().filter(|notice| notice.is_visible(now))
    }

    pub fn view(&self, now: DateTime<Utc>) -> AuthFormView {
        AuthFormView {
            mode: self.mode,
            heading: self.mode.heading(),
            button_label: self.button_label(),
            button_enabled: !self.submitting,
            toggle_label: self.mode.toggle_label(),
            notice: self.visible_notice(now).cloned(),
        }
    }
}

/// Serializable snapshot of the form for API clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthFormView {
    pub mode: AuthMode,
    pub heading: &'static str,
    pub button_label: &'static str,
    pub button_enabled: bool,
    pub toggle_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}
