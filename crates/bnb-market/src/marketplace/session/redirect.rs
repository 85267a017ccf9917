use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::role::{transition_for, Transition, User};

/// Screen stack that can swap the current screen for another.
pub trait Navigator: Send + Sync {
    fn replace(&self, transition: Transition);
}

/// Role router with the cosmetic pause shown while "Directing you to your dashboard...".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleRouter {
    delay: Duration,
}

impl RoleRouter {
    pub const LOADING_MESSAGE: &'static str = "Directing you to your dashboard...";

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Immediate decision, for callers that render their own spinner.
    pub fn decide(&self, user: Option<User>) -> Transition {
        transition_for(user)
    }

    /// Spawns the delayed hand-off on the current tokio runtime.
    ///
    /// Dropping or cancelling the returned handle before the delay elapses
    /// guarantees the navigator is never called.
    pub fn schedule<N>(&self, user: Option<User>, navigator: Arc<N>) -> PendingRedirect
    where
        N: Navigator + 'static,
    {
        let delay = self.delay;
        let transition = transition_for(user);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(screen = transition.screen, "role router redirecting");
            navigator.replace(transition);
        });

        PendingRedirect {
            handle: Some(handle),
        }
    }
}

impl Default for RoleRouter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Handle to a scheduled redirect; aborts the timer when dropped.
#[derive(Debug)]
pub struct PendingRedirect {
    handle: Option<JoinHandle<()>>,
}

impl PendingRedirect {
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Waits for the redirect; `false` when it was aborted before firing.
    pub async fn completed(mut self) -> bool {
        match self.handle.take() {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }
}

impl Drop for PendingRedirect {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
