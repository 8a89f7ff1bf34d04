//! Per-caller authentication state.
//!
//! A `Session` is an ordinary value owned by whoever drives the UI. Nothing is
//! stored globally or persisted, so a restarted process starts anonymous.

use super::AuthService;
use crate::domain::User;
use crate::error::AppError;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(User),
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Anonymous => None,
        }
    }

    /// Attempt a login. On success the session becomes authenticated.
    ///
    /// A failed attempt leaves the current state as it was.
    pub async fn login(
        &mut self,
        auth: &AuthService,
        username: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        match auth.login(username, password).await? {
            Some(user) => {
                info!(username = %user.username, "Session authenticated");
                self.state = SessionState::Authenticated(user);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn logout(&mut self) {
        if let SessionState::Authenticated(user) = &self.state {
            info!(username = %user.username, "Session logged out");
        }
        self.state = SessionState::Anonymous;
    }
}
