//! Admin session state.
//!
//! Credentials are held in an explicit [`SessionContext`] value that callers
//! pass down to admin operations. Signing out drops them.

use std::fmt;

use crate::error::AuthError;

/// HTTP Basic credentials for the admin endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminSession {
    username: String,
    password: String,
}

impl AdminSession {
    /// Creates a session from a username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminSession")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Holds at most one signed-in admin session.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Option<AdminSession>,
}

impl SessionContext {
    /// Creates a signed-out context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores credentials, replacing any previous session.
    pub fn sign_in(
        &mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> &AdminSession {
        let session = AdminSession::new(username, password);
        log::debug!("Signed in as {}", session.username());
        self.current.insert(session)
    }

    /// Clears the stored credentials. Returns the session that was active.
    pub fn sign_out(&mut self) -> Option<AdminSession> {
        let previous = self.current.take();
        if let Some(session) = &previous {
            log::debug!("Signed out {}", session.username());
        }
        previous
    }

    /// Returns the active session.
    pub fn session(&self) -> Result<&AdminSession, AuthError> {
        self.current.as_ref().ok_or(AuthError::NotSignedIn)
    }

    /// Returns `true` while credentials are stored.
    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_and_out() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.is_signed_in());
        assert!(matches!(ctx.session(), Err(AuthError::NotSignedIn)));

        ctx.sign_in("admin", "hunter2");
        assert!(ctx.is_signed_in());
        assert_eq!(ctx.session().unwrap().username(), "admin");

        let previous = ctx.sign_out().unwrap();
        assert_eq!(previous.password(), "hunter2");
        assert!(!ctx.is_signed_in());
        assert!(ctx.sign_out().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let session = AdminSession::new("admin", "hunter2");
        let debug = format!("{session:?}");
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }
}
