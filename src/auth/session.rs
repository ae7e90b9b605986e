//! Session Module
//! Per-context authentication state machine.

use crate::auth::{AuthError, CredentialStore};
use log::info;

/// Authentication state for one user interaction context.
///
/// Starts anonymous; `login` binds an identity, `logout` discards it
/// unconditionally. Never shared across contexts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
    username: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Verify against the store; on success bind the username and
    /// transition to the authenticated state. On failure the session
    /// stays anonymous and the error kind is propagated.
    pub fn login(
        &mut self,
        store: &CredentialStore,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        store.verify(username, password)?;
        self.authenticated = true;
        self.username = Some(username.to_string());
        info!("session authenticated for {}", username);
        Ok(())
    }

    /// Clear all session fields and return to the anonymous state.
    pub fn logout(&mut self) {
        if let Some(name) = self.username.take() {
            info!("session for {} logged out", name);
        }
        self.authenticated = false;
        self.username = None;
    }

    /// Gate invoked before any pipeline access.
    pub fn require_authenticated(&self) -> Result<&str, AuthError> {
        if self.authenticated {
            self.username.as_deref().ok_or(AuthError::NotAuthenticated)
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_starts_anonymous() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.username(), None);
        assert_eq!(session.require_authenticated(), Err(AuthError::NotAuthenticated));
    }

    #[test]
    fn test_login_binds_identity() {
        let store = CredentialStore::demo();
        let mut session = Session::new();
        session.login(&store, "admin", "admin").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.username(), Some("admin"));
        assert_eq!(session.require_authenticated(), Ok("admin"));
    }

    #[test]
    fn test_failed_login_stays_anonymous() {
        let store = CredentialStore::demo();
        let mut session = Session::new();
        assert_eq!(
            session.login(&store, "admin", "wrong"),
            Err(AuthError::WrongPassword)
        );
        assert!(!session.is_authenticated());
        assert_eq!(session.username(), None);
    }

    #[test]
    fn test_logout_always_resets() {
        let store = CredentialStore::demo();
        let mut session = Session::new();
        session.login(&store, "user", "user").unwrap();
        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(session.require_authenticated(), Err(AuthError::NotAuthenticated));

        // Logout on an already-anonymous session is a no-op.
        session.logout();
        assert!(!session.is_authenticated());
    }
}
