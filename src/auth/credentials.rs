//! Credential Store Module
//! Username to password-digest mapping with verification.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Username not found")]
    UnknownUser,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("Not logged in")]
    NotAuthenticated,
}

/// Immutable username -> SHA-256 hex digest mapping, seeded at construction.
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    /// Build a store from (username, hex digest) pairs.
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            users: pairs.into_iter().collect(),
        }
    }

    /// Demo accounts: `admin`/`admin` and `user`/`user`, stored as digests only.
    pub fn demo() -> Self {
        Self::new([
            (
                "admin".to_string(),
                "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9".to_string(),
            ),
            (
                "user".to_string(),
                "04f8996da763b7a969b1028ee3007569eaf3a635486ddab211d512c85b9df8fb".to_string(),
            ),
        ])
    }

    /// Lowercase hex SHA-256 of a password.
    pub fn digest(password: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(password.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Check a password against the stored digest for `username`.
    ///
    /// Unknown usernames and wrong passwords are reported as distinct error
    /// kinds. No timing-attack resistance is claimed.
    pub fn verify(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let stored = self.users.get(username).ok_or(AuthError::UnknownUser)?;
        if Self::digest(password) == *stored {
            Ok(())
        } else {
            Err(AuthError::WrongPassword)
        }
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_credentials_verify() {
        let store = CredentialStore::demo();
        assert_eq!(store.verify("admin", "admin"), Ok(()));
        assert_eq!(store.verify("user", "user"), Ok(()));
    }

    #[test]
    fn test_wrong_password_is_distinct_from_unknown_user() {
        let store = CredentialStore::demo();
        assert_eq!(
            store.verify("admin", "hunter2"),
            Err(AuthError::WrongPassword)
        );
        assert_eq!(store.verify("nobody", "admin"), Err(AuthError::UnknownUser));
    }

    #[test]
    fn test_custom_store() {
        let store = CredentialStore::new([(
            "alice".to_string(),
            CredentialStore::digest("s3cret"),
        )]);
        assert_eq!(store.verify("alice", "s3cret"), Ok(()));
        assert_eq!(store.verify("alice", "secret"), Err(AuthError::WrongPassword));
    }

    #[test]
    fn test_digest_is_lowercase_hex() {
        let d = CredentialStore::digest("admin");
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
