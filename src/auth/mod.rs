//! Auth module - credential verification and session lifecycle

mod credentials;
mod session;

pub use credentials::{AuthError, CredentialStore};
pub use session::Session;
