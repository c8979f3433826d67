//! Error types for the cloud capabilities.

use launchdeck_core::error::LaunchdeckError;

/// Sign-in and sign-out failures. Surfaced via alert; shell state is left
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The identity provider is not configured for real sign-in.
    #[error("identity provider not configured")]
    NotConfigured,
    /// The user denied the consent prompt.
    #[error("sign-in was denied: {0}")]
    Denied(String),
    /// Anything else (network, provider outage).
    #[error("sign-in failed: {0}")]
    Failed(String),
}

/// File-save failures. The message is surfaced to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("Session expired or missing permissions. Please sign out and sign in again.")]
    SessionExpired,
    #[error("storage quota exceeded")]
    QuotaExceeded,
    #[error("{0}")]
    Upload(String),
}

impl From<AuthError> for LaunchdeckError {
    fn from(err: AuthError) -> Self {
        LaunchdeckError::Auth(err.to_string())
    }
}

impl From<PersistenceError> for LaunchdeckError {
    fn from(err: PersistenceError) -> Self {
        LaunchdeckError::Persistence(err.to_string())
    }
}
