//! The identity capability.
//!
//! The shell only ever consumes the resulting `User` (or its absence) to
//! gate transcript export and to label the sheet header. `MockIdentity`
//! is the offline mode: a fixed profile and a session file in place of a
//! real OAuth flow.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use launchdeck_core::types::User;

use crate::error::AuthError;

/// Name of the persisted session file under the data directory.
const SESSION_FILE: &str = "session.json";

/// Sign-in, sign-out, and session restore.
#[async_trait]
pub trait Identity: Send + Sync {
    /// Restore a previously persisted session, if any.
    async fn restore_session(&self) -> Option<User>;

    /// Run the sign-in flow and persist the resulting session.
    async fn sign_in(&self) -> Result<User, AuthError>;

    /// Clear the persisted session.
    async fn sign_out(&self);
}

/// Mock identity provider backed by a JSON session file.
pub struct MockIdentity {
    session_path: PathBuf,
    profile: User,
}

impl MockIdentity {
    /// Create a mock identity storing its session under `data_dir`.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            session_path: data_dir.join(SESSION_FILE),
            profile: User {
                name: "Demo User".to_string(),
                email: "demo@example.com".to_string(),
                picture: "https://i.pravatar.cc/150?u=demo".to_string(),
            },
        }
    }

    /// Override the profile returned by `sign_in`.
    pub fn with_profile(mut self, profile: User) -> Self {
        self.profile = profile;
        self
    }
}

#[async_trait]
impl Identity for MockIdentity {
    async fn restore_session(&self) -> Option<User> {
        let content = std::fs::read_to_string(&self.session_path).ok()?;
        match serde_json::from_str::<User>(&content) {
            Ok(user) => {
                tracing::info!(email = %user.email, "Session restored");
                Some(user)
            }
            Err(e) => {
                // A corrupt session file is discarded, not surfaced.
                tracing::warn!(error = %e, "Discarding unreadable session file");
                let _ = std::fs::remove_file(&self.session_path);
                None
            }
        }
    }

    async fn sign_in(&self) -> Result<User, AuthError> {
        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AuthError::Failed(e.to_string()))?;
        }
        let content = serde_json::to_string(&self.profile)
            .map_err(|e| AuthError::Failed(e.to_string()))?;
        std::fs::write(&self.session_path, content)
            .map_err(|e| AuthError::Failed(e.to_string()))?;
        tracing::info!(email = %self.profile.email, "Signed in (mock)");
        Ok(self.profile.clone())
    }

    async fn sign_out(&self) {
        let _ = std::fs::remove_file(&self.session_path);
        tracing::info!("Signed out (mock)");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_restore_without_session() {
        let dir = tempfile::tempdir().unwrap();
        let identity = MockIdentity::new(dir.path());
        assert!(identity.restore_session().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_in_persists_session() {
        let dir = tempfile::tempdir().unwrap();
        let identity = MockIdentity::new(dir.path());

        let user = identity.sign_in().await.unwrap();
        assert_eq!(user.email, "demo@example.com");

        let restored = identity.restore_session().await.unwrap();
        assert_eq!(restored, user);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session() {
        let dir = tempfile::tempdir().unwrap();
        let identity = MockIdentity::new(dir.path());

        identity.sign_in().await.unwrap();
        identity.sign_out().await;
        assert!(identity.restore_session().await.is_none());
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let identity = MockIdentity::new(dir.path());
        identity.sign_out().await;
    }

    #[tokio::test]
    async fn test_corrupt_session_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let identity = MockIdentity::new(dir.path());
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();

        assert!(identity.restore_session().await.is_none());
        // The corrupt file was removed.
        assert!(!dir.path().join(SESSION_FILE).exists());
    }

    #[tokio::test]
    async fn test_custom_profile() {
        let dir = tempfile::tempdir().unwrap();
        let identity = MockIdentity::new(dir.path()).with_profile(User {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            picture: String::new(),
        });
        let user = identity.sign_in().await.unwrap();
        assert_eq!(user.name, "Ada");
    }
}
