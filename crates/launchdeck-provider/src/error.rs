//! Error types for the chat provider seam.

use launchdeck_core::error::LaunchdeckError;

/// Errors from a chat provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Required credentials are absent or unusable. Opening a session with
    /// this error must not crash the host; the caller surfaces a banner and
    /// leaves the conversation degraded.
    #[error("provider not configured: {0}")]
    Configuration(String),
    /// The request could not be sent or was rejected before streaming began.
    #[error("request failed: {0}")]
    Request(String),
    /// The stream broke mid-turn.
    #[error("stream failed: {0}")]
    Stream(String),
    /// A fragment arrived that could not be decoded.
    #[error("malformed fragment: {0}")]
    Decode(String),
}

impl From<ProviderError> for LaunchdeckError {
    fn from(err: ProviderError) -> Self {
        LaunchdeckError::Provider(err.to_string())
    }
}
