//! Error types for speech capture.

use launchdeck_core::error::LaunchdeckError;

/// Errors from the dictation capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// The platform has no speech-recognition primitive.
    #[error("voice recognition is not supported on this platform")]
    Unsupported,
    /// The user denied microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,
    /// Any other recognizer failure.
    #[error("voice capture failed: {0}")]
    Failed(String),
}

impl From<CaptureError> for LaunchdeckError {
    fn from(err: CaptureError) -> Self {
        LaunchdeckError::Capture(err.to_string())
    }
}
