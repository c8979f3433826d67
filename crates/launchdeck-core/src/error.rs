use thiserror::Error;

/// Top-level error type for the Launchdeck system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// LaunchdeckError` so that the `?` operator works seamlessly across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LaunchdeckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for LaunchdeckError {
    fn from(err: toml::de::Error) -> Self {
        LaunchdeckError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LaunchdeckError {
    fn from(err: toml::ser::Error) -> Self {
        LaunchdeckError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for LaunchdeckError {
    fn from(err: serde_json::Error) -> Self {
        LaunchdeckError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Launchdeck operations.
pub type Result<T> = std::result::Result<T, LaunchdeckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LaunchdeckError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: LaunchdeckError = io_err.into();
        assert!(matches!(err, LaunchdeckError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(LaunchdeckError, &str)> = vec![
            (
                LaunchdeckError::Provider("stream closed".to_string()),
                "Provider error: stream closed",
            ),
            (
                LaunchdeckError::Capture("microphone unavailable".to_string()),
                "Capture error: microphone unavailable",
            ),
            (
                LaunchdeckError::Auth("consent denied".to_string()),
                "Auth error: consent denied",
            ),
            (
                LaunchdeckError::Persistence("quota exceeded".to_string()),
                "Persistence error: quota exceeded",
            ),
            (
                LaunchdeckError::Chat("send in flight".to_string()),
                "Chat error: send in flight",
            ),
            (
                LaunchdeckError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let err: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(err.is_err());
        let err: LaunchdeckError = err.unwrap_err().into();
        assert!(matches!(err, LaunchdeckError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        assert!(err.is_err());
        let err: LaunchdeckError = err.unwrap_err().into();
        assert!(matches!(err, LaunchdeckError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = LaunchdeckError::Config("test debug".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("test debug"));
    }
}
