use thiserror::Error;

/// Top-level error type for the Salus system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for SalusError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SalusError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing credential: {0} is not set in the environment")]
    MissingCredential(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Document error: {0}")]
    Document(String),

    #[error("Location error: {0}")]
    Location(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Voice error: {0}")]
    Voice(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SalusError {
    fn from(err: toml::de::Error) -> Self {
        SalusError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SalusError {
    fn from(err: toml::ser::Error) -> Self {
        SalusError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SalusError {
    fn from(err: serde_json::Error) -> Self {
        SalusError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Salus operations.
pub type Result<T> = std::result::Result<T, SalusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SalusError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_missing_credential_display() {
        let err = SalusError::MissingCredential("GEMINI_API_KEY");
        assert_eq!(
            err.to_string(),
            "Missing credential: GEMINI_API_KEY is not set in the environment"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let salus_err: SalusError = io_err.into();
        assert!(matches!(salus_err, SalusError::Io(_)));
        assert!(salus_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let err: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(err.is_err());
        let salus_err: SalusError = err.unwrap_err().into();
        assert!(matches!(salus_err, SalusError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        assert!(err.is_err());
        let salus_err: SalusError = err.unwrap_err().into();
        assert!(matches!(salus_err, SalusError::Serialization(_)));
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(SalusError, &str)> = vec![
            (
                SalusError::Storage("disk full".to_string()),
                "Storage error: disk full",
            ),
            (
                SalusError::Document("bad page".to_string()),
                "Document error: bad page",
            ),
            (
                SalusError::Location("provider down".to_string()),
                "Location error: provider down",
            ),
            (
                SalusError::Chat("model overloaded".to_string()),
                "Chat error: model overloaded",
            ),
            (
                SalusError::Voice("no device".to_string()),
                "Voice error: no device",
            ),
            (
                SalusError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
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
        let err = SalusError::Config("test debug".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Config"));
        assert!(debug_str.contains("test debug"));
    }
}
