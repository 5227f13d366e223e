//! Error types for the persistence stores.

use salus_core::SalusError;

/// Errors from the file-backed stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("upload rejected: file has no usable name")]
    EmptyFilename,
    #[error("upload rejected: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
    #[error("upload rejected: extension {0:?} is not allowed")]
    ExtensionNotAllowed(String),
}

impl From<StoreError> for SalusError {
    fn from(err: StoreError) -> Self {
        SalusError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::EmptyFilename;
        assert_eq!(err.to_string(), "upload rejected: file has no usable name");

        let err = StoreError::FileTooLarge {
            size: 2048,
            limit: 1024,
        };
        assert_eq!(
            err.to_string(),
            "upload rejected: 2048 bytes exceeds the 1024 byte limit"
        );

        let err = StoreError::ExtensionNotAllowed(".exe".to_string());
        assert_eq!(
            err.to_string(),
            "upload rejected: extension \".exe\" is not allowed"
        );
    }

    #[test]
    fn test_store_error_converts_to_salus_error() {
        let err = StoreError::FileTooLarge {
            size: 10,
            limit: 5,
        };
        let top: SalusError = err.into();
        assert!(matches!(top, SalusError::Storage(_)));
        assert!(top.to_string().contains("10 bytes"));
    }

    #[test]
    fn test_store_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io_err.into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
