//! Error types for DaoScaffold

use thiserror::Error;

/// Result type for DaoScaffold operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for DaoScaffold
#[derive(Error, Debug)]
pub enum Error {
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Module name is missing")]
    MissingModule,

    #[error("Permission error: {0}")]
    PermissionError(String),

    #[error("Validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// Build a parse error that has no meaningful source position
    pub fn parse(message: impl Into<String>) -> Self {
        Error::ParseError {
            line: 0,
            column: 0,
            message: message.into(),
        }
    }

    /// Map an IO error on `path` onto the storage taxonomy
    pub fn from_io(error: std::io::Error, path: &str) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Error::NotFound(path.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                Error::PermissionError(format!("{}: {}", path, error))
            }
            _ => Error::IoError(error),
        }
    }
}

/// Convert Serde JSON errors to DaoScaffold errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to DaoScaffold errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let err = Error::from_io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
            "dao/user",
        );
        assert!(matches!(err, Error::NotFound(ref p) if p == "dao/user"));

        let err = Error::from_io(
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
            "dao",
        );
        assert!(matches!(err, Error::PermissionError(_)));

        let err = Error::from_io(std::io::Error::new(std::io::ErrorKind::Other, "x"), "dao");
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_validation_message_joins_all_problems() {
        let err = Error::ValidationError(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a; b");
    }
}
