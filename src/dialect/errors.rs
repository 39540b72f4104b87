use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DialectError {
    #[error("No dialect registered for connection metadata name `{name}`")]
    DialectNotFound { name: String },
    #[error("Invalid bind marker configuration: {message}")]
    InvalidBindMarkerConfiguration { message: String },
    #[error("Array columns are not supported by dialect `{dialect}`")]
    ArraysNotSupported { dialect: String },
    #[error("Unsupported array element type at column `{column}` (nested collections cannot be mapped to an array column)")]
    UnsupportedArrayElementType { column: String },
}

impl DialectError {
    pub fn bind_marker_config(message: impl Into<String>) -> Self {
        DialectError::InvalidBindMarkerConfiguration {
            message: message.into(),
        }
    }
}
