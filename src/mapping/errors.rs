use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MappingError {
    #[error("Failed to read mapping definition file: {error}")]
    ConfigReadError { error: String },
    #[error("Failed to parse mapping definition: {error}")]
    ConfigParseError { error: String },
    #[error("Invalid mapping definition: {message}")]
    InvalidConfig { message: String },
    #[error("Path `{path}` references unknown parent path `{parent}` (declare parents before children)")]
    UnknownParentPath { path: String, parent: String },
    #[error("Duplicate aggregate path `{path}`")]
    DuplicatePath { path: String },
    #[error("Path `{path}` has cardinality `{cardinality}` but no qualifier column (list/map relations need one)")]
    MissingQualifierColumn { path: String, cardinality: String },
    #[error("Unsupported mapping-definition format `{extension}` (expected yaml, yml or json)")]
    UnsupportedFormat { extension: String },
}

impl MappingError {
    /// Create an InvalidConfig error with context information
    pub fn invalid_config(message: impl Into<String>) -> Self {
        MappingError::InvalidConfig {
            message: message.into(),
        }
    }
}
