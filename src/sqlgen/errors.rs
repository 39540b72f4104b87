use thiserror::Error;

use crate::dialect::DialectError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SqlGenError {
    #[error(transparent)]
    Dialect(#[from] DialectError),
    #[error("Operation references path `{path}` which the mapping does not declare")]
    UnknownPath { path: String },
    #[error("Entities at `{target}` have no id column; required to {purpose}")]
    MissingIdColumn { target: String, purpose: String },
    #[error("Update on table `{table}` without a specified id")]
    UpdateWithoutId { table: String },
}

impl SqlGenError {
    pub fn missing_id(target: impl Into<String>, purpose: impl Into<String>) -> Self {
        SqlGenError::MissingIdColumn {
            target: target.into(),
            purpose: purpose.into(),
        }
    }
}
