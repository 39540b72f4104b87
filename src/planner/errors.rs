use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PlannerError {
    #[error("Aggregate carries children at `{path}` but the mapping declares no such path")]
    UnknownChildPath { path: String },
    #[error("Children at `{path}` do not match the declared cardinality `{expected}`")]
    CardinalityMismatch { path: String, expected: String },
}
