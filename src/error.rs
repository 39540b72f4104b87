use thiserror::Error;

use crate::dialect::DialectError;
use crate::mapping::MappingError;
use crate::planner::PlannerError;
use crate::sqlgen::SqlGenError;

/// Crate-level error rollup. Component errors convert via `?`; the extra
/// variants are failure kinds the execution layer raises against types
/// defined here.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Dialect(#[from] DialectError),
    #[error(transparent)]
    SqlGen(#[from] SqlGenError),
    /// A version-checked update or delete affected zero rows. Raised by the
    /// execution layer, never retried here; retry policy belongs to the
    /// caller.
    #[error("Optimistic lock failure on table `{table}` (expected version {expected_version})")]
    OptimisticLockFailure { table: String, expected_version: i64 },
}

pub type Result<T> = std::result::Result<T, Error>;
