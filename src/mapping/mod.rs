//! The entity path model: tables, columns, cardinalities and id/version
//! markers for one aggregate root type.
//!
//! Metadata discovery itself is an external collaborator; this module is the
//! data model it produces, plus a YAML/JSON loader for serialized mapping
//! definitions. A [`RelationalContext`] is built once per root type and
//! reused across planning and SQL generation.

pub mod config;
pub mod errors;

mod context;
mod path;
mod types;

pub use context::{RelationalContext, RootMapping};
pub use errors::MappingError;
pub use path::{AggregatePath, ColumnDef};
pub use types::{Cardinality, ColumnType, PropertyType, Value};
