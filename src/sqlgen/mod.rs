//! SQL text generation: the single-query generator, the per-operation DML
//! renderer and the CREATE TABLE generator. All output is dialect-correct:
//! placeholders, identifier quoting, clause shapes and type names come from
//! the [`Dialect`](crate::dialect::Dialect) descriptor.

pub mod errors;

mod alias;
mod dml;
mod schema;
mod single_query;

pub use alias::{AliasFactory, AliasRole};
pub use dml::{render_change, render_operation, Binding, BoundValue, RenderedSql};
pub use errors::SqlGenError;
pub use schema::generate_schema;
pub use single_query::{
    generate_single_query, AliasEntry, AliasMap, LockMode, Pagination, QueryFilter, QueryOptions,
    SingleQuery,
};
