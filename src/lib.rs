//! relgraph - aggregate persistence planning for relational databases
//!
//! This crate turns object graphs ("aggregates": a root entity plus all
//! entities reachable from it) into relational persistence plans through:
//! - An entity path model describing tables, columns and cardinalities
//! - Aggregate change planning into FK-safe ordered operation lists
//! - Dialect-aware SQL generation with three bind-marker styles
//! - Single-query multi-table loads with a stable column alias map
//!
//! It performs no I/O: planning and generation are pure, synchronous
//! transformations, and the resulting operation lists and SQL strings are
//! handed to an external execution layer that runs them strictly in order.

pub mod dialect;
pub mod error;
pub mod mapping;
pub mod planner;
pub mod sqlgen;

pub use error::{Error, Result};
