//! Delete planning.
//!
//! Visits the path model in the exact reverse of the save pre-order: deepest
//! descendants first, root last. Rows carrying foreign keys are removed
//! before the rows they reference, so referential-integrity constraints hold
//! without being disabled.

use crate::mapping::{RelationalContext, Value};

use super::change::{AggregateChange, ChangeKind};
use super::operations::Operation;

/// Plan the deletion of one aggregate by its root id.
///
/// Child ids are unknown here, so every child path gets a root-scoped
/// [`Operation::DeleteAll`]. A version check on the root delete is added
/// when the mapping declares a version column and `expected_version` is
/// supplied.
pub fn plan_delete_by_id(
    ctx: &RelationalContext,
    id: Value,
    expected_version: Option<i64>,
) -> AggregateChange {
    let mut change = AggregateChange::new(ChangeKind::Delete, ctx.root().table.clone());
    for path in ctx.pre_order().into_iter().rev() {
        change.push(Operation::DeleteAll {
            table: path.table.clone(),
            path: path.path.clone(),
            root_scope: Some(id.clone()),
        });
    }
    change.push(Operation::DeleteRoot {
        table: ctx.root().table.clone(),
        id,
        expected_version: expected_version.filter(|_| ctx.root().version_column.is_some()),
    });
    change
}

/// Plan the deletion of every aggregate of the root type. No instance ids
/// are involved, so only unconditional `*All*` operations are produced.
pub fn plan_delete_all(ctx: &RelationalContext) -> AggregateChange {
    let mut change = AggregateChange::new(ChangeKind::Delete, ctx.root().table.clone());
    for path in ctx.pre_order().into_iter().rev() {
        change.push(Operation::DeleteAll {
            table: path.table.clone(),
            path: path.path.clone(),
            root_scope: None,
        });
    }
    change.push(Operation::DeleteAllRoot {
        table: ctx.root().table.clone(),
    });
    change
}
