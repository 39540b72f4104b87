//! The aggregate change planner.
//!
//! Converts a root-plus-children object graph into an ordered list of atomic
//! operations. For saves the path model is visited in pre-order so parents
//! are written before the children referencing them; for deletes in the
//! exact reverse, root last. The returned [`AggregateChange`] is executed
//! strictly in list order by the (external) execution layer.

pub mod errors;

mod change;
mod delete;
mod operations;
mod row;
mod save;

pub use change::{AggregateChange, ChangeKind};
pub use errors::PlannerError;
pub use operations::{Operation, ParentKey, Qualifier};
pub use row::{ChildSet, EntityRow, Identifier, RowValues};

use crate::mapping::{RelationalContext, Value};

/// Plan a save of one aggregate.
pub fn plan_save(
    ctx: &RelationalContext,
    root: &EntityRow,
) -> Result<AggregateChange, PlannerError> {
    let change = save::plan_save(ctx, root)?;
    log::debug!(
        "planned save for `{}`: {} operations",
        change.root_table(),
        change.len()
    );
    Ok(change)
}

/// Plan the deletion of one aggregate by root id.
pub fn plan_delete_by_id(
    ctx: &RelationalContext,
    id: Value,
    expected_version: Option<i64>,
) -> AggregateChange {
    let change = delete::plan_delete_by_id(ctx, id, expected_version);
    log::debug!(
        "planned delete for `{}`: {} operations",
        change.root_table(),
        change.len()
    );
    change
}

/// Plan the deletion of every aggregate of the root type.
pub fn plan_delete_all(ctx: &RelationalContext) -> AggregateChange {
    delete::plan_delete_all(ctx)
}
