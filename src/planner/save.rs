//! Save planning.
//!
//! Walks the path model and the object graph in pre-order: root first, then
//! each child element depth-first, siblings in declaration order. A child
//! operation never precedes the operation producing its parent's key. The
//! traversal uses an explicit work stack; aggregate depth never grows the
//! call stack.

use crate::mapping::{AggregatePath, RelationalContext};

use super::change::{AggregateChange, ChangeKind};
use super::errors::PlannerError;
use super::operations::{Operation, ParentKey, Qualifier};
use super::row::{ChildSet, EntityRow, Identifier, RowValues};

struct Frame<'a> {
    path: &'a AggregatePath,
    row: &'a EntityRow,
    parent_key: ParentKey,
    qualifier: Qualifier,
}

pub fn plan_save(
    ctx: &RelationalContext,
    root: &EntityRow,
) -> Result<AggregateChange, PlannerError> {
    let mut change = AggregateChange::new(ChangeKind::Save, ctx.root().table.clone());

    let root_versioned = ctx.root().version_column.is_some();
    let row = row_values(root, root_versioned);
    if is_new(root, root_versioned) {
        change.push(Operation::InsertRoot {
            table: ctx.root().table.clone(),
            row,
        });
    } else {
        change.push(Operation::UpdateRoot {
            table: ctx.root().table.clone(),
            row,
            version_checked: root_versioned,
        });
    }

    let mut stack: Vec<Frame> = Vec::new();
    push_child_frames(ctx, None, root, parent_key_of(&root.id), &mut stack)?;

    while let Some(frame) = stack.pop() {
        let versioned = frame.path.version_column.is_some();
        let row = row_values(frame.row, versioned);
        if is_new(frame.row, versioned) {
            change.push(Operation::Insert {
                table: frame.path.table.clone(),
                path: frame.path.path.clone(),
                row,
                parent_key: frame.parent_key,
                qualifier: frame.qualifier,
            });
        } else {
            change.push(Operation::Update {
                table: frame.path.table.clone(),
                path: frame.path.path.clone(),
                row,
                version_checked: versioned,
            });
        }
        push_child_frames(
            ctx,
            Some(frame.path.path.as_str()),
            frame.row,
            parent_key_of(&frame.row.id),
            &mut stack,
        )?;
    }

    Ok(change)
}

/// A row is new when it has no id, or when its mapping declares a version
/// column and the version is absent or zero.
fn is_new(row: &EntityRow, versioned: bool) -> bool {
    !row.id.is_set() || (versioned && row.version.unwrap_or(0) == 0)
}

fn parent_key_of(id: &Identifier) -> ParentKey {
    match id {
        Identifier::Specified(v) => ParentKey::Literal(v.clone()),
        Identifier::Unset => ParentKey::Pending,
    }
}

/// Snapshot of one entity's column values. For versioned entities the
/// version is normalized to `Some(0)` when absent, so `next_version` is
/// always meaningful.
fn row_values(row: &EntityRow, versioned: bool) -> RowValues {
    RowValues {
        id: row.id.clone(),
        version: if versioned {
            Some(row.version.unwrap_or(0))
        } else {
            None
        },
        columns: row.values.clone(),
    }
}

/// Expand an entity's child sets into frames, pushed in reverse so popping
/// restores declaration order with elements in source iteration order.
fn push_child_frames<'a>(
    ctx: &'a RelationalContext,
    parent: Option<&str>,
    row: &'a EntityRow,
    parent_key: ParentKey,
    stack: &mut Vec<Frame<'a>>,
) -> Result<(), PlannerError> {
    let declared = ctx.children_of(parent);

    for (name, _) in &row.children {
        if !declared.iter().any(|p| p.leaf_name() == name) {
            let full = match parent {
                Some(parent) => format!("{}.{}", parent, name),
                None => name.clone(),
            };
            return Err(PlannerError::UnknownChildPath { path: full });
        }
    }

    for path in declared.into_iter().rev() {
        let Some(children) = row.children_at(path.leaf_name()) else {
            continue;
        };
        let elements = expand(path, children)?;
        for (qualifier, element) in elements.into_iter().rev() {
            stack.push(Frame {
                path,
                row: element,
                parent_key: parent_key.clone(),
                qualifier,
            });
        }
    }
    Ok(())
}

fn expand<'a>(
    path: &AggregatePath,
    children: &'a ChildSet,
) -> Result<Vec<(Qualifier, &'a EntityRow)>, PlannerError> {
    use crate::mapping::Cardinality;

    let mismatch = || PlannerError::CardinalityMismatch {
        path: path.path.clone(),
        expected: format!("{:?}", path.cardinality).to_lowercase(),
    };

    match (path.cardinality, children) {
        (Cardinality::Scalar, ChildSet::One(row)) => Ok(vec![(Qualifier::None, row)]),
        (Cardinality::List, ChildSet::Many(rows)) => Ok(rows
            .iter()
            .enumerate()
            .map(|(i, row)| (Qualifier::Index(i), row))
            .collect()),
        (Cardinality::Set, ChildSet::Many(rows)) => {
            Ok(rows.iter().map(|row| (Qualifier::None, row)).collect())
        }
        (Cardinality::Map, ChildSet::Keyed(entries)) => Ok(entries
            .iter()
            .map(|(key, row)| (Qualifier::Key(key.clone()), row))
            .collect()),
        _ => Err(mismatch()),
    }
}
