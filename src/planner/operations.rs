//! The operation vocabulary emitted by the planner.
//!
//! A closed sum type, matched exhaustively by every consumer (ordering
//! checks, the DML renderer), so adding a variant is a compile-visible
//! change everywhere it matters.

use crate::mapping::Value;

use super::row::RowValues;

/// Foreign-key value a child operation attaches to its parent.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentKey {
    /// The parent's key was known at planning time.
    Literal(Value),
    /// The parent is inserted earlier in the same change; the execution
    /// layer substitutes the generated key before running this operation.
    Pending,
}

/// List index or map key of a qualified (indexed/keyed) relation element.
#[derive(Debug, Clone, PartialEq)]
pub enum Qualifier {
    None,
    Index(usize),
    Key(Value),
}

impl Qualifier {
    /// The qualifier-column value, when there is one.
    pub fn value(&self) -> Option<Value> {
        match self {
            Qualifier::None => None,
            Qualifier::Index(i) => Some(Value::Integer(*i as i64)),
            Qualifier::Key(k) => Some(k.clone()),
        }
    }
}

/// One atomic database operation of an aggregate change.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    InsertRoot {
        table: String,
        row: RowValues,
    },
    Insert {
        table: String,
        path: String,
        row: RowValues,
        parent_key: ParentKey,
        qualifier: Qualifier,
    },
    UpdateRoot {
        table: String,
        row: RowValues,
        version_checked: bool,
    },
    Update {
        table: String,
        path: String,
        row: RowValues,
        version_checked: bool,
    },
    DeleteRoot {
        table: String,
        id: Value,
        /// Version to check in the WHERE clause; `Some` makes the delete
        /// version-checked.
        expected_version: Option<i64>,
    },
    /// Single child entity by its own id. Not produced by the delete
    /// planners (child ids are unknown when deleting by root id); used by
    /// callers that track child ids, e.g. for orphan removal.
    Delete {
        table: String,
        path: String,
        id: Value,
        expected_version: Option<i64>,
    },
    DeleteAllRoot {
        table: String,
    },
    /// Entities reachable via a path. With `root_scope` the delete is
    /// restricted to one aggregate (FK-chained); without it the whole table
    /// is cleared.
    DeleteAll {
        table: String,
        path: String,
        root_scope: Option<Value>,
    },
}

impl Operation {
    pub fn table(&self) -> &str {
        match self {
            Operation::InsertRoot { table, .. }
            | Operation::Insert { table, .. }
            | Operation::UpdateRoot { table, .. }
            | Operation::Update { table, .. }
            | Operation::DeleteRoot { table, .. }
            | Operation::Delete { table, .. }
            | Operation::DeleteAllRoot { table }
            | Operation::DeleteAll { table, .. } => table,
        }
    }

    /// The owning path, absent for root operations.
    pub fn path(&self) -> Option<&str> {
        match self {
            Operation::Insert { path, .. }
            | Operation::Update { path, .. }
            | Operation::Delete { path, .. }
            | Operation::DeleteAll { path, .. } => Some(path),
            Operation::InsertRoot { .. }
            | Operation::UpdateRoot { .. }
            | Operation::DeleteRoot { .. }
            | Operation::DeleteAllRoot { .. } => None,
        }
    }

    /// Whether the renderer must add a stored-version WHERE clause and the
    /// execution layer must treat zero affected rows as an optimistic-lock
    /// failure.
    pub fn version_checked(&self) -> bool {
        match self {
            Operation::UpdateRoot {
                version_checked, ..
            }
            | Operation::Update {
                version_checked, ..
            } => *version_checked,
            Operation::DeleteRoot {
                expected_version, ..
            }
            | Operation::Delete {
                expected_version, ..
            } => expected_version.is_some(),
            Operation::InsertRoot { .. }
            | Operation::Insert { .. }
            | Operation::DeleteAllRoot { .. }
            | Operation::DeleteAll { .. } => false,
        }
    }

    /// The version the caller should write back into the in-memory entity
    /// after this operation succeeds.
    pub fn next_version(&self) -> Option<i64> {
        match self {
            Operation::InsertRoot { row, .. }
            | Operation::Insert { row, .. }
            | Operation::UpdateRoot { row, .. }
            | Operation::Update { row, .. } => row.next_version(),
            Operation::DeleteRoot { .. }
            | Operation::Delete { .. }
            | Operation::DeleteAllRoot { .. }
            | Operation::DeleteAll { .. } => None,
        }
    }
}
