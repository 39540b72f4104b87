use super::operations::Operation;

/// What a change does to its aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Save,
    Delete,
}

/// The ordered operation sequence for one save or delete invocation.
///
/// Order is the primary invariant: the execution layer must run operations
/// strictly in list order, since later operations depend on keys produced by
/// earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateChange {
    kind: ChangeKind,
    root_table: String,
    operations: Vec<Operation>,
}

impl AggregateChange {
    pub fn new(kind: ChangeKind, root_table: impl Into<String>) -> Self {
        Self {
            kind,
            root_table: root_table.into(),
            operations: Vec::new(),
        }
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn root_table(&self) -> &str {
        &self.root_table
    }

    pub(crate) fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}
