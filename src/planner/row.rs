use crate::mapping::Value;

/// Primary-key state of an entity. Expresses the insert-vs-update decision
/// without nullable primitives.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    /// No value yet; the entity has not been persisted.
    Unset,
    /// A concrete, non-null primary-key value.
    Specified(Value),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Unset
    }
}

impl Identifier {
    pub fn is_set(&self) -> bool {
        matches!(self, Identifier::Specified(_))
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Identifier::Specified(v) => Some(v),
            Identifier::Unset => None,
        }
    }
}

/// One entity instance of the object graph handed to the planner: its id,
/// optimistic-lock version (when the entity declares one), data-column values
/// in declaration order, and reachable children keyed by property name.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityRow {
    pub id: Identifier,
    pub version: Option<i64>,
    pub values: Vec<(String, Value)>,
    pub children: Vec<(String, ChildSet)>,
}

/// Children reachable via one property of an owning entity.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildSet {
    /// Scalar (0..1) reference.
    One(EntityRow),
    /// List or set elements in source iteration order.
    Many(Vec<EntityRow>),
    /// Map entries, key plus element, in source iteration order.
    Keyed(Vec<(Value, EntityRow)>),
}

impl EntityRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: Value) -> Self {
        Self {
            id: Identifier::Specified(id),
            ..Self::default()
        }
    }

    pub fn version(mut self, version: i64) -> Self {
        self.version = Some(version);
        self
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.push((column.into(), value.into()));
        self
    }

    pub fn child(mut self, property: impl Into<String>, children: ChildSet) -> Self {
        self.children.push((property.into(), children));
        self
    }

    pub fn children_at(&self, property: &str) -> Option<&ChildSet> {
        self.children
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, c)| c)
    }
}

/// The column values an operation carries for one entity (children excluded).
#[derive(Debug, Clone, PartialEq)]
pub struct RowValues {
    pub id: Identifier,
    /// `Some` iff the entity's mapping declares a version column; normalized
    /// by the planner so a new versioned entity carries `Some(0)`.
    pub version: Option<i64>,
    pub columns: Vec<(String, Value)>,
}

impl RowValues {
    /// The version the caller should write back into the in-memory entity
    /// after a successful save.
    pub fn next_version(&self) -> Option<i64> {
        self.version.map(|v| v + 1)
    }
}
