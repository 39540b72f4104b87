use super::types::{Cardinality, PropertyType};

/// A mapped column of an entity, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub property_type: PropertyType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            property_type,
        }
    }
}

/// One property path from the aggregate root to a reachable entity.
///
/// The path is the dot-separated chain of property names (`"items"`,
/// `"items.tags"`). Paths are immutable once registered with a
/// [`RelationalContext`](super::context::RelationalContext); the context owns
/// them for the lifetime of the mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatePath {
    /// Dot-separated property chain from the root, e.g. `"items.tags"`.
    pub path: String,
    /// Table holding entities at this path.
    pub table: String,
    /// Relation cardinality from the owning entity.
    pub cardinality: Cardinality,
    /// Foreign-key column pointing back at the owning entity's table.
    pub reverse_column: String,
    /// Column holding the list index or map key for qualified relations.
    pub qualifier_column: Option<String>,
    /// The entity's own id column, when it has one.
    pub id_column: Option<String>,
    /// Optimistic-lock version column, when the entity declares one.
    pub version_column: Option<String>,
    /// Data columns in declaration order (id/version/fk/qualifier excluded).
    pub columns: Vec<ColumnDef>,
}

impl AggregatePath {
    /// The last segment of the path (the property name on the owning entity).
    pub fn leaf_name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// The owning path, or `None` for direct children of the root.
    pub fn parent(&self) -> Option<&str> {
        self.path.rsplit_once('.').map(|(parent, _)| parent)
    }

    /// Number of segments between the root and this path's entity.
    pub fn depth(&self) -> usize {
        self.path.split('.').count()
    }

    pub fn is_qualified(&self) -> bool {
        self.cardinality.is_qualified()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::types::Cardinality;

    fn path(name: &str) -> AggregatePath {
        AggregatePath {
            path: name.to_string(),
            table: "t".to_string(),
            cardinality: Cardinality::List,
            reverse_column: "owner_id".to_string(),
            qualifier_column: Some("position".to_string()),
            id_column: None,
            version_column: None,
            columns: vec![],
        }
    }

    #[test]
    fn parent_and_leaf() {
        let p = path("items.tags");
        assert_eq!(p.parent(), Some("items"));
        assert_eq!(p.leaf_name(), "tags");
        assert_eq!(p.depth(), 2);

        let direct = path("items");
        assert_eq!(direct.parent(), None);
        assert_eq!(direct.leaf_name(), "items");
        assert_eq!(direct.depth(), 1);
    }
}
