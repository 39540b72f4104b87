use super::errors::MappingError;
use super::path::{AggregatePath, ColumnDef};

/// Mapping of the aggregate root itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RootMapping {
    pub table: String,
    pub id_column: String,
    pub version_column: Option<String>,
    /// Data columns in declaration order (id/version excluded).
    pub columns: Vec<ColumnDef>,
}

/// The entity path model for one aggregate root type.
///
/// Holds the root mapping plus every [`AggregatePath`] reachable from it, in
/// declaration order. Built once per root type (programmatically or from a
/// YAML/JSON mapping definition) and reused across many planning and
/// generation calls; all lookups borrow from the context.
#[derive(Debug, Clone)]
pub struct RelationalContext {
    root: RootMapping,
    paths: Vec<AggregatePath>,
}

impl RelationalContext {
    pub fn new(root: RootMapping) -> Self {
        Self {
            root,
            paths: Vec::new(),
        }
    }

    pub fn root(&self) -> &RootMapping {
        &self.root
    }

    /// Register a path. Parents must be registered before their children, and
    /// qualified (list/map) relations must declare a qualifier column.
    pub fn add_path(&mut self, path: AggregatePath) -> Result<(), MappingError> {
        if self.paths.iter().any(|p| p.path == path.path) {
            return Err(MappingError::DuplicatePath { path: path.path });
        }
        if let Some(parent) = path.parent() {
            if !self.paths.iter().any(|p| p.path == parent) {
                return Err(MappingError::UnknownParentPath {
                    path: path.path.clone(),
                    parent: parent.to_string(),
                });
            }
        }
        if path.is_qualified() && path.qualifier_column.is_none() {
            return Err(MappingError::MissingQualifierColumn {
                path: path.path.clone(),
                cardinality: format!("{:?}", path.cardinality).to_lowercase(),
            });
        }
        self.paths.push(path);
        Ok(())
    }

    pub fn path(&self, name: &str) -> Option<&AggregatePath> {
        self.paths.iter().find(|p| p.path == name)
    }

    /// Paths in declaration order.
    pub fn declared_paths(&self) -> &[AggregatePath] {
        &self.paths
    }

    /// Direct children of a path (`None` for direct children of the root),
    /// in declaration order.
    pub fn children_of(&self, parent: Option<&str>) -> Vec<&AggregatePath> {
        self.paths
            .iter()
            .filter(|p| p.parent() == parent)
            .collect()
    }

    /// All paths in pre-order: each parent before its children, siblings in
    /// declaration order, depth-first.
    ///
    /// Uses an explicit work stack so traversal order stays testable
    /// independently of aggregate depth.
    pub fn pre_order(&self) -> Vec<&AggregatePath> {
        let mut ordered = Vec::with_capacity(self.paths.len());
        let mut stack: Vec<&AggregatePath> = self.children_of(None).into_iter().rev().collect();
        while let Some(path) = stack.pop() {
            ordered.push(path);
            for child in self.children_of(Some(path.path.as_str())).into_iter().rev() {
                stack.push(child);
            }
        }
        ordered
    }

    /// The chain of paths from a direct child of the root down to `name`,
    /// outermost first. Empty when the path is unknown.
    pub fn ancestry(&self, name: &str) -> Vec<&AggregatePath> {
        let mut chain = Vec::new();
        let mut segments = name.split('.');
        let mut current = String::new();
        for segment in &mut segments {
            if !current.is_empty() {
                current.push('.');
            }
            current.push_str(segment);
            match self.path(&current) {
                Some(p) => chain.push(p),
                None => return Vec::new(),
            }
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::types::{Cardinality, ColumnType, PropertyType};

    fn order_context() -> RelationalContext {
        let mut ctx = RelationalContext::new(RootMapping {
            table: "purchase_order".to_string(),
            id_column: "id".to_string(),
            version_column: None,
            columns: vec![ColumnDef::new(
                "customer",
                PropertyType::Simple(ColumnType::Text),
            )],
        });
        ctx.add_path(AggregatePath {
            path: "items".to_string(),
            table: "order_item".to_string(),
            cardinality: Cardinality::List,
            reverse_column: "order_id".to_string(),
            qualifier_column: Some("position".to_string()),
            id_column: Some("id".to_string()),
            version_column: None,
            columns: vec![ColumnDef::new(
                "product",
                PropertyType::Simple(ColumnType::Text),
            )],
        })
        .unwrap();
        ctx.add_path(AggregatePath {
            path: "items.tags".to_string(),
            table: "item_tag".to_string(),
            cardinality: Cardinality::Set,
            reverse_column: "item_id".to_string(),
            qualifier_column: None,
            id_column: None,
            version_column: None,
            columns: vec![ColumnDef::new(
                "label",
                PropertyType::Simple(ColumnType::Text),
            )],
        })
        .unwrap();
        ctx.add_path(AggregatePath {
            path: "shipment".to_string(),
            table: "shipment".to_string(),
            cardinality: Cardinality::Scalar,
            reverse_column: "order_id".to_string(),
            qualifier_column: None,
            id_column: None,
            version_column: None,
            columns: vec![],
        })
        .unwrap();
        ctx
    }

    #[test]
    fn pre_order_is_depth_first_declaration_order() {
        let ctx = order_context();
        let order: Vec<&str> = ctx.pre_order().iter().map(|p| p.path.as_str()).collect();
        assert_eq!(order, vec!["items", "items.tags", "shipment"]);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut ctx = order_context();
        let err = ctx
            .add_path(AggregatePath {
                path: "missing.child".to_string(),
                table: "x".to_string(),
                cardinality: Cardinality::Set,
                reverse_column: "fk".to_string(),
                qualifier_column: None,
                id_column: None,
                version_column: None,
                columns: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, MappingError::UnknownParentPath { .. }));
    }

    #[test]
    fn qualified_path_requires_qualifier_column() {
        let mut ctx = order_context();
        let err = ctx
            .add_path(AggregatePath {
                path: "notes".to_string(),
                table: "order_note".to_string(),
                cardinality: Cardinality::Map,
                reverse_column: "order_id".to_string(),
                qualifier_column: None,
                id_column: None,
                version_column: None,
                columns: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, MappingError::MissingQualifierColumn { .. }));
    }

    #[test]
    fn ancestry_walks_from_outermost() {
        let ctx = order_context();
        let chain: Vec<&str> = ctx
            .ancestry("items.tags")
            .iter()
            .map(|p| p.path.as_str())
            .collect();
        assert_eq!(chain, vec!["items", "items.tags"]);
        assert!(ctx.ancestry("unknown").is_empty());
    }
}
