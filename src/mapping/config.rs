//! Mapping-definition loading.
//!
//! Entity metadata discovery lives outside this crate; what it produces can be
//! serialized as a mapping definition and loaded here from YAML or JSON:
//!
//! ```yaml
//! root:
//!   table: purchase_order
//!   id_column: id
//!   version_column: version        # optional
//!   columns:
//!     - { name: customer, type: text }
//!     - { name: total, type: double }
//! paths:
//!   - path: items                  # property chain from the root
//!     table: order_item
//!     cardinality: list            # scalar | list | set | map
//!     reverse_column: order_id     # FK back to the owner
//!     qualifier_column: position   # required for list/map
//!     id_column: id                # optional
//!     columns:
//!       - { name: product, type: text }
//!       - { name: labels, type: text, array: true }
//! ```
//!
//! Parents must be declared before their children (`items` before
//! `items.tags`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::context::{RelationalContext, RootMapping};
use super::errors::MappingError;
use super::path::{AggregatePath, ColumnDef};
use super::types::{Cardinality, ColumnType, PropertyType};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingDefinition {
    pub root: RootDefinition,
    #[serde(default)]
    pub paths: Vec<PathDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootDefinition {
    pub table: String,
    pub id_column: String,
    #[serde(default)]
    pub version_column: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDefinition {
    pub path: String,
    pub table: String,
    pub cardinality: Cardinality,
    pub reverse_column: String,
    #[serde(default)]
    pub qualifier_column: Option<String>,
    #[serde(default)]
    pub id_column: Option<String>,
    #[serde(default)]
    pub version_column: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Embedded simple-value collection stored as an array column.
    #[serde(default)]
    pub array: bool,
}

impl ColumnDefinition {
    fn to_column_def(&self) -> ColumnDef {
        let simple = PropertyType::Simple(self.column_type);
        let property_type = if self.array {
            PropertyType::Collection(Box::new(simple))
        } else {
            simple
        };
        ColumnDef::new(self.name.clone(), property_type)
    }
}

impl MappingDefinition {
    /// Validate the definition and build the relational context from it.
    pub fn build(&self) -> Result<RelationalContext, MappingError> {
        if self.root.table.is_empty() {
            return Err(MappingError::invalid_config("root table must not be empty"));
        }
        if self.root.id_column.is_empty() {
            return Err(MappingError::invalid_config(
                "root id_column must not be empty",
            ));
        }
        let mut ctx = RelationalContext::new(RootMapping {
            table: self.root.table.clone(),
            id_column: self.root.id_column.clone(),
            version_column: self.root.version_column.clone(),
            columns: self.root.columns.iter().map(|c| c.to_column_def()).collect(),
        });
        for path in &self.paths {
            if path.reverse_column.is_empty() {
                return Err(MappingError::invalid_config(format!(
                    "path `{}` needs a reverse_column",
                    path.path
                )));
            }
            ctx.add_path(AggregatePath {
                path: path.path.clone(),
                table: path.table.clone(),
                cardinality: path.cardinality,
                reverse_column: path.reverse_column.clone(),
                qualifier_column: path.qualifier_column.clone(),
                id_column: path.id_column.clone(),
                version_column: path.version_column.clone(),
                columns: path.columns.iter().map(|c| c.to_column_def()).collect(),
            })?;
        }
        Ok(ctx)
    }
}

pub fn from_yaml_str(yaml: &str) -> Result<RelationalContext, MappingError> {
    let definition: MappingDefinition =
        serde_yaml::from_str(yaml).map_err(|e| MappingError::ConfigParseError {
            error: e.to_string(),
        })?;
    definition.build()
}

pub fn from_json_str(json: &str) -> Result<RelationalContext, MappingError> {
    let definition: MappingDefinition =
        serde_json::from_str(json).map_err(|e| MappingError::ConfigParseError {
            error: e.to_string(),
        })?;
    definition.build()
}

/// Load a mapping definition from a `.yaml`/`.yml` or `.json` file.
pub fn from_file(path: impl AsRef<Path>) -> Result<RelationalContext, MappingError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let content = fs::read_to_string(path).map_err(|e| MappingError::ConfigReadError {
        error: format!("{}: {}", path.display(), e),
    })?;
    match extension.as_str() {
        "yaml" | "yml" => from_yaml_str(&content),
        "json" => from_json_str(&content),
        other => Err(MappingError::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}
