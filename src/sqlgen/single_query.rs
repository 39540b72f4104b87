//! Single-query generation.
//!
//! Builds one SELECT joining the root table to every table reachable via the
//! path model, LEFT JOINs throughout so roots without children are not
//! dropped. Every selected column is aliased with a scheme encoding the
//! owning path and the original column name; the returned [`AliasMap`] lets
//! result-assembly regroup the flat row stream into nested aggregates by
//! root id, in a single round trip.

use serde::{Deserialize, Serialize};

use crate::dialect::{BindMarker, Dialect, LockPosition};
use crate::mapping::RelationalContext;

use super::alias::{AliasFactory, AliasRole};
use super::errors::SqlGenError;

/// Where one generated column alias came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasEntry {
    pub alias: String,
    /// Owning path, empty for root columns.
    pub path: String,
    /// Original column name (the qualifier column for `Key` entries).
    pub column: String,
    pub role: AliasRole,
}

/// Alias → (path, column) mapping handed to result-assembly. Entries are in
/// select-list order, so serialization is stable for callers that cache it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AliasMap {
    entries: Vec<AliasEntry>,
}

impl AliasMap {
    fn push(&mut self, entry: AliasEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn get(&self, alias: &str) -> Option<&AliasEntry> {
        self.entries.iter().find(|e| e.alias == alias)
    }
}

/// Root-row filter of the generated query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryFilter {
    /// `WHERE root.id = <marker>`, the load-by-id case.
    RootId,
    /// `WHERE root.<column> = <marker>`.
    RootColumn(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LockMode {
    #[default]
    None,
    ForUpdate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub filter: Option<QueryFilter>,
    /// Root columns to ORDER BY, in declaration order of the caller.
    pub order_by: Vec<String>,
    pub pagination: Pagination,
    pub lock: LockMode,
}

/// A generated single query: SQL text, the alias map for result assembly,
/// and the bind markers allocated for the filter (in placeholder order).
#[derive(Debug, Clone, PartialEq)]
pub struct SingleQuery {
    pub sql: String,
    pub aliases: AliasMap,
    pub markers: Vec<BindMarker>,
}

pub fn generate_single_query(
    ctx: &RelationalContext,
    dialect: &Dialect,
    options: &QueryOptions,
) -> Result<SingleQuery, SqlGenError> {
    let mut aliases = AliasFactory::new();
    let mut map = AliasMap::default();
    let mut select = Vec::new();
    let mut joins = Vec::new();

    let root = ctx.root();
    let root_ref = dialect.quote_identifier(&root.table);

    let select_root_column = |column: &str, map: &mut AliasMap, aliases: &mut AliasFactory| {
        let alias = aliases.column_alias("", column);
        map.push(AliasEntry {
            alias: alias.clone(),
            path: String::new(),
            column: column.to_string(),
            role: AliasRole::Data,
        });
        format!(
            "{}.{} AS {}",
            root_ref,
            dialect.quote_identifier(column),
            alias
        )
    };

    select.push(select_root_column(&root.id_column, &mut map, &mut aliases));
    if let Some(version) = &root.version_column {
        select.push(select_root_column(version, &mut map, &mut aliases));
    }
    for column in &root.columns {
        select.push(select_root_column(&column.name, &mut map, &mut aliases));
    }

    for path in ctx.pre_order() {
        let table_alias = aliases.table_alias(&path.path);

        // parent side of the join condition
        let (parent_ref, parent_id) = match path.parent() {
            None => (root_ref.clone(), root.id_column.clone()),
            Some(parent_name) => {
                let parent = ctx
                    .path(parent_name)
                    .ok_or_else(|| SqlGenError::UnknownPath {
                        path: parent_name.to_string(),
                    })?;
                let parent_id =
                    parent
                        .id_column
                        .clone()
                        .ok_or_else(|| {
                            SqlGenError::missing_id(parent_name, "join its children")
                        })?;
                (aliases.table_alias(parent_name), parent_id)
            }
        };
        joins.push(format!(
            "LEFT JOIN {} {} ON {}.{} = {}.{}",
            dialect.quote_identifier(&path.table),
            table_alias,
            table_alias,
            dialect.quote_identifier(&path.reverse_column),
            parent_ref,
            dialect.quote_identifier(&parent_id),
        ));

        let select_path_column =
            |column: &str, role: AliasRole, map: &mut AliasMap, aliases: &mut AliasFactory| {
                let alias = match role {
                    AliasRole::Data => aliases.column_alias(&path.path, column),
                    AliasRole::Key => aliases.key_alias(&path.path),
                };
                map.push(AliasEntry {
                    alias: alias.clone(),
                    path: path.path.clone(),
                    column: column.to_string(),
                    role,
                });
                format!(
                    "{}.{} AS {}",
                    table_alias,
                    dialect.quote_identifier(column),
                    alias
                )
            };

        if let Some(id) = &path.id_column {
            select.push(select_path_column(id, AliasRole::Data, &mut map, &mut aliases));
        }
        if let Some(version) = &path.version_column {
            select.push(select_path_column(
                version,
                AliasRole::Data,
                &mut map,
                &mut aliases,
            ));
        }
        if let Some(qualifier) = &path.qualifier_column {
            select.push(select_path_column(
                qualifier,
                AliasRole::Key,
                &mut map,
                &mut aliases,
            ));
        }
        for column in &path.columns {
            select.push(select_path_column(
                &column.name,
                AliasRole::Data,
                &mut map,
                &mut aliases,
            ));
        }
    }

    let markers = dialect.bind_markers();
    let mut allocated = Vec::new();
    let mut sql = format!(
        "SELECT {} FROM {}",
        select.join(", "),
        root_ref
    );
    for join in &joins {
        sql.push(' ');
        sql.push_str(join);
    }

    if let Some(filter) = &options.filter {
        let column = match filter {
            QueryFilter::RootId => root.id_column.clone(),
            QueryFilter::RootColumn(column) => column.clone(),
        };
        let marker = markers.next_with_hint(&column);
        sql.push_str(&format!(
            " WHERE {}.{} = {}",
            root_ref,
            dialect.quote_identifier(&column),
            marker.placeholder
        ));
        allocated.push(marker);
    }

    let lock = match options.lock {
        LockMode::ForUpdate => Some(dialect.lock_clause.as_str()),
        LockMode::None => None,
    };
    if let (Some(lock), LockPosition::BeforeOrderBy) = (lock, dialect.lock_position) {
        sql.push(' ');
        sql.push_str(lock);
    }

    if !options.order_by.is_empty() {
        let order: Vec<String> = options
            .order_by
            .iter()
            .map(|column| format!("{}.{}", root_ref, dialect.quote_identifier(column)))
            .collect();
        sql.push_str(&format!(" ORDER BY {}", order.join(", ")));
    }

    if let (Some(lock), LockPosition::AfterOrderBy) = (lock, dialect.lock_position) {
        sql.push(' ');
        sql.push_str(lock);
    }

    let pagination = dialect.limit_clause(options.pagination.limit, options.pagination.offset);
    if !pagination.is_empty() {
        sql.push(' ');
        sql.push_str(&pagination);
    }

    log::debug!(
        "generated single query for `{}`: {} selected columns, {} joins",
        root.table,
        map.entries().len(),
        joins.len()
    );

    Ok(SingleQuery {
        sql,
        aliases: map,
        markers: allocated,
    })
}
