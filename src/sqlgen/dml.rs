//! Operation rendering.
//!
//! Turns each planned [`Operation`] into dialect-correct SQL text plus an
//! ordered binding list. Version-checked updates and deletes compare the
//! stored version in the WHERE clause; the execution layer treats zero
//! affected rows on those statements as an optimistic-lock failure.

use crate::dialect::{BindMarker, BindMarkers, Dialect};
use crate::mapping::{AggregatePath, RelationalContext, Value};
use crate::planner::{AggregateChange, Operation, ParentKey, Qualifier, RowValues};

use super::errors::SqlGenError;

/// A value bound to one marker of a rendered statement.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Literal(Value),
    /// The key generated for this operation's parent insert earlier in the
    /// same change; substituted by the execution layer before running the
    /// statement.
    PendingParentKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub marker: BindMarker,
    pub value: BoundValue,
}

/// One rendered statement: SQL text and its bindings in marker order.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSql {
    pub sql: String,
    pub bindings: Vec<Binding>,
}

/// Render a whole change in operation order. Fails without partial output:
/// an error on any operation yields no statements at all.
pub fn render_change(
    change: &AggregateChange,
    ctx: &RelationalContext,
    dialect: &Dialect,
) -> Result<Vec<RenderedSql>, SqlGenError> {
    change
        .operations()
        .iter()
        .map(|op| render_operation(op, ctx, dialect))
        .collect()
}

pub fn render_operation(
    op: &Operation,
    ctx: &RelationalContext,
    dialect: &Dialect,
) -> Result<RenderedSql, SqlGenError> {
    match op {
        Operation::InsertRoot { table, row } => render_insert(
            table,
            row,
            Some(ctx.root().id_column.as_str()),
            ctx.root().version_column.as_deref(),
            None,
            dialect,
        ),
        Operation::Insert {
            table,
            path,
            row,
            parent_key,
            qualifier,
        } => {
            let mapped = lookup(ctx, path)?;
            render_insert(
                table,
                row,
                mapped.id_column.as_deref(),
                mapped.version_column.as_deref(),
                Some(FkSpec {
                    reverse_column: &mapped.reverse_column,
                    parent_key,
                    qualifier_column: mapped.qualifier_column.as_deref(),
                    qualifier,
                }),
                dialect,
            )
        }
        Operation::UpdateRoot {
            table,
            row,
            version_checked,
        } => render_update(
            table,
            row,
            &ctx.root().id_column,
            ctx.root().version_column.as_deref(),
            *version_checked,
            dialect,
        ),
        Operation::Update {
            table,
            path,
            row,
            version_checked,
        } => {
            let mapped = lookup(ctx, path)?;
            let id_column = mapped
                .id_column
                .as_deref()
                .ok_or_else(|| SqlGenError::missing_id(path, "render an update"))?;
            render_update(
                table,
                row,
                id_column,
                mapped.version_column.as_deref(),
                *version_checked,
                dialect,
            )
        }
        Operation::DeleteRoot {
            table,
            id,
            expected_version,
        } => render_delete(
            table,
            &ctx.root().id_column,
            id,
            ctx.root().version_column.as_deref(),
            *expected_version,
            dialect,
        ),
        Operation::Delete {
            table,
            path,
            id,
            expected_version,
        } => {
            let mapped = lookup(ctx, path)?;
            let id_column = mapped
                .id_column
                .as_deref()
                .ok_or_else(|| SqlGenError::missing_id(path, "render a delete"))?;
            render_delete(
                table,
                id_column,
                id,
                mapped.version_column.as_deref(),
                *expected_version,
                dialect,
            )
        }
        Operation::DeleteAllRoot { table } => Ok(RenderedSql {
            sql: format!("DELETE FROM {}", dialect.quote_identifier(table)),
            bindings: Vec::new(),
        }),
        Operation::DeleteAll {
            table,
            path,
            root_scope,
        } => render_delete_all(table, path, root_scope.as_ref(), ctx, dialect),
    }
}

fn lookup<'a>(ctx: &'a RelationalContext, path: &str) -> Result<&'a AggregatePath, SqlGenError> {
    ctx.path(path).ok_or_else(|| SqlGenError::UnknownPath {
        path: path.to_string(),
    })
}

fn bind(markers: &BindMarkers, column: &str, value: BoundValue, bindings: &mut Vec<Binding>) -> String {
    let marker = markers.next_with_hint(column);
    let placeholder = marker.placeholder.clone();
    bindings.push(Binding { marker, value });
    placeholder
}

/// Foreign-key and qualifier columns of a child insert.
struct FkSpec<'a> {
    reverse_column: &'a str,
    parent_key: &'a ParentKey,
    qualifier_column: Option<&'a str>,
    qualifier: &'a Qualifier,
}

/// INSERT for root and child rows alike. Child rows start with the foreign
/// key and qualifier columns, then id and version when present, then data
/// columns in declaration order.
fn render_insert(
    table: &str,
    row: &RowValues,
    id_column: Option<&str>,
    version_column: Option<&str>,
    fk: Option<FkSpec<'_>>,
    dialect: &Dialect,
) -> Result<RenderedSql, SqlGenError> {
    let markers = dialect.bind_markers();
    let mut bindings = Vec::new();
    let mut columns = Vec::new();
    let mut placeholders = Vec::new();

    if let Some(fk) = fk {
        let fk_value = match fk.parent_key {
            ParentKey::Literal(v) => BoundValue::Literal(v.clone()),
            ParentKey::Pending => BoundValue::PendingParentKey,
        };
        columns.push(dialect.quote_identifier(fk.reverse_column));
        placeholders.push(bind(&markers, fk.reverse_column, fk_value, &mut bindings));

        if let (Some(qualifier_column), Some(value)) = (fk.qualifier_column, fk.qualifier.value())
        {
            columns.push(dialect.quote_identifier(qualifier_column));
            placeholders.push(bind(
                &markers,
                qualifier_column,
                BoundValue::Literal(value),
                &mut bindings,
            ));
        }
    }

    if let (Some(id_column), Some(id)) = (id_column, row.id.value()) {
        columns.push(dialect.quote_identifier(id_column));
        placeholders.push(bind(
            &markers,
            id_column,
            BoundValue::Literal(id.clone()),
            &mut bindings,
        ));
    }
    if let (Some(version_column), Some(next)) = (version_column, row.next_version()) {
        columns.push(dialect.quote_identifier(version_column));
        placeholders.push(bind(
            &markers,
            version_column,
            BoundValue::Literal(Value::Integer(next)),
            &mut bindings,
        ));
    }

    for (column, value) in &row.columns {
        columns.push(dialect.quote_identifier(column));
        placeholders.push(bind(
            &markers,
            column,
            BoundValue::Literal(value.clone()),
            &mut bindings,
        ));
    }

    Ok(RenderedSql {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            dialect.quote_identifier(table),
            columns.join(", "),
            placeholders.join(", ")
        ),
        bindings,
    })
}

fn render_update(
    table: &str,
    row: &RowValues,
    id_column: &str,
    version_column: Option<&str>,
    version_checked: bool,
    dialect: &Dialect,
) -> Result<RenderedSql, SqlGenError> {
    let id = row
        .id
        .value()
        .ok_or_else(|| SqlGenError::UpdateWithoutId {
            table: table.to_string(),
        })?
        .clone();

    let markers = dialect.bind_markers();
    let mut bindings = Vec::new();
    let mut assignments = Vec::new();

    for (column, value) in &row.columns {
        let placeholder = bind(&markers, column, BoundValue::Literal(value.clone()), &mut bindings);
        assignments.push(format!(
            "{} = {}",
            dialect.quote_identifier(column),
            placeholder
        ));
    }
    if let (true, Some(version_column), Some(next)) =
        (version_checked, version_column, row.next_version())
    {
        let placeholder = bind(
            &markers,
            version_column,
            BoundValue::Literal(Value::Integer(next)),
            &mut bindings,
        );
        assignments.push(format!(
            "{} = {}",
            dialect.quote_identifier(version_column),
            placeholder
        ));
    }

    let id_placeholder = bind(&markers, id_column, BoundValue::Literal(id), &mut bindings);
    let mut sql = format!(
        "UPDATE {} SET {} WHERE {} = {}",
        dialect.quote_identifier(table),
        assignments.join(", "),
        dialect.quote_identifier(id_column),
        id_placeholder
    );

    if let (true, Some(version_column), Some(current)) =
        (version_checked, version_column, row.version)
    {
        let placeholder = bind(
            &markers,
            version_column,
            BoundValue::Literal(Value::Integer(current)),
            &mut bindings,
        );
        sql.push_str(&format!(
            " AND {} = {}",
            dialect.quote_identifier(version_column),
            placeholder
        ));
    }

    Ok(RenderedSql { sql, bindings })
}

fn render_delete(
    table: &str,
    id_column: &str,
    id: &Value,
    version_column: Option<&str>,
    expected_version: Option<i64>,
    dialect: &Dialect,
) -> Result<RenderedSql, SqlGenError> {
    let markers = dialect.bind_markers();
    let mut bindings = Vec::new();

    let id_placeholder = bind(
        &markers,
        id_column,
        BoundValue::Literal(id.clone()),
        &mut bindings,
    );
    let mut sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        dialect.quote_identifier(table),
        dialect.quote_identifier(id_column),
        id_placeholder
    );

    if let (Some(version_column), Some(expected)) = (version_column, expected_version) {
        let placeholder = bind(
            &markers,
            version_column,
            BoundValue::Literal(Value::Integer(expected)),
            &mut bindings,
        );
        sql.push_str(&format!(
            " AND {} = {}",
            dialect.quote_identifier(version_column),
            placeholder
        ));
    }

    Ok(RenderedSql { sql, bindings })
}

/// DELETE for a whole path. Unscoped, the table is simply cleared. Scoped to
/// one root, the statement is chained through the FK ancestry: depth one
/// compares the reverse column to the root id, deeper paths nest an IN
/// subselect per ancestor.
fn render_delete_all(
    table: &str,
    path: &str,
    root_scope: Option<&Value>,
    ctx: &RelationalContext,
    dialect: &Dialect,
) -> Result<RenderedSql, SqlGenError> {
    let Some(root_id) = root_scope else {
        return Ok(RenderedSql {
            sql: format!("DELETE FROM {}", dialect.quote_identifier(table)),
            bindings: Vec::new(),
        });
    };

    let ancestry = ctx.ancestry(path);
    if ancestry.is_empty() {
        return Err(SqlGenError::UnknownPath {
            path: path.to_string(),
        });
    }

    let markers = dialect.bind_markers();
    let mut bindings = Vec::new();

    // innermost condition compares the outermost ancestor's FK to the root id
    let outermost = ancestry[0];
    let placeholder = bind(
        &markers,
        &outermost.reverse_column,
        BoundValue::Literal(root_id.clone()),
        &mut bindings,
    );
    let mut condition = format!(
        "{} = {}",
        dialect.quote_identifier(&outermost.reverse_column),
        placeholder
    );

    for window in ancestry.windows(2) {
        let (parent, child) = (window[0], window[1]);
        let parent_id = parent
            .id_column
            .as_deref()
            .ok_or_else(|| SqlGenError::missing_id(parent.path.as_str(), "scope a delete to one root"))?;
        condition = format!(
            "{} IN (SELECT {} FROM {} WHERE {})",
            dialect.quote_identifier(&child.reverse_column),
            dialect.quote_identifier(parent_id),
            dialect.quote_identifier(&parent.table),
            condition
        );
    }

    Ok(RenderedSql {
        sql: format!(
            "DELETE FROM {} WHERE {}",
            dialect.quote_identifier(table),
            condition
        ),
        bindings,
    })
}
