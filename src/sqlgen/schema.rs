//! CREATE TABLE generation.
//!
//! One statement per distinct table in the path model, columns in
//! declaration order, identifier quoting and type names from the dialect.
//! Constraints beyond the primary key, indexes and migrations are out of
//! scope. Id, version and foreign-key columns are integer-typed (generated
//! keys); list qualifiers are integers, map qualifiers text.

use crate::dialect::Dialect;
use crate::mapping::{Cardinality, ColumnDef, ColumnType, RelationalContext};

use super::errors::SqlGenError;

pub fn generate_schema(ctx: &RelationalContext, dialect: &Dialect) -> Result<String, SqlGenError> {
    let mut statements = Vec::new();

    let root = ctx.root();
    let mut columns = vec![format!(
        "{} {}",
        dialect.quote_identifier(&root.id_column),
        dialect.column_type(ColumnType::Integer)
    )];
    if let Some(version) = &root.version_column {
        columns.push(format!(
            "{} {}",
            dialect.quote_identifier(version),
            dialect.column_type(ColumnType::Integer)
        ));
    }
    push_data_columns(&mut columns, &root.columns, dialect)?;
    statements.push(create_table(
        &root.table,
        columns,
        Some(root.id_column.as_str()),
        dialect,
    ));

    for path in ctx.pre_order() {
        let mut columns = Vec::new();
        if let Some(id) = &path.id_column {
            columns.push(format!(
                "{} {}",
                dialect.quote_identifier(id),
                dialect.column_type(ColumnType::Integer)
            ));
        }
        columns.push(format!(
            "{} {}",
            dialect.quote_identifier(&path.reverse_column),
            dialect.column_type(ColumnType::Integer)
        ));
        if let Some(qualifier) = &path.qualifier_column {
            let qualifier_type = match path.cardinality {
                Cardinality::Map => ColumnType::Text,
                _ => ColumnType::Integer,
            };
            columns.push(format!(
                "{} {}",
                dialect.quote_identifier(qualifier),
                dialect.column_type(qualifier_type)
            ));
        }
        if let Some(version) = &path.version_column {
            columns.push(format!(
                "{} {}",
                dialect.quote_identifier(version),
                dialect.column_type(ColumnType::Integer)
            ));
        }
        push_data_columns(&mut columns, &path.columns, dialect)?;
        statements.push(create_table(
            &path.table,
            columns,
            path.id_column.as_deref(),
            dialect,
        ));
    }

    Ok(statements.join("\n\n"))
}

fn push_data_columns(
    out: &mut Vec<String>,
    columns: &[ColumnDef],
    dialect: &Dialect,
) -> Result<(), SqlGenError> {
    for column in columns {
        let type_name = dialect.property_column_type(&column.name, &column.property_type)?;
        out.push(format!(
            "{} {}",
            dialect.quote_identifier(&column.name),
            type_name
        ));
    }
    Ok(())
}

fn create_table(
    table: &str,
    mut columns: Vec<String>,
    primary_key: Option<&str>,
    dialect: &Dialect,
) -> String {
    if let Some(pk) = primary_key {
        columns.push(format!("PRIMARY KEY ({})", dialect.quote_identifier(pk)));
    }
    format!(
        "CREATE TABLE {} (\n    {}\n);",
        dialect.quote_identifier(table),
        columns.join(",\n    ")
    )
}
