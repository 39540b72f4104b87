//! Dialect descriptors, bind-marker allocation and the dialect registry.
//!
//! A [`Dialect`] fixes everything about a database that SQL generation needs
//! to know: placeholder style, identifier quoting, limit/offset clause shape,
//! row-lock clause and its position relative to ORDER BY, array-column
//! support and the concrete column type names. Dialects are long-lived
//! values; the registry resolves a connection's product name to one.

pub mod bind_markers;
pub mod errors;
pub mod escaper;
pub mod registry;

mod builtin;

pub use bind_markers::{BindMarker, BindMarkerStrategy, BindMarkers};
pub use builtin::{ansi, mysql, oracle, postgres};
pub use errors::DialectError;
pub use escaper::LikeEscaper;
pub use registry::{DialectProvider, DialectRegistry, NameMatchProvider};

use crate::mapping::{ColumnType, PropertyType};

/// Shape of the pagination clause a dialect understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitStyle {
    /// `LIMIT n OFFSET m`
    LimitOffset,
    /// `OFFSET m ROWS FETCH NEXT n ROWS ONLY`
    OffsetFetch,
}

/// Where the row-lock clause goes relative to ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPosition {
    BeforeOrderBy,
    AfterOrderBy,
}

/// Whether the dialect can store simple-value collections as array columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArraySupport {
    Supported,
    Unsupported,
}

/// Column type names of a dialect's fixed type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTypes {
    pub text: String,
    pub boolean: String,
    pub integer: String,
    pub double: String,
}

/// A database dialect descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    pub name: String,
    pub bind_markers: BindMarkerStrategy,
    /// Identifier quote characters, open and close.
    pub quote: (char, char),
    pub limit_style: LimitStyle,
    pub lock_clause: String,
    pub lock_position: LockPosition,
    pub array_support: ArraySupport,
    pub column_types: ColumnTypes,
    /// Suffix appended to an element type to form an array column type
    /// (`[]` on PostgreSQL). Only meaningful when arrays are supported.
    pub array_suffix: String,
}

impl Dialect {
    /// Fresh per-statement marker allocator in this dialect's style.
    pub fn bind_markers(&self) -> BindMarkers {
        self.bind_markers.create_markers()
    }

    pub fn quote_identifier(&self, identifier: &str) -> String {
        format!("{}{}{}", self.quote.0, identifier, self.quote.1)
    }

    /// Render the pagination clause, or an empty string when neither limit
    /// nor offset is requested.
    pub fn limit_clause(&self, limit: Option<u64>, offset: Option<u64>) -> String {
        match self.limit_style {
            LimitStyle::LimitOffset => match (limit, offset) {
                (Some(l), Some(o)) => format!("LIMIT {} OFFSET {}", l, o),
                (Some(l), None) => format!("LIMIT {}", l),
                (None, Some(o)) => format!("OFFSET {}", o),
                (None, None) => String::new(),
            },
            LimitStyle::OffsetFetch => match (limit, offset) {
                (Some(l), Some(o)) => {
                    format!("OFFSET {} ROWS FETCH NEXT {} ROWS ONLY", o, l)
                }
                (Some(l), None) => format!("FETCH FIRST {} ROWS ONLY", l),
                (None, Some(o)) => format!("OFFSET {} ROWS", o),
                (None, None) => String::new(),
            },
        }
    }

    pub fn column_type(&self, column_type: ColumnType) -> &str {
        match column_type {
            ColumnType::Text => &self.column_types.text,
            ColumnType::Boolean => &self.column_types.boolean,
            ColumnType::Integer => &self.column_types.integer,
            ColumnType::Double => &self.column_types.double,
        }
    }

    /// Map a property's declared type to a column type name. Collections of
    /// simple values become array columns where supported; nested collections
    /// are rejected before any SQL is produced.
    pub fn property_column_type(
        &self,
        column: &str,
        property_type: &PropertyType,
    ) -> Result<String, DialectError> {
        match property_type {
            PropertyType::Simple(ct) => Ok(self.column_type(*ct).to_string()),
            PropertyType::Collection(_) => {
                if self.array_support == ArraySupport::Unsupported {
                    return Err(DialectError::ArraysNotSupported {
                        dialect: self.name.clone(),
                    });
                }
                let element = property_type.simple_element().ok_or_else(|| {
                    DialectError::UnsupportedArrayElementType {
                        column: column.to_string(),
                    }
                })?;
                Ok(format!("{}{}", self.column_type(element), self.array_suffix))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{ColumnType, PropertyType};

    #[test]
    fn limit_clause_shapes() {
        let pg = postgres();
        assert_eq!(pg.limit_clause(Some(10), Some(20)), "LIMIT 10 OFFSET 20");
        assert_eq!(pg.limit_clause(Some(10), None), "LIMIT 10");
        assert_eq!(pg.limit_clause(None, None), "");

        let ora = oracle();
        assert_eq!(
            ora.limit_clause(Some(10), Some(20)),
            "OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY"
        );
        assert_eq!(ora.limit_clause(Some(10), None), "FETCH FIRST 10 ROWS ONLY");
    }

    #[test]
    fn postgres_maps_array_columns() {
        let pg = postgres();
        let labels = PropertyType::Collection(Box::new(PropertyType::Simple(ColumnType::Text)));
        assert_eq!(
            pg.property_column_type("labels", &labels).unwrap(),
            "TEXT[]"
        );
    }

    #[test]
    fn nested_collections_are_rejected() {
        let pg = postgres();
        let nested = PropertyType::Collection(Box::new(PropertyType::Collection(Box::new(
            PropertyType::Simple(ColumnType::Integer),
        ))));
        let err = pg.property_column_type("matrix", &nested).unwrap_err();
        assert!(matches!(
            err,
            DialectError::UnsupportedArrayElementType { .. }
        ));
    }

    #[test]
    fn array_columns_need_dialect_support() {
        let my = mysql();
        let labels = PropertyType::Collection(Box::new(PropertyType::Simple(ColumnType::Text)));
        let err = my.property_column_type("labels", &labels).unwrap_err();
        assert!(matches!(err, DialectError::ArraysNotSupported { .. }));
    }
}
