use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical column types used by the schema generator's fixed type table.
///
/// Dialects map these to their own type names (e.g. `Boolean` becomes the
/// smallest integer type a database offers when it has no native boolean).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Boolean,
    Integer,
    Double,
}

/// Declared type of a mapped property.
///
/// `Collection` models embedded simple-value collections stored as array
/// columns (where the dialect supports them). Nested collections are
/// representable here but rejected by every dialect at generation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    Simple(ColumnType),
    Collection(Box<PropertyType>),
}

impl PropertyType {
    /// The element type of a collection, if this is a single-level collection
    /// of simple values.
    pub fn simple_element(&self) -> Option<ColumnType> {
        match self {
            PropertyType::Collection(inner) => match inner.as_ref() {
                PropertyType::Simple(ct) => Some(*ct),
                PropertyType::Collection(_) => None,
            },
            PropertyType::Simple(_) => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, PropertyType::Collection(_))
    }
}

/// Cardinality of a relation from an owning entity to a reachable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Single referenced entity (0..1).
    Scalar,
    /// Ordered collection; the element position is stored in a qualifier
    /// column.
    List,
    /// Unordered collection; no qualifier column.
    Set,
    /// Keyed collection; the key is stored in a qualifier column.
    Map,
}

impl Cardinality {
    /// Whether relations of this cardinality carry a qualifier (index/key)
    /// column.
    pub fn is_qualified(&self) -> bool {
        matches!(self, Cardinality::List | Cardinality::Map)
    }

    pub fn is_collection(&self) -> bool {
        !matches!(self, Cardinality::Scalar)
    }
}

/// Owned SQL value model used for entity rows and statement bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    Text(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::Text(s) => write!(f, "{}", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
