//! Built-in dialects.
//!
//! Each constructor returns a fresh descriptor; the registry keeps shared
//! instances in a static table.

use super::bind_markers::BindMarkerStrategy;
use super::{ArraySupport, ColumnTypes, Dialect, LimitStyle, LockPosition};

pub fn postgres() -> Dialect {
    Dialect {
        name: "postgresql".to_string(),
        // validated inputs, constructors cannot fail
        bind_markers: BindMarkerStrategy::indexed("$", 1).expect("valid indexed strategy"),
        quote: ('"', '"'),
        limit_style: LimitStyle::LimitOffset,
        lock_clause: "FOR UPDATE".to_string(),
        lock_position: LockPosition::AfterOrderBy,
        array_support: ArraySupport::Supported,
        column_types: ColumnTypes {
            text: "TEXT".to_string(),
            boolean: "SMALLINT".to_string(),
            integer: "BIGINT".to_string(),
            double: "DOUBLE PRECISION".to_string(),
        },
        array_suffix: "[]".to_string(),
    }
}

pub fn mysql() -> Dialect {
    Dialect {
        name: "mysql".to_string(),
        bind_markers: BindMarkerStrategy::anonymous("?").expect("valid anonymous strategy"),
        quote: ('`', '`'),
        limit_style: LimitStyle::LimitOffset,
        lock_clause: "FOR UPDATE".to_string(),
        lock_position: LockPosition::AfterOrderBy,
        array_support: ArraySupport::Unsupported,
        column_types: ColumnTypes {
            text: "VARCHAR(255)".to_string(),
            boolean: "TINYINT".to_string(),
            integer: "BIGINT".to_string(),
            double: "DOUBLE".to_string(),
        },
        array_suffix: String::new(),
    }
}

pub fn oracle() -> Dialect {
    Dialect {
        name: "oracle".to_string(),
        bind_markers: BindMarkerStrategy::named(":", "p", 30).expect("valid named strategy"),
        quote: ('"', '"'),
        limit_style: LimitStyle::OffsetFetch,
        lock_clause: "FOR UPDATE".to_string(),
        lock_position: LockPosition::AfterOrderBy,
        array_support: ArraySupport::Unsupported,
        column_types: ColumnTypes {
            text: "VARCHAR2(255)".to_string(),
            boolean: "NUMBER(1)".to_string(),
            integer: "NUMBER(19)".to_string(),
            double: "BINARY_DOUBLE".to_string(),
        },
        array_suffix: String::new(),
    }
}

/// Fallback for SQLite, H2 and other ANSI-ish engines.
pub fn ansi() -> Dialect {
    Dialect {
        name: "ansi".to_string(),
        bind_markers: BindMarkerStrategy::anonymous("?").expect("valid anonymous strategy"),
        quote: ('"', '"'),
        limit_style: LimitStyle::LimitOffset,
        lock_clause: "FOR UPDATE".to_string(),
        lock_position: LockPosition::AfterOrderBy,
        array_support: ArraySupport::Unsupported,
        column_types: ColumnTypes {
            text: "TEXT".to_string(),
            boolean: "SMALLINT".to_string(),
            integer: "BIGINT".to_string(),
            double: "DOUBLE PRECISION".to_string(),
        },
        array_suffix: String::new(),
    }
}
