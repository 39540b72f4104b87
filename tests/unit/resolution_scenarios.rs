use std::sync::Arc;

use relgraph::dialect::{
    ansi, postgres, BindMarkerStrategy, DialectError, DialectRegistry, NameMatchProvider,
};

#[test]
fn unrecognized_metadata_name_yields_dialect_not_found() {
    let registry = DialectRegistry::with_builtins();
    let err = registry.resolve("WonderDB 1.0").unwrap_err();
    assert!(matches!(err, DialectError::DialectNotFound { name } if name == "WonderDB 1.0"));
}

#[test]
fn registration_order_decides_between_overlapping_providers() {
    let mut registry = DialectRegistry::with_builtins();

    let mut custom = ansi();
    custom.name = "timescale".to_string();
    registry.register_first(Box::new(NameMatchProvider::new(
        &["postgres"],
        Arc::new(custom),
    )));

    assert_eq!(registry.resolve("PostgreSQL 16").unwrap().name, "timescale");

    // appended providers lose against earlier built-ins
    let mut late = ansi();
    late.name = "late".to_string();
    let mut registry = DialectRegistry::with_builtins();
    registry.register(Box::new(NameMatchProvider::new(&["mysql"], Arc::new(late))));
    assert_eq!(registry.resolve("MySQL 8").unwrap().name, "mysql");
}

#[test]
fn resolved_dialect_hands_out_working_markers() {
    let registry = DialectRegistry::with_builtins();
    let dialect = registry.resolve("PostgreSQL").unwrap();
    let markers = dialect.bind_markers();
    assert_eq!(markers.next().placeholder, "$1");
    assert_eq!(markers.next_with_hint("customer").placeholder, "$2");

    let dialect = registry.resolve("SQLite").unwrap();
    let markers = dialect.bind_markers();
    assert!(!markers.identifiable_placeholders());
    assert_eq!(markers.next().placeholder, "?");
}

#[test]
fn named_strategy_round_trip_through_a_custom_dialect() {
    let mut custom = postgres();
    custom.name = "named-flavor".to_string();
    custom.bind_markers = BindMarkerStrategy::named(":", "p", 5).unwrap();

    let mut registry = DialectRegistry::new();
    registry.register(Box::new(NameMatchProvider::new(
        &["flavor"],
        Arc::new(custom),
    )));

    let dialect = registry.resolve("Named Flavor DB").unwrap();
    let markers = dialect.bind_markers();
    assert_eq!(markers.next().placeholder, ":p0");
    assert_eq!(markers.next_with_hint("longname").placeholder, ":p1lo");
}
