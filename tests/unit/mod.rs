//! Cross-module scenario tests, driven from a YAML mapping definition the
//! way a caller would wire the crate together.

mod planning_scenarios;
mod query_generation;
mod resolution_scenarios;

use relgraph::mapping::{self, RelationalContext};

pub const ORDER_MAPPING: &str = r#"
root:
  table: purchase_order
  id_column: id
  columns:
    - { name: customer, type: text }
    - { name: total, type: double }
paths:
  - path: items
    table: order_item
    cardinality: list
    reverse_column: order_id
    qualifier_column: position
    id_column: id
    columns:
      - { name: product, type: text }
      - { name: quantity, type: integer }
"#;

pub fn order_context() -> RelationalContext {
    let _ = env_logger::builder().is_test(true).try_init();
    mapping::config::from_yaml_str(ORDER_MAPPING).expect("valid mapping definition")
}
