use relgraph::dialect::{mysql, postgres};
use relgraph::mapping::Value;
use relgraph::planner::{plan_save, ChildSet, EntityRow};
use relgraph::sqlgen::{
    generate_schema, generate_single_query, render_change, AliasMap, QueryFilter, QueryOptions,
};

use super::order_context;

#[test]
fn load_by_id_produces_one_join_query_and_an_alias_map() {
    let ctx = order_context();
    let options = QueryOptions {
        filter: Some(QueryFilter::RootId),
        ..QueryOptions::default()
    };
    let query = generate_single_query(&ctx, &postgres(), &options).unwrap();

    assert_eq!(
        query.sql,
        "SELECT \"purchase_order\".\"id\" AS id, \
         \"purchase_order\".\"customer\" AS customer, \
         \"purchase_order\".\"total\" AS total, \
         items.\"id\" AS items__id, \
         items.\"position\" AS items__key, \
         items.\"product\" AS items__product, \
         items.\"quantity\" AS items__quantity \
         FROM \"purchase_order\" \
         LEFT JOIN \"order_item\" items ON items.\"order_id\" = \"purchase_order\".\"id\" \
         WHERE \"purchase_order\".\"id\" = $1"
    );
    assert_eq!(query.markers.len(), 1);

    // result assembly regroups rows through the alias map
    let item_product = query.aliases.get("items__product").unwrap();
    assert_eq!(item_product.path, "items");
    assert_eq!(item_product.column, "product");
}

#[test]
fn alias_map_survives_a_serde_round_trip() -> anyhow::Result<()> {
    let ctx = order_context();
    let query = generate_single_query(&ctx, &postgres(), &QueryOptions::default())?;
    let json = serde_json::to_string(&query.aliases)?;
    let parsed: AliasMap = serde_json::from_str(&json)?;
    assert_eq!(parsed, query.aliases);
    Ok(())
}

#[test]
fn one_aggregate_save_renders_for_two_dialects() {
    let ctx = order_context();
    let root = EntityRow::new().set("customer", "ada").child(
        "items",
        ChildSet::Many(vec![EntityRow::new()
            .set("product", "keyboard")
            .set("quantity", 1)]),
    );
    let change = plan_save(&ctx, &root).unwrap();

    let pg = render_change(&change, &ctx, &postgres()).unwrap();
    assert_eq!(
        pg[1].sql,
        "INSERT INTO \"order_item\" (\"order_id\", \"position\", \"product\", \"quantity\") \
         VALUES ($1, $2, $3, $4)"
    );

    let my = render_change(&change, &ctx, &mysql()).unwrap();
    assert_eq!(
        my[1].sql,
        "INSERT INTO `order_item` (`order_id`, `position`, `product`, `quantity`) \
         VALUES (?, ?, ?, ?)"
    );
    // same bindings either way, only placeholders differ
    let pg_values: Vec<_> = pg[1].bindings.iter().map(|b| &b.value).collect();
    let my_values: Vec<_> = my[1].bindings.iter().map(|b| &b.value).collect();
    assert_eq!(pg_values, my_values);
}

#[test]
fn generated_schema_matches_the_mapping() {
    let ctx = order_context();
    let ddl = generate_schema(&ctx, &postgres()).unwrap();
    assert!(ddl.contains("CREATE TABLE \"purchase_order\""));
    assert!(ddl.contains("\"total\" DOUBLE PRECISION"));
    assert!(ddl.contains("\"quantity\" BIGINT"));
}

#[test]
fn failed_generation_yields_no_partial_output() {
    let ctx = order_context();
    let change = plan_save(
        &ctx,
        &EntityRow::with_id(Value::Integer(1)).child(
            "items",
            ChildSet::Many(vec![EntityRow::with_id(Value::Integer(2))
                .set("product", "keyboard")]),
        ),
    )
    .unwrap();

    // a context missing the `items` path cannot render the child operation
    let bare_ctx = relgraph::mapping::config::from_yaml_str(
        r#"
root:
  table: purchase_order
  id_column: id
  columns:
    - { name: customer, type: text }
"#,
    )
    .unwrap();
    assert!(render_change(&change, &bare_ctx, &postgres()).is_err());
}
