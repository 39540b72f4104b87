use relgraph::mapping::Value;
use relgraph::planner::{
    plan_delete_by_id, plan_save, ChangeKind, ChildSet, EntityRow, Operation, ParentKey, Qualifier,
};

use super::order_context;

#[test]
fn saving_one_new_root_with_two_new_items() {
    let ctx = order_context();
    let root = EntityRow::new()
        .set("customer", "ada")
        .set("total", Value::Double(99.5))
        .child(
            "items",
            ChildSet::Many(vec![
                EntityRow::new().set("product", "keyboard").set("quantity", 1),
                EntityRow::new().set("product", "mouse").set("quantity", 2),
            ]),
        );

    let change = plan_save(&ctx, &root).unwrap();
    assert_eq!(change.kind(), ChangeKind::Save);

    let ops = change.operations();
    assert_eq!(ops.len(), 3);
    assert!(matches!(
        &ops[0],
        Operation::InsertRoot { table, .. } if table == "purchase_order"
    ));
    assert!(matches!(
        &ops[1],
        Operation::Insert {
            table,
            path,
            qualifier: Qualifier::Index(0),
            parent_key: ParentKey::Pending,
            ..
        } if table == "order_item" && path == "items"
    ));
    assert!(matches!(
        &ops[2],
        Operation::Insert { qualifier: Qualifier::Index(1), .. }
    ));
}

#[test]
fn deleting_the_same_aggregate_by_id() {
    let ctx = order_context();
    let change = plan_delete_by_id(&ctx, Value::Integer(7), None);

    let ops = change.operations();
    assert_eq!(ops.len(), 2);
    assert!(matches!(
        &ops[0],
        Operation::DeleteAll { table, path, root_scope: Some(Value::Integer(7)) }
            if table == "order_item" && path == "items"
    ));
    assert!(matches!(
        &ops[1],
        Operation::DeleteRoot { table, .. } if table == "purchase_order"
    ));
}

#[test]
fn save_order_and_delete_order_mirror_each_other() {
    let ctx = order_context();
    let root = EntityRow::new().child(
        "items",
        ChildSet::Many(vec![EntityRow::new().set("product", "keyboard")]),
    );

    let save_paths: Vec<Option<String>> = plan_save(&ctx, &root)
        .unwrap()
        .operations()
        .iter()
        .map(|op| op.path().map(str::to_string))
        .collect();
    let mut delete_paths: Vec<Option<String>> = plan_delete_by_id(&ctx, Value::Integer(1), None)
        .operations()
        .iter()
        .map(|op| op.path().map(str::to_string))
        .collect();
    delete_paths.reverse();
    assert_eq!(save_paths, delete_paths);
}
