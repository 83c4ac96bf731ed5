//! Result Hydration Tests
//!
//! REST-encoded rows come back as records of typed values, with graph
//! entities hydrated from their resource representation.

use crate::common::*;
use serde_json::json;

fn single_row(columns: Vec<&str>, row: Vec<serde_json::Value>) -> Record {
    let (mut tx, transport) = transaction();
    transport.respond(begin_response(1, vec![(columns, vec![row])]));
    tx.append("MATCH ...", None).unwrap();
    let mut results = tx.execute().unwrap();
    results.remove(0).remove(0)
}

fn node_json(id: i64, labels: &[&str], data: serde_json::Value) -> serde_json::Value {
    json!({
        "self": format!("http://localhost:7474/db/data/node/{}", id),
        "labels": format!("http://localhost:7474/db/data/node/{}/labels", id),
        "data": data,
        "metadata": {"id": id, "labels": labels},
    })
}

#[test]
fn scalars_hydrate_by_column() {
    let record = single_row(
        vec!["name", "age", "score", "active", "nothing"],
        vec![json!("Alice"), json!(33), json!(4.5), json!(true), json!(null)],
    );

    assert_eq!(record.get("name"), Some(&Value::String("Alice".into())));
    assert_eq!(record.get("age"), Some(&Value::Int(33)));
    assert_eq!(record.get("score"), Some(&Value::Float(4.5)));
    assert_eq!(record.get("active"), Some(&Value::Bool(true)));
    assert!(record.get("nothing").unwrap().is_null());
    assert_eq!(record.columns(), ["name", "age", "score", "active", "nothing"]);
}

#[test]
fn node_hydrates_with_labels_and_properties() {
    let record = single_row(
        vec!["a"],
        vec![node_json(17, &["Person"], json!({"name": "Alice", "age": 33}))],
    );

    let node = record.get("a").and_then(Value::as_node).unwrap();
    assert_eq!(node.id, 17);
    assert!(node.has_label("Person"));
    assert_eq!(node.get("name"), Some(&Value::String("Alice".into())));
    assert_eq!(node.get("age"), Some(&Value::Int(33)));
}

#[test]
fn relationship_hydrates_with_endpoints() {
    let record = single_row(
        vec!["r"],
        vec![json!({
            "self": "http://localhost:7474/db/data/relationship/9",
            "type": "KNOWS",
            "start": "http://localhost:7474/db/data/node/1",
            "end": "http://localhost:7474/db/data/node/2",
            "data": {"since": 1999},
        })],
    );

    let rel = record.get("r").and_then(Value::as_relationship).unwrap();
    assert_eq!(rel.id, 9);
    assert_eq!(rel.rel_type, "KNOWS");
    assert_eq!((rel.start, rel.end), (1, 2));
    assert_eq!(rel.get("since"), Some(&Value::Int(1999)));
}

#[test]
fn path_hydrates_to_entity_ids() {
    let record = single_row(
        vec!["p"],
        vec![json!({
            "start": "http://localhost:7474/db/data/node/1",
            "end": "http://localhost:7474/db/data/node/3",
            "length": 2,
            "nodes": [
                "http://localhost:7474/db/data/node/1",
                "http://localhost:7474/db/data/node/2",
                "http://localhost:7474/db/data/node/3",
            ],
            "relationships": [
                "http://localhost:7474/db/data/relationship/10",
                "http://localhost:7474/db/data/relationship/11",
            ],
        })],
    );

    let path = record.get("p").and_then(Value::as_path).unwrap();
    assert_eq!(path.nodes, vec![1, 2, 3]);
    assert_eq!(path.relationships, vec![10, 11]);
    assert_eq!(path.len(), 2);
}

#[test]
fn collections_hydrate_recursively() {
    let record = single_row(
        vec!["friends", "summary"],
        vec![
            json!([node_json(1, &[], json!({})), node_json(2, &[], json!({}))]),
            json!({"count": 2, "names": ["Bob", "Carol"]}),
        ],
    );

    let friends = record.get("friends").and_then(Value::as_list).unwrap();
    assert_eq!(friends.len(), 2);
    assert_eq!(friends[1].as_node().map(|n| n.id), Some(2));

    let summary = record.get("summary").and_then(Value::as_map).unwrap();
    assert_eq!(summary.get("count"), Some(&Value::Int(2)));
    assert_eq!(
        summary.get("names"),
        Some(&Value::List(vec!["Bob".into(), "Carol".into()]))
    );
}

#[test]
fn records_of_one_statement_share_columns() {
    let (mut tx, transport) = transaction();
    transport.respond(begin_response(
        1,
        vec![(vec!["x", "y"], vec![vec![json!(1), json!("a")], vec![json!(2), json!("b")]])],
    ));
    tx.append("UNWIND ...", None).unwrap();

    let results = tx.execute().unwrap();

    let rows: Vec<_> = results[0]
        .iter()
        .map(|r| (r.get("x").cloned(), r.get_index(1).cloned()))
        .collect();
    assert_eq!(
        rows,
        vec![
            (Some(Value::Int(1)), Some(Value::String("a".into()))),
            (Some(Value::Int(2)), Some(Value::String("b".into()))),
        ]
    );
    assert_eq!(results[0][0].columns(), results[0][1].columns());
}

#[test]
fn row_width_mismatch_is_a_decode_error() {
    let (mut tx, transport) = transaction();
    transport.respond(begin_response(1, vec![(vec!["x", "y"], vec![vec![json!(1)]])]));
    tx.append("RETURN 1 AS x, 2 AS y", None).unwrap();

    assert!(matches!(tx.execute(), Err(Error::Decode(_))));
}

#[test]
fn record_display_lists_fields_in_order() {
    let record = single_row(vec!["name", "age"], vec![json!("Dan"), json!(5)]);

    assert_eq!(record.to_string(), r#"Record(name=String("Dan"), age=Int(5))"#);
}
