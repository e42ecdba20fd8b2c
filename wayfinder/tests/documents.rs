use serde_json::json;
use wayfinder::{GraphDocument, GraphEditorState, GraphStore, Position};

fn sample() -> GraphStore {
    let mut g = GraphStore::new();
    let a = g.add_node(Position::new(0.0, 0.0)).unwrap();
    let b = g.add_node(Position::new(3.0, 4.0)).unwrap();
    let c = g.add_node(Position::new(10.5, -2.25)).unwrap();
    g.add_search_tag(a, "entrance").unwrap();
    g.add_search_tag(a, "lobby").unwrap();
    g.toggle_waypoint(c).unwrap();
    let ab = g.try_add_edge(a, b).unwrap().unwrap();
    let bc = g.try_add_edge(b, c).unwrap().unwrap();
    g.set_edge_obstructed(bc, true).unwrap();
    g.set_edge_clearance(ab, 2).unwrap();
    g
}

#[test]
fn canonical_wire_shape() {
    let v = sample().to_json_value();
    assert_eq!(
        v["nodes"][0],
        json!({"id": 1, "position": [0.0, 0.0], "isWaypoint": false, "searchTags": ["entrance", "lobby"]})
    );
    assert_eq!(
        v["edges"][0],
        json!({"id": 1, "nodeA": 1, "nodeB": 2, "distance": 5.0, "isObstructed": false, "clearance": 2})
    );
    assert_eq!(v["nodes"][2]["isWaypoint"], true);
    assert_eq!(v["edges"][1]["isObstructed"], true);
}

#[test]
fn roundtrip_preserves_every_field() {
    let g = sample();
    let mut g2 = GraphStore::new();
    g2.from_json_value_strict(g.to_json_value()).unwrap();
    assert_eq!(g2.to_document(), g.to_document());

    let text = serde_json::to_string(&g.to_document()).unwrap();
    let doc: GraphDocument = serde_json::from_str(&text).unwrap();
    assert_eq!(doc, g.to_document());
}

#[test]
fn legacy_field_names_are_normalized() {
    let v = json!({
        "nodes": [
            {"id": "1", "position": [0.0, 0.0], "hasCode": true},
            {"id": 2, "position": [0.0, 2.0], "newTag": "half typed"}
        ],
        "edges": [{"id": 1, "from": 1, "to": 2, "distance": 2.0}]
    });
    let mut g = GraphStore::new();
    g.from_json_value_strict(v).unwrap();
    let n1 = g.node(1).unwrap();
    assert!(n1.is_waypoint);
    assert!(n1.search_tags.is_empty());
    let e = g.edge(1).unwrap();
    assert_eq!((e.node_a, e.node_b), (1, 2));
    assert_eq!(e.clearance.level(), 0);
    assert!(!e.is_obstructed);

    let out = g.to_json_value();
    let edge = out["edges"][0].as_object().unwrap();
    assert!(edge.contains_key("nodeA") && !edge.contains_key("from"));
    let node = out["nodes"][1].as_object().unwrap();
    assert!(!node.contains_key("newTag"));
    assert!(!out["nodes"][0].as_object().unwrap().contains_key("hasCode"));
}

#[test]
fn stale_distances_are_recomputed_on_load() {
    let v = json!({
        "nodes": [
            {"id": 1, "position": [0.0, 0.0], "isWaypoint": false},
            {"id": 2, "position": [6.0, 8.0], "isWaypoint": false}
        ],
        "edges": [{"id": 1, "nodeA": 1, "nodeB": 2, "distance": 123.0}]
    });
    let mut g = GraphStore::new();
    g.from_json_value_strict(v).unwrap();
    assert_eq!(g.edge(1).unwrap().distance, 10.0);
}

#[test]
fn loaded_graph_resets_allocators() {
    let mut g = GraphStore::new();
    for i in 0..6 {
        g.add_node(Position::new(i as f64, 0.0)).unwrap();
    }
    g.remove_node(2).unwrap();

    let v = json!({
        "nodes": [
            {"id": 1, "position": [0.0, 0.0], "isWaypoint": false},
            {"id": 2, "position": [1.0, 0.0], "isWaypoint": false},
            {"id": 3, "position": [2.0, 0.0], "isWaypoint": false}
        ],
        "edges": [{"id": 1, "nodeA": 1, "nodeB": 3, "distance": 2.0}]
    });
    g.from_json_value_strict(v).unwrap();
    assert_eq!(g.add_node(Position::new(5.0, 5.0)).unwrap(), 4);
    assert_eq!(g.try_add_edge(1, 2).unwrap(), Some(2));
}

#[test]
fn sparse_ids_fill_gaps_after_load() {
    let v = json!({
        "nodes": [
            {"id": 1, "position": [0.0, 0.0], "isWaypoint": false},
            {"id": 4, "position": [1.0, 0.0], "isWaypoint": false}
        ],
        "edges": []
    });
    let mut g = GraphStore::new();
    g.from_json_value_strict(v).unwrap();
    assert_eq!(g.add_node(Position::new(0.0, 1.0)).unwrap(), 2);
    assert_eq!(g.add_node(Position::new(0.0, 2.0)).unwrap(), 3);
    assert_eq!(g.add_node(Position::new(0.0, 3.0)).unwrap(), 5);
}

#[test]
fn stored_tags_are_cleaned() {
    let v = json!({
        "nodes": [{"id": 1, "position": [0.0, 0.0], "isWaypoint": false,
                   "searchTags": [" a ", "", "b", "a"]}],
        "edges": []
    });
    let mut g = GraphStore::new();
    g.from_json_value_strict(v).unwrap();
    assert_eq!(g.node(1).unwrap().search_tags, vec!["a", "b"]);
}

fn load_err(v: serde_json::Value) -> &'static str {
    let mut g = sample();
    let before = g.to_document();
    let code = g.from_json_value_strict(v).unwrap_err().code();
    assert_eq!(g.to_document(), before, "state mutated on error");
    code
}

#[test]
fn malformed_documents_are_rejected_whole() {
    let node = |id: u32, lat: f64| json!({"id": id, "position": [lat, 0.0], "isWaypoint": false});

    assert_eq!(load_err(json!({"nodes": "nope", "edges": []})), "json_parse");
    assert_eq!(load_err(json!({"nodes": [{"id": 1}], "edges": []})), "json_parse");
    assert_eq!(
        load_err(json!({"nodes": [node(1, 0.0), node(1, 1.0)], "edges": []})),
        "invalid_structure"
    );
    assert_eq!(
        load_err(json!({"nodes": [node(1, 0.0)],
                        "edges": [{"id": 1, "nodeA": 1, "nodeB": 1, "distance": 0.0}]})),
        "invalid_structure"
    );
    assert_eq!(
        load_err(json!({"nodes": [node(1, 0.0)],
                        "edges": [{"id": 1, "nodeA": 1, "nodeB": 2, "distance": 0.0}]})),
        "invalid_structure"
    );
    assert_eq!(
        load_err(json!({"nodes": [node(1, 0.0), node(2, 1.0)],
                        "edges": [{"id": 1, "nodeA": 1, "nodeB": 2, "distance": 1.0},
                                  {"id": 2, "nodeA": 2, "nodeB": 1, "distance": 1.0}]})),
        "invalid_structure"
    );
    assert_eq!(
        load_err(json!({"nodes": [node(1, 0.0), node(2, 1.0)],
                        "edges": [{"id": 1, "nodeA": 1, "nodeB": 2, "distance": 1.0, "clearance": 7}]})),
        "json_parse"
    );
    assert_eq!(load_err(json!({"nodes": [node(0, 0.0)], "edges": []})), "out_of_bounds");
    assert_eq!(load_err(json!({"nodes": [node(1, 1.0e9)], "edges": []})), "out_of_bounds");
}

#[test]
fn failed_load_keeps_editor_selection() {
    let mut ed = GraphEditorState::new();
    let a = match ed.canvas_click(Position::new(0.0, 0.0), false).unwrap() {
        wayfinder::Outcome::NodeAdded(id) => id,
        other => panic!("{:?}", other),
    };
    ed.node_click(a).unwrap();
    let v = ed.version();
    assert!(ed.load_json_value(json!({"nodes": 1})).is_err());
    assert_eq!(ed.version(), v);
    assert_eq!(ed.selection().pending_node(), Some(a));

    ed.load_json_value(json!({"nodes": [], "edges": []})).unwrap();
    assert_eq!(ed.selection().pending_node(), None);
    assert_eq!(ed.store().node_count(), 0);
}
