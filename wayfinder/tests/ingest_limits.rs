use serde_json::json;
use wayfinder::geometry::limits::{MAX_EDGES, MAX_NODES, MAX_TAGS_PER_NODE, MAX_TAG_LEN};
use wayfinder::{Edge, GraphEditorState, GraphStore, Node, Position};

#[test]
fn node_cap_is_enforced() {
    let nodes: Vec<Node> = (1..=(MAX_NODES as u32 + 1))
        .map(|i| Node::new(i, Position::new(0.0, i as f64)))
        .collect();
    let mut g = GraphStore::new();
    let err = g.replace_all(nodes, Vec::new()).unwrap_err();
    assert_eq!(err.code(), "caps_exceeded");
    assert_eq!(g.node_count(), 0);
}

#[test]
fn edge_cap_is_checked_before_structure() {
    let edges: Vec<Edge> = (1..=(MAX_EDGES as u32 + 1))
        .map(|i| Edge::new(i, 1, 2))
        .collect();
    let mut g = GraphStore::new();
    let err = g.replace_all(Vec::new(), edges).unwrap_err();
    assert_eq!(err.code(), "caps_exceeded");
}

#[test]
fn huge_coordinates_are_rejected() {
    let mut g = GraphStore::new();
    let v = json!({"nodes": [{"id": 1, "position": [1e38, 0.0]}], "edges": []});
    let err = g.from_json_value_strict(v).unwrap_err();
    assert_eq!(err.code(), "out_of_bounds");
}

#[test]
fn oversized_ids_are_rejected() {
    let mut g = GraphStore::new();
    let v = json!({"nodes": [{"id": 2_000_000, "position": [0.0, 0.0]}], "edges": []});
    assert_eq!(g.from_json_value_strict(v).unwrap_err().code(), "out_of_bounds");
}

#[test]
fn tag_caps_on_load() {
    let long = "x".repeat(MAX_TAG_LEN + 1);
    let mut g = GraphStore::new();
    let v = json!({"nodes": [{"id": 1, "position": [0.0, 0.0], "searchTags": [long]}], "edges": []});
    assert_eq!(g.from_json_value_strict(v).unwrap_err().code(), "caps_exceeded");

    let many: Vec<String> = (0..=MAX_TAGS_PER_NODE).map(|i| format!("t{}", i)).collect();
    let v = json!({"nodes": [{"id": 1, "position": [0.0, 0.0], "searchTags": many}], "edges": []});
    assert_eq!(g.from_json_value_strict(v).unwrap_err().code(), "caps_exceeded");
}

#[test]
fn tag_caps_on_edit() {
    let mut g = GraphStore::new();
    let id = g.add_node(Position::new(0.0, 0.0)).unwrap();
    assert!(!g.add_search_tag(id, &"y".repeat(MAX_TAG_LEN + 1)).unwrap());
    for i in 0..MAX_TAGS_PER_NODE {
        assert!(g.add_search_tag(id, &format!("room {}", i)).unwrap());
    }
    assert!(!g.add_search_tag(id, "one too many").unwrap());
    assert_eq!(g.node(id).unwrap().search_tags.len(), MAX_TAGS_PER_NODE);
}

#[test]
fn editing_stops_at_the_node_cap() {
    let mut ed = GraphEditorState::new();
    for i in 0..MAX_NODES {
        let pos = Position::new((i / 1000) as f64, (i % 1000) as f64);
        ed.canvas_click(pos, false).unwrap();
    }
    let version = ed.version();
    let err = ed.canvas_click(Position::new(0.5, 0.5), false).unwrap_err();
    assert_eq!(err.code(), "caps_exceeded");
    assert_eq!(ed.store().node_count(), MAX_NODES);
    assert_eq!(ed.version(), version);

    let mut g = GraphStore::new();
    g.from_json_value_strict(ed.store().to_json_value()).unwrap();
    assert_eq!(g.node_count(), MAX_NODES);
}

#[test]
fn editing_stops_at_the_edge_cap() {
    // A complete graph on 776 nodes has 300_700 edges.
    let mut g = GraphStore::new();
    let ids: Vec<u32> = (0..776)
        .map(|i| g.add_node(Position::new((i / 28) as f64, (i % 28) as f64)).unwrap())
        .collect();
    let mut refused = 0;
    for (k, &a) in ids.iter().enumerate() {
        for &b in &ids[k + 1..] {
            if g.try_add_edge(a, b).unwrap().is_none() {
                refused += 1;
            }
        }
    }
    assert_eq!(g.edge_count(), MAX_EDGES);
    assert_eq!(refused, 776 * 775 / 2 - MAX_EDGES);

    let mut g2 = GraphStore::new();
    g2.from_json_value_strict(g.to_json_value()).unwrap();
    assert_eq!(g2.edge_count(), MAX_EDGES);
}
