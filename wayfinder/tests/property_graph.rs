use proptest::prelude::*;
use std::collections::HashSet;
use wayfinder::{GraphStore, Position};

#[derive(Clone, Debug)]
enum Op {
    AddNode { x: i16, y: i16 },
    MoveNode { idx: u16, dx: i8, dy: i8 },
    RemoveNode { idx: u16 },
    AddEdge { a: u16, b: u16 },
    RemoveEdge { idx: u16 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (any::<i16>(), any::<i16>()).prop_map(|(x, y)| Op::AddNode { x, y }),
        2 => (any::<u16>(), any::<i8>(), any::<i8>()).prop_map(|(idx, dx, dy)| Op::MoveNode {
            idx,
            dx,
            dy,
        }),
        1 => any::<u16>().prop_map(|idx| Op::RemoveNode { idx }),
        3 => (any::<u16>(), any::<u16>()).prop_map(|(a, b)| Op::AddEdge { a, b }),
        1 => any::<u16>().prop_map(|idx| Op::RemoveEdge { idx }),
    ]
}

fn node_ids(g: &GraphStore) -> Vec<u32> {
    g.nodes().map(|n| n.id).collect()
}

fn edge_ids(g: &GraphStore) -> Vec<u32> {
    g.edges().map(|e| e.id).collect()
}

// Smallest positive id not held by a live entity.
fn smallest_unused(live: &[u32]) -> u32 {
    let set: HashSet<u32> = live.iter().copied().collect();
    (1..).find(|id| !set.contains(id)).unwrap()
}

fn apply_op(g: &mut GraphStore, op: Op) {
    let nodes = node_ids(g);
    match op {
        Op::AddNode { x, y } => {
            let expected = smallest_unused(&nodes);
            let id = g.add_node(Position::new(x as f64 * 0.1, y as f64 * 0.1)).unwrap();
            assert_eq!(id, expected, "allocator must fill the lowest gap");
        }
        Op::MoveNode { idx, dx, dy } => {
            if nodes.is_empty() {
                return;
            }
            let nid = nodes[(idx as usize) % nodes.len()];
            let p = g.node(nid).unwrap().position;
            let np = Position::new(p.lat + dx as f64 * 0.05, p.lng + dy as f64 * 0.05);
            g.move_node(nid, np).unwrap();
        }
        Op::RemoveNode { idx } => {
            if nodes.is_empty() {
                return;
            }
            let nid = nodes[(idx as usize) % nodes.len()];
            g.remove_node(nid).unwrap();
            assert!(g.edges().all(|e| !e.touches(nid)));
        }
        Op::AddEdge { a, b } => {
            if nodes.is_empty() {
                return;
            }
            let aid = nodes[(a as usize) % nodes.len()];
            let bid = nodes[(b as usize) % nodes.len()];
            let existed = g.find_edge(aid, bid).is_some();
            let before = g.edge_count();
            let res = g.try_add_edge(aid, bid).unwrap();
            if aid == bid || existed {
                assert_eq!(res, None);
                assert_eq!(g.edge_count(), before);
            } else {
                assert!(res.is_some());
                assert_eq!(g.try_add_edge(bid, aid).unwrap(), None);
            }
        }
        Op::RemoveEdge { idx } => {
            let edges = edge_ids(g);
            if edges.is_empty() {
                return;
            }
            let eid = edges[(idx as usize) % edges.len()];
            g.remove_edge(eid).unwrap();
        }
    }
}

fn check_invariants(g: &GraphStore) {
    let mut pairs = HashSet::new();
    for e in g.edges() {
        assert_ne!(e.node_a, e.node_b, "self-loop");
        let a = g.node(e.node_a).expect("dangling endpoint");
        let b = g.node(e.node_b).expect("dangling endpoint");
        assert!(pairs.insert(e.pair_key()), "duplicate pair");
        let d = a.position.distance_to(&b.position);
        assert!((e.distance - d).abs() <= 1e-9, "stale distance");
    }
    assert_eq!(g.next_node_id(), smallest_unused(&node_ids(g)));
    assert_eq!(g.next_edge_id(), smallest_unused(&edge_ids(g)));
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn edit_sequences_keep_invariants(ops in prop::collection::vec(op_strategy(), 1..120)) {
        let mut g = GraphStore::new();
        for op in ops {
            apply_op(&mut g, op);
            check_invariants(&g);
        }
        let mut g2 = GraphStore::new();
        g2.from_json_value_strict(g.to_json_value()).unwrap();
        prop_assert_eq!(g2.to_document(), g.to_document());
    }
}
