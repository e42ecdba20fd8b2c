use crate::geometry::math::seg_distance_sq;
use crate::model::Position;
use crate::{GraphStore, Pick};

/// Nodes win over edges; among candidates the closest one inside `tol` wins.
pub fn pick_impl(g: &GraphStore, p: Position, tol: f64) -> Option<Pick> {
    let tol2 = tol * tol;
    let mut best_node: Option<(u32, f64)> = None;
    for n in g.nodes.values() {
        let dlat = n.position.lat - p.lat;
        let dlng = n.position.lng - p.lng;
        let d2 = dlat * dlat + dlng * dlng;
        if d2 <= tol2 && best_node.map_or(true, |(_, bd)| d2 < bd) {
            best_node = Some((n.id, d2));
        }
    }
    if let Some((id, d2)) = best_node {
        return Some(Pick::Node { id, dist: d2.sqrt() });
    }
    let mut best_edge: Option<(u32, f64, f64)> = None;
    for e in g.edges.values() {
        let (a, b) = match (g.nodes.get(&e.node_a), g.nodes.get(&e.node_b)) {
            (Some(a), Some(b)) => (a.position, b.position),
            _ => continue,
        };
        let (d2, t) = seg_distance_sq(p.lat, p.lng, a.lat, a.lng, b.lat, b.lng);
        if d2 <= tol2 && best_edge.map_or(true, |(_, bd, _)| d2 < bd) {
            best_edge = Some((e.id, d2, t));
        }
    }
    best_edge.map(|(id, d2, t)| Pick::Edge { id, t, dist: d2.sqrt() })
}
