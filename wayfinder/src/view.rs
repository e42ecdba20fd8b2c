//! Render snapshot handed to the presentation layer after each event.

use serde::Serialize;

use crate::model::{EdgeId, NodeId, Position};
use crate::selection::SelectionController;
use crate::GraphStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeIcon {
    Node,
    Waypoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeColor {
    Blue,
    Red,
}

/// Which contextual menu the UI should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Menu {
    None,
    Edge(EdgeId),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub id: NodeId,
    pub position: Position,
    pub icon: NodeIcon,
    pub search_tags: Vec<String>,
    pub pending: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeView {
    pub id: EdgeId,
    pub node_a: NodeId,
    pub node_b: NodeId,
    pub from: Position,
    pub to: Position,
    /// Anchor for the clearance label.
    pub midpoint: Position,
    pub color: EdgeColor,
    pub clearance_label: String,
    pub distance_label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub pending_node: Option<NodeId>,
    pub selected_edge: Option<EdgeId>,
    pub menu: Menu,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub version: u64,
    pub bounds: [[f64; 2]; 2],
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub selection: SelectionView,
}

pub fn build_snapshot(
    g: &GraphStore,
    sel: &SelectionController,
    bounds: [[f64; 2]; 2],
    version: u64,
) -> RenderSnapshot {
    let pending = sel.pending_node();
    let selected = sel.selected_edge();
    let nodes = g
        .nodes()
        .map(|n| NodeView {
            id: n.id,
            position: n.position,
            icon: if n.is_waypoint {
                NodeIcon::Waypoint
            } else {
                NodeIcon::Node
            },
            search_tags: n.search_tags.clone(),
            pending: pending == Some(n.id),
        })
        .collect();
    let mut edges = Vec::with_capacity(g.edge_count());
    for e in g.edges() {
        let (from, to) = match (g.node(e.node_a), g.node(e.node_b)) {
            (Some(a), Some(b)) => (a.position, b.position),
            _ => continue,
        };
        edges.push(EdgeView {
            id: e.id,
            node_a: e.node_a,
            node_b: e.node_b,
            from,
            to,
            midpoint: from.midpoint(&to),
            color: if e.is_obstructed {
                EdgeColor::Red
            } else {
                EdgeColor::Blue
            },
            clearance_label: e.clearance.level().to_string(),
            distance_label: format!("{:.1}", e.distance),
            selected: selected == Some(e.id),
        });
    }
    let menu = match selected {
        Some(id) if g.edge(id).is_some() => Menu::Edge(id),
        _ => Menu::None,
    };
    RenderSnapshot {
        version,
        bounds,
        nodes,
        edges,
        selection: SelectionView {
            pending_node: pending,
            selected_edge: selected,
            menu,
        },
    }
}
