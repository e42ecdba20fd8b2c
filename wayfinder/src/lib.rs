pub mod config;
pub mod editor;
pub mod error;
pub mod ids;
pub mod model;
pub mod selection;
pub mod sync;
pub mod view;
pub mod geometry {
    pub mod limits;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod picking;
}
mod json;

pub use config::{EditorConfig, FloorPlan};
pub use editor::{EditorEvent, GraphEditorState, Outcome};
pub use error::{EditorError, Result};
pub use model::{Clearance, Edge, EdgeId, GraphDocument, Node, NodeId, Position};
pub use sync::{GraphBackend, MemoryBackend, TransportError};

use geometry::{limits, tolerance};
use ids::IdAllocator;
use model::pair_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Authoritative node/edge set of one floor-plan graph.
///
/// Every mutation keeps the structural invariants intact: ids are unique per
/// kind, there is at most one edge per unordered node pair, no self-loops,
/// every edge endpoint is a live node, and each edge's `distance` matches its
/// endpoints' current positions. Operations addressed at unknown ids fail
/// without touching state.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    pub(crate) nodes: BTreeMap<NodeId, Node>,
    pub(crate) edges: BTreeMap<EdgeId, Edge>,
    pub(crate) pairs: HashMap<(NodeId, NodeId), EdgeId>, // unordered pair -> edge
    pub(crate) node_ids: IdAllocator,
    pub(crate) edge_ids: IdAllocator,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pick {
    Node { id: NodeId, dist: f64 },
    Edge { id: EdgeId, t: f64, dist: f64 },
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Nodes
    /// Places a node at a finite, in-bounds position. Fails with
    /// `caps_exceeded` once the store holds `MAX_NODES`.
    pub fn add_node(&mut self, position: Position) -> Result<NodeId> {
        check_position(position)?;
        if self.nodes.len() >= limits::MAX_NODES {
            return Err(EditorError::document(
                "caps_exceeded",
                format!("nodes>{}", limits::MAX_NODES),
            ));
        }
        let id = self.node_ids.allocate();
        self.nodes.insert(id, Node::new(id, position));
        log::debug!("node {} added at [{}, {}]", id, position.lat, position.lng);
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(&id).ok_or(EditorError::NodeNotFound(id))
    }

    /// Moves a node and re-derives the distance of every incident edge.
    /// Returns `false` when the position did not actually change.
    pub fn move_node(&mut self, id: NodeId, position: Position) -> Result<bool> {
        check_position(position)?;
        let node = self.node_mut(id)?;
        let old = node.position;
        if tolerance::approx_eq(old.lat, position.lat, tolerance::EPS_POS)
            && tolerance::approx_eq(old.lng, position.lng, tolerance::EPS_POS)
        {
            return Ok(false);
        }
        node.position = position;
        let nodes = &self.nodes;
        for e in self.edges.values_mut().filter(|e| e.touches(id)) {
            if let (Some(a), Some(b)) = (nodes.get(&e.node_a), nodes.get(&e.node_b)) {
                e.distance = a.position.distance_to(&b.position);
            }
        }
        log::debug!("node {} moved to [{}, {}]", id, position.lat, position.lng);
        Ok(true)
    }

    /// Removes a node and every edge incident to it; all their ids go back
    /// to the pools. Returns the removed edge ids.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<EdgeId>> {
        if self.nodes.remove(&id).is_none() {
            return Err(EditorError::NodeNotFound(id));
        }
        let incident = self.incident_edges(id);
        for eid in &incident {
            if let Some(e) = self.edges.remove(eid) {
                self.pairs.remove(&e.pair_key());
                self.edge_ids.release(*eid);
            }
        }
        self.node_ids.release(id);
        log::debug!("node {} removed with {} incident edges", id, incident.len());
        Ok(incident)
    }

    pub fn incident_edges(&self, id: NodeId) -> Vec<EdgeId> {
        self.edges
            .values()
            .filter(|e| e.touches(id))
            .map(|e| e.id)
            .collect()
    }

    // Edges
    /// Connects two nodes. `Ok(None)` for a self-loop or an already connected
    /// pair; both are ordinary gesture rejections, not faults.
    pub fn try_add_edge(&mut self, a: NodeId, b: NodeId) -> Result<Option<EdgeId>> {
        let pa = self.node(a).ok_or(EditorError::NodeNotFound(a))?.position;
        let pb = self.node(b).ok_or(EditorError::NodeNotFound(b))?.position;
        if a == b {
            log::debug!("self-loop on node {} rejected", a);
            return Ok(None);
        }
        if self.pairs.contains_key(&pair_key(a, b)) {
            log::debug!("edge {}-{} already exists", a, b);
            return Ok(None);
        }
        if self.edges.len() >= limits::MAX_EDGES {
            log::warn!("edge cap of {} reached", limits::MAX_EDGES);
            return Ok(None);
        }
        let id = self.edge_ids.allocate();
        let mut edge = Edge::new(id, a, b);
        edge.distance = pa.distance_to(&pb);
        self.edges.insert(id, edge);
        self.pairs.insert(pair_key(a, b), id);
        log::debug!("edge {} added between {} and {}", id, a, b);
        Ok(Some(id))
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn find_edge(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.pairs.get(&pair_key(a, b)).copied()
    }

    fn edge_mut(&mut self, id: EdgeId) -> Result<&mut Edge> {
        self.edges.get_mut(&id).ok_or(EditorError::EdgeNotFound(id))
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Result<()> {
        let e = self.edges.remove(&id).ok_or(EditorError::EdgeNotFound(id))?;
        self.pairs.remove(&e.pair_key());
        self.edge_ids.release(id);
        log::debug!("edge {} removed", id);
        Ok(())
    }

    pub fn set_edge_obstructed(&mut self, id: EdgeId, value: bool) -> Result<()> {
        self.edge_mut(id)?.is_obstructed = value;
        Ok(())
    }

    /// Flips the obstruction flag and returns its new value.
    pub fn toggle_edge_obstructed(&mut self, id: EdgeId) -> Result<bool> {
        let e = self.edge_mut(id)?;
        e.is_obstructed = !e.is_obstructed;
        Ok(e.is_obstructed)
    }

    pub fn set_edge_clearance(&mut self, id: EdgeId, level: u8) -> Result<()> {
        let clearance = Clearance::new(level).ok_or(EditorError::InvalidClearance(level))?;
        self.edge_mut(id)?.clearance = clearance;
        Ok(())
    }

    // Node annotations
    /// Appends a trimmed tag. Blank tags, repeats and tags over the length or
    /// count caps are rejected with `Ok(false)`.
    pub fn add_search_tag(&mut self, id: NodeId, tag: &str) -> Result<bool> {
        let node = self.node_mut(id)?;
        let tag = tag.trim();
        if tag.is_empty()
            || node.has_tag(tag)
            || tag.chars().count() > limits::MAX_TAG_LEN
            || node.search_tags.len() >= limits::MAX_TAGS_PER_NODE
        {
            return Ok(false);
        }
        node.search_tags.push(tag.to_string());
        Ok(true)
    }

    pub fn remove_search_tag(&mut self, id: NodeId, tag: &str) -> Result<bool> {
        let node = self.node_mut(id)?;
        let tag = tag.trim();
        let before = node.search_tags.len();
        node.search_tags.retain(|t| t != tag);
        Ok(node.search_tags.len() != before)
    }

    /// Flips the waypoint flag and returns its new value.
    pub fn toggle_waypoint(&mut self, id: NodeId) -> Result<bool> {
        let node = self.node_mut(id)?;
        node.is_waypoint = !node.is_waypoint;
        Ok(node.is_waypoint)
    }

    // Whole-graph operations
    /// Swaps in a complete node/edge set and reseeds both id pools. The input
    /// is validated first; on error the store is left untouched.
    pub fn replace_all(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<()> {
        let checked = json::check_document(GraphDocument { nodes, edges })?;
        self.node_ids.reseed(checked.nodes.keys().copied());
        self.edge_ids.reseed(checked.edges.keys().copied());
        self.nodes = checked.nodes;
        self.edges = checked.edges;
        self.pairs = checked.pairs;
        log::debug!(
            "graph replaced: {} nodes, {} edges",
            self.nodes.len(),
            self.edges.len()
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = GraphStore::new();
    }

    /// The id `add_node` will hand out next.
    pub fn next_node_id(&self) -> NodeId {
        self.node_ids.peek()
    }

    pub fn next_edge_id(&self) -> EdgeId {
        self.edge_ids.peek()
    }

    // Picking
    pub fn pick(&self, position: Position, tol: f64) -> Option<Pick> {
        algorithms::picking::pick_impl(self, position, tol)
    }

    // JSON
    pub fn to_document(&self) -> GraphDocument {
        json::to_document_impl(self)
    }
    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn from_document(&mut self, doc: GraphDocument) -> Result<()> {
        self.replace_all(doc.nodes, doc.edges)
    }
    pub fn from_json_value_strict(&mut self, v: serde_json::Value) -> Result<()> {
        let doc = json::parse_document(v)?;
        self.from_document(doc)
    }
}

fn check_position(p: Position) -> Result<()> {
    if !p.is_finite() {
        return Err(EditorError::NonFinite("position"));
    }
    if !p.in_bounds() {
        return Err(EditorError::OutOfBounds("position"));
    }
    Ok(())
}
