use crate::error::{EditorError, Result};
use crate::geometry::limits;
use crate::model::{Edge, EdgeId, GraphDocument, Node, NodeId};
use crate::GraphStore;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};

pub fn to_document_impl(g: &GraphStore) -> GraphDocument {
    GraphDocument {
        nodes: g.nodes.values().cloned().collect(),
        edges: g.edges.values().cloned().collect(),
    }
}

pub fn to_json_impl(g: &GraphStore) -> Value {
    // Model types only hold strings, bools, integers and finite floats.
    serde_json::to_value(to_document_impl(g)).unwrap_or(Value::Null)
}

/// A document that passed every structural check, keyed and ready to swap in.
pub(crate) struct CheckedGraph {
    pub nodes: BTreeMap<NodeId, Node>,
    pub edges: BTreeMap<EdgeId, Edge>,
    pub pairs: HashMap<(NodeId, NodeId), EdgeId>,
}

pub(crate) fn parse_document(v: Value) -> Result<GraphDocument> {
    serde_json::from_value(v).map_err(|e| EditorError::document("json_parse", e.to_string()))
}

pub(crate) fn check_document(doc: GraphDocument) -> Result<CheckedGraph> {
    if doc.nodes.len() > limits::MAX_NODES {
        return Err(EditorError::document(
            "caps_exceeded",
            format!("nodes>{}", limits::MAX_NODES),
        ));
    }
    if doc.edges.len() > limits::MAX_EDGES {
        return Err(EditorError::document(
            "caps_exceeded",
            format!("edges>{}", limits::MAX_EDGES),
        ));
    }
    let mut nodes = BTreeMap::new();
    for mut n in doc.nodes {
        if n.id == 0 || n.id > limits::MAX_ID {
            return Err(EditorError::OutOfBounds("node id"));
        }
        if !n.position.in_bounds() {
            return Err(EditorError::OutOfBounds("node coordinate"));
        }
        n.search_tags = normalize_tags(n.search_tags)?;
        let id = n.id;
        if nodes.insert(id, n).is_some() {
            return Err(EditorError::document(
                "invalid_structure",
                format!("duplicate node id {}", id),
            ));
        }
    }
    let mut edges = BTreeMap::new();
    let mut pairs = HashMap::new();
    for mut e in doc.edges {
        if e.id == 0 || e.id > limits::MAX_ID {
            return Err(EditorError::OutOfBounds("edge id"));
        }
        if e.node_a == e.node_b {
            return Err(EditorError::document(
                "invalid_structure",
                "edge endpoints equal",
            ));
        }
        let (a, b) = match (nodes.get(&e.node_a), nodes.get(&e.node_b)) {
            (Some(a), Some(b)) => (a.position, b.position),
            _ => {
                return Err(EditorError::document(
                    "invalid_structure",
                    format!("edge {} references a missing node", e.id),
                ))
            }
        };
        let fresh = a.distance_to(&b);
        if (e.distance - fresh).abs() > 1e-6 {
            log::debug!("edge {} stored distance {} recomputed to {}", e.id, e.distance, fresh);
        }
        e.distance = fresh;
        if pairs.insert(e.pair_key(), e.id).is_some() {
            return Err(EditorError::document(
                "invalid_structure",
                format!("duplicate edge between {} and {}", e.node_a, e.node_b),
            ));
        }
        let id = e.id;
        if edges.insert(id, e).is_some() {
            return Err(EditorError::document(
                "invalid_structure",
                format!("duplicate edge id {}", id),
            ));
        }
    }
    Ok(CheckedGraph { nodes, edges, pairs })
}

// Trims, drops blanks and repeats, keeps first-seen order.
fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(tags.len());
    for t in tags {
        let t = t.trim();
        if t.is_empty() || !seen.insert(t.to_string()) {
            continue;
        }
        if t.chars().count() > limits::MAX_TAG_LEN {
            return Err(EditorError::document(
                "caps_exceeded",
                format!("tag_len>{}", limits::MAX_TAG_LEN),
            ));
        }
        out.push(t.to_string());
    }
    if out.len() > limits::MAX_TAGS_PER_NODE {
        return Err(EditorError::document(
            "caps_exceeded",
            format!("tags_per_node>{}", limits::MAX_TAGS_PER_NODE),
        ));
    }
    Ok(out)
}
