use serde::Serialize;

use crate::model::{EdgeId, NodeId};

/// Edge-creation mode, keyed on the pending node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "node", rename_all = "camelCase")]
pub enum SelectionMode {
    #[default]
    Idle,
    PendingEdge(NodeId),
}

/// What a node click asks the store to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeClick {
    /// The node became the pending edge endpoint.
    Pending(NodeId),
    /// The pending node was clicked again.
    Unchanged,
    /// Second endpoint chosen; the controller is back to idle.
    Connect { from: NodeId, to: NodeId },
}

/// Transient UI selection. Never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionController {
    pending_node: Option<NodeId>,
    selected_edge: Option<EdgeId>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> SelectionMode {
        match self.pending_node {
            Some(id) => SelectionMode::PendingEdge(id),
            None => SelectionMode::Idle,
        }
    }

    pub fn pending_node(&self) -> Option<NodeId> {
        self.pending_node
    }

    pub fn selected_edge(&self) -> Option<EdgeId> {
        self.selected_edge
    }

    pub fn on_node_click(&mut self, id: NodeId) -> NodeClick {
        self.selected_edge = None;
        match self.pending_node {
            None => {
                self.pending_node = Some(id);
                NodeClick::Pending(id)
            }
            Some(pending) if pending == id => NodeClick::Unchanged,
            Some(pending) => {
                self.pending_node = None;
                NodeClick::Connect {
                    from: pending,
                    to: id,
                }
            }
        }
    }

    pub fn on_edge_click(&mut self, id: EdgeId) {
        self.selected_edge = Some(id);
    }

    pub fn on_node_deleted(&mut self) {
        self.clear();
    }

    pub fn on_edge_deleted(&mut self) {
        self.clear();
    }

    pub fn clear(&mut self) {
        self.pending_node = None;
        self.selected_edge = None;
    }
}
