use std::collections::HashMap;

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::model::{EdgeId, GraphDocument, NodeId, Position};
use crate::selection::{NodeClick, SelectionController};
use crate::sync::GraphBackend;
use crate::view::{build_snapshot, RenderSnapshot};
use crate::{GraphStore, Pick};

/// User gestures routed into the editor by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// `claimed` is set when a control inside a popup already consumed the
    /// click; such clicks never create nodes.
    CanvasClick { position: Position, claimed: bool },
    NodeClick(NodeId),
    NodeDragEnd { id: NodeId, position: Position },
    EdgeClick(EdgeId),
    DeleteNode(NodeId),
    DeleteSelectedEdge,
    ToggleObstructed(EdgeId),
    SetClearance { id: EdgeId, level: u8 },
    ToggleWaypoint(NodeId),
    AddSearchTag { id: NodeId, tag: String },
    RemoveSearchTag { id: NodeId, tag: String },
    ClearSelection,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    NodeAdded(NodeId),
    NodePending(NodeId),
    EdgeAdded(EdgeId),
    EdgeSelected(EdgeId),
    NodeMoved(NodeId),
    NodeDeleted { id: NodeId, edges: Vec<EdgeId> },
    EdgeDeleted(EdgeId),
    EdgeUpdated(EdgeId),
    NodeUpdated(NodeId),
    SelectionCleared,
    /// Rejected gesture or no-op; nothing to redraw.
    Unchanged,
}

/// The whole editing session: graph, selection and UI-local tag drafts.
#[derive(Clone, Debug)]
pub struct GraphEditorState {
    store: GraphStore,
    selection: SelectionController,
    tag_drafts: HashMap<NodeId, String>,
    config: EditorConfig,
    version: u64,
}

impl Default for GraphEditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphEditorState {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        GraphEditorState {
            store: GraphStore::new(),
            selection: SelectionController::new(),
            tag_drafts: HashMap::new(),
            config,
            version: 1,
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Increases on every change that needs a redraw.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    pub fn handle(&mut self, event: EditorEvent) -> Result<Outcome> {
        let res = match event {
            EditorEvent::CanvasClick { position, claimed } => self.canvas_click(position, claimed),
            EditorEvent::NodeClick(id) => self.node_click(id),
            EditorEvent::NodeDragEnd { id, position } => self.node_drag_end(id, position),
            EditorEvent::EdgeClick(id) => self.edge_click(id),
            EditorEvent::DeleteNode(id) => self.delete_node(id),
            EditorEvent::DeleteSelectedEdge => self.delete_selected_edge(),
            EditorEvent::ToggleObstructed(id) => self.toggle_edge_obstructed(id),
            EditorEvent::SetClearance { id, level } => self.set_edge_clearance(id, level),
            EditorEvent::ToggleWaypoint(id) => self.toggle_waypoint(id),
            EditorEvent::AddSearchTag { id, tag } => self.add_search_tag(id, &tag),
            EditorEvent::RemoveSearchTag { id, tag } => self.remove_search_tag(id, &tag),
            EditorEvent::ClearSelection => Ok(self.clear_selection()),
        };
        if let Err(e) = &res {
            if e.is_referential() {
                log::warn!("event addressed a missing entity: {}", e);
            }
        }
        res
    }

    // Gestures
    pub fn canvas_click(&mut self, position: Position, claimed: bool) -> Result<Outcome> {
        if claimed {
            return Ok(Outcome::Unchanged);
        }
        if self.config.restrict_to_plan
            && position.is_finite()
            && !self.config.floor_plan.contains(position)
        {
            log::debug!("canvas click outside the floor plan ignored");
            return Ok(Outcome::Unchanged);
        }
        let id = self.store.add_node(position)?;
        self.bump();
        Ok(Outcome::NodeAdded(id))
    }

    pub fn node_click(&mut self, id: NodeId) -> Result<Outcome> {
        if !self.store.contains_node(id) {
            return Err(EditorError::NodeNotFound(id));
        }
        let had_edge = self.selection.selected_edge().is_some();
        let out = match self.selection.on_node_click(id) {
            NodeClick::Pending(id) => Outcome::NodePending(id),
            NodeClick::Unchanged if had_edge => Outcome::SelectionCleared,
            NodeClick::Unchanged => return Ok(Outcome::Unchanged),
            NodeClick::Connect { from, to } => match self.store.try_add_edge(from, to)? {
                Some(eid) => Outcome::EdgeAdded(eid),
                None => Outcome::SelectionCleared,
            },
        };
        self.bump();
        Ok(out)
    }

    pub fn node_drag_end(&mut self, id: NodeId, position: Position) -> Result<Outcome> {
        if !self.store.move_node(id, position)? {
            return Ok(Outcome::Unchanged);
        }
        self.bump();
        Ok(Outcome::NodeMoved(id))
    }

    pub fn edge_click(&mut self, id: EdgeId) -> Result<Outcome> {
        if self.store.edge(id).is_none() {
            return Err(EditorError::EdgeNotFound(id));
        }
        self.selection.on_edge_click(id);
        self.bump();
        Ok(Outcome::EdgeSelected(id))
    }

    pub fn delete_node(&mut self, id: NodeId) -> Result<Outcome> {
        let edges = self.store.remove_node(id)?;
        self.selection.on_node_deleted();
        self.tag_drafts.remove(&id);
        self.bump();
        Ok(Outcome::NodeDeleted { id, edges })
    }

    /// Deletes the edge picked by the last edge click, if any.
    pub fn delete_selected_edge(&mut self) -> Result<Outcome> {
        match self.selection.selected_edge() {
            Some(id) => self.delete_edge(id),
            None => Ok(Outcome::Unchanged),
        }
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Result<Outcome> {
        self.store.remove_edge(id)?;
        self.selection.on_edge_deleted();
        self.bump();
        Ok(Outcome::EdgeDeleted(id))
    }

    pub fn toggle_edge_obstructed(&mut self, id: EdgeId) -> Result<Outcome> {
        self.store.toggle_edge_obstructed(id)?;
        self.bump();
        Ok(Outcome::EdgeUpdated(id))
    }

    pub fn set_edge_obstructed(&mut self, id: EdgeId, value: bool) -> Result<Outcome> {
        self.store.set_edge_obstructed(id, value)?;
        self.bump();
        Ok(Outcome::EdgeUpdated(id))
    }

    pub fn set_edge_clearance(&mut self, id: EdgeId, level: u8) -> Result<Outcome> {
        self.store.set_edge_clearance(id, level)?;
        self.bump();
        Ok(Outcome::EdgeUpdated(id))
    }

    pub fn toggle_waypoint(&mut self, id: NodeId) -> Result<Outcome> {
        self.store.toggle_waypoint(id)?;
        self.bump();
        Ok(Outcome::NodeUpdated(id))
    }

    pub fn add_search_tag(&mut self, id: NodeId, tag: &str) -> Result<Outcome> {
        if !self.store.add_search_tag(id, tag)? {
            return Ok(Outcome::Unchanged);
        }
        self.bump();
        Ok(Outcome::NodeUpdated(id))
    }

    pub fn remove_search_tag(&mut self, id: NodeId, tag: &str) -> Result<Outcome> {
        if !self.store.remove_search_tag(id, tag)? {
            return Ok(Outcome::Unchanged);
        }
        self.bump();
        Ok(Outcome::NodeUpdated(id))
    }

    pub fn clear_selection(&mut self) -> Outcome {
        if self.selection.pending_node().is_none() && self.selection.selected_edge().is_none() {
            return Outcome::Unchanged;
        }
        self.selection.clear();
        self.bump();
        Outcome::SelectionCleared
    }

    /// Resolves a raw canvas coordinate against the graph using the
    /// configured hit radius.
    pub fn pick(&self, position: Position) -> Option<Pick> {
        self.store.pick(position, self.config.pick_tolerance)
    }

    // Tag drafts (text typed into a node's tag box, not yet committed)
    pub fn set_tag_draft(&mut self, id: NodeId, text: &str) -> Result<()> {
        if !self.store.contains_node(id) {
            return Err(EditorError::NodeNotFound(id));
        }
        self.tag_drafts.insert(id, text.to_string());
        Ok(())
    }

    pub fn tag_draft(&self, id: NodeId) -> &str {
        self.tag_drafts.get(&id).map(String::as_str).unwrap_or("")
    }

    /// Adds the node's draft as a tag; the draft is cleared only when the tag
    /// was accepted.
    pub fn commit_tag_draft(&mut self, id: NodeId) -> Result<Outcome> {
        let draft = self.tag_drafts.get(&id).cloned().unwrap_or_default();
        let out = self.add_search_tag(id, &draft)?;
        if out != Outcome::Unchanged {
            self.tag_drafts.remove(&id);
        }
        Ok(out)
    }

    /// Drops the whole graph, selection and drafts. Id pools start over.
    pub fn clear(&mut self) {
        self.store.clear();
        self.selection.clear();
        self.tag_drafts.clear();
        self.bump();
    }

    // Documents
    pub fn document(&self) -> GraphDocument {
        self.store.to_document()
    }

    /// Replaces the whole graph. On error nothing changes, selection included.
    pub fn load_document(&mut self, doc: GraphDocument) -> Result<()> {
        self.store.from_document(doc)?;
        self.selection.clear();
        self.tag_drafts.clear();
        self.bump();
        Ok(())
    }

    pub fn load_json_value(&mut self, v: serde_json::Value) -> Result<()> {
        let doc = serde_json::from_value(v)
            .map_err(|e| EditorError::document("json_parse", e.to_string()))?;
        self.load_document(doc)
    }

    // Backend sync
    pub fn upload<B: GraphBackend + ?Sized>(&self, backend: &mut B) -> Result<()> {
        let doc = self.document();
        backend.upload(&doc).map_err(|e| {
            log::error!("failed to upload graph data: {}", e);
            EditorError::from(e)
        })?;
        log::info!(
            "uploaded graph: {} nodes, {} edges",
            doc.nodes.len(),
            doc.edges.len()
        );
        Ok(())
    }

    pub fn download<B: GraphBackend + ?Sized>(&mut self, backend: &mut B) -> Result<()> {
        let doc = backend.download().map_err(|e| {
            log::error!("failed to download graph data: {}", e);
            EditorError::from(e)
        })?;
        if let Err(e) = self.load_document(doc) {
            log::warn!("downloaded graph rejected ({}): {}", e.code(), e);
            return Err(e);
        }
        log::info!(
            "downloaded graph: {} nodes, {} edges",
            self.store.node_count(),
            self.store.edge_count()
        );
        Ok(())
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        build_snapshot(
            &self.store,
            &self.selection,
            self.config.floor_plan.bounds(),
            self.version,
        )
    }
}
