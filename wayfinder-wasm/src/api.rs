use crate::error;
use crate::interop::{edge_columns, id_array, node_columns, object};
use crate::Editor;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wayfinder::{EditorConfig, EditorError, Outcome, Position};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Routes `log` records to the browser console. `level` is one of
/// error/warn/info/debug/trace; anything else means info. Safe to call twice.
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let level = match level.to_ascii_lowercase().as_str() {
        "error" => log::Level::Error,
        "warn" => log::Level::Warn,
        "debug" => log::Level::Debug,
        "trace" => log::Level::Trace,
        _ => log::Level::Info,
    };
    if console_log::init_with_level(level).is_err() {
        log::set_max_level(level.to_level_filter());
    }
}

fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    let ser = serde_wasm_bindgen::Serializer::json_compatible();
    v.serialize(&ser).unwrap_or(JsValue::NULL)
}

fn outcome_to_js(out: &Outcome) -> JsValue {
    let (kind, id) = match out {
        Outcome::NodeAdded(id) => ("nodeAdded", Some(*id)),
        Outcome::NodePending(id) => ("nodePending", Some(*id)),
        Outcome::EdgeAdded(id) => ("edgeAdded", Some(*id)),
        Outcome::EdgeSelected(id) => ("edgeSelected", Some(*id)),
        Outcome::NodeMoved(id) => ("nodeMoved", Some(*id)),
        Outcome::NodeDeleted { id, edges } => {
            return object(&[
                ("kind", JsValue::from_str("nodeDeleted")),
                ("id", JsValue::from_f64(*id as f64)),
                ("edges", id_array(edges)),
            ]);
        }
        Outcome::EdgeDeleted(id) => ("edgeDeleted", Some(*id)),
        Outcome::EdgeUpdated(id) => ("edgeUpdated", Some(*id)),
        Outcome::NodeUpdated(id) => ("nodeUpdated", Some(*id)),
        Outcome::SelectionCleared => ("selectionCleared", None),
        Outcome::Unchanged => ("unchanged", None),
    };
    match id {
        Some(id) => object(&[
            ("kind", JsValue::from_str(kind)),
            ("id", JsValue::from_f64(id as f64)),
        ]),
        None => object(&[("kind", JsValue::from_str(kind))]),
    }
}

fn res(r: Result<Outcome, EditorError>) -> JsValue {
    match r {
        Ok(out) => error::ok(outcome_to_js(&out)),
        Err(e) => error::from_editor(&e),
    }
}

fn changed(r: Result<Outcome, EditorError>) -> bool {
    matches!(r, Ok(out) if out != Outcome::Unchanged)
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        crate::Editor::rs_new()
    }
    /// Accepts a partial `{ floorPlan, pickTolerance, restrictToPlan }`
    /// object; invalid input falls back to defaults.
    pub fn with_config(cfg: JsValue) -> Editor {
        match serde_wasm_bindgen::from_value::<EditorConfig>(cfg) {
            Ok(cfg) => crate::Editor::rs_with_config(cfg),
            Err(e) => {
                log::warn!("invalid editor config, using defaults: {}", e);
                crate::Editor::rs_new()
            }
        }
    }
    pub fn version(&self) -> u64 {
        self.rs_version()
    }

    // Gestures
    /// Returns the new node id, or `undefined` when the click was claimed
    /// by a control or fell outside the plan.
    pub fn canvas_click(&mut self, lat: f64, lng: f64, claimed: bool) -> Option<u32> {
        match self.inner.canvas_click(Position::new(lat, lng), claimed) {
            Ok(Outcome::NodeAdded(id)) => Some(id),
            _ => None,
        }
    }
    pub fn canvas_click_res(&mut self, lat: f64, lng: f64, claimed: bool) -> JsValue {
        if !lat.is_finite() {
            return error::non_finite("lat");
        }
        if !lng.is_finite() {
            return error::non_finite("lng");
        }
        res(self.inner.canvas_click(Position::new(lat, lng), claimed))
    }
    pub fn node_click(&mut self, id: u32) -> JsValue {
        match self.inner.node_click(id) {
            Ok(out) => outcome_to_js(&out),
            Err(_) => JsValue::NULL,
        }
    }
    pub fn node_click_res(&mut self, id: u32) -> JsValue {
        res(self.inner.node_click(id))
    }
    pub fn node_drag_end(&mut self, id: u32, lat: f64, lng: f64) -> bool {
        changed(self.inner.node_drag_end(id, Position::new(lat, lng)))
    }
    pub fn node_drag_end_res(&mut self, id: u32, lat: f64, lng: f64) -> JsValue {
        if !lat.is_finite() {
            return error::non_finite("lat");
        }
        if !lng.is_finite() {
            return error::non_finite("lng");
        }
        res(self.inner.node_drag_end(id, Position::new(lat, lng)))
    }
    pub fn edge_click(&mut self, id: u32) -> bool {
        changed(self.inner.edge_click(id))
    }
    pub fn edge_click_res(&mut self, id: u32) -> JsValue {
        res(self.inner.edge_click(id))
    }
    pub fn delete_node(&mut self, id: u32) -> bool {
        changed(self.inner.delete_node(id))
    }
    pub fn delete_node_res(&mut self, id: u32) -> JsValue {
        res(self.inner.delete_node(id))
    }
    pub fn delete_selected_edge(&mut self) -> bool {
        changed(self.inner.delete_selected_edge())
    }
    pub fn delete_edge(&mut self, id: u32) -> bool {
        changed(self.inner.delete_edge(id))
    }
    pub fn delete_edge_res(&mut self, id: u32) -> JsValue {
        res(self.inner.delete_edge(id))
    }
    pub fn clear_selection(&mut self) -> bool {
        self.inner.clear_selection() != Outcome::Unchanged
    }
    pub fn pending_node(&self) -> Option<u32> {
        self.inner.selection().pending_node()
    }
    pub fn selected_edge(&self) -> Option<u32> {
        self.inner.selection().selected_edge()
    }

    // Edge attributes
    pub fn toggle_edge_obstructed(&mut self, id: u32) -> bool {
        changed(self.inner.toggle_edge_obstructed(id))
    }
    pub fn toggle_edge_obstructed_res(&mut self, id: u32) -> JsValue {
        res(self.inner.toggle_edge_obstructed(id))
    }
    pub fn set_edge_obstructed(&mut self, id: u32, value: bool) -> bool {
        changed(self.inner.set_edge_obstructed(id, value))
    }
    pub fn set_edge_clearance(&mut self, id: u32, level: u8) -> bool {
        changed(self.inner.set_edge_clearance(id, level))
    }
    pub fn set_edge_clearance_res(&mut self, id: u32, level: u8) -> JsValue {
        res(self.inner.set_edge_clearance(id, level))
    }

    // Node attributes
    pub fn toggle_waypoint(&mut self, id: u32) -> bool {
        changed(self.inner.toggle_waypoint(id))
    }
    pub fn toggle_waypoint_res(&mut self, id: u32) -> JsValue {
        res(self.inner.toggle_waypoint(id))
    }
    pub fn add_search_tag(&mut self, id: u32, tag: &str) -> bool {
        changed(self.inner.add_search_tag(id, tag))
    }
    pub fn add_search_tag_res(&mut self, id: u32, tag: &str) -> JsValue {
        res(self.inner.add_search_tag(id, tag))
    }
    pub fn remove_search_tag(&mut self, id: u32, tag: &str) -> bool {
        changed(self.inner.remove_search_tag(id, tag))
    }
    pub fn set_tag_draft(&mut self, id: u32, text: &str) -> bool {
        self.inner.set_tag_draft(id, text).is_ok()
    }
    pub fn tag_draft(&self, id: u32) -> String {
        self.inner.tag_draft(id).to_string()
    }
    pub fn commit_tag_draft(&mut self, id: u32) -> bool {
        changed(self.inner.commit_tag_draft(id))
    }
    pub fn commit_tag_draft_res(&mut self, id: u32) -> JsValue {
        res(self.inner.commit_tag_draft(id))
    }

    // Queries
    pub fn node_count(&self) -> u32 {
        self.inner.store().node_count() as u32
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.store().edge_count() as u32
    }
    pub fn get_node(&self, id: u32) -> JsValue {
        match self.inner.store().node(id) {
            Some(n) => to_js(&n.position),
            None => JsValue::NULL,
        }
    }
    pub fn get_node_res(&self, id: u32) -> JsValue {
        match self.inner.store().node(id) {
            Some(n) => error::ok(to_js(n)),
            None => error::invalid_id("node", id),
        }
    }
    pub fn get_edge_res(&self, id: u32) -> JsValue {
        match self.inner.store().edge(id) {
            Some(e) => error::ok(to_js(e)),
            None => error::invalid_id("edge", id),
        }
    }

    // Typed arrays getters
    pub fn get_node_data(&self) -> JsValue {
        node_columns(self.inner.store())
    }
    pub fn get_edge_data(&self) -> JsValue {
        edge_columns(self.inner.store())
    }
    pub fn snapshot(&self) -> JsValue {
        to_js(&self.inner.snapshot())
    }

    // Picking: returns { kind: "node"|"edge", id, dist, t? }
    pub fn pick(&self, lat: f64, lng: f64) -> JsValue {
        match self.inner.pick(Position::new(lat, lng)) {
            Some(p) => to_js(&p),
            None => JsValue::NULL,
        }
    }
    pub fn pick_res(&self, lat: f64, lng: f64) -> JsValue {
        if !lat.is_finite() {
            return error::non_finite("lat");
        }
        if !lng.is_finite() {
            return error::non_finite("lng");
        }
        error::ok(self.pick(lat, lng))
    }

    // Documents: `to_json` is the upload body, `from_json*` applies a download.
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.document())
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => self.inner.load_json_value(val).is_ok(),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.inner.load_json_value(val) {
                Ok(()) => error::ok(JsValue::from_bool(true)),
                Err(e) => error::from_editor(&e),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
    pub fn clear(&mut self) {
        self.inner.clear();
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
