use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

/// Browser handle on one editing session.
#[wasm_bindgen]
pub struct Editor { pub(crate) inner: wayfinder::GraphEditorState }

impl Editor {
    pub fn rs_new() -> Editor { Editor { inner: wayfinder::GraphEditorState::new() } }
    pub fn rs_with_config(cfg: wayfinder::EditorConfig) -> Editor {
        Editor { inner: wayfinder::GraphEditorState::with_config(cfg) }
    }
    pub fn rs_version(&self) -> u64 { self.inner.version() }
}
