//! Persistence collaborator seam.
//!
//! The editor never talks HTTP itself; whatever carries the document to and
//! from the server implements [`GraphBackend`].

use thiserror::Error;

use crate::model::GraphDocument;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend rejected request: {0}")]
    Rejected(String),
    #[error("malformed payload: {0}")]
    Payload(String),
    #[error("no graph stored")]
    Empty,
}

pub trait GraphBackend {
    fn upload(&mut self, doc: &GraphDocument) -> Result<(), TransportError>;
    fn download(&mut self) -> Result<GraphDocument, TransportError>;
    /// Cheap liveness probe.
    fn health_check(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// In-process backend that keeps the last upload as JSON text, the way it
/// would sit on the wire.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: Option<String>,
    fail_next: Option<TransportError>,
    uploads: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(body: impl Into<String>) -> Self {
        MemoryBackend {
            stored: Some(body.into()),
            ..Self::default()
        }
    }

    /// Makes the next request fail with `err`.
    pub fn fail_next(&mut self, err: TransportError) {
        self.fail_next = Some(err);
    }

    pub fn stored_json(&self) -> Option<&str> {
        self.stored.as_deref()
    }

    pub fn upload_count(&self) -> usize {
        self.uploads
    }
}

impl GraphBackend for MemoryBackend {
    fn upload(&mut self, doc: &GraphDocument) -> Result<(), TransportError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        let body = serde_json::to_string(doc).map_err(|e| TransportError::Payload(e.to_string()))?;
        self.stored = Some(body);
        self.uploads += 1;
        Ok(())
    }

    fn download(&mut self) -> Result<GraphDocument, TransportError> {
        if let Some(err) = self.fail_next.take() {
            return Err(err);
        }
        let body = self.stored.as_deref().ok_or(TransportError::Empty)?;
        serde_json::from_str(body).map_err(|e| TransportError::Payload(e.to_string()))
    }

    fn health_check(&mut self) -> Result<(), TransportError> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
