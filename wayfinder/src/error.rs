use thiserror::Error;

use crate::model::{EdgeId, NodeId};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid node id {0}")]
    NodeNotFound(NodeId),
    #[error("invalid edge id {0}")]
    EdgeNotFound(EdgeId),
    #[error("clearance {0} outside 0..=3")]
    InvalidClearance(u8),
    #[error("parameter '{0}' must be finite")]
    NonFinite(&'static str),
    #[error("parameter '{0}' out of bounds")]
    OutOfBounds(&'static str),
    #[error("{message}")]
    Document { code: &'static str, message: String },
    #[error("transport failure: {0}")]
    Transport(#[from] crate::sync::TransportError),
}

impl EditorError {
    pub(crate) fn document(code: &'static str, message: impl Into<String>) -> Self {
        EditorError::Document {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable code, shared with the browser error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            EditorError::NodeNotFound(_) | EditorError::EdgeNotFound(_) => "invalid_id",
            EditorError::InvalidClearance(_) => "out_of_range",
            EditorError::NonFinite(_) => "non_finite",
            EditorError::OutOfBounds(_) => "out_of_bounds",
            EditorError::Document { code, .. } => code,
            EditorError::Transport(_) => "transport",
        }
    }

    /// True for faults caused by addressing an entity that does not exist.
    pub fn is_referential(&self) -> bool {
        matches!(self, EditorError::NodeNotFound(_) | EditorError::EdgeNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, EditorError>;
