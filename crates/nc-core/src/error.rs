//! Error taxonomy shared by the core and the editor layer.
//!
//! Nothing here is transient: the core performs no I/O, so every variant is
//! either an invalid argument, a capability violation, or lifecycle misuse.

use crate::id::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    /// A geometry input was NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    /// Persisted state was structurally valid JSON but semantically wrong.
    #[error("invalid node state: {0}")]
    InvalidState(String),

    /// Persisted state could not be decoded at all (missing fields, wrong types).
    #[error("failed to decode node state: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("a drawable needs at least 3 points, got {0}")]
    InvalidPolygon(usize),

    #[error("zoom must be finite and positive, got {0}")]
    InvalidZoom(f64),

    /// The operation is disabled by the node kind's capability flags.
    #[error("operation not permitted for this node kind: {0}")]
    Capability(&'static str),

    #[error("node {0} has already been removed")]
    AlreadyRemoved(NodeId),

    /// No factory is registered for a persisted `classname`.
    #[error("no node kind registered for classname `{0}`")]
    UnknownKind(String),

    /// A lifecycle callback failed; later callbacks in the same batch were skipped.
    #[error("callback failed: {0}")]
    Callback(String),
}

/// Reject NaN and infinities, naming the offending field.
pub fn ensure_finite(field: &'static str, value: f64) -> Result<f64, NodeError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NodeError::NonFinite { field, value })
    }
}
