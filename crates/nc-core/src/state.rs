//! Serialized node state.
//!
//! `x/y/w/h` are the logical, un-padded geometry. Padding is a rendering
//! concern: it is stripped when a node produces its state and re-added when
//! the state is applied.

use crate::error::{NodeError, ensure_finite};
use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Flat persisted record for one node.
///
/// `classname` is informational: factories use it to pick the node kind to
/// rebuild, the node itself never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub name: String,
    pub classname: String,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    /// Present for options-bearing kinds (possibly `null`), absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl NodeState {
    /// Build the logical state from padded geometry.
    pub fn from_geometry(
        name: impl Into<String>,
        classname: impl Into<String>,
        geometry: Geometry,
        padding: f64,
    ) -> Self {
        Self {
            name: name.into(),
            classname: classname.into(),
            x: geometry.left + padding,
            y: geometry.top + padding,
            w: geometry.width - padding * 2.0,
            h: geometry.height - padding * 2.0,
            options: None,
        }
    }

    /// Padded geometry this state describes, before any snapping.
    pub fn to_geometry(&self, padding: f64) -> Result<Geometry, NodeError> {
        self.validate()?;
        Ok(Geometry {
            left: self.x - padding,
            top: self.y - padding,
            width: self.w + padding * 2.0,
            height: self.h + padding * 2.0,
        })
    }

    /// Reject non-finite coordinates.
    pub fn validate(&self) -> Result<(), NodeError> {
        ensure_finite("x", self.x)?;
        ensure_finite("y", self.y)?;
        ensure_finite("w", self.w)?;
        ensure_finite("h", self.h)?;
        Ok(())
    }

    /// Decode a state from JSON. Missing required fields are an error;
    /// nothing is defaulted except `options`.
    pub fn from_json(json: &str) -> Result<Self, NodeError> {
        let state: NodeState = serde_json::from_str(json)?;
        state.validate()?;
        Ok(state)
    }

    /// Decode from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, NodeError> {
        let state: NodeState = serde_json::from_value(value)?;
        state.validate()?;
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String, NodeError> {
        Ok(serde_json::to_string(self)?)
    }
}
