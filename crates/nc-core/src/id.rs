//! Node identity.
//!
//! An id pairs the interned class name of the node's kind with a serial
//! number from a process-wide counter. Only class names go through the
//! interner, so it holds one entry per kind however many nodes are created,
//! copied or restored.

use crate::error::NodeError;
use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

static KINDS: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);
static SERIAL: AtomicU64 = AtomicU64::new(0);

/// Identity of a node on the canvas, independent of its user-editable name.
/// Renders as `{class_name}_{serial}`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    kind: Spur,
    serial: u64,
}

impl NodeId {
    /// A fresh id for a node of kind `class_name`.
    pub fn next(class_name: &str) -> Self {
        Self {
            kind: KINDS.get_or_intern(class_name),
            serial: SERIAL.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub fn class_name(&self) -> &'static str {
        KINDS.resolve(&self.kind)
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.class_name(), self.serial)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{self}")
    }
}

impl FromStr for NodeId {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s
            .rsplit_once('_')
            .filter(|(kind, _)| !kind.is_empty())
            .and_then(|(kind, serial)| Some((kind, serial.parse::<u64>().ok()?)));
        match parsed {
            Some((kind, serial)) => Ok(Self {
                kind: KINDS.get_or_intern(kind),
                serial,
            }),
            None => Err(NodeError::InvalidState(format!(
                "node id `{s}` is not of the form <class>_<serial>"
            ))),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
