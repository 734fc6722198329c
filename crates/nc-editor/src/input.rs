//! Input abstraction layer.
//!
//! Normalizes mouse events into a `PointerEvent` enum consumed by nodes and
//! the canvas. Coordinates are screen-space (client) pixels.

use nc_core::Point;
use serde::{Deserialize, Serialize};

/// Which mouse button a press or release refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Button pressed.
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },

    /// Pointer moved, with or without a button held.
    Move { x: f64, y: f64 },

    /// Button released.
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
    },

    /// Pointer left the container.
    Leave { x: f64, y: f64 },

    /// Primary-button double click.
    DoubleClick { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn down(x: f64, y: f64) -> Self {
        Self::Down {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move { x, y }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::Up {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    pub fn position(&self) -> Point {
        match *self {
            Self::Down { x, y, .. }
            | Self::Move { x, y }
            | Self::Up { x, y, .. }
            | Self::Leave { x, y }
            | Self::DoubleClick { x, y } => Point::new(x, y),
        }
    }

    /// True for presses and releases of the primary button.
    pub fn is_primary(&self) -> bool {
        matches!(
            self,
            Self::Down {
                button: PointerButton::Primary,
                ..
            } | Self::Up {
                button: PointerButton::Primary,
                ..
            }
        )
    }
}
