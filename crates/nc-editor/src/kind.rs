//! Node kind descriptors.
//!
//! A kind is static configuration shared by every node of that type:
//! capability flags, sizing, header chrome, and an optional options factory.
//! Declare kinds as `static`s with struct-update syntax over
//! [`NodeKind::DEFAULT`]:
//!
//! ```
//! use nc_editor::kind::NodeKind;
//!
//! static NOTE: NodeKind = NodeKind {
//!     class_name: "NoteNode",
//!     min_height: 60.0,
//!     ..NodeKind::DEFAULT
//! };
//! assert_eq!(NOTE.snap_size, 10.0);
//! ```

use crate::options::OptionsFactory;
use nc_core::{Capabilities, CursorIcon, Snapper};

/// A kind-specific header button, shown before the built-in ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomButton {
    pub name: &'static str,
    pub icon: &'static str,
    pub tooltip: &'static str,
}

#[derive(Debug)]
pub struct NodeKind {
    /// Type label; also the default node name and the persisted `classname`.
    pub class_name: &'static str,
    pub capabilities: Capabilities,

    /// Band around the edges (canvas units) that starts a resize.
    pub edge_tolerance: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub header_height: f64,
    /// Grid that positions and sizes snap to.
    pub snap_size: f64,
    /// Rendering padding on each side. Must be a multiple of `snap_size`:
    /// positions clamp at `-padding`, which is otherwise off the grid.
    pub padding: f64,

    pub default_cursor: CursorIcon,
    pub fixed_height: bool,
    pub hide_header: bool,

    pub buttons: &'static [CustomButton],
    pub copy_text: &'static str,
    pub close_text: &'static str,
    pub header_bottom_text: &'static str,
    pub header_top_text: &'static str,
    pub header_bottom_icon: &'static str,
    pub header_top_icon: &'static str,

    /// Present on options-bearing kinds.
    pub options: Option<OptionsFactory>,
    pub options_height: f64,
}

impl NodeKind {
    pub const DEFAULT: NodeKind = NodeKind {
        class_name: "Node",
        capabilities: Capabilities::DEFAULT,
        edge_tolerance: 10.0,
        min_width: 150.0,
        min_height: 100.0,
        header_height: 30.0,
        snap_size: 10.0,
        padding: 10.0,
        default_cursor: CursorIcon::Default,
        fixed_height: false,
        hide_header: false,
        buttons: &[],
        copy_text: "Copy",
        close_text: "Close",
        header_bottom_text: "Flip Header to Bottom",
        header_top_text: "Flip Header to Top",
        header_bottom_icon: "fa-solid fa-arrow-turn-down",
        header_top_icon: "fa-solid fa-arrow-turn-up",
        options: None,
        options_height: 0.0,
    };

    pub fn snapper(&self) -> Snapper {
        Snapper {
            grid: self.snap_size,
            padding: self.padding,
            min_width: self.min_width,
            min_height: self.min_height,
        }
    }
}

impl Default for NodeKind {
    fn default() -> Self {
        Self::DEFAULT
    }
}
