//! The container contract a node talks to.
//!
//! Nodes never own their container. Every node operation that needs it takes
//! `&dyn Container` (read bounds) or `&mut dyn Container` (issue requests),
//! so the container can hold its nodes without reference cycles. Bounds are
//! re-read on every call; nothing is cached across pointer events.

use nc_core::{CursorIcon, NodeId, Point, Viewport};

/// Overlay visuals (selection outlines, links) that follow node geometry.
pub trait Decorations {
    fn recalculate(&mut self);
    fn draw(&mut self);
}

/// No overlays.
impl Decorations for () {
    fn recalculate(&mut self) {}
    fn draw(&mut self) {}
}

pub trait Container {
    /// Current width in canvas units.
    fn width(&self) -> f64;

    /// Current height in canvas units.
    fn height(&self) -> f64;

    /// Screen pixels per canvas unit.
    fn zoom(&self) -> f64;

    /// Screen position of the canvas origin.
    fn origin(&self) -> Point {
        Point::ZERO
    }

    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width(),
            height: self.height(),
        }
    }

    fn remove_node(&mut self, id: NodeId);

    fn focus_node(&mut self, id: NodeId);

    fn copy_node(&mut self, id: NodeId);

    fn decorations(&mut self) -> &mut dyn Decorations;

    /// Container-wide cursor override; `None` restores the default.
    fn set_cursor(&mut self, cursor: Option<CursorIcon>);

    /// Route every subsequent pointer event to `id` until released, even
    /// when the pointer leaves the node's bounds.
    fn capture_pointer(&mut self, id: NodeId);

    fn release_pointer(&mut self, id: NodeId);
}
