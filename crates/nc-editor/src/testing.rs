//! A recording container for unit tests.

use crate::container::{Container, Decorations};
use nc_core::{CursorIcon, NodeId, Viewport};

#[derive(Debug, Default)]
pub(crate) struct FakeContainer {
    pub viewport: Viewport,
    pub zoom: f64,
    pub removed: Vec<NodeId>,
    pub focused: Vec<NodeId>,
    pub copied: Vec<NodeId>,
    pub cursor: Option<CursorIcon>,
    pub captured: Option<NodeId>,
    pub redraws: usize,
}

impl FakeContainer {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            viewport: Viewport { width, height },
            zoom: 1.0,
            ..Self::default()
        }
    }
}

impl Decorations for FakeContainer {
    fn recalculate(&mut self) {
        self.redraws += 1;
    }

    fn draw(&mut self) {}
}

impl Container for FakeContainer {
    fn width(&self) -> f64 {
        self.viewport.width
    }

    fn height(&self) -> f64 {
        self.viewport.height
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn remove_node(&mut self, id: NodeId) {
        self.removed.push(id);
    }

    fn focus_node(&mut self, id: NodeId) {
        self.focused.push(id);
    }

    fn copy_node(&mut self, id: NodeId) {
        self.copied.push(id);
    }

    fn decorations(&mut self) -> &mut dyn Decorations {
        self
    }

    fn set_cursor(&mut self, cursor: Option<CursorIcon>) {
        self.cursor = cursor;
    }

    fn capture_pointer(&mut self, id: NodeId) {
        self.captured = Some(id);
    }

    fn release_pointer(&mut self, id: NodeId) {
        if self.captured == Some(id) {
            self.captured = None;
        }
    }
}
