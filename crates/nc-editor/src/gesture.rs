//! Pointer gesture state machine.
//!
//! ```text
//!   Idle ──move over node──▶ Armed(mode) ──primary press, mode≠None──▶ Dragging
//!    ▲                          │                                          │
//!    └────────leave / disarm────┘◀──────────primary release / leave───────┘
//! ```
//!
//! During a drag every pointer move recomputes the proposal from the
//! cumulative delta since the press, previews it, and redraws decorations.
//! Release commits.

use crate::container::Container;
use crate::input::PointerEvent;
use crate::node::Node;
use nc_core::{CursorMode, Geometry, NodeError, Point, classify, in_header, within};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Hovering; a press would start `mode`.
    Armed(CursorMode),
    Dragging(Drag),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub mode: CursorMode,
    /// Screen-space pointer position at the press.
    pub start: Point,
}

/// What handling a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeResponse {
    Ignored,
    Hover(CursorMode),
    /// A press that started no gesture but focused the node.
    Focused,
    DragStarted(CursorMode),
    /// Live preview geometry; nothing committed yet.
    Dragged(Geometry),
    /// Committed geometry.
    DragEnded(Geometry),
    RenameRequested,
}

impl Gesture {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn mode(&self) -> CursorMode {
        match self {
            Self::Idle => CursorMode::None,
            Self::Armed(mode) => *mode,
            Self::Dragging(drag) => drag.mode,
        }
    }
}

impl Node {
    /// Feed one pointer event through the state machine.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        container: &mut dyn Container,
    ) -> Result<NodeResponse, NodeError> {
        self.ensure_live()?;
        let at = event.position();

        match (self.gesture, *event) {
            (Gesture::Dragging(drag), PointerEvent::Move { .. }) => {
                let proposal = self.drag_proposal(drag, at, container.zoom());
                let preview = self.set_dimension(proposal, false, &*container)?;
                redraw(container);
                self.resized()?;
                Ok(NodeResponse::Dragged(preview))
            }
            (Gesture::Dragging(drag), PointerEvent::Up { .. }) if event.is_primary() => {
                self.end_drag(drag, at, container)
            }
            (Gesture::Dragging(drag), PointerEvent::Leave { .. }) => self.end_drag(drag, at, container),
            (Gesture::Dragging(_), _) => Ok(NodeResponse::Ignored),

            (_, PointerEvent::Move { .. }) => Ok(NodeResponse::Hover(self.hover(at, container))),
            (Gesture::Armed(mode), PointerEvent::Down { .. }) if event.is_primary() && !mode.is_none() => {
                self.start_drag(mode, at, container);
                Ok(NodeResponse::DragStarted(mode))
            }
            (_, PointerEvent::Down { .. }) if event.is_primary() => {
                if within(at, self.screen_bounds(&*container)) {
                    self.focus(container);
                    Ok(NodeResponse::Focused)
                } else {
                    Ok(NodeResponse::Ignored)
                }
            }
            (_, PointerEvent::Leave { .. }) => {
                self.disarm();
                Ok(NodeResponse::Hover(CursorMode::None))
            }
            (_, PointerEvent::DoubleClick { .. }) => {
                if self.kind().capabilities.can_rename && in_header(at, &self.hit_zones(&*container)) {
                    Ok(NodeResponse::RenameRequested)
                } else {
                    Ok(NodeResponse::Ignored)
                }
            }
            _ => Ok(NodeResponse::Ignored),
        }
    }

    /// Drop any armed mode and restore the default cursor. Has no effect
    /// during a drag.
    pub fn disarm(&mut self) {
        if self.gesture.is_dragging() {
            return;
        }
        self.gesture = Gesture::Idle;
        self.set_cursor_icon(self.kind().default_cursor);
    }

    fn hover(&mut self, at: Point, container: &dyn Container) -> CursorMode {
        let zones = self.hit_zones(container);
        let mode = classify(at, &zones);
        log::trace!("{} hover {:?} at {:?}", self.id(), mode, at);

        self.gesture = if within(at, zones.bounds) {
            Gesture::Armed(mode)
        } else {
            Gesture::Idle
        };
        self.set_cursor_icon(mode.icon(self.kind().default_cursor));
        mode
    }

    fn start_drag(&mut self, mode: CursorMode, at: Point, container: &mut dyn Container) {
        self.focus(container);
        container.set_cursor(Some(mode.icon(self.kind().default_cursor)));
        container.capture_pointer(self.id());
        self.gesture = Gesture::Dragging(Drag { mode, start: at });
        log::debug!("{} drag start {:?} at {:?}", self.id(), mode, at);
    }

    fn end_drag(
        &mut self,
        drag: Drag,
        at: Point,
        container: &mut dyn Container,
    ) -> Result<NodeResponse, NodeError> {
        self.gesture = Gesture::Idle;
        self.set_cursor_icon(self.kind().default_cursor);
        container.set_cursor(None);
        container.release_pointer(self.id());

        let proposal = self.drag_proposal(drag, at, container.zoom());
        let committed = self.set_dimension(proposal, true, &*container)?;
        redraw(container);
        self.resized()?;
        log::debug!("{} drag end {:?} committed {:?}", self.id(), drag.mode, committed);
        Ok(NodeResponse::DragEnded(committed))
    }

    /// Committed geometry with the canvas-space delta since the press applied.
    fn drag_proposal(&self, drag: Drag, at: Point, zoom: f64) -> Geometry {
        let dx = (at.x - drag.start.x) / zoom;
        let dy = (at.y - drag.start.y) / zoom;
        drag.mode
            .apply(self.geometry(), dx, dy)
            .unwrap_or_else(|| self.geometry())
    }
}

fn redraw(container: &mut dyn Container) {
    let decorations = container.decorations();
    decorations.recalculate();
    decorations.draw();
}
