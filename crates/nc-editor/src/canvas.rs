//! Reference container: owns nodes, routes pointer events, persists state.
//!
//! The canvas is split in two so nodes can borrow the container while the
//! canvas holds them:
//!
//! - **`Surface`**: bounds, zoom, cursor override, pointer capture, and the
//!   decorations. Implements [`Container`]. Requests that change the node
//!   collection (remove, focus, copy) are queued here.
//! - **`Canvas`**: the nodes in paint order plus the surface. Applies queued
//!   requests after each node call returns.

use crate::container::{Container, Decorations};
use crate::content::Content;
use crate::gesture::NodeResponse;
use crate::input::PointerEvent;
use crate::kind::NodeKind;
use crate::node::{ButtonAction, Node, NodeInit};
use nc_core::{CursorIcon, NodeError, NodeId, NodeState, Point, Viewport};
use std::collections::HashMap;

/// A collection change issued by a node during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRequest {
    Remove(NodeId),
    Focus(NodeId),
    Copy(NodeId),
}

pub struct Surface {
    viewport: Viewport,
    zoom: f64,
    origin: Point,
    cursor: Option<CursorIcon>,
    capture: Option<NodeId>,
    requests: Vec<SurfaceRequest>,
    decorations: Box<dyn Decorations>,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            zoom: 1.0,
            origin: Point::ZERO,
            cursor: None,
            capture: None,
            requests: Vec::new(),
            decorations: Box::new(()),
        }
    }

    pub fn with_decorations(mut self, decorations: Box<dyn Decorations>) -> Self {
        self.decorations = decorations;
        self
    }

    /// Container-wide cursor override, if a drag is in progress.
    pub fn cursor(&self) -> Option<CursorIcon> {
        self.cursor
    }

    pub fn captured(&self) -> Option<NodeId> {
        self.capture
    }

    /// Screen point to canvas point.
    pub fn to_canvas(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.zoom,
            (screen.y - self.origin.y) / self.zoom,
        )
    }
}

impl Container for Surface {
    fn width(&self) -> f64 {
        self.viewport.width
    }

    fn height(&self) -> f64 {
        self.viewport.height
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn remove_node(&mut self, id: NodeId) {
        self.requests.push(SurfaceRequest::Remove(id));
    }

    fn focus_node(&mut self, id: NodeId) {
        self.requests.push(SurfaceRequest::Focus(id));
    }

    fn copy_node(&mut self, id: NodeId) {
        self.requests.push(SurfaceRequest::Copy(id));
    }

    fn decorations(&mut self) -> &mut dyn Decorations {
        self.decorations.as_mut()
    }

    fn set_cursor(&mut self, cursor: Option<CursorIcon>) {
        self.cursor = cursor;
    }

    fn capture_pointer(&mut self, id: NodeId) {
        self.capture = Some(id);
    }

    fn release_pointer(&mut self, id: NodeId) {
        if self.capture == Some(id) {
            self.capture = None;
        }
    }
}

/// Rebuilds nodes of one kind for copy and restore.
#[derive(Debug, Clone, Copy)]
pub struct NodeFactory {
    pub kind: &'static NodeKind,
    pub content: fn() -> Content,
}

impl NodeFactory {
    pub fn new(kind: &'static NodeKind) -> Self {
        Self {
            kind,
            content: Content::default,
        }
    }

    pub fn with_content(mut self, content: fn() -> Content) -> Self {
        self.content = content;
        self
    }
}

// ─── Canvas ──────────────────────────────────────────────────────────────

pub struct Canvas {
    /// Paint order; last is topmost.
    nodes: Vec<Node>,
    surface: Surface,
    registry: HashMap<&'static str, NodeFactory>,
    focused: Option<NodeId>,
    hovered: Option<NodeId>,
}

impl Canvas {
    pub fn new(viewport: Viewport) -> Self {
        Self::with_surface(Surface::new(viewport))
    }

    pub fn with_surface(surface: Surface) -> Self {
        Self {
            nodes: Vec::new(),
            surface,
            registry: HashMap::new(),
            focused: None,
            hovered: None,
        }
    }

    /// Make a kind available to copy and restore, keyed by its class name.
    pub fn register(&mut self, factory: NodeFactory) {
        self.registry.insert(factory.kind.class_name, factory);
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.surface.viewport
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    fn index_of(&self, id: NodeId) -> Option<usize> {
        self.nodes.iter().position(|n| n.id() == id)
    }

    // ─── Nodes ───────────────────────────────────────────────────────────

    pub fn add_node(
        &mut self,
        kind: &'static NodeKind,
        content: Content,
        init: NodeInit,
    ) -> Result<NodeId, NodeError> {
        let node = Node::new(kind, content, init, &self.surface)?;
        let id = node.id();
        self.nodes.push(node);
        Ok(id)
    }

    /// Remove a node and run its close callbacks.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), NodeError> {
        let idx = self.index_of(id).ok_or(NodeError::AlreadyRemoved(id))?;
        let outcome = self.nodes[idx].remove(&mut self.surface);
        self.apply_requests()?;
        outcome
    }

    /// Raise a node to the top of the paint order and focus it.
    pub fn focus(&mut self, id: NodeId) {
        if let Some(idx) = self.index_of(id) {
            let node = self.nodes.remove(idx);
            self.nodes.push(node);
            self.focused = Some(id);
            log::debug!("focused {id}");
        }
    }

    /// Apply a persisted state to one node against the current bounds.
    pub fn set_node_state(&mut self, id: NodeId, state: &NodeState) -> Result<(), NodeError> {
        let idx = self.index_of(id).ok_or(NodeError::AlreadyRemoved(id))?;
        self.nodes[idx].set_state(state, &self.surface)
    }

    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<(), NodeError> {
        self.node_mut_or_err(id)?.rename(name)
    }

    pub fn press_button(
        &mut self,
        id: NodeId,
        action: ButtonAction,
    ) -> Result<Option<&'static str>, NodeError> {
        let idx = self.index_of(id).ok_or(NodeError::AlreadyRemoved(id))?;
        let outcome = self.nodes[idx].press_button(action, &mut self.surface);
        self.apply_requests()?;
        outcome
    }

    fn node_mut_or_err(&mut self, id: NodeId) -> Result<&mut Node, NodeError> {
        self.nodes
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or(NodeError::AlreadyRemoved(id))
    }

    // ─── Pointer routing ─────────────────────────────────────────────────

    /// Topmost node under a screen-space point.
    pub fn hit(&self, screen: Point) -> Option<NodeId> {
        let at = self.surface.to_canvas(screen);
        self.nodes
            .iter()
            .rev()
            .find(|n| n.drawable().contains(at))
            .map(Node::id)
    }

    /// Route one pointer event. A node holding the pointer capture receives
    /// everything; otherwise the topmost node under the pointer does.
    pub fn handle(&mut self, event: &PointerEvent) -> Result<Option<(NodeId, NodeResponse)>, NodeError> {
        let target = self
            .surface
            .capture
            .or_else(|| self.hit(event.position()));

        if self.hovered != target {
            let previous = self.hovered;
            if let Some(node) = previous.and_then(|id| self.node_mut(id)) {
                node.disarm();
            }
            self.hovered = target;
        }

        let Some(id) = target else {
            return Ok(None);
        };
        let idx = self.index_of(id).ok_or(NodeError::AlreadyRemoved(id))?;
        let outcome = self.nodes[idx].handle_pointer(event, &mut self.surface);
        self.apply_requests()?;
        Ok(Some((id, outcome?)))
    }

    fn apply_requests(&mut self) -> Result<(), NodeError> {
        for request in std::mem::take(&mut self.surface.requests) {
            match request {
                SurfaceRequest::Focus(id) => self.focus(id),
                SurfaceRequest::Remove(id) => self.detach(id),
                SurfaceRequest::Copy(id) => self.copy(id)?,
            }
        }
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(idx) = self.index_of(id) {
            self.nodes.remove(idx);
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        self.surface.release_pointer(id);
    }

    /// Duplicate a node one header height down and right. Needs its kind
    /// registered.
    fn copy(&mut self, id: NodeId) -> Result<(), NodeError> {
        let Some(source) = self.node(id) else {
            return Ok(());
        };
        let kind = source.kind();
        let Some(factory) = self.registry.get(kind.class_name).copied() else {
            log::warn!("cannot copy {id}: {} is not registered", kind.class_name);
            return Ok(());
        };

        let mut state = source.get_state();
        state.x += kind.header_height;
        state.y += kind.header_height;

        let copy = self.build(factory, &state)?;
        let copy_id = copy.id();
        self.nodes.push(copy);
        self.focused = Some(copy_id);
        log::debug!("copied {id} to {copy_id}");
        Ok(())
    }

    fn build(&self, factory: NodeFactory, state: &NodeState) -> Result<Node, NodeError> {
        let mut node = Node::new(factory.kind, (factory.content)(), NodeInit::default(), &self.surface)?;
        node.set_state(state, &self.surface)?;
        Ok(node)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Every node's state, in paint order.
    pub fn state(&self) -> Vec<NodeState> {
        self.nodes.iter().map(Node::get_state).collect()
    }

    /// Replace every node with nodes rebuilt from `states`.
    ///
    /// The replacements are built first, so an unknown class name, a
    /// non-finite coordinate or unwritable options leave the canvas as it
    /// was. Once they are built every existing node is removed and closed,
    /// even when an earlier close callback fails; the new nodes are then in
    /// place and the first close failure is returned.
    pub fn restore(&mut self, states: &[NodeState]) -> Result<(), NodeError> {
        let factories = states
            .iter()
            .map(|s| {
                let factory = self
                    .registry
                    .get(s.classname.as_str())
                    .copied()
                    .ok_or_else(|| NodeError::UnknownKind(s.classname.clone()))?;
                s.validate()?;
                Ok(factory)
            })
            .collect::<Result<Vec<_>, NodeError>>()?;
        let rebuilt = factories
            .into_iter()
            .zip(states)
            .map(|(factory, state)| self.build(factory, state))
            .collect::<Result<Vec<_>, _>>()?;

        let mut failure = None;
        for mut node in std::mem::replace(&mut self.nodes, rebuilt) {
            if let Err(err) = node.remove(&mut self.surface) {
                log::warn!("closing {} during restore failed: {err}", node.id());
                failure.get_or_insert(err);
            }
        }
        self.surface.requests.clear();
        self.surface.capture = None;
        self.surface.cursor = None;
        self.focused = None;
        self.hovered = None;

        log::debug!("restored {} nodes", self.nodes.len());
        failure.map_or(Ok(()), Err)
    }

    pub fn to_json(&self) -> Result<String, NodeError> {
        Ok(serde_json::to_string_pretty(&self.state())?)
    }

    pub fn restore_json(&mut self, json: &str) -> Result<(), NodeError> {
        let states: Vec<NodeState> = serde_json::from_str(json)?;
        self.restore(&states)
    }

    // ─── Bounds ──────────────────────────────────────────────────────────

    /// Change the container extent and re-clamp every node.
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), NodeError> {
        nc_core::error::ensure_finite("width", viewport.width)?;
        nc_core::error::ensure_finite("height", viewport.height)?;
        self.surface.viewport = viewport;
        for node in &mut self.nodes {
            node.reset_dimension(&self.surface)?;
        }
        Ok(())
    }

    pub fn set_zoom(&mut self, zoom: f64) -> Result<(), NodeError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(NodeError::InvalidZoom(zoom));
        }
        self.surface.zoom = zoom;
        Ok(())
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.surface.origin = origin;
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("viewport", &self.surface.viewport)
            .field("zoom", &self.surface.zoom)
            .field("nodes", &self.nodes)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}
