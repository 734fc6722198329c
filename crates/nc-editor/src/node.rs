//! The node controller.
//!
//! A `Node` owns its geometry, name, content, and gesture state. It reads
//! the container's bounds on every mutation and reaches the container only
//! through explicit calls (`remove_node`, `focus_node`, `copy_node`,
//! decorations, cursor override, pointer capture).
//!
//! Geometry comes in two layers:
//!
//! - **committed**: the authoritative geometry, persisted by `get_state`.
//! - **visible**: what was last rendered. Follows every preview during a
//!   drag and equals the committed geometry whenever no drag is in progress.

use crate::container::Container;
use crate::content::{Content, ContentView};
use crate::gesture::Gesture;
use crate::kind::NodeKind;
use crate::options::{Options, OptionsSlot, is_empty};
use nc_core::{CursorIcon, Drawable, Geometry, HitZones, NodeError, NodeId, NodeState, Rect};
use serde_json::Value;
use smallvec::SmallVec;

type Callback = Box<dyn FnMut() -> Result<(), NodeError>>;

/// Optional construction parameters. Missing name falls back to the kind's
/// class name, missing position to the origin, missing size to the kind's
/// minimum. All values are logical (padding excluded).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInit {
    pub name: Option<String>,
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl NodeInit {
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            ..Self::default()
        }
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

// ─── Header buttons ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    /// A kind-specific button; the name is reported back to the caller.
    Custom(&'static str),
    Copy,
    Flip,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderButton {
    pub name: &'static str,
    pub icon: &'static str,
    pub tooltip: &'static str,
    pub action: ButtonAction,
}

const COPY_ICON: &str = "fa-solid fa-copy";
const CLOSE_ICON: &str = "fa-solid fa-window-close";

// ─── Node ────────────────────────────────────────────────────────────────

pub struct Node {
    id: NodeId,
    kind: &'static NodeKind,
    name: String,
    content: Content,
    options: Option<OptionsSlot>,

    committed: Geometry,
    visible: Geometry,

    removed: bool,
    /// Close callbacks have run.
    closed: bool,
    flipped: bool,
    cursor: CursorIcon,
    pub(crate) gesture: Gesture,

    close_callbacks: Vec<Callback>,
    resize_callbacks: Vec<Callback>,
}

impl Node {
    /// Build a node. Padding is applied exactly once here: the origin moves
    /// out by one padding and each size grows by two. The result is snapped
    /// and clamped against the container and committed.
    pub fn new(
        kind: &'static NodeKind,
        content: Content,
        init: NodeInit,
        container: &dyn Container,
    ) -> Result<Self, NodeError> {
        let padding = kind.padding;
        let proposed = Geometry {
            left: init.left.unwrap_or(0.0) - padding,
            top: init.top.unwrap_or(0.0) - padding,
            width: init.width.unwrap_or(kind.min_width) + padding * 2.0,
            height: init.height.unwrap_or(kind.min_height) + padding * 2.0,
        };
        let name = init
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| kind.class_name.to_string());

        let mut node = Self {
            id: NodeId::next(kind.class_name),
            kind,
            name,
            content,
            options: kind.options.map(OptionsSlot::Pending),
            committed: Geometry::default(),
            visible: Geometry::default(),
            removed: false,
            closed: false,
            flipped: false,
            cursor: kind.default_cursor,
            gesture: Gesture::Idle,
            close_callbacks: Vec::new(),
            resize_callbacks: Vec::new(),
        };
        node.set_dimension(proposed, true, container)?;
        log::debug!("created {} at {:?}", node.id, node.committed);
        Ok(node)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &'static NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the name unconditionally.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// User-initiated rename; only for kinds that allow it.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), NodeError> {
        if !self.kind.capabilities.can_rename {
            return Err(NodeError::Capability("rename"));
        }
        self.ensure_live()?;
        self.set_name(name);
        Ok(())
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Cursor the node itself currently shows.
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    pub(crate) fn set_cursor_icon(&mut self, cursor: CursorIcon) {
        self.cursor = cursor;
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Committed geometry, padding included.
    pub fn geometry(&self) -> Geometry {
        self.committed
    }

    /// Most recently rendered geometry, padding included.
    pub fn visible_geometry(&self) -> Geometry {
        self.visible
    }

    pub(crate) fn ensure_live(&self) -> Result<(), NodeError> {
        if self.removed {
            Err(NodeError::AlreadyRemoved(self.id))
        } else {
            Ok(())
        }
    }

    // ─── Content ─────────────────────────────────────────────────────────

    /// Layout view of the interior. Instantiates the options slot on first use.
    pub fn content(&mut self) -> ContentView<'_> {
        let options = self.options.as_mut().map(|slot| &*slot.get_or_init());
        ContentView {
            header_height: self.kind.header_height,
            hide_header: self.kind.hide_header,
            options_height: self.kind.options_height,
            options,
            body: &self.content,
            fixed_height: self.kind.fixed_height,
        }
    }

    pub fn set_content(&mut self, content: Content) {
        self.content = content;
    }

    /// The options widget, if this kind has one and it has been instantiated.
    pub fn options(&self) -> Option<&Options> {
        self.options.as_ref().and_then(OptionsSlot::get)
    }

    /// The options widget, instantiating it if needed.
    pub fn options_mut(&mut self) -> Option<&mut Options> {
        self.options.as_mut().map(OptionsSlot::get_or_init)
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    /// The only geometry mutation entry point.
    ///
    /// Snaps and clamps all four values against the container's current
    /// bounds and updates the visible geometry. The committed geometry only
    /// changes when `commit` is set, so a drag can preview on every pointer
    /// move without touching persisted state until release.
    pub fn set_dimension(
        &mut self,
        proposed: Geometry,
        commit: bool,
        container: &dyn Container,
    ) -> Result<Geometry, NodeError> {
        self.ensure_live()?;
        let resolved = self.kind.snapper().resolve(proposed, container.viewport())?;
        if commit {
            self.committed = resolved;
        }
        self.visible = resolved;
        Ok(resolved)
    }

    /// Re-apply the committed geometry, e.g. after the container shrank.
    pub fn reset_dimension(&mut self, container: &dyn Container) -> Result<Geometry, NodeError> {
        self.set_dimension(self.committed, true, container)
    }

    /// Region the node occupies on the canvas, from its visible geometry.
    pub fn drawable(&self) -> Drawable {
        Drawable::rectangle(self.visible.to_rect())
    }

    /// Rendered bounds in screen space.
    pub fn screen_bounds(&self, container: &dyn Container) -> Rect {
        let zoom = container.zoom();
        let origin = container.origin();
        let g = self.visible;
        Rect::new(
            origin.x + g.left * zoom,
            origin.y + g.top * zoom,
            origin.x + g.right() * zoom,
            origin.y + g.bottom() * zoom,
        )
    }

    /// Classifier input for the current zoom and header position.
    pub fn hit_zones(&self, container: &dyn Container) -> HitZones {
        let zoom = container.zoom();
        HitZones {
            bounds: self.screen_bounds(container),
            tolerance: self.kind.edge_tolerance * zoom,
            header_height: self.kind.header_height * zoom,
            flipped: self.flipped,
            capabilities: self.kind.capabilities,
        }
    }

    // ─── State ───────────────────────────────────────────────────────────

    pub fn get_state(&self) -> NodeState {
        let mut state = NodeState::from_geometry(
            self.name.clone(),
            self.kind.class_name,
            self.committed,
            self.kind.padding,
        );
        if let Some(slot) = &self.options {
            state.options = Some(slot.read());
        }
        state
    }

    /// Rehydrate name, geometry, and options.
    ///
    /// Geometry is re-snapped; externally supplied values are not trusted.
    /// Form options re-run the form's submit pathway. Options supplied to a
    /// kind without an options slot are ignored with a warning.
    pub fn set_state(&mut self, state: &NodeState, container: &dyn Container) -> Result<(), NodeError> {
        self.ensure_live()?;
        let proposed = state.to_geometry(self.kind.padding)?;
        self.set_name(state.name.clone());
        self.set_dimension(proposed, true, container)?;
        self.apply_options(state.options.as_ref())
    }

    fn apply_options(&mut self, value: Option<&Value>) -> Result<(), NodeError> {
        let Some(value) = value.filter(|v| !is_empty(v)) else {
            return Ok(());
        };
        match self.options.as_mut() {
            Some(slot) => slot.get_or_init().write(value.clone()),
            None => {
                log::warn!("{} has no options slot; ignoring supplied options", self.id);
                Ok(())
            }
        }
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Register a teardown callback.
    pub fn on_close(&mut self, callback: impl FnMut() -> Result<(), NodeError> + 'static) {
        self.close_callbacks.push(Box::new(callback));
    }

    /// Run close callbacks in registration order. Safe to call more than
    /// once: only the first call runs them. A failing callback skips the
    /// rest of the batch.
    pub fn closed(&mut self) -> Result<(), NodeError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        for callback in &mut self.close_callbacks {
            callback()?;
        }
        Ok(())
    }

    pub fn on_resize(&mut self, callback: impl FnMut() -> Result<(), NodeError> + 'static) {
        self.resize_callbacks.push(Box::new(callback));
    }

    /// Tell the content it was resized, then run resize callbacks in order.
    pub fn resized(&mut self) -> Result<(), NodeError> {
        self.content.resize();
        for callback in &mut self.resize_callbacks {
            callback()?;
        }
        Ok(())
    }

    /// Remove this node from its container and run close callbacks.
    /// A second call is a lifecycle error.
    pub fn remove(&mut self, container: &mut dyn Container) -> Result<(), NodeError> {
        self.ensure_live()?;
        if matches!(self.gesture, Gesture::Dragging(_)) {
            container.set_cursor(None);
            container.release_pointer(self.id);
        }
        self.gesture = Gesture::Idle;
        container.remove_node(self.id);
        self.removed = true;
        log::debug!("removed {}", self.id);
        self.closed()
    }

    pub fn focus(&self, container: &mut dyn Container) {
        container.focus_node(self.id);
    }

    // ─── Header ──────────────────────────────────────────────────────────

    /// Move the header between the top and bottom edge.
    pub fn flip_header(&mut self) -> Result<(), NodeError> {
        if !self.kind.capabilities.can_flip_header {
            return Err(NodeError::Capability("flip header"));
        }
        self.flipped = !self.flipped;
        log::debug!("{} header flipped={}", self.id, self.flipped);
        Ok(())
    }

    /// Icon and tooltip of the flip button for the current header position.
    pub fn flip_button(&self) -> (&'static str, &'static str) {
        if self.flipped {
            (self.kind.header_top_icon, self.kind.header_top_text)
        } else {
            (self.kind.header_bottom_icon, self.kind.header_bottom_text)
        }
    }

    /// Header buttons in display order: kind buttons, copy, flip, close.
    pub fn header_buttons(&self) -> SmallVec<[HeaderButton; 4]> {
        let caps = self.kind.capabilities;
        let mut buttons: SmallVec<[HeaderButton; 4]> = self
            .kind
            .buttons
            .iter()
            .map(|b| HeaderButton {
                name: b.name,
                icon: b.icon,
                tooltip: b.tooltip,
                action: ButtonAction::Custom(b.name),
            })
            .collect();

        if caps.can_copy {
            buttons.push(HeaderButton {
                name: "copy",
                icon: COPY_ICON,
                tooltip: self.kind.copy_text,
                action: ButtonAction::Copy,
            });
        }
        if caps.can_flip_header {
            let (icon, tooltip) = self.flip_button();
            buttons.push(HeaderButton {
                name: "flip",
                icon,
                tooltip,
                action: ButtonAction::Flip,
            });
        }
        if caps.can_close {
            buttons.push(HeaderButton {
                name: "close",
                icon: CLOSE_ICON,
                tooltip: self.kind.close_text,
                action: ButtonAction::Close,
            });
        }
        buttons
    }

    /// Act on a header button. Built-in actions are handled here; a custom
    /// button's name is returned for the caller to dispatch.
    pub fn press_button(
        &mut self,
        action: ButtonAction,
        container: &mut dyn Container,
    ) -> Result<Option<&'static str>, NodeError> {
        self.ensure_live()?;
        let caps = self.kind.capabilities;
        match action {
            ButtonAction::Custom(name) => return Ok(Some(name)),
            ButtonAction::Copy if caps.can_copy => container.copy_node(self.id),
            ButtonAction::Copy => return Err(NodeError::Capability("copy")),
            ButtonAction::Flip => self.flip_header()?,
            ButtonAction::Close if caps.can_close => self.remove(container)?,
            ButtonAction::Close => return Err(NodeError::Capability("close")),
        }
        Ok(None)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.kind.class_name)
            .field("name", &self.name)
            .field("committed", &self.committed)
            .field("visible", &self.visible)
            .field("gesture", &self.gesture)
            .field("removed", &self.removed)
            .field("flipped", &self.flipped)
            .finish_non_exhaustive()
    }
}
