//! Integration tests: pointer gestures routed through the canvas.
//!
//! Every test drives a `Canvas` with raw pointer events and checks the
//! committed geometry, the surface's cursor override and pointer capture,
//! and the decorations redraw count.

use nc_editor::{
    Canvas, Content, CursorIcon, CursorMode, Decorations, Gesture, Geometry, NodeId, NodeInit,
    NodeKind, NodeResponse, PointerEvent, Surface, Viewport,
};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

static NOTE: NodeKind = NodeKind {
    class_name: "NoteNode",
    ..NodeKind::DEFAULT
};

struct CountingDecorations(Rc<Cell<usize>>);

impl Decorations for CountingDecorations {
    fn recalculate(&mut self) {
        self.0.set(self.0.get() + 1);
    }

    fn draw(&mut self) {}
}

fn canvas_with_counter() -> (Canvas, Rc<Cell<usize>>) {
    let count = Rc::new(Cell::new(0));
    let surface = Surface::new(Viewport::default())
        .with_decorations(Box::new(CountingDecorations(count.clone())));
    (Canvas::with_surface(surface), count)
}

/// Node with internal geometry (0, 0, 220, 170).
fn canvas_with_node() -> (Canvas, NodeId) {
    let mut canvas = Canvas::new(Viewport::default());
    let id = canvas
        .add_node(&NOTE, Content::Empty, NodeInit::at(10.0, 10.0).sized(200.0, 150.0))
        .unwrap();
    (canvas, id)
}

fn drag(canvas: &mut Canvas, from: (f64, f64), to: (f64, f64)) -> Option<(NodeId, NodeResponse)> {
    canvas.handle(&PointerEvent::moved(from.0, from.1)).unwrap();
    canvas.handle(&PointerEvent::down(from.0, from.1)).unwrap();
    canvas.handle(&PointerEvent::moved(to.0, to.1)).unwrap();
    canvas.handle(&PointerEvent::up(to.0, to.1)).unwrap()
}

// ─── Move ───────────────────────────────────────────────────────────────

#[test]
fn move_drag_snaps_and_clamps() {
    let (mut canvas, id) = canvas_with_node();

    let ended = drag(&mut canvas, (100.0, 20.0), (123.0, 13.0));

    let committed = Geometry::new(20.0, -10.0, 220.0, 170.0);
    assert_eq!(ended, Some((id, NodeResponse::DragEnded(committed))));
    let node = canvas.node(id).unwrap();
    assert_eq!(node.geometry(), committed);
    assert_eq!(node.visible_geometry(), committed);

    let state = node.get_state();
    assert_eq!((state.x, state.y, state.w, state.h), (30.0, 0.0, 200.0, 150.0));
}

#[test]
fn right_edge_press_resizes() {
    let (mut canvas, id) = canvas_with_node();

    let r = canvas.handle(&PointerEvent::moved(220.0, 100.0)).unwrap();
    assert_eq!(r, Some((id, NodeResponse::Hover(CursorMode::ResizeE))));
    let r = canvas.handle(&PointerEvent::down(220.0, 100.0)).unwrap();
    assert_eq!(r, Some((id, NodeResponse::DragStarted(CursorMode::ResizeE))));
    assert_eq!(canvas.surface().captured(), Some(id));

    let r = canvas.handle(&PointerEvent::up(260.0, 100.0)).unwrap();
    assert_eq!(
        r,
        Some((id, NodeResponse::DragEnded(Geometry::new(0.0, 0.0, 260.0, 170.0))))
    );
    assert_eq!(canvas.node(id).unwrap().cursor(), CursorIcon::Default);
}

#[test]
fn preview_leaves_committed_geometry_alone() {
    let (mut canvas, id) = canvas_with_node();
    canvas.handle(&PointerEvent::moved(100.0, 20.0)).unwrap();
    canvas.handle(&PointerEvent::down(100.0, 20.0)).unwrap();
    let r = canvas.handle(&PointerEvent::moved(160.0, 80.0)).unwrap();

    assert_eq!(
        r,
        Some((id, NodeResponse::Dragged(Geometry::new(60.0, 60.0, 220.0, 170.0))))
    );
    let node = canvas.node(id).unwrap();
    assert_eq!(node.geometry(), Geometry::new(0.0, 0.0, 220.0, 170.0));
    assert_eq!(node.get_state().x, 10.0);
}

#[test]
fn captured_drag_survives_leaving_the_node() {
    let (mut canvas, id) = canvas_with_node();
    canvas.handle(&PointerEvent::moved(100.0, 20.0)).unwrap();
    canvas.handle(&PointerEvent::down(100.0, 20.0)).unwrap();
    assert_eq!(canvas.surface().captured(), Some(id));
    assert_eq!(canvas.surface().cursor(), Some(CursorIcon::Grab));

    // Far outside the node's bounds; still routed to it.
    let r = canvas.handle(&PointerEvent::moved(700.0, 580.0)).unwrap();
    assert!(matches!(r, Some((target, NodeResponse::Dragged(_))) if target == id));

    canvas.handle(&PointerEvent::up(700.0, 580.0)).unwrap();
    let g = canvas.node(id).unwrap().geometry();
    assert_eq!(g, Geometry::new(590.0, 440.0, 220.0, 170.0));
    assert!(g.right() <= 810.0 && g.bottom() <= 610.0);
    assert_eq!(canvas.surface().captured(), None);
    assert_eq!(canvas.surface().cursor(), None);
}

#[test]
fn leaving_the_container_commits() {
    let (mut canvas, id) = canvas_with_node();
    canvas.handle(&PointerEvent::moved(100.0, 20.0)).unwrap();
    canvas.handle(&PointerEvent::down(100.0, 20.0)).unwrap();
    canvas.handle(&PointerEvent::moved(140.0, 60.0)).unwrap();
    let r = canvas
        .handle(&PointerEvent::Leave { x: 150.0, y: 70.0 })
        .unwrap();

    assert_eq!(
        r,
        Some((id, NodeResponse::DragEnded(Geometry::new(50.0, 50.0, 220.0, 170.0))))
    );
    assert_eq!(canvas.surface().captured(), None);
}

// ─── Resize ─────────────────────────────────────────────────────────────

#[test]
fn corner_press_classifies_as_nw() {
    let (mut canvas, id) = canvas_with_node();
    let r = canvas.handle(&PointerEvent::moved(3.0, 3.0)).unwrap();
    assert_eq!(r, Some((id, NodeResponse::Hover(CursorMode::ResizeNW))));
    assert_eq!(canvas.node(id).unwrap().cursor(), CursorIcon::NwseResize);
}

#[test]
fn nw_resize_moves_origin_and_grows() {
    let mut canvas = Canvas::new(Viewport::default());
    let id = canvas
        .add_node(&NOTE, Content::Empty, NodeInit::at(110.0, 110.0).sized(200.0, 150.0))
        .unwrap();

    drag(&mut canvas, (103.0, 103.0), (83.0, 73.0));

    assert_eq!(
        canvas.node(id).unwrap().geometry(),
        Geometry::new(80.0, 70.0, 240.0, 200.0)
    );
}

#[test]
fn resize_never_goes_below_minimum() {
    let mut canvas = Canvas::new(Viewport::default());
    let id = canvas
        .add_node(&NOTE, Content::Empty, NodeInit::at(110.0, 110.0).sized(200.0, 150.0))
        .unwrap();

    drag(&mut canvas, (318.0, 200.0), (118.0, 200.0));

    let g = canvas.node(id).unwrap().geometry();
    assert_eq!(g.width, 170.0);
    assert_eq!(g.left, 100.0);
}

#[test]
fn non_resizable_kind_only_moves() {
    static PINNED: NodeKind = NodeKind {
        class_name: "PinnedNode",
        capabilities: nc_editor::Capabilities {
            can_resize_x: false,
            can_resize_y: false,
            ..nc_editor::Capabilities::DEFAULT
        },
        ..NodeKind::DEFAULT
    };
    let mut canvas = Canvas::new(Viewport::default());
    let id = canvas
        .add_node(&PINNED, Content::Empty, NodeInit::at(10.0, 10.0).sized(200.0, 150.0))
        .unwrap();

    let r = canvas.handle(&PointerEvent::moved(3.0, 3.0)).unwrap();
    assert_eq!(r, Some((id, NodeResponse::Hover(CursorMode::None))));
    let r = canvas.handle(&PointerEvent::moved(100.0, 3.0)).unwrap();
    assert_eq!(r, Some((id, NodeResponse::Hover(CursorMode::None))));
}

// ─── Zoom ───────────────────────────────────────────────────────────────

#[test]
fn zoomed_drag_is_measured_in_canvas_units() {
    let (mut canvas, id) = canvas_with_node();
    canvas.set_zoom(0.5).unwrap();

    // Header band at half zoom: y in [0, 20).
    drag(&mut canvas, (50.0, 10.0), (75.0, 35.0));

    assert_eq!(
        canvas.node(id).unwrap().geometry(),
        Geometry::new(50.0, 50.0, 220.0, 170.0)
    );
}

// ─── Decorations and focus ──────────────────────────────────────────────

#[test]
fn every_drag_step_redraws_decorations() {
    let (mut canvas, count) = canvas_with_counter();
    canvas
        .add_node(&NOTE, Content::Empty, NodeInit::at(10.0, 10.0).sized(200.0, 150.0))
        .unwrap();

    canvas.handle(&PointerEvent::moved(100.0, 20.0)).unwrap();
    canvas.handle(&PointerEvent::down(100.0, 20.0)).unwrap();
    for x in [110.0, 120.0, 130.0] {
        canvas.handle(&PointerEvent::moved(x, 20.0)).unwrap();
    }
    assert_eq!(count.get(), 3);
    canvas.handle(&PointerEvent::up(130.0, 20.0)).unwrap();
    assert_eq!(count.get(), 4);
}

#[test]
fn drag_start_focuses_and_raises() {
    let mut canvas = Canvas::new(Viewport::default());
    let below = canvas
        .add_node(&NOTE, Content::Empty, NodeInit::at(10.0, 10.0).sized(200.0, 150.0))
        .unwrap();
    let above = canvas
        .add_node(&NOTE, Content::Empty, NodeInit::at(300.0, 300.0))
        .unwrap();
    assert_eq!(canvas.nodes().last().map(|n| n.id()), Some(above));

    canvas.handle(&PointerEvent::moved(100.0, 20.0)).unwrap();
    canvas.handle(&PointerEvent::down(100.0, 20.0)).unwrap();

    assert_eq!(canvas.focused(), Some(below));
    assert_eq!(canvas.nodes().last().map(|n| n.id()), Some(below));
}

#[test]
fn moving_off_a_node_disarms_it() {
    let (mut canvas, id) = canvas_with_node();
    canvas.handle(&PointerEvent::moved(100.0, 20.0)).unwrap();
    assert_eq!(canvas.node(id).unwrap().gesture(), &Gesture::Armed(CursorMode::Move));

    assert_eq!(canvas.handle(&PointerEvent::moved(500.0, 500.0)).unwrap(), None);
    let node = canvas.node(id).unwrap();
    assert_eq!(node.gesture(), &Gesture::Idle);
    assert_eq!(node.cursor(), CursorIcon::Default);
}

#[test]
fn second_press_during_drag_is_ignored() {
    let (mut canvas, id) = canvas_with_node();
    canvas.handle(&PointerEvent::moved(100.0, 20.0)).unwrap();
    canvas.handle(&PointerEvent::down(100.0, 20.0)).unwrap();
    let r = canvas.handle(&PointerEvent::down(120.0, 20.0)).unwrap();
    assert_eq!(r, Some((id, NodeResponse::Ignored)));
    assert!(canvas.node(id).unwrap().gesture().is_dragging());
}
