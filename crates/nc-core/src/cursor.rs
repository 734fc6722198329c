//! Cursor-mode classification.
//!
//! Given where the pointer sits relative to a node's rendered bounds, decide
//! which of the ten interaction modes a press would start. All inputs are in
//! screen space; tolerance and header height are scaled by the caller's zoom.

use crate::geometry::{Geometry, Point};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// The pending or active interaction gesture on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorMode {
    #[default]
    None,
    Move,
    ResizeN,
    ResizeNE,
    ResizeE,
    ResizeSE,
    ResizeS,
    ResizeSW,
    ResizeW,
    ResizeNW,
}

/// Pointer icons a node or container can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CursorIcon {
    #[default]
    Default,
    Grab,
    NsResize,
    EwResize,
    NeswResize,
    NwseResize,
}

impl CursorIcon {
    /// CSS `cursor` keyword.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grab => "grab",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::NeswResize => "nesw-resize",
            Self::NwseResize => "nwse-resize",
        }
    }
}

impl CursorMode {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Icon for this mode; `fallback` is shown when no gesture applies.
    pub fn icon(&self, fallback: CursorIcon) -> CursorIcon {
        match self {
            Self::None => fallback,
            Self::Move => CursorIcon::Grab,
            Self::ResizeN | Self::ResizeS => CursorIcon::NsResize,
            Self::ResizeE | Self::ResizeW => CursorIcon::EwResize,
            Self::ResizeNE | Self::ResizeSW => CursorIcon::NeswResize,
            Self::ResizeNW | Self::ResizeSE => CursorIcon::NwseResize,
        }
    }

    /// Apply a canvas-space pointer delta to `from`. Each resize mode moves
    /// exactly the edges its name implies; the opposite edges stay put.
    /// Returns `None` for [`CursorMode::None`].
    pub fn apply(&self, from: Geometry, dx: f64, dy: f64) -> Option<Geometry> {
        let Geometry {
            mut left,
            mut top,
            mut width,
            mut height,
        } = from;

        match self {
            Self::None => return None,
            Self::Move => {
                left += dx;
                top += dy;
            }
            Self::ResizeN => {
                top += dy;
                height -= dy;
            }
            Self::ResizeNE => {
                top += dy;
                height -= dy;
                width += dx;
            }
            Self::ResizeE => {
                width += dx;
            }
            Self::ResizeSE => {
                width += dx;
                height += dy;
            }
            Self::ResizeS => {
                height += dy;
            }
            Self::ResizeSW => {
                height += dy;
                left += dx;
                width -= dx;
            }
            Self::ResizeW => {
                left += dx;
                width -= dx;
            }
            Self::ResizeNW => {
                top += dy;
                height -= dy;
                left += dx;
                width -= dx;
            }
        }

        Some(Geometry {
            left,
            top,
            width,
            height,
        })
    }
}

// ─── Capabilities ─────────────────────────────────────────────────────────

/// What a node kind allows. Fixed per kind, never per instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub can_close: bool,
    pub can_resize_x: bool,
    pub can_resize_y: bool,
    pub can_move: bool,
    pub can_rename: bool,
    pub can_copy: bool,
    pub can_flip_header: bool,
}

impl Capabilities {
    /// Everything enabled except header flipping.
    pub const DEFAULT: Self = Self {
        can_close: true,
        can_resize_x: true,
        can_resize_y: true,
        can_move: true,
        can_rename: true,
        can_copy: true,
        can_flip_header: false,
    };

    /// Nothing enabled; a static, non-interactive node.
    pub const FIXED: Self = Self {
        can_close: false,
        can_resize_x: false,
        can_resize_y: false,
        can_move: false,
        can_rename: false,
        can_copy: false,
        can_flip_header: false,
    };
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─── Classifier ───────────────────────────────────────────────────────────

/// Everything the classifier needs besides the pointer position.
#[derive(Debug, Clone, Copy)]
pub struct HitZones {
    /// Rendered node bounds in screen space.
    pub bounds: Rect,
    /// Edge band width, already scaled by zoom.
    pub tolerance: f64,
    /// Header band height, already scaled by zoom.
    pub header_height: f64,
    /// Header rendered along the bottom edge instead of the top.
    pub flipped: bool,
    pub capabilities: Capabilities,
}

/// Containment used for hit testing: all four edges count as inside, unlike
/// the half-open [`Rect::contains`].
pub fn within(pointer: Point, bounds: Rect) -> bool {
    pointer.x >= bounds.x0 && pointer.x <= bounds.x1 && pointer.y >= bounds.y0 && pointer.y <= bounds.y1
}

/// Classify a pointer position into a cursor mode.
///
/// Priority, first match wins: corner resize (both axes resizable), edge
/// resize (that axis resizable), move (header band, not on a side edge),
/// then none. Pointers outside `bounds` classify as none.
pub fn classify(pointer: Point, zones: &HitZones) -> CursorMode {
    let HitZones {
        bounds,
        tolerance,
        header_height,
        flipped,
        capabilities: caps,
    } = *zones;
    let (x, y) = (pointer.x, pointer.y);

    if !within(pointer, bounds) {
        return CursorMode::None;
    }

    let on_top = y >= bounds.y0 && y < bounds.y0 + tolerance;
    let on_left = x >= bounds.x0 && x < bounds.x0 + tolerance;
    let on_right = x >= bounds.x1 - tolerance;
    let on_bottom = y >= bounds.y1 - tolerance;
    let in_header = if flipped {
        !on_bottom && y >= bounds.y1 - header_height - tolerance
    } else {
        !on_top && y >= bounds.y0 && y < bounds.y0 + tolerance + header_height
    };

    let both_axes = caps.can_resize_x && caps.can_resize_y;

    if on_top && on_left && both_axes {
        CursorMode::ResizeNW
    } else if on_top && on_right && both_axes {
        CursorMode::ResizeNE
    } else if on_top && caps.can_resize_y {
        CursorMode::ResizeN
    } else if on_bottom && on_left && both_axes {
        CursorMode::ResizeSW
    } else if on_bottom && on_right && both_axes {
        CursorMode::ResizeSE
    } else if on_bottom && caps.can_resize_y {
        CursorMode::ResizeS
    } else if on_left && caps.can_resize_x {
        CursorMode::ResizeW
    } else if on_right && caps.can_resize_x {
        CursorMode::ResizeE
    } else if in_header && caps.can_move && !on_left && !on_right {
        CursorMode::Move
    } else {
        CursorMode::None
    }
}

/// True when the pointer is inside the header band (top band, or bottom
/// band when flipped), edges included.
pub fn in_header(pointer: Point, zones: &HitZones) -> bool {
    let b = zones.bounds;
    let y = pointer.y;
    if !within(pointer, b) {
        return false;
    }
    let band = zones.tolerance + zones.header_height;
    if zones.flipped {
        y >= b.y1 - band
    } else {
        y < b.y0 + band
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_band_follows_flip() {
        let z = zones(Capabilities::DEFAULT, false);
        assert!(in_header(Point::new(100.0, 5.0), &z));
        assert!(!in_header(Point::new(100.0, 100.0), &z));
        let z = zones(Capabilities::DEFAULT, true);
        assert!(in_header(Point::new(100.0, 195.0), &z));
        assert!(!in_header(Point::new(100.0, 5.0), &z));
    }

    fn zones(caps: Capabilities, flipped: bool) -> HitZones {
        HitZones {
            bounds: Rect::new(0.0, 0.0, 200.0, 200.0),
            tolerance: 10.0,
            header_height: 30.0,
            flipped,
            capabilities: caps,
        }
    }

    fn at(x: f64, y: f64, z: &HitZones) -> CursorMode {
        classify(Point::new(x, y), z)
    }

    // ─── Priority ───────────────────────────────────────────────────────────

    #[test]
    fn corners_resolve_to_two_axis_resize() {
        let z = zones(Capabilities::DEFAULT, false);
        assert_eq!(at(2.0, 2.0, &z), CursorMode::ResizeNW);
        assert_eq!(at(198.0, 2.0, &z), CursorMode::ResizeNE);
        assert_eq!(at(2.0, 198.0, &z), CursorMode::ResizeSW);
        assert_eq!(at(198.0, 198.0, &z), CursorMode::ResizeSE);
    }

    #[test]
    fn single_edges() {
        let z = zones(Capabilities::DEFAULT, false);
        assert_eq!(at(100.0, 2.0, &z), CursorMode::ResizeN);
        assert_eq!(at(100.0, 198.0, &z), CursorMode::ResizeS);
        assert_eq!(at(2.0, 100.0, &z), CursorMode::ResizeW);
        assert_eq!(at(198.0, 100.0, &z), CursorMode::ResizeE);
    }

    #[test]
    fn outer_edges_classify_and_are_within() {
        let z = zones(Capabilities::DEFAULT, false);
        assert_eq!(at(200.0, 100.0, &z), CursorMode::ResizeE);
        assert_eq!(at(100.0, 200.0, &z), CursorMode::ResizeS);
        assert_eq!(at(200.0, 200.0, &z), CursorMode::ResizeSE);
        assert_eq!(at(200.1, 100.0, &z), CursorMode::None);
        assert!(within(Point::new(200.0, 200.0), z.bounds));
        assert!(!within(Point::new(200.0, 200.1), z.bounds));
    }

    #[test]
    fn header_band_moves() {
        let z = zones(Capabilities::DEFAULT, false);
        assert_eq!(at(100.0, 20.0, &z), CursorMode::Move);
        assert_eq!(at(100.0, 39.0, &z), CursorMode::Move);
        assert_eq!(at(100.0, 41.0, &z), CursorMode::None);
    }

    #[test]
    fn side_edge_in_header_band_resizes_not_moves() {
        let z = zones(Capabilities::DEFAULT, false);
        assert_eq!(at(3.0, 20.0, &z), CursorMode::ResizeW);
    }

    #[test]
    fn side_edge_without_resize_never_moves() {
        let caps = Capabilities {
            can_resize_x: false,
            ..Capabilities::DEFAULT
        };
        let z = zones(caps, false);
        assert_eq!(at(3.0, 20.0, &z), CursorMode::None);
        assert_eq!(at(2.0, 2.0, &z), CursorMode::ResizeN);
    }

    #[test]
    fn body_is_none() {
        let z = zones(Capabilities::DEFAULT, false);
        assert_eq!(at(100.0, 100.0, &z), CursorMode::None);
    }

    #[test]
    fn outside_bounds_is_none() {
        let z = zones(Capabilities::DEFAULT, false);
        assert_eq!(at(-1.0, 100.0, &z), CursorMode::None);
        assert_eq!(at(100.0, 201.0, &z), CursorMode::None);
    }

    // ─── Flipped header ─────────────────────────────────────────────────────

    #[test]
    fn flipped_header_moves_from_bottom_band() {
        let z = zones(Capabilities::DEFAULT, true);
        assert_eq!(at(100.0, 175.0, &z), CursorMode::Move);
        assert_eq!(at(100.0, 20.0, &z), CursorMode::None);
        assert_eq!(at(100.0, 198.0, &z), CursorMode::ResizeS);
    }

    // ─── Capabilities ───────────────────────────────────────────────────────

    #[test]
    fn fixed_kind_never_classifies() {
        let z = zones(Capabilities::FIXED, false);
        for (x, y) in [(2.0, 2.0), (100.0, 2.0), (100.0, 20.0), (198.0, 100.0)] {
            assert_eq!(at(x, y, &z), CursorMode::None);
        }
    }

    #[test]
    fn one_axis_corner_falls_back_to_edge() {
        let caps = Capabilities {
            can_resize_x: false,
            ..Capabilities::DEFAULT
        };
        let z = zones(caps, false);
        assert_eq!(at(198.0, 198.0, &z), CursorMode::ResizeS);
    }

    // ─── Deltas and icons ───────────────────────────────────────────────────

    #[test]
    fn nw_adjusts_all_four() {
        let g = Geometry::new(100.0, 100.0, 200.0, 150.0);
        let out = CursorMode::ResizeNW.apply(g, 10.0, 20.0).unwrap();
        assert_eq!(out, Geometry::new(110.0, 120.0, 190.0, 130.0));
    }

    #[test]
    fn se_keeps_origin() {
        let g = Geometry::new(100.0, 100.0, 200.0, 150.0);
        let out = CursorMode::ResizeSE.apply(g, 10.0, 20.0).unwrap();
        assert_eq!(out, Geometry::new(100.0, 100.0, 210.0, 170.0));
    }

    #[test]
    fn move_keeps_size() {
        let g = Geometry::new(0.0, 0.0, 200.0, 150.0);
        let out = CursorMode::Move.apply(g, 23.0, -7.0).unwrap();
        assert_eq!(out, Geometry::new(23.0, -7.0, 200.0, 150.0));
    }

    #[test]
    fn none_applies_nothing() {
        assert!(CursorMode::None.apply(Geometry::default(), 1.0, 1.0).is_none());
    }

    #[test]
    fn icons_pair_opposite_directions() {
        let d = CursorIcon::Default;
        assert_eq!(CursorMode::ResizeNE.icon(d), CursorMode::ResizeSW.icon(d));
        assert_eq!(CursorMode::ResizeNW.icon(d), CursorMode::ResizeSE.icon(d));
        assert_eq!(CursorMode::Move.icon(d).as_css(), "grab");
        assert_eq!(CursorMode::None.icon(d).as_css(), "default");
    }
}
