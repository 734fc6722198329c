//! Snap/clamp calculator.
//!
//! Pure functions mapping a proposed coordinate onto the grid and into the
//! container. Every geometry change a node makes goes through
//! [`Snapper::resolve`], so committed geometry always sits on the grid and
//! its far edges never pass the container's padded extent.
//!
//! Overflow policy: a node pushed past the far edge is first *shifted* back
//! towards the origin; it only *shrinks* when the shift alone cannot make it
//! fit (the node is larger than the container).

use crate::error::NodeError;
use crate::geometry::{Geometry, Viewport};

/// Round `value` to the nearest multiple of `grid`, then clamp into
/// `[min, max]`. `max` may be `f64::INFINITY`.
///
/// When `min > max` the maximum wins, mirroring how the container bound
/// takes precedence over a node's minimum size.
pub fn nearest_snap(value: f64, min: f64, max: f64, grid: f64) -> f64 {
    let snapped = if grid > 0.0 {
        (value / grid).round() * grid
    } else {
        value
    };
    snapped.max(min).min(max)
}

/// Largest multiple of `grid` not above `value`.
pub fn floor_to_grid(value: f64, grid: f64) -> f64 {
    if grid > 0.0 {
        (value / grid).floor() * grid
    } else {
        value
    }
}

/// Per-kind snapping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapper {
    /// Grid size positions and sizes snap to.
    pub grid: f64,
    /// Rendering padding around the node, once per side.
    pub padding: f64,
    /// Minimum content width, padding excluded.
    pub min_width: f64,
    /// Minimum content height, padding excluded.
    pub min_height: f64,
}

impl Snapper {
    /// Smallest legal padded width.
    pub fn min_outer_width(&self) -> f64 {
        self.min_width + self.padding * 2.0
    }

    /// Smallest legal padded height.
    pub fn min_outer_height(&self) -> f64 {
        self.min_height + self.padding * 2.0
    }

    /// True when `-padding` is itself a grid line. Positions are clamped
    /// at `-padding`, so geometry only stays on the grid when this holds.
    pub fn is_aligned(&self) -> bool {
        floor_to_grid(self.padding, self.grid) == self.padding
    }

    /// Snap a left/top coordinate with no container bound; the origin may
    /// sit up to one padding outside the container. The result is on the
    /// grid only for an [aligned](Snapper::is_aligned) snapper.
    pub fn position_snap(&self, value: f64) -> f64 {
        nearest_snap(value, -self.padding, f64::INFINITY, self.grid)
    }

    /// Snap a left coordinate so a node of `width` stays inside `extent`.
    pub fn left_snap(&self, value: f64, width: f64, extent: f64) -> f64 {
        nearest_snap(
            value,
            -self.padding,
            floor_to_grid(extent + self.padding - width, self.grid),
            self.grid,
        )
    }

    /// Snap a width given the already-snapped `left`, so the far edge stays
    /// within `extent + padding`.
    pub fn width_snap(&self, value: f64, left: f64, extent: f64) -> f64 {
        nearest_snap(
            value,
            self.min_outer_width(),
            floor_to_grid(extent + self.padding - left, self.grid),
            self.grid,
        )
        .max(0.0)
    }

    /// Vertical counterpart of [`Snapper::left_snap`].
    pub fn top_snap(&self, value: f64, height: f64, extent: f64) -> f64 {
        nearest_snap(
            value,
            -self.padding,
            floor_to_grid(extent + self.padding - height, self.grid),
            self.grid,
        )
    }

    /// Vertical counterpart of [`Snapper::width_snap`].
    pub fn height_snap(&self, value: f64, top: f64, extent: f64) -> f64 {
        nearest_snap(
            value,
            self.min_outer_height(),
            floor_to_grid(extent + self.padding - top, self.grid),
            self.grid,
        )
        .max(0.0)
    }

    /// Resolve a proposed geometry against the container.
    ///
    /// Positions and sizes are snapped, sizes are raised to the minimum,
    /// then each axis is shifted back inside the container (never past
    /// `-padding`) and finally shrunk if it still overflows.
    pub fn resolve(&self, proposed: Geometry, viewport: Viewport) -> Result<Geometry, NodeError> {
        debug_assert!(
            self.is_aligned(),
            "padding {} is not a multiple of grid {}",
            self.padding,
            self.grid
        );
        let proposed = proposed.ensure_finite()?;

        let left = self.position_snap(proposed.left);
        let top = self.position_snap(proposed.top);
        let width = nearest_snap(
            proposed.width,
            self.min_outer_width(),
            f64::INFINITY,
            self.grid,
        );
        let height = nearest_snap(
            proposed.height,
            self.min_outer_height(),
            f64::INFINITY,
            self.grid,
        );

        let left = self.left_snap(left, width, viewport.width).max(-self.padding);
        let width = self.width_snap(width, left, viewport.width);
        let top = self.top_snap(top, height, viewport.height).max(-self.padding);
        let height = self.height_snap(height, top, viewport.height);

        Ok(Geometry {
            left,
            top,
            width,
            height,
        })
    }
}
