pub mod cursor;
pub mod error;
pub mod geometry;
pub mod id;
pub mod snap;
pub mod state;

pub use cursor::{Capabilities, CursorIcon, CursorMode, HitZones, classify, in_header, within};
pub use error::NodeError;
pub use geometry::{Drawable, Geometry, Point, Viewport};
pub use id::NodeId;
pub use snap::{Snapper, floor_to_grid, nearest_snap};
pub use state::NodeState;

// Re-export kurbo's rectangle so downstream crates don't need a direct dependency
pub use kurbo::Rect;
