//! Interactive layer of the node canvas: node kinds, the node controller and
//! its gesture state machine, options widgets, and a reference canvas.

pub mod canvas;
pub mod container;
pub mod content;
pub mod gesture;
pub mod input;
pub mod kind;
pub mod node;
pub mod options;
pub mod widgets;

#[cfg(test)]
mod testing;

pub use canvas::{Canvas, NodeFactory, Surface, SurfaceRequest};
pub use container::{Container, Decorations};
pub use content::{Content, ContentView, Widget};
pub use gesture::{Drag, Gesture, NodeResponse};
pub use input::{PointerButton, PointerEvent};
pub use kind::{CustomButton, NodeKind};
pub use node::{ButtonAction, HeaderButton, Node, NodeInit};
pub use options::{Form, Options, OptionsFactory, ValueHolder};
pub use widgets::{FieldSet, InputField};

pub use nc_core::{
    Capabilities, CursorIcon, CursorMode, Drawable, Geometry, NodeError, NodeId, NodeState,
    Point, Rect, Viewport,
};
