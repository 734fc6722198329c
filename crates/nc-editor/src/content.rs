//! What a node hosts.

use crate::options::Options;

/// Embedded content that wants to relayout when its node is resized.
pub trait Widget {
    fn resize(&mut self) {}
}

/// The body of a node.
#[derive(Default)]
pub enum Content {
    #[default]
    Empty,
    /// Opaque renderable markup.
    Markup(String),
    Widget(Box<dyn Widget>),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Markup(m) => m.is_empty(),
            Self::Widget(_) => false,
        }
    }

    pub(crate) fn resize(&mut self) {
        if let Self::Widget(widget) = self {
            widget.resize();
        }
    }
}

impl std::fmt::Debug for Content {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Markup(m) => f.debug_tuple("Markup").field(m).finish(),
            Self::Widget(_) => f.write_str("Widget(..)"),
        }
    }
}

impl From<&str> for Content {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_string())
    }
}

/// Everything a renderer needs to lay out a node's interior, top to bottom:
/// header, options slot (if any), body.
#[derive(Debug)]
pub struct ContentView<'a> {
    pub header_height: f64,
    /// The header collapses to zero height unless the node is hovered.
    pub hide_header: bool,
    pub options_height: f64,
    pub options: Option<&'a Options>,
    pub body: &'a Content,
    /// The body keeps its own height instead of filling the node.
    pub fixed_height: bool,
}
