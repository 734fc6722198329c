//! Replay a pointer script against a canvas and print the resulting state.
//!
//! ```text
//! RUST_LOG=debug cargo run -p nc-editor --example replay -- script.json
//! ```
//!
//! Without an argument the bundled `replay.json` is used.

use nc_editor::{
    Canvas, Content, NodeError, NodeFactory, NodeInit, NodeKind, Options, PointerEvent, Viewport,
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::env;
use std::fs;

static NOTE: NodeKind = NodeKind {
    class_name: "NoteNode",
    ..NodeKind::DEFAULT
};

static PROMPT: NodeKind = NodeKind {
    class_name: "PromptNode",
    capabilities: nc_editor::Capabilities {
        can_flip_header: true,
        ..nc_editor::Capabilities::DEFAULT
    },
    options: Some(|| Options::Payload(json!({"prompt": "", "steps": 20}))),
    options_height: 80.0,
    ..NodeKind::DEFAULT
};

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    viewport: Viewport,
    #[serde(default = "default_zoom")]
    zoom: f64,
    nodes: Vec<Placement>,
    #[serde(default)]
    events: Vec<PointerEvent>,
}

#[derive(Debug, Deserialize)]
struct Placement {
    kind: String,
    name: Option<String>,
    x: Option<f64>,
    y: Option<f64>,
    w: Option<f64>,
    h: Option<f64>,
    #[serde(default)]
    options: Option<Value>,
}

fn default_zoom() -> f64 {
    1.0
}

fn kind_for(name: &str) -> Result<&'static NodeKind, NodeError> {
    match name {
        "NoteNode" => Ok(&NOTE),
        "PromptNode" => Ok(&PROMPT),
        other => Err(NodeError::UnknownKind(other.to_string())),
    }
}

fn run(script: Script) -> Result<Canvas, NodeError> {
    let mut canvas = Canvas::new(script.viewport);
    canvas.register(NodeFactory::new(&NOTE).with_content(|| Content::from("note")));
    canvas.register(NodeFactory::new(&PROMPT));
    canvas.set_zoom(script.zoom)?;

    for placement in script.nodes {
        let kind = kind_for(&placement.kind)?;
        let init = NodeInit {
            name: placement.name,
            left: placement.x,
            top: placement.y,
            width: placement.w,
            height: placement.h,
        };
        let id = canvas.add_node(kind, Content::Empty, init)?;
        if let Some(options) = placement.options {
            let mut state = canvas
                .node(id)
                .map(|n| n.get_state())
                .ok_or(NodeError::AlreadyRemoved(id))?;
            state.options = Some(options);
            canvas.set_node_state(id, &state)?;
        }
    }

    for event in &script.events {
        if let Some((id, response)) = canvas.handle(event)? {
            log::info!("{event:?} -> {id} {response:?}");
        }
    }
    Ok(canvas)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let text = match env::args().nth(1) {
        Some(path) => fs::read_to_string(path)?,
        None => include_str!("replay.json").to_string(),
    };
    let script: Script = serde_json::from_str(&text)?;
    let canvas = run(script)?;
    println!("{}", canvas.to_json()?);
    Ok(())
}
