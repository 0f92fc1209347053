// Copyright 2025 the Mindtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Load a document, lay it out, toggle a branch, and edit a topic.
//!
//! This example shows how to combine:
//! - `mindtree_model` with the `serde` feature to read a document in the camelCase format,
//! - `mindtree_view` to own the document, an in-memory surface, and an event bus,
//! - `tracing-subscriber` to print the layout and edit events.
//!
//! Run:
//! - `cargo run -p mindtree_demos --example basic_mindmap`
//! - `RUST_LOG=mindtree_layout=debug cargo run -p mindtree_demos --example basic_mindmap`

use mindtree_edit::{EditInput, EditKey, Operation};
use mindtree_model::MindNode;
use mindtree_surface::{MemorySurface, Surface};
use mindtree_view::{MapConfig, MindMap};
use tracing_subscriber::EnvFilter;

const DOCUMENT: &str = r##"{
  "id": "root",
  "topic": "Release 2.0",
  "children": [
    { "id": "scope", "topic": "Scope", "tags": ["frozen"],
      "children": [
        { "id": "scope-api", "topic": "API cleanup" },
        { "id": "scope-docs", "topic": "Docs pass", "icons": ["📝"] }
      ] },
    { "id": "risks", "topic": "Risks", "direction": 0, "expanded": false,
      "children": [ { "id": "risks-ci", "topic": "Flaky CI" } ] },
    { "id": "launch", "topic": "Launch", "hyperLink": "https://example.com/launch",
      "style": { "color": "#c0392b", "fontSize": 18, "fontWeight": "bold" } }
  ]
}"##;

fn print_outline<B>(map: &MindMap<MemorySurface, B>)
where
    B: mindtree_edit::EventBus,
{
    let Some(tree) = map.tree() else {
        println!("(nothing rendered)");
        return;
    };
    let surface = map.surface();
    println!("{}", surface.text_content(tree.root.handles.topic));
    for (depth, node) in tree.walk() {
        let expander = node.expander_state().map_or(" ", |s| s.glyph());
        let side = node.side.map_or("", |d| d.class_name());
        println!(
            "{:indent$}[{expander}] {} {side}",
            "",
            surface.text_content(node.topic.handles.topic),
            indent = depth * 2,
        );
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    let doc: MindNode = serde_json::from_str(DOCUMENT)?;
    let bus = |op: Operation| {
        tracing::info!(op = op.name(), id = op.node_id(), "bus");
    };
    let mut map = MindMap::new(doc, MemorySurface::new(), bus, MapConfig::default());

    map.relayout()?;
    print_outline(&map);

    // Expanding "risks" redraws that branch only.
    map.toggle("risks")?;
    print_outline(&map);

    // Rename a topic the way a user would: open the editor, type, press Enter.
    map.begin_edit("scope-api")?;
    if let Some(editor) = map.editor().editor() {
        map.surface_mut().set_text(editor, "  Public API cleanup ");
    }
    map.handle_input(EditInput::key(EditKey::Enter))?;
    print_outline(&map);

    // Directions assigned by balancing were written back into the document.
    let (doc, _, _) = map.into_parts();
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
