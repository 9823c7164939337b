//! Per-heading anchor text and attributes.
//!
//! Run with `cargo run --example custom_policy`.

use pulldown_cmark_anchor::anchor::{Extender, Position, attributes_fn, text_fn};
use pulldown_cmark_anchor::{Markdown, Parser};
use std::collections::BTreeMap;

fn main() {
    let ext = Extender::new()
        .position(Position::Before)
        .texter(text_fn(|info| {
            // Top-level headings stay plain.
            if info.level == 1 {
                String::new()
            } else {
                "#".repeat(info.level)
            }
        }))
        .attributer(attributes_fn(|info| {
            BTreeMap::from([
                ("class".to_string(), "permalink".to_string()),
                ("aria-label".to_string(), format!("Link to {}", info.id)),
            ])
        }));

    let md = Markdown::new()
        .with_parser(Parser::new().with_auto_heading_id(true))
        .with_extension(&ext);

    let src = "# Guide\n\n## Install\n\n### From source\n\nSee below.\n";
    print!("{}", md.convert_to_string(src));
}
