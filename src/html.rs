//! HTML rendering of a [`Document`].
//!
//! Standard nodes go through pulldown-cmark's own HTML writer. Custom inline
//! nodes are dispatched by [`NodeKind`] to a registered [`NodeRenderer`],
//! which is called once on entry and once on exit; whatever it writes is
//! spliced into the output as raw inline HTML.

use crate::ast::{Document, InlineNode, NodeKind, Phase, WalkStatus, block_to_events};
use pulldown_cmark::{CowStr, Event};
use pulldown_cmark_escape::escape_html;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

/// Output buffer handed to node renderers.
#[derive(Clone, Debug, Default)]
pub struct HtmlBuffer {
    buf: String,
}

impl HtmlBuffer {
    pub fn new() -> Self {
        HtmlBuffer::default()
    }

    pub fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    pub fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Write `s` with `<`, `>`, `&` and `"` replaced by entities.
    pub fn write_escaped(&mut self, s: &str) {
        // Writing into a String never fails.
        let _ = escape_html(&mut self.buf, s);
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Renders one kind of custom node.
pub trait NodeRenderer: Send + Sync {
    fn kind(&self) -> NodeKind;

    /// Called with [`Phase::Entering`] and then [`Phase::Exiting`] for every
    /// node of this renderer's kind.
    fn render(&self, w: &mut HtmlBuffer, node: &dyn InlineNode, phase: Phase) -> WalkStatus;
}

/// Document renderer with per-kind dispatch for custom nodes.
#[derive(Clone, Default)]
pub struct HtmlRenderer {
    renderers: HashMap<NodeKind, Arc<dyn NodeRenderer>>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        HtmlRenderer::default()
    }

    /// Register `renderer` for its kind, replacing any earlier registration.
    pub fn add_node_renderer(&mut self, renderer: Arc<dyn NodeRenderer>) -> &mut Self {
        self.renderers.insert(renderer.kind(), renderer);
        self
    }

    pub fn has_renderer(&self, kind: NodeKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    fn render_custom(&self, node: &dyn InlineNode, out: &mut Vec<Event<'static>>) {
        let Some(renderer) = self.renderers.get(&node.kind()) else {
            tracing::trace!(kind = %node.kind(), "no renderer registered, skipping node");
            return;
        };
        for phase in [Phase::Entering, Phase::Exiting] {
            let mut w = HtmlBuffer::new();
            renderer.render(&mut w, node, phase);
            if !w.is_empty() {
                out.push(Event::InlineHtml(CowStr::from(w.into_string())));
            }
        }
    }

    /// Flatten `doc` into pulldown-cmark events with custom nodes already
    /// rendered.
    pub fn events(&self, doc: &Document) -> Vec<Event<'static>> {
        let mut out = Vec::new();
        let mut custom =
            |node: &dyn InlineNode, out: &mut Vec<Event<'static>>| self.render_custom(node, out);
        for b in &doc.blocks {
            block_to_events(b, &mut out, &mut custom);
        }
        out
    }

    pub fn render(&self, doc: &Document) -> String {
        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, self.events(doc).into_iter());
        html
    }

    pub fn render_to<W: io::Write>(&self, doc: &Document, w: W) -> io::Result<()> {
        pulldown_cmark::html::write_html_io(w, self.events(doc).into_iter())
    }
}
