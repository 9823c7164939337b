use crate::anchor::node::{KIND, Node};
use crate::anchor::policy::Position;
use crate::ast::{InlineNode, NodeKind, Phase, WalkStatus};
use crate::html::{HtmlBuffer, NodeRenderer};

/// Renders anchor [`Node`]s as `<a>` elements.
///
/// With [`Position::Before`] the link is followed by a space; with
/// [`Position::After`] it is preceded by one. The position must match the
/// one the nodes were inserted with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Renderer {
    pub position: Position,

    /// Write the anchor text without escaping it.
    pub unsafe_text: bool,
}

impl Renderer {
    pub fn new(position: Position) -> Self {
        Renderer {
            position,
            unsafe_text: false,
        }
    }

    pub fn with_unsafe_text(mut self, unsafe_text: bool) -> Self {
        self.unsafe_text = unsafe_text;
        self
    }

    fn write_link(&self, w: &mut HtmlBuffer, n: &Node) {
        w.write_str("<a");
        for (name, value) in n.attributes.iter() {
            w.write_char(' ');
            w.write_str(name);
            w.write_str("=\"");
            w.write_escaped(&value.to_string());
            w.write_char('"');
        }
        w.write_str(" href=\"#");
        w.write_escaped(&n.id);
        w.write_str("\">");
        if self.unsafe_text {
            w.write_str(&n.value);
        } else {
            w.write_escaped(&n.value);
        }
        w.write_str("</a>");
    }
}

impl NodeRenderer for Renderer {
    fn kind(&self) -> NodeKind {
        KIND
    }

    fn render(&self, w: &mut HtmlBuffer, node: &dyn InlineNode, phase: Phase) -> WalkStatus {
        // Before-anchors are written on entry, after-anchors on exit.
        if (self.position == Position::Before) != (phase == Phase::Entering) {
            return WalkStatus::Continue;
        }
        let Some(n) = node.as_any().downcast_ref::<Node>() else {
            return WalkStatus::Continue;
        };
        if n.id.is_empty() {
            return WalkStatus::Continue;
        }

        match self.position {
            Position::Before => {
                self.write_link(w, n);
                w.write_char(' ');
            }
            Position::After => {
                w.write_char(' ');
                self.write_link(w, n);
            }
        }
        WalkStatus::Continue
    }
}
