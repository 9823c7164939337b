use crate::ast::custom::InlineNode;
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use std::sync::Arc;

/// Inline level AST nodes.
#[derive(Clone, Debug)]
pub enum Inline {
    Text(String),
    Code(String),
    InlineHtml(String),
    SoftBreak,
    HardBreak,
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Subscript(Vec<Inline>),
    Superscript(Vec<Inline>),
    Link {
        link_type: LinkType,
        dest: String,
        title: String,
        id: String,
        children: Vec<Inline>,
    },
    Image {
        link_type: LinkType,
        dest: String,
        title: String,
        id: String,
        children: Vec<Inline>,
    },
    FootnoteReference(String),
    InlineMath(String),
    DisplayMath(String),
    TaskListMarker(bool),
    /// A node contributed by an extension. Shared behind an `Arc` so the
    /// tree stays cheap to clone.
    Custom(Arc<dyn InlineNode>),
}

impl Inline {
    pub fn custom<N: InlineNode>(node: N) -> Self {
        Inline::Custom(Arc::new(node))
    }

    /// Downcast a custom node to its concrete type.
    pub fn as_custom<N: InlineNode>(&self) -> Option<&N> {
        match self {
            Inline::Custom(node) => node.as_any().downcast_ref::<N>(),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Inline] {
        match self {
            Inline::Emphasis(c)
            | Inline::Strong(c)
            | Inline::Strikethrough(c)
            | Inline::Subscript(c)
            | Inline::Superscript(c)
            | Inline::Link { children: c, .. }
            | Inline::Image { children: c, .. } => c,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Inline::Emphasis(c)
            | Inline::Strong(c)
            | Inline::Strikethrough(c)
            | Inline::Subscript(c)
            | Inline::Superscript(c)
            | Inline::Link { children: c, .. }
            | Inline::Image { children: c, .. } => Some(c),
            _ => None,
        }
    }

    /// Append the visible text of this node to `out`. Markup, raw HTML and
    /// custom nodes contribute nothing.
    pub fn push_plain_text(&self, out: &mut String) {
        match self {
            Inline::Text(s) | Inline::Code(s) | Inline::InlineMath(s) => out.push_str(s),
            Inline::SoftBreak | Inline::HardBreak => out.push(' '),
            _ => {
                for c in self.children() {
                    c.push_plain_text(out);
                }
            }
        }
    }
}

/// Convert `Inline` to a sequence of pulldown-cmark Events (owned, 'static).
///
/// Custom nodes have no event form of their own; they are handed to `custom`
/// which may push whatever events stand for them.
pub fn inline_to_events(
    inl: &Inline,
    out: &mut Vec<Event<'static>>,
    custom: &mut dyn FnMut(&dyn InlineNode, &mut Vec<Event<'static>>),
) {
    let mut wrap = |tag: Tag<'static>, end: TagEnd, children: &[Inline], out: &mut Vec<_>| {
        out.push(Event::Start(tag));
        for c in children {
            inline_to_events(c, out, custom);
        }
        out.push(Event::End(end));
    };

    match inl {
        Inline::Text(s) => out.push(Event::Text(CowStr::from(s.clone()))),
        Inline::Code(s) => out.push(Event::Code(CowStr::from(s.clone()))),
        Inline::InlineHtml(s) => out.push(Event::InlineHtml(CowStr::from(s.clone()))),
        Inline::SoftBreak => out.push(Event::SoftBreak),
        Inline::HardBreak => out.push(Event::HardBreak),
        Inline::Emphasis(c) => wrap(Tag::Emphasis, TagEnd::Emphasis, c, out),
        Inline::Strong(c) => wrap(Tag::Strong, TagEnd::Strong, c, out),
        Inline::Strikethrough(c) => wrap(Tag::Strikethrough, TagEnd::Strikethrough, c, out),
        Inline::Subscript(c) => wrap(Tag::Subscript, TagEnd::Subscript, c, out),
        Inline::Superscript(c) => wrap(Tag::Superscript, TagEnd::Superscript, c, out),
        Inline::Link {
            link_type,
            dest,
            title,
            id,
            children,
        } => {
            let tag = Tag::Link {
                link_type: *link_type,
                dest_url: CowStr::from(dest.clone()),
                title: CowStr::from(title.clone()),
                id: CowStr::from(id.clone()),
            };
            wrap(tag, TagEnd::Link, children, out);
        }
        Inline::Image {
            link_type,
            dest,
            title,
            id,
            children,
        } => {
            let tag = Tag::Image {
                link_type: *link_type,
                dest_url: CowStr::from(dest.clone()),
                title: CowStr::from(title.clone()),
                id: CowStr::from(id.clone()),
            };
            wrap(tag, TagEnd::Image, children, out);
        }
        Inline::FootnoteReference(s) => out.push(Event::FootnoteReference(CowStr::from(s.clone()))),
        Inline::InlineMath(s) => out.push(Event::InlineMath(CowStr::from(s.clone()))),
        Inline::DisplayMath(s) => out.push(Event::DisplayMath(CowStr::from(s.clone()))),
        Inline::TaskListMarker(checked) => out.push(Event::TaskListMarker(*checked)),
        Inline::Custom(node) => custom(&**node, out),
    }
}
