use crate::ast::attributes::{AttrValue, AttributeSet};
use crate::ast::custom::InlineNode;
use crate::ast::inline::{Inline, inline_to_events};
use pulldown_cmark::{Alignment, BlockQuoteKind, CodeBlockKind, CowStr, Event, HeadingLevel, Tag, TagEnd};

/// Block level AST nodes.
#[derive(Clone, Debug)]
pub enum Block {
    Paragraph(Vec<Inline>),
    /// Inline content sitting directly in a container without a paragraph,
    /// e.g. the text of a tight list item.
    Plain(Vec<Inline>),
    Heading {
        level: HeadingLevel,
        /// `id`, `class` and any `{key=value}` attributes of the heading.
        attrs: AttributeSet,
        children: Vec<Inline>,
    },
    BlockQuote(Option<BlockQuoteKind>, Vec<Block>),
    CodeBlock {
        kind: CodeBlockKind<'static>,
        content: String,
    },
    HtmlBlock(String),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Rule,
    FootnoteDefinition(String, Vec<Block>),
    Table {
        aligns: Vec<Alignment>,
        head: Vec<Vec<Inline>>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
}

/// A parsed Markdown document.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Document { blocks }
    }
}

fn heading_tag(level: HeadingLevel, attrs: &AttributeSet) -> Tag<'static> {
    let mut classes = Vec::new();
    let mut rest = Vec::new();
    for (name, value) in attrs.iter() {
        match (name, value) {
            ("id", _) => {}
            ("class", AttrValue::List(items)) => {
                classes.extend(items.iter().map(|c| CowStr::from(c.clone())));
            }
            ("class", other) => {
                let joined = other.to_string();
                classes.extend(joined.split_whitespace().map(|c| CowStr::from(c.to_string())));
            }
            (_, AttrValue::Flag(true)) => rest.push((CowStr::from(name.to_string()), None)),
            (_, other) => rest.push((
                CowStr::from(name.to_string()),
                Some(CowStr::from(other.to_string())),
            )),
        }
    }
    Tag::Heading {
        level,
        id: attrs.id().map(|s| CowStr::from(s.to_string())),
        classes,
        attrs: rest,
    }
}

/// Convert a `Block` into pulldown-cmark events (owned, 'static).
pub fn block_to_events(
    b: &Block,
    out: &mut Vec<Event<'static>>,
    custom: &mut dyn FnMut(&dyn InlineNode, &mut Vec<Event<'static>>),
) {
    match b {
        Block::Paragraph(children) => {
            out.push(Event::Start(Tag::Paragraph));
            for c in children {
                inline_to_events(c, out, custom);
            }
            out.push(Event::End(TagEnd::Paragraph));
        }
        Block::Plain(children) => {
            for c in children {
                inline_to_events(c, out, custom);
            }
        }
        Block::Heading {
            level,
            attrs,
            children,
        } => {
            out.push(Event::Start(heading_tag(*level, attrs)));
            for c in children {
                inline_to_events(c, out, custom);
            }
            out.push(Event::End(TagEnd::Heading(*level)));
        }
        Block::BlockQuote(kind, children) => {
            out.push(Event::Start(Tag::BlockQuote(*kind)));
            for ch in children {
                block_to_events(ch, out, custom);
            }
            out.push(Event::End(TagEnd::BlockQuote(*kind)));
        }
        Block::CodeBlock { kind, content } => {
            out.push(Event::Start(Tag::CodeBlock(kind.clone())));
            if !content.is_empty() {
                out.push(Event::Text(CowStr::from(content.clone())));
            }
            out.push(Event::End(TagEnd::CodeBlock));
        }
        Block::HtmlBlock(html) => {
            out.push(Event::Start(Tag::HtmlBlock));
            out.push(Event::Html(CowStr::from(html.clone())));
            out.push(Event::End(TagEnd::HtmlBlock));
        }
        Block::List { start, items } => {
            out.push(Event::Start(Tag::List(*start)));
            for item in items {
                out.push(Event::Start(Tag::Item));
                for ch in item {
                    block_to_events(ch, out, custom);
                }
                out.push(Event::End(TagEnd::Item));
            }
            out.push(Event::End(TagEnd::List(start.is_some())));
        }
        Block::Rule => out.push(Event::Rule),
        Block::FootnoteDefinition(label, children) => {
            out.push(Event::Start(Tag::FootnoteDefinition(CowStr::from(label.clone()))));
            for ch in children {
                block_to_events(ch, out, custom);
            }
            out.push(Event::End(TagEnd::FootnoteDefinition));
        }
        Block::Table { aligns, head, rows } => {
            out.push(Event::Start(Tag::Table(aligns.clone())));
            out.push(Event::Start(Tag::TableHead));
            for cell in head {
                cell_to_events(cell, out, custom);
            }
            out.push(Event::End(TagEnd::TableHead));
            for row in rows {
                out.push(Event::Start(Tag::TableRow));
                for cell in row {
                    cell_to_events(cell, out, custom);
                }
                out.push(Event::End(TagEnd::TableRow));
            }
            out.push(Event::End(TagEnd::Table));
        }
    }
}

fn cell_to_events(
    cell: &[Inline],
    out: &mut Vec<Event<'static>>,
    custom: &mut dyn FnMut(&dyn InlineNode, &mut Vec<Event<'static>>),
) {
    out.push(Event::Start(Tag::TableCell));
    for c in cell {
        inline_to_events(c, out, custom);
    }
    out.push(Event::End(TagEnd::TableCell));
}
