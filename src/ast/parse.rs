use crate::ast::attributes::{AttrValue, AttributeSet};
use crate::ast::block::{Block, Document};
use crate::ast::ids::assign_heading_ids;
use crate::ast::inline::Inline;
use pulldown_cmark::{CowStr, Event, Options, Tag};

/// Markdown parser: pulldown-cmark plus tree building and, optionally,
/// automatic heading identifiers.
#[derive(Clone, Debug)]
pub struct Parser {
    options: Options,
    auto_heading_id: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Parser {
            options: Options::empty(),
            auto_heading_id: false,
        }
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser::default()
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Give every heading without an explicit `{#id}` a generated one.
    pub fn with_auto_heading_id(mut self, enabled: bool) -> Self {
        self.auto_heading_id = enabled;
        self
    }

    pub fn parse(&self, src: &str) -> Document {
        let events = pulldown_cmark::Parser::new_ext(src, self.options);
        let mut doc = Document::new(parse_events_to_blocks(events));
        if self.auto_heading_id {
            assign_heading_ids(&mut doc);
        }
        doc
    }
}

/// Collects heading `id`, classes and `{key=value}` pairs into one set.
fn heading_attributes(
    id: Option<CowStr<'_>>,
    classes: Vec<CowStr<'_>>,
    attrs: Vec<(CowStr<'_>, Option<CowStr<'_>>)>,
) -> AttributeSet {
    let mut set = AttributeSet::new();
    if let Some(id) = id {
        set.set("id", id.to_string());
    }
    if !classes.is_empty() {
        set.set(
            "class",
            AttrValue::List(classes.into_iter().map(|c| c.to_string()).collect()),
        );
    }
    for (name, value) in attrs {
        match value {
            Some(v) => set.set(name.to_string(), v.to_string()),
            None => set.set(name.to_string(), true),
        };
    }
    set
}

/// A stack frame used while parsing Start/End pairs.
struct Frame<'a> {
    tag: Tag<'a>,
    inlines: Vec<Inline>,
    blocks: Vec<Block>,
    items: Vec<Vec<Block>>,
    cells: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    raw: String,
}

impl<'a> Frame<'a> {
    fn new(tag: Tag<'a>) -> Self {
        Frame {
            tag,
            inlines: Vec::new(),
            blocks: Vec::new(),
            items: Vec::new(),
            cells: Vec::new(),
            rows: Vec::new(),
            raw: String::new(),
        }
    }

    fn collects_inlines(&self) -> bool {
        matches!(
            self.tag,
            Tag::Paragraph
                | Tag::Heading { .. }
                | Tag::Emphasis
                | Tag::Strong
                | Tag::Strikethrough
                | Tag::Subscript
                | Tag::Superscript
                | Tag::Link { .. }
                | Tag::Image { .. }
                | Tag::TableCell
        )
    }

    fn collects_raw(&self) -> bool {
        matches!(
            self.tag,
            Tag::CodeBlock(_) | Tag::HtmlBlock | Tag::MetadataBlock(_)
        )
    }
}

/// What a closed frame turns into.
enum Built {
    Block(Block),
    Inline(Inline),
    Item(Vec<Block>),
    Cell(Vec<Inline>),
    Row(Vec<Vec<Inline>>),
    /// A container we do not model; its content is lifted into the parent.
    Unwrapped(Vec<Block>),
    Nothing,
}

fn build(frame: Frame<'_>) -> Built {
    match frame.tag {
        Tag::Paragraph => Built::Block(Block::Paragraph(frame.inlines)),
        Tag::Heading {
            level,
            id,
            classes,
            attrs,
        } => Built::Block(Block::Heading {
            level,
            attrs: heading_attributes(id, classes, attrs),
            children: frame.inlines,
        }),
        Tag::BlockQuote(kind) => Built::Block(Block::BlockQuote(kind, frame.blocks)),
        Tag::CodeBlock(kind) => Built::Block(Block::CodeBlock {
            kind: kind.into_static(),
            content: frame.raw,
        }),
        Tag::HtmlBlock => Built::Block(Block::HtmlBlock(frame.raw)),
        Tag::MetadataBlock(_) => Built::Nothing,
        Tag::List(start) => Built::Block(Block::List {
            start,
            items: frame.items,
        }),
        Tag::Item => Built::Item(frame.blocks),
        Tag::FootnoteDefinition(label) => {
            Built::Block(Block::FootnoteDefinition(label.to_string(), frame.blocks))
        }
        Tag::Table(aligns) => {
            let mut rows = frame.rows.into_iter();
            let head = rows.next().unwrap_or_default();
            Built::Block(Block::Table {
                aligns,
                head,
                rows: rows.collect(),
            })
        }
        Tag::TableHead | Tag::TableRow => Built::Row(frame.cells),
        Tag::TableCell => Built::Cell(frame.inlines),
        Tag::Emphasis => Built::Inline(Inline::Emphasis(frame.inlines)),
        Tag::Strong => Built::Inline(Inline::Strong(frame.inlines)),
        Tag::Strikethrough => Built::Inline(Inline::Strikethrough(frame.inlines)),
        Tag::Subscript => Built::Inline(Inline::Subscript(frame.inlines)),
        Tag::Superscript => Built::Inline(Inline::Superscript(frame.inlines)),
        Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        } => Built::Inline(Inline::Link {
            link_type,
            dest: dest_url.to_string(),
            title: title.to_string(),
            id: id.to_string(),
            children: frame.inlines,
        }),
        Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        } => Built::Inline(Inline::Image {
            link_type,
            dest: dest_url.to_string(),
            title: title.to_string(),
            id: id.to_string(),
            children: frame.inlines,
        }),
        _ => {
            let mut blocks = frame.blocks;
            if !frame.inlines.is_empty() {
                blocks.push(Block::Paragraph(frame.inlines));
            }
            Built::Unwrapped(blocks)
        }
    }
}

/// Push an inline into the innermost frame. Containers that hold blocks get
/// it appended to a trailing `Plain` run so text stays together.
fn push_inline(stack: &mut [Frame<'_>], out: &mut Vec<Block>, inl: Inline) {
    let blocks = match stack.last_mut() {
        Some(top) if top.collects_inlines() => {
            top.inlines.push(inl);
            return;
        }
        Some(top) => &mut top.blocks,
        None => out,
    };
    match blocks.last_mut() {
        Some(Block::Plain(run)) => run.push(inl),
        _ => blocks.push(Block::Plain(vec![inl])),
    }
}

fn push_block(stack: &mut [Frame<'_>], out: &mut Vec<Block>, block: Block) {
    match stack.last_mut() {
        Some(top) => top.blocks.push(block),
        None => out.push(block),
    }
}

/// Convert a pulldown-cmark event stream into a vector of `Block` AST nodes.
pub fn parse_events_to_blocks<'a, I>(events: I) -> Vec<Block>
where
    I: IntoIterator<Item = Event<'a>>,
{
    let mut stack: Vec<Frame<'a>> = Vec::new();
    let mut out: Vec<Block> = Vec::new();

    for ev in events {
        if let Some(top) = stack.last_mut() {
            if top.collects_raw() {
                match &ev {
                    Event::Text(t) | Event::Html(t) => {
                        top.raw.push_str(t);
                        continue;
                    }
                    Event::End(_) => {}
                    _ => continue,
                }
            }
        }

        match ev {
            Event::Start(tag) => stack.push(Frame::new(tag)),
            Event::End(_) => {
                let Some(frame) = stack.pop() else {
                    continue;
                };
                match build(frame) {
                    Built::Block(b) => push_block(&mut stack, &mut out, b),
                    Built::Inline(i) => push_inline(&mut stack, &mut out, i),
                    Built::Item(blocks) => match stack.last_mut() {
                        Some(parent) => parent.items.push(blocks),
                        None => out.extend(blocks),
                    },
                    Built::Cell(cell) => {
                        if let Some(parent) = stack.last_mut() {
                            parent.cells.push(cell);
                        }
                    }
                    Built::Row(cells) => {
                        if let Some(parent) = stack.last_mut() {
                            parent.rows.push(cells);
                        }
                    }
                    Built::Unwrapped(blocks) => {
                        for b in blocks {
                            push_block(&mut stack, &mut out, b);
                        }
                    }
                    Built::Nothing => {}
                }
            }
            Event::Text(t) => push_inline(&mut stack, &mut out, Inline::Text(t.to_string())),
            Event::Code(t) => push_inline(&mut stack, &mut out, Inline::Code(t.to_string())),
            Event::InlineHtml(t) | Event::Html(t) => {
                push_inline(&mut stack, &mut out, Inline::InlineHtml(t.to_string()))
            }
            Event::SoftBreak => push_inline(&mut stack, &mut out, Inline::SoftBreak),
            Event::HardBreak => push_inline(&mut stack, &mut out, Inline::HardBreak),
            Event::FootnoteReference(t) => push_inline(
                &mut stack,
                &mut out,
                Inline::FootnoteReference(t.to_string()),
            ),
            Event::InlineMath(t) => {
                push_inline(&mut stack, &mut out, Inline::InlineMath(t.to_string()))
            }
            Event::DisplayMath(t) => {
                push_inline(&mut stack, &mut out, Inline::DisplayMath(t.to_string()))
            }
            Event::TaskListMarker(checked) => {
                push_inline(&mut stack, &mut out, Inline::TaskListMarker(checked))
            }
            Event::Rule => push_block(&mut stack, &mut out, Block::Rule),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::HeadingLevel;

    fn parse(src: &str) -> Vec<Block> {
        Parser::new()
            .with_options(Options::ENABLE_HEADING_ATTRIBUTES | Options::ENABLE_TABLES)
            .parse(src)
            .blocks
    }

    #[test]
    fn heading_keeps_children_and_attributes() {
        let blocks = parse("## Hello *world* {#greet .big data-x=1}\n");
        let Block::Heading {
            level,
            attrs,
            children,
        } = &blocks[0]
        else {
            panic!("expected heading, got {:?}", blocks[0]);
        };
        assert_eq!(*level, HeadingLevel::H2);
        assert_eq!(attrs.id(), Some("greet"));
        assert_eq!(attrs.get("class"), Some(&AttrValue::List(vec!["big".into()])));
        assert_eq!(attrs.get("data-x"), Some(&AttrValue::Text("1".into())));
        assert!(matches!(children[0], Inline::Text(ref t) if t == "Hello "));
        assert!(matches!(children[1], Inline::Emphasis(_)));
    }

    #[test]
    fn heading_without_explicit_id_has_none() {
        let blocks = parse("# Foo\n");
        let Block::Heading { attrs, .. } = &blocks[0] else {
            panic!("expected heading");
        };
        assert!(attrs.get("id").is_none());
    }

    #[test]
    fn empty_heading_has_no_children() {
        let blocks = parse("#\n");
        assert!(matches!(&blocks[0], Block::Heading { children, .. } if children.is_empty()));
    }

    #[test]
    fn tight_list_items_hold_plain_runs() {
        let blocks = parse("- one\n- two\n");
        let Block::List { start, items } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(*start, None);
        assert_eq!(items.len(), 2);
        assert!(matches!(&items[0][0], Block::Plain(run) if run.len() == 1));
    }

    #[test]
    fn code_and_html_blocks_keep_raw_text() {
        let blocks = parse("```rust\nfn main() {}\n```\n\n<div>\nhi\n</div>\n");
        assert!(matches!(&blocks[0], Block::CodeBlock { content, .. } if content == "fn main() {}\n"));
        assert!(matches!(&blocks[1], Block::HtmlBlock(html) if html == "<div>\nhi\n</div>\n"));
    }

    #[test]
    fn tables_split_head_and_rows() {
        let blocks = parse("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let Block::Table { aligns, head, rows } = &blocks[0] else {
            panic!("expected table");
        };
        assert_eq!(aligns.len(), 2);
        assert_eq!(head.len(), 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 2);
    }

    #[test]
    fn default_parser_has_no_extensions() {
        let blocks = Parser::default().parse("# Foo {#x}\n");
        let Block::Heading { attrs, children, .. } = &blocks.blocks[0] else {
            panic!("expected heading");
        };
        assert!(attrs.is_empty());
        let mut text = String::new();
        for c in children {
            c.push_plain_text(&mut text);
        }
        assert_eq!(text, "Foo {#x}");
    }
}
