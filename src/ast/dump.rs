//! Human-readable dump of a document tree, for debugging.

use crate::ast::{Block, Document, Inline};
use crate::text::Region;

/// Render `doc` as an indented tree, one node per `Name { ... }` group.
pub fn dump(doc: &Document) -> String {
    let mut children = Region::new();
    for b in &doc.blocks {
        children.append(dump_block(b));
    }
    node_region("Document", Vec::new(), children).apply()
}

fn node_region(name: &str, fields: Vec<(String, String)>, children: Region) -> Region {
    let mut r = Region::new();
    for (k, v) in fields {
        r.push_back_line(format!("{}: {}", k, v));
    }
    r.append(children);
    r.indent_each_line(4);
    r.push_front_line(format!("{} {{", name));
    r.push_back_line("}");
    r
}

fn field(name: &str, value: impl ToString) -> (String, String) {
    (name.to_string(), value.to_string())
}

fn inlines_region(inls: &[Inline]) -> Region {
    let mut r = Region::new();
    for i in inls {
        r.append(dump_inline(i));
    }
    r
}

fn blocks_region(blocks: &[Block]) -> Region {
    let mut r = Region::new();
    for b in blocks {
        r.append(dump_block(b));
    }
    r
}

fn dump_block(b: &Block) -> Region {
    match b {
        Block::Paragraph(inls) => node_region("Paragraph", Vec::new(), inlines_region(inls)),
        Block::Plain(inls) => node_region("Plain", Vec::new(), inlines_region(inls)),
        Block::Heading {
            level,
            attrs,
            children,
        } => {
            let mut fields = vec![field("Level", *level as usize)];
            fields.extend(attrs.iter().map(|(n, v)| (format!("[{}]", n), v.to_string())));
            node_region("Heading", fields, inlines_region(children))
        }
        Block::BlockQuote(_, children) => {
            node_region("BlockQuote", Vec::new(), blocks_region(children))
        }
        Block::CodeBlock { content, .. } => node_region(
            "CodeBlock",
            vec![field("Content", format!("{:?}", content))],
            Region::new(),
        ),
        Block::HtmlBlock(html) => node_region(
            "HtmlBlock",
            vec![field("Content", format!("{:?}", html))],
            Region::new(),
        ),
        Block::List { start, items } => {
            let mut children = Region::new();
            for item in items {
                children.append(node_region("Item", Vec::new(), blocks_region(item)));
            }
            let fields = match start {
                Some(n) => vec![field("Start", n)],
                None => Vec::new(),
            };
            node_region("List", fields, children)
        }
        Block::Rule => node_region("Rule", Vec::new(), Region::new()),
        Block::FootnoteDefinition(label, children) => node_region(
            "FootnoteDefinition",
            vec![field("Label", label)],
            blocks_region(children),
        ),
        Block::Table { head, rows, .. } => {
            let mut children = Region::new();
            for row in std::iter::once(head).chain(rows.iter()) {
                let mut cells = Region::new();
                for cell in row {
                    cells.append(node_region("Cell", Vec::new(), inlines_region(cell)));
                }
                children.append(node_region("Row", Vec::new(), cells));
            }
            node_region("Table", Vec::new(), children)
        }
    }
}

fn leaf(name: &str, content: &str) -> Region {
    node_region(name, vec![field("Content", format!("{:?}", content))], Region::new())
}

fn dump_inline(i: &Inline) -> Region {
    match i {
        Inline::Text(s) => leaf("Text", s),
        Inline::Code(s) => leaf("Code", s),
        Inline::InlineHtml(s) => leaf("InlineHtml", s),
        Inline::InlineMath(s) => leaf("InlineMath", s),
        Inline::DisplayMath(s) => leaf("DisplayMath", s),
        Inline::FootnoteReference(s) => leaf("FootnoteReference", s),
        Inline::SoftBreak => node_region("SoftBreak", Vec::new(), Region::new()),
        Inline::HardBreak => node_region("HardBreak", Vec::new(), Region::new()),
        Inline::TaskListMarker(checked) => {
            node_region("TaskListMarker", vec![field("Checked", checked)], Region::new())
        }
        Inline::Emphasis(c) => node_region("Emphasis", Vec::new(), inlines_region(c)),
        Inline::Strong(c) => node_region("Strong", Vec::new(), inlines_region(c)),
        Inline::Strikethrough(c) => node_region("Strikethrough", Vec::new(), inlines_region(c)),
        Inline::Subscript(c) => node_region("Subscript", Vec::new(), inlines_region(c)),
        Inline::Superscript(c) => node_region("Superscript", Vec::new(), inlines_region(c)),
        Inline::Link { dest, children, .. } => {
            node_region("Link", vec![field("Destination", dest)], inlines_region(children))
        }
        Inline::Image { dest, children, .. } => {
            node_region("Image", vec![field("Destination", dest)], inlines_region(children))
        }
        Inline::Custom(node) => {
            let fields = node
                .dump_fields()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect();
            node_region(node.kind().name(), fields, Region::new())
        }
    }
}
