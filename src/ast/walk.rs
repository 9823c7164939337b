//! Depth-first traversal over a [`Document`].
//!
//! Every node is visited twice: once with [`Phase::Entering`] before its
//! children and once with [`Phase::Exiting`] after them. The visitor steers
//! the walk through the [`WalkStatus`] it returns.

use crate::ast::{Block, Document, Inline};

/// Which of the two visits to a node is happening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Exiting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    Continue,
    /// Do not descend into the current node's children. Only meaningful on
    /// entry; the exit visit still happens.
    SkipChildren,
    /// Abort the whole walk.
    Stop,
}

/// Mutable handle to the node being visited.
#[derive(Debug)]
pub enum NodeMut<'a> {
    Block(&'a mut Block),
    Inline(&'a mut Inline),
}

/// Walk `doc` depth-first, calling `visit` on entry and exit of every node.
pub fn walk_mut<F>(doc: &mut Document, visit: &mut F) -> WalkStatus
where
    F: FnMut(NodeMut<'_>, Phase) -> WalkStatus,
{
    walk_blocks(&mut doc.blocks, visit)
}

fn walk_blocks<F>(blocks: &mut [Block], visit: &mut F) -> WalkStatus
where
    F: FnMut(NodeMut<'_>, Phase) -> WalkStatus,
{
    for b in blocks {
        if walk_block(b, visit) == WalkStatus::Stop {
            return WalkStatus::Stop;
        }
    }
    WalkStatus::Continue
}

fn walk_inlines<F>(inlines: &mut [Inline], visit: &mut F) -> WalkStatus
where
    F: FnMut(NodeMut<'_>, Phase) -> WalkStatus,
{
    for i in inlines {
        if walk_inline(i, visit) == WalkStatus::Stop {
            return WalkStatus::Stop;
        }
    }
    WalkStatus::Continue
}

fn walk_block<F>(b: &mut Block, visit: &mut F) -> WalkStatus
where
    F: FnMut(NodeMut<'_>, Phase) -> WalkStatus,
{
    match visit(NodeMut::Block(b), Phase::Entering) {
        WalkStatus::Stop => return WalkStatus::Stop,
        WalkStatus::SkipChildren => {}
        WalkStatus::Continue => {
            if walk_block_children(b, visit) == WalkStatus::Stop {
                return WalkStatus::Stop;
            }
        }
    }
    match visit(NodeMut::Block(b), Phase::Exiting) {
        WalkStatus::Stop => WalkStatus::Stop,
        _ => WalkStatus::Continue,
    }
}

fn walk_block_children<F>(b: &mut Block, visit: &mut F) -> WalkStatus
where
    F: FnMut(NodeMut<'_>, Phase) -> WalkStatus,
{
    match b {
        Block::Paragraph(inls) | Block::Plain(inls) => walk_inlines(inls, visit),
        Block::Heading { children, .. } => walk_inlines(children, visit),
        Block::BlockQuote(_, children) | Block::FootnoteDefinition(_, children) => {
            walk_blocks(children, visit)
        }
        Block::List { items, .. } => {
            for item in items {
                if walk_blocks(item, visit) == WalkStatus::Stop {
                    return WalkStatus::Stop;
                }
            }
            WalkStatus::Continue
        }
        Block::Table { head, rows, .. } => {
            for cell in head.iter_mut().chain(rows.iter_mut().flatten()) {
                if walk_inlines(cell, visit) == WalkStatus::Stop {
                    return WalkStatus::Stop;
                }
            }
            WalkStatus::Continue
        }
        Block::CodeBlock { .. } | Block::HtmlBlock(_) | Block::Rule => WalkStatus::Continue,
    }
}

fn walk_inline<F>(i: &mut Inline, visit: &mut F) -> WalkStatus
where
    F: FnMut(NodeMut<'_>, Phase) -> WalkStatus,
{
    match visit(NodeMut::Inline(i), Phase::Entering) {
        WalkStatus::Stop => return WalkStatus::Stop,
        WalkStatus::SkipChildren => {}
        WalkStatus::Continue => {
            if let Some(children) = i.children_mut() {
                if walk_inlines(children, visit) == WalkStatus::Stop {
                    return WalkStatus::Stop;
                }
            }
        }
    }
    match visit(NodeMut::Inline(i), Phase::Exiting) {
        WalkStatus::Stop => WalkStatus::Stop,
        _ => WalkStatus::Continue,
    }
}
