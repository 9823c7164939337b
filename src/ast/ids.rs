//! Automatic heading identifiers.

use crate::ast::walk::{NodeMut, Phase, WalkStatus, walk_mut};
use crate::ast::{Block, Document};
use std::collections::HashSet;

/// Hands out unique heading identifiers for one document.
///
/// ```
/// use pulldown_cmark_anchor::ast::HeadingIds;
///
/// let mut ids = HeadingIds::new();
/// assert_eq!(ids.generate("Foo Bar"), "foo-bar");
/// assert_eq!(ids.generate("Foo  bar"), "foo--bar");
/// assert_eq!(ids.generate("foo bar"), "foo-bar-1");
/// ```
#[derive(Debug, Default)]
pub struct HeadingIds(HashSet<String>);

impl HeadingIds {
    pub fn new() -> Self {
        HeadingIds(HashSet::new())
    }

    /// Record an identifier that was assigned explicitly so generated ones
    /// never collide with it.
    pub fn reserve(&mut self, id: &str) {
        self.0.insert(id.to_string());
    }

    /// Derive an identifier from heading text.
    ///
    /// ASCII letters and digits are kept (lower-cased), ASCII whitespace,
    /// `-` and `_` become `-`, and everything else is dropped. An empty
    /// result becomes `heading`. Repeats get a `-1`, `-2`, ... suffix.
    pub fn generate(&mut self, text: &str) -> String {
        let mut base = String::with_capacity(text.len());
        for c in text.trim().chars() {
            if c.is_ascii_alphanumeric() {
                base.push(c.to_ascii_lowercase());
            } else if c.is_ascii_whitespace() || c == '-' || c == '_' {
                base.push('-');
            }
        }
        if base.is_empty() {
            base.push_str("heading");
        }

        let mut id = base.clone();
        let mut uniq = 0;
        while self.0.contains(&id) {
            uniq += 1;
            id = format!("{}-{}", base, uniq);
        }
        self.0.insert(id.clone());
        id
    }
}

/// Give every heading without an `id` attribute a generated one, in
/// document order. Explicit identifiers are kept and reserved.
pub fn assign_heading_ids(doc: &mut Document) {
    let mut ids = HeadingIds::new();
    walk_mut(doc, &mut |node, phase| {
        if phase == Phase::Exiting {
            return WalkStatus::Continue;
        }
        let NodeMut::Block(Block::Heading {
            attrs, children, ..
        }) = node
        else {
            return WalkStatus::Continue;
        };
        match attrs.id() {
            Some(id) => ids.reserve(id),
            None if attrs.get("id").is_none() => {
                let mut text = String::new();
                for c in children.iter() {
                    c.push_plain_text(&mut text);
                }
                attrs.set("id", ids.generate(&text));
            }
            // Something else already owns the key; leave it alone.
            None => {}
        }
        WalkStatus::SkipChildren
    });
}
