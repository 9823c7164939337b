use crate::anchor::node::Node;
use crate::anchor::policy::{
    Attributer, DEFAULT_ATTRIBUTER, DEFAULT_TEXTER, HeaderInfo, Position, Texter,
};
use crate::ast::{AttrValue, Block, Document, Inline, NodeMut, Phase, WalkStatus, walk_mut};
use crate::markdown::AstTransformer;
use std::sync::Arc;

/// Adds an anchor [`Node`] to every heading that has an identifier.
///
/// Headings without a text `id` attribute are left untouched, as are
/// headings for which the [`Texter`] returns an empty string.
#[derive(Clone, Default)]
pub struct Transformer {
    texter: Option<Arc<dyn Texter>>,
    attributer: Option<Arc<dyn Attributer>>,
    position: Position,
}

impl Transformer {
    pub fn new() -> Self {
        Transformer::default()
    }

    /// Anchor text policy. Unset means `¶`.
    pub fn with_texter(mut self, texter: Option<Arc<dyn Texter>>) -> Self {
        self.texter = texter;
        self
    }

    /// Anchor attributes policy. Unset means `class="anchor"`; an explicit
    /// empty set means no attributes.
    pub fn with_attributer(mut self, attributer: Option<Arc<dyn Attributer>>) -> Self {
        self.attributer = attributer;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The configured policies, with unset ones replaced by the defaults.
    fn policies(&self) -> Policies<'_> {
        Policies {
            texter: match &self.texter {
                Some(t) => t.as_ref(),
                None => &DEFAULT_TEXTER,
            },
            attributer: match &self.attributer {
                Some(a) => a.as_ref(),
                None => &*DEFAULT_ATTRIBUTER,
            },
        }
    }
}

/// Policies resolved for one transform run.
struct Policies<'a> {
    texter: &'a dyn Texter,
    attributer: &'a dyn Attributer,
}

impl Policies<'_> {
    /// Build the anchor for one heading, or `None` if it gets no anchor.
    fn anchor_for(&self, level: usize, id: Option<&AttrValue>) -> Option<Node> {
        let Some(id) = id else {
            tracing::trace!(level, "heading has no id, skipping");
            return None;
        };
        let Some(id) = id.as_text().filter(|id| !id.is_empty()) else {
            tracing::trace!(level, value = %id, "heading id is not usable text, skipping");
            return None;
        };

        let info = HeaderInfo { level, id };
        let text = self.texter.anchor_text(&info);
        if text.is_empty() {
            tracing::trace!(level, id, "empty anchor text, skipping");
            return None;
        }

        let mut node = Node::new(id, level, text);
        for (name, value) in self.attributer.anchor_attributes(&info).iter() {
            node.attributes.set(name.as_str(), value.as_str());
        }
        Some(node)
    }
}

impl AstTransformer for Transformer {
    fn transform(&self, doc: &mut Document) {
        let policies = self.policies();
        let (mut seen, mut added) = (0usize, 0usize);
        walk_mut(doc, &mut |node, phase| {
            if phase == Phase::Exiting {
                return WalkStatus::Continue;
            }
            let NodeMut::Block(Block::Heading {
                level,
                attrs,
                children,
            }) = node
            else {
                return WalkStatus::Continue;
            };

            seen += 1;
            let level = *level as usize;
            let Some(anchor) = policies.anchor_for(level, attrs.get("id")) else {
                return WalkStatus::SkipChildren;
            };
            tracing::debug!(id = %anchor.id, level, position = %self.position, "adding anchor");

            let anchor = Inline::custom(anchor);
            match self.position {
                Position::Before => children.insert(0, anchor),
                Position::After => children.push(anchor),
            }
            added += 1;
            WalkStatus::SkipChildren
        });
        tracing::debug!(headings = seen, anchors = added, "anchor transform finished");
    }
}
