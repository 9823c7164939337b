use crate::ast::{AttributeSet, InlineNode, NodeKind};
use std::any::Any;

/// Kind shared by every anchor node.
pub const KIND: NodeKind = NodeKind::new("Anchor");

/// An anchor link inside a heading.
///
/// The transformer creates one per eligible heading and places it before or
/// after the heading's existing content. The renderer turns it into
/// `<a href="#ID">VALUE</a>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    /// Identifier of the heading this anchor links to.
    pub id: String,

    /// Level of that heading.
    pub level: usize,

    /// Text shown inside the link.
    pub value: String,

    /// Attributes written onto the `<a>` element, in insertion order.
    pub attributes: AttributeSet,
}

impl Node {
    pub fn new(id: impl Into<String>, level: usize, value: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            level,
            value: value.into(),
            attributes: AttributeSet::new(),
        }
    }
}

impl InlineNode for Node {
    fn kind(&self) -> NodeKind {
        KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dump_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", self.id.clone()),
            ("Level", self.level.to_string()),
            ("Value", self.value.clone()),
        ]
    }
}
