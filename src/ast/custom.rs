//! User-custom nodes support.
//!
//! Extensions add their own inline nodes to the tree through
//! [`Inline::Custom`](crate::ast::Inline::Custom). Each custom node reports a
//! [`NodeKind`] so renderers can be registered per kind, and exposes itself
//! as [`Any`] so code that knows the concrete type can get it back.

use std::any::Any;
use std::fmt;

/// Identifies a family of custom nodes, e.g. `NodeKind::new("Anchor")`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeKind(&'static str);

impl NodeKind {
    pub const fn new(name: &'static str) -> Self {
        NodeKind(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Trait describing a user-defined inline node.
pub trait InlineNode: fmt::Debug + Send + Sync + 'static {
    /// Kind used to pick the renderer for this node.
    fn kind(&self) -> NodeKind;

    fn as_any(&self) -> &dyn Any;

    /// Name/value pairs shown by [`dump`](crate::ast::dump).
    fn dump_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}
