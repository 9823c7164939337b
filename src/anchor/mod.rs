//! Permalink anchors for headings.
//!
//! The [`Transformer`] inserts an anchor [`Node`] into each heading that has
//! an `id`, and the [`Renderer`] writes it out as `<a href="#id">text</a>`.
//! [`Extender`] installs both into a [`Markdown`](crate::Markdown)
//! converter with matching settings.

mod config;
mod extend;
mod node;
mod policy;
mod render;
mod transform;

pub use config::AnchorConfig;
pub use extend::{Extender, TRANSFORMER_PRIORITY};
pub use node::{KIND, Node};
pub use policy::{
    Attributer, Attributes, AttributesFn, HeaderInfo, Position, Text, TextFn, Texter,
    attributes_fn, text_fn,
};
pub use render::Renderer;
pub use transform::Transformer;
