//! Permalink anchors for Markdown headings.
//!
//! Markdown is parsed with pulldown-cmark into an owned tree ([`ast`]),
//! passed through tree transformers, and rendered to HTML ([`html`]). The
//! [`anchor`] extension hooks into both ends to place a link such as
//! `<a class="anchor" href="#usage">¶</a>` inside every heading that has an
//! identifier.

pub mod anchor;
pub mod ast;
pub mod error;
pub mod html;
pub mod markdown;
pub mod text;

pub use ast::Parser;
pub use error::{Error, Result};
pub use markdown::{AstTransformer, Extension, Markdown};
