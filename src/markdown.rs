//! The conversion pipeline: parse, transform, render.

use crate::ast::{Document, Parser};
use crate::error::Result;
use crate::html::HtmlRenderer;
use std::io;
use std::sync::Arc;

/// A pass over the parsed tree, run before rendering.
pub trait AstTransformer: Send + Sync {
    fn transform(&self, doc: &mut Document);
}

/// Something that installs transformers and renderers into a [`Markdown`].
pub trait Extension {
    fn extend(&self, md: &mut Markdown);
}

/// Markdown to HTML converter.
///
/// ```
/// use pulldown_cmark_anchor::{Markdown, Parser, anchor};
///
/// let md = Markdown::new()
///     .with_parser(Parser::new().with_auto_heading_id(true))
///     .with_extension(&anchor::Extender::new());
/// assert_eq!(
///     md.convert_to_string("# Foo"),
///     "<h1 id=\"foo\">Foo <a class=\"anchor\" href=\"#foo\">¶</a></h1>\n",
/// );
/// ```
#[derive(Clone, Default)]
pub struct Markdown {
    parser: Parser,
    transformers: Vec<(i32, Arc<dyn AstTransformer>)>,
    renderer: HtmlRenderer,
}

impl Markdown {
    pub fn new() -> Self {
        Markdown::default()
    }

    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_extension<E: Extension + ?Sized>(mut self, ext: &E) -> Self {
        ext.extend(&mut self);
        self
    }

    pub fn renderer(&self) -> &HtmlRenderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut HtmlRenderer {
        &mut self.renderer
    }

    /// Add a transformer. Higher priorities run first; equal priorities run
    /// in the order they were added.
    pub fn add_transformer(&mut self, transformer: Arc<dyn AstTransformer>, priority: i32) {
        let idx = self
            .transformers
            .iter()
            .position(|(p, _)| *p < priority)
            .unwrap_or(self.transformers.len());
        self.transformers.insert(idx, (priority, transformer));
    }

    /// Parse `src` and run every transformer over the result.
    pub fn parse(&self, src: &str) -> Document {
        let mut doc = self.parser.parse(src);
        for (_, t) in &self.transformers {
            t.transform(&mut doc);
        }
        doc
    }

    pub fn convert<W: io::Write>(&self, src: &str, w: W) -> Result<()> {
        let doc = self.parse(src);
        self.renderer.render_to(&doc, w)?;
        Ok(())
    }

    pub fn convert_to_string(&self, src: &str) -> String {
        self.renderer.render(&self.parse(src))
    }
}
