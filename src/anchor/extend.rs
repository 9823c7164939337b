use crate::anchor::policy::{Attributer, Position, Texter};
use crate::anchor::render::Renderer;
use crate::anchor::transform::Transformer;
use crate::markdown::{Extension, Markdown};
use std::sync::Arc;

/// Priority the anchor transformer is installed with.
pub const TRANSFORMER_PRIORITY: i32 = 100;

/// Adds heading anchors to a [`Markdown`] converter.
///
/// Anchors are only added to headings that have an `id` attribute, so
/// pair this with a parser that assigns heading identifiers, e.g.
/// [`Parser::with_auto_heading_id`](crate::Parser::with_auto_heading_id).
///
/// ```
/// use pulldown_cmark_anchor::{Markdown, Parser};
/// use pulldown_cmark_anchor::anchor::{Attributes, Extender, Position, Text};
///
/// let md = Markdown::new()
///     .with_parser(Parser::new().with_auto_heading_id(true))
///     .with_extension(
///         &Extender::new()
///             .texter(Text::new("#"))
///             .attributer(Attributes::new())
///             .position(Position::Before),
///     );
/// assert_eq!(
///     md.convert_to_string("## Usage"),
///     "<h2 id=\"usage\"><a href=\"#usage\">#</a> Usage</h2>\n",
/// );
/// ```
#[derive(Clone, Default)]
pub struct Extender {
    texter: Option<Arc<dyn Texter>>,
    attributer: Option<Arc<dyn Attributer>>,
    position: Position,
    unsafe_text: bool,
}

impl Extender {
    pub fn new() -> Self {
        Extender::default()
    }

    /// Anchor text policy. Defaults to `¶`.
    pub fn texter<T: Texter + 'static>(mut self, texter: T) -> Self {
        self.texter = Some(Arc::new(texter));
        self
    }

    /// Anchor attributes policy. Defaults to `class="anchor"`. Pass an
    /// empty [`Attributes`](crate::anchor::Attributes) to add none.
    pub fn attributer<A: Attributer + 'static>(mut self, attributer: A) -> Self {
        self.attributer = Some(Arc::new(attributer));
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Write anchor text into the HTML without escaping.
    pub fn unsafe_text(mut self, unsafe_text: bool) -> Self {
        self.unsafe_text = unsafe_text;
        self
    }

    pub fn transformer(&self) -> Transformer {
        Transformer::new()
            .with_texter(self.texter.clone())
            .with_attributer(self.attributer.clone())
            .with_position(self.position)
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.position).with_unsafe_text(self.unsafe_text)
    }
}

impl Extension for Extender {
    fn extend(&self, md: &mut Markdown) {
        tracing::debug!(position = %self.position, unsafe_text = self.unsafe_text, "installing anchor extension");
        md.add_transformer(Arc::new(self.transformer()), TRANSFORMER_PRIORITY);
        md.renderer_mut().add_node_renderer(Arc::new(self.renderer()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser;
    use crate::anchor::{KIND, Text, text_fn};

    fn markdown(ext: &Extender) -> Markdown {
        Markdown::new()
            .with_parser(Parser::new().with_auto_heading_id(true))
            .with_extension(ext)
    }

    #[test]
    fn installs_renderer() {
        let md = markdown(&Extender::new());
        assert!(md.renderer().has_renderer(KIND));
    }

    #[test]
    fn default_anchor_after_text() {
        let md = markdown(&Extender::new());
        assert_eq!(
            md.convert_to_string("# Foo\n\nbody\n"),
            "<h1 id=\"foo\">Foo <a class=\"anchor\" href=\"#foo\">¶</a></h1>\n<p>body</p>\n"
        );
    }

    #[test]
    fn positions_agree_between_transform_and_render() {
        let ext = Extender::new().position(Position::Before);
        assert_eq!(ext.transformer().position(), Position::Before);
        assert_eq!(ext.renderer().position, Position::Before);
    }

    #[test]
    fn computed_text_per_level() {
        let md = markdown(&Extender::new().texter(text_fn(|info| "#".repeat(info.level))));
        assert_eq!(
            md.convert_to_string("### Deep"),
            "<h3 id=\"deep\">Deep <a class=\"anchor\" href=\"#deep\">###</a></h3>\n"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn pipeline_is_shareable_across_threads() {
        assert_send_sync::<Extender>();
        assert_send_sync::<Transformer>();
        assert_send_sync::<Renderer>();
        assert_send_sync::<Markdown>();

        let md = Arc::new(markdown(&Extender::new().texter(text_fn(|info| {
            format!("{}:{}", info.level, info.id)
        }))));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let md = Arc::clone(&md);
                std::thread::spawn(move || md.convert_to_string(&format!("# T{}", i)))
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(
                h.join().unwrap(),
                format!(
                    "<h1 id=\"t{i}\">T{i} <a class=\"anchor\" href=\"#t{i}\">1:t{i}</a></h1>\n"
                )
            );
        }
    }

    #[test]
    fn unsafe_text_is_written_raw() {
        let md = markdown(&Extender::new().texter(Text::new("<i>#</i>")).unsafe_text(true));
        assert_eq!(
            md.convert_to_string("# A"),
            "<h1 id=\"a\">A <a class=\"anchor\" href=\"#a\"><i>#</i></a></h1>\n"
        );
    }
}
