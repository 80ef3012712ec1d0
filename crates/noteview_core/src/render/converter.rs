//! Render request to display document.

use crate::model::request::RenderRequest;
use crate::render::cache::RenderCache;
use crate::render::html::{HtmlRepresentation, MarkdownHtmlRepresentation};
use log::debug;

/// Markup ready to be placed on a display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDocument {
    html: String,
}

impl DisplayDocument {
    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }
}

/// Renders `request` through `representation`, reusing `cache`.
///
/// Unrecognized note types are rendered as plain markdown with autolinking
/// forced off; they never get a diagram embed.
pub fn convert(
    representation: &dyn HtmlRepresentation,
    request: &RenderRequest,
    autolink: bool,
    scroll_hint: u32,
    cache: &mut RenderCache,
) -> DisplayDocument {
    let autolink = autolink && request.note_type.is_recognized();
    let out = cache.scratch();
    representation.to(request, out, autolink, scroll_hint);
    debug!(
        "event=document_rendered module=render status=ok type={} live={} autolink={} bytes={}",
        request.note_type,
        request.is_live(),
        autolink,
        out.len()
    );
    DisplayDocument { html: out.clone() }
}

/// Standalone converter owning its representation and buffer.
pub struct DocumentConverter {
    representation: Box<dyn HtmlRepresentation>,
    cache: RenderCache,
}

impl DocumentConverter {
    pub fn new(representation: Box<dyn HtmlRepresentation>, cache: RenderCache) -> Self {
        Self {
            representation,
            cache,
        }
    }

    /// Converter using the default markdown representation at `zoom_factor`.
    pub fn markdown(zoom_factor: f32) -> Self {
        Self::new(
            Box::new(MarkdownHtmlRepresentation::new(zoom_factor)),
            RenderCache::default(),
        )
    }

    pub fn render(
        &mut self,
        request: &RenderRequest,
        autolink: bool,
        scroll_hint: u32,
    ) -> DisplayDocument {
        convert(
            self.representation.as_ref(),
            request,
            autolink,
            scroll_hint,
            &mut self.cache,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DocumentConverter;
    use crate::model::note::NoteType;
    use crate::model::request::RenderRequest;

    #[test]
    fn unknown_types_are_never_autolinked() {
        let mut converter = DocumentConverter::markdown(1.0);
        let request = RenderRequest::live(
            "x",
            &["visit https://example.com".to_string()],
            NoteType::from_tag("Grow"),
        );
        let doc = converter.render(&request, true, 0);
        assert!(doc.as_str().contains("visit https://example.com"));
        assert!(!doc.as_str().contains("<a href"));
    }

    #[test]
    fn empty_description_renders_empty_body() {
        let mut converter = DocumentConverter::markdown(1.0);
        let request = RenderRequest::live("", &[], NoteType::Note);
        let doc = converter.render(&request, false, 0);
        assert!(doc.as_str().contains("<body>\n</body>"));
    }
}
