//! Display surface contracts and the in-memory surface.

use crate::scroll::ScrollSurface;

/// Target that shows rendered markup.
pub trait DisplaySurface: ScrollSurface {
    /// Replaces the whole document.
    fn set_html(&mut self, html: &str);
    /// Posts a serialized diagram command into the current document.
    fn deliver_command(&mut self, json: &str);
}

/// Surface keeping its document in memory.
///
/// Used by the CLI and FFI layers, which hand the markup to a real viewer,
/// and by tests. Scroll extent is whatever the owner reports through
/// `set_max_scroll_offset` or `set_next_extent`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HtmlBuffer {
    html: String,
    offset: u32,
    max_offset: u32,
    next_extent: Option<u32>,
    delivered: Vec<String>,
    loads: u32,
}

impl HtmlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of documents loaded so far.
    pub fn loads(&self) -> u32 {
        self.loads
    }

    /// Commands posted into the current document.
    pub fn delivered(&self) -> &[String] {
        &self.delivered
    }

    pub fn set_max_scroll_offset(&mut self, max_offset: u32) {
        self.max_offset = max_offset;
        self.offset = self.offset.min(max_offset);
    }

    /// Extent the next loaded document will report.
    pub fn set_next_extent(&mut self, max_offset: u32) {
        self.next_extent = Some(max_offset);
    }
}

impl ScrollSurface for HtmlBuffer {
    fn scroll_offset(&self) -> u32 {
        self.offset
    }

    fn max_scroll_offset(&self) -> u32 {
        self.max_offset
    }

    fn set_scroll_offset(&mut self, offset: u32) {
        self.offset = offset.min(self.max_offset);
    }
}

impl DisplaySurface for HtmlBuffer {
    fn set_html(&mut self, html: &str) {
        self.html.clear();
        self.html.push_str(html);
        self.offset = 0;
        if let Some(extent) = self.next_extent.take() {
            self.max_offset = extent;
        }
        self.delivered.clear();
        self.loads += 1;
    }

    fn deliver_command(&mut self, json: &str) {
        self.delivered.push(json.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplaySurface, HtmlBuffer};
    use crate::scroll::ScrollSurface;

    #[test]
    fn loading_a_document_resets_scroll_and_applies_next_extent() {
        let mut surface = HtmlBuffer::new();
        surface.set_max_scroll_offset(200);
        surface.set_scroll_offset(150);
        surface.set_next_extent(400);

        surface.set_html("<p>x</p>");
        assert_eq!(surface.scroll_offset(), 0);
        assert_eq!(surface.max_scroll_offset(), 400);
        assert_eq!(surface.loads(), 1);
    }

    #[test]
    fn offsets_are_clamped_to_extent() {
        let mut surface = HtmlBuffer::new();
        surface.set_max_scroll_offset(50);
        surface.set_scroll_offset(80);
        assert_eq!(surface.scroll_offset(), 50);
    }
}
