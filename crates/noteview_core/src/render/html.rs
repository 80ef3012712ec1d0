//! Note-like value to HTML document.
//!
//! # Responsibility
//! - Convert a render request's markdown description into a standalone HTML
//!   document.
//! - Optionally wrap bare URLs in hyperlinks (autolinking).
//! - Emit the scroll script used when the surface cannot be scrolled from
//!   outside the document.
//!
//! # Invariants
//! - Output depends only on the request, the autolink flag, the scroll hint
//!   and the zoom factor; identical inputs give identical bytes.
//! - Malformed markdown never fails; it renders as literal text.
//! - Text inside code, links (markdown or inline `<a>`) and image alt text
//!   is never autolinked.

use crate::model::request::RenderRequest;
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;

static BARE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:https?://|www\.)[^\s<>"']*[^\s<>"'.,;:!?)\]]"#).expect("valid url regex")
});

/// Block-to-display converter consumed by the presenter.
pub trait HtmlRepresentation {
    /// Appends the display document for `request` to `out`.
    ///
    /// `scroll_hint` is a percentage (0..=100) of the scrollable extent the
    /// document should scroll itself to once loaded; 0 disables the script.
    fn to(&self, request: &RenderRequest, out: &mut String, autolink: bool, scroll_hint: u32);
}

/// Default representation backed by `pulldown-cmark`.
#[derive(Debug, Clone)]
pub struct MarkdownHtmlRepresentation {
    zoom_factor: f32,
}

impl MarkdownHtmlRepresentation {
    pub fn new(zoom_factor: f32) -> Self {
        Self { zoom_factor }
    }
}

impl Default for MarkdownHtmlRepresentation {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl HtmlRepresentation for MarkdownHtmlRepresentation {
    fn to(&self, request: &RenderRequest, out: &mut String, autolink: bool, scroll_hint: u32) {
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>");
        escape_html(&request.name, out);
        out.push_str("</title>\n");
        if (self.zoom_factor - 1.0).abs() > f32::EPSILON {
            out.push_str(&format!(
                "<style>body {{ zoom: {}; }}</style>\n",
                self.zoom_factor
            ));
        }
        out.push_str("</head>\n<body>\n");
        if !request.name.is_empty() {
            out.push_str("<h1 class=\"note-name\">");
            escape_html(&request.name, out);
            out.push_str("</h1>\n");
        }
        push_markdown(&request.description, autolink, out);
        if scroll_hint > 0 {
            push_scroll_script(scroll_hint.min(100), out);
        }
        out.push_str("</body>\n</html>\n");
    }
}

fn push_markdown(markdown: &str, autolink: bool, out: &mut String) {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    // Depth of code/link/image spans whose text must stay verbatim.
    let mut verbatim_depth = 0usize;
    let events = TextMergeStream::new(Parser::new_ext(markdown, options)).map(|event| {
        match &event {
            Event::Start(Tag::CodeBlock(_) | Tag::Link { .. } | Tag::Image { .. }) => {
                verbatim_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Link | TagEnd::Image) => {
                verbatim_depth = verbatim_depth.saturating_sub(1);
            }
            Event::Html(markup) | Event::InlineHtml(markup) => match anchor_markup(markup) {
                Some(AnchorMarkup::Open) => verbatim_depth += 1,
                Some(AnchorMarkup::Close) => verbatim_depth = verbatim_depth.saturating_sub(1),
                None => {}
            },
            _ => {}
        }
        match event {
            Event::Text(text) if autolink && verbatim_depth == 0 => match linkify(&text) {
                Some(linked) => Event::InlineHtml(linked.into()),
                None => Event::Text(text),
            },
            other => other,
        }
    });
    html::push_html(out, events);
}

enum AnchorMarkup {
    Open,
    Close,
}

/// Classifies raw HTML that opens or closes an `<a>` element.
fn anchor_markup(markup: &str) -> Option<AnchorMarkup> {
    let tag = markup.trim_start().as_bytes();
    let (close, name_start) = match tag {
        [b'<', b'/', ..] => (true, 2),
        [b'<', ..] => (false, 1),
        _ => return None,
    };
    let is_anchor = tag.get(name_start).is_some_and(|b| b.eq_ignore_ascii_case(&b'a'))
        && tag
            .get(name_start + 1)
            .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>');
    match (is_anchor, close) {
        (true, false) => Some(AnchorMarkup::Open),
        (true, true) => Some(AnchorMarkup::Close),
        (false, _) => None,
    }
}

/// Returns escaped HTML with bare URLs wrapped in anchors, or `None` when the
/// text has no URL.
fn linkify(text: &str) -> Option<String> {
    let mut matches = BARE_URL_RE.find_iter(text).peekable();
    matches.peek()?;

    let mut linked = String::with_capacity(text.len() + 32);
    let mut last = 0;
    for found in matches {
        escape_html(&text[last..found.start()], &mut linked);
        let url = found.as_str();
        linked.push_str("<a href=\"");
        if url.starts_with("www.") {
            linked.push_str("http://");
        }
        escape_html(url, &mut linked);
        linked.push_str("\">");
        escape_html(url, &mut linked);
        linked.push_str("</a>");
        last = found.end();
    }
    escape_html(&text[last..], &mut linked);
    Some(linked)
}

fn push_scroll_script(percent: u32, out: &mut String) {
    out.push_str("<script>\nwindow.addEventListener('load', function () {\n");
    out.push_str(
        "  var extent = document.documentElement.scrollHeight - window.innerHeight;\n",
    );
    out.push_str(&format!(
        "  if (extent > 0) {{ window.scrollTo(0, Math.round(extent * {percent} / 100)); }}\n"
    ));
    out.push_str("});\n</script>\n");
}

/// Appends `value` with HTML special characters escaped.
pub(crate) fn escape_html(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        anchor_markup, linkify, AnchorMarkup, HtmlRepresentation, MarkdownHtmlRepresentation,
    };
    use crate::model::note::NoteType;
    use crate::model::request::RenderRequest;

    fn render(description: &str, autolink: bool, hint: u32) -> String {
        let request = RenderRequest::live("N", &[description.to_string()], NoteType::Note);
        let mut out = String::new();
        MarkdownHtmlRepresentation::default().to(&request, &mut out, autolink, hint);
        out
    }

    #[test]
    fn linkify_wraps_urls_and_trims_trailing_punctuation() {
        let linked = linkify("see https://example.com/a, or www.rust-lang.org.")
            .expect("text contains urls");
        assert!(linked.contains("<a href=\"https://example.com/a\">https://example.com/a</a>,"));
        assert!(linked.contains("<a href=\"http://www.rust-lang.org\">www.rust-lang.org</a>."));
    }

    #[test]
    fn linkify_returns_none_without_urls() {
        assert!(linkify("plain <text>").is_none());
    }

    #[test]
    fn code_spans_and_blocks_are_not_autolinked() {
        let html = render("```\nhttps://example.com\n```", true, 0);
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn existing_links_are_not_nested() {
        let html = render("[https://example.com](https://example.com)", true, 0);
        assert_eq!(html.matches("<a href").count(), 1);
    }

    #[test]
    fn inline_html_anchors_are_not_nested() {
        let html = render(
            "see <a href=\"https://example.com\">https://example.com</a> now",
            true,
            0,
        );
        assert_eq!(html.matches("<a href").count(), 1);

        let html = render(
            "x <A HREF=\"x\">www.rust-lang.org</A> and https://after.org",
            true,
            0,
        );
        assert!(!html.contains("http://www.rust-lang.org"));
        assert!(html.contains("<a href=\"https://after.org\">"));
    }

    #[test]
    fn anchor_markup_ignores_other_tags() {
        assert!(matches!(anchor_markup("<a href='x'>"), Some(AnchorMarkup::Open)));
        assert!(matches!(anchor_markup("<a>"), Some(AnchorMarkup::Open)));
        assert!(matches!(anchor_markup("</A>"), Some(AnchorMarkup::Close)));
        assert!(anchor_markup("<abbr>").is_none());
        assert!(anchor_markup("<b>").is_none());
    }

    #[test]
    fn scroll_hint_adds_script_only_when_non_zero() {
        assert!(!render("x", false, 0).contains("<script>"));
        let html = render("x", false, 40);
        assert!(html.contains("extent * 40 / 100"));
    }

    #[test]
    fn zoom_factor_is_emitted_as_css() {
        let request = RenderRequest::live("", &[], NoteType::Note);
        let mut out = String::new();
        MarkdownHtmlRepresentation::new(1.5).to(&request, &mut out, false, 0);
        assert!(out.contains("zoom: 1.5;"));
        assert!(!out.contains("note-name"));
    }
}
