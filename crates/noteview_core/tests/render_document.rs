use noteview_core::{
    Description, DocumentConverter, LineBlockParser, MarkdownParser, Note, NoteType, RenderRequest,
};

fn persisted(description: &str) -> RenderRequest {
    let note = Note::new(NoteType::Note, "Plain")
        .with_description(Description::Raw(description.to_string()));
    RenderRequest::persisted(&note)
}

#[test]
fn emphasis_is_rendered_without_links_when_autolink_is_off() {
    let mut converter = DocumentConverter::markdown(1.0);
    let doc = converter.render(&persisted("hello *world*"), false, 0);
    assert!(doc.as_str().contains("hello <em>world</em>"));
    assert!(!doc.as_str().contains("<a "));
}

#[test]
fn identical_input_renders_identical_bytes() {
    let source = "# Plan\n\n- [ ] item with https://example.com\n\n| a | b |\n|---|---|\n| 1 | 2 |";
    let mut first = DocumentConverter::markdown(1.0);
    let mut second = DocumentConverter::markdown(1.0);
    for autolink in [false, true] {
        let a = first.render(&persisted(source), autolink, 0);
        let b = second.render(&persisted(source), autolink, 0);
        let again = first.render(&persisted(source), autolink, 0);
        assert_eq!(a, b);
        assert_eq!(a, again);
    }
}

#[test]
fn autolink_wraps_bare_urls_in_persisted_notes() {
    let mut converter = DocumentConverter::markdown(1.0);
    let doc = converter.render(&persisted("read https://example.com/docs today"), true, 0);
    assert!(doc
        .as_str()
        .contains("<a href=\"https://example.com/docs\">https://example.com/docs</a>"));
}

#[test]
fn malformed_markdown_degrades_to_text() {
    let mut converter = DocumentConverter::markdown(1.0);
    let doc = converter.render(&persisted("**unclosed [link]( <b>"), false, 0);
    assert!(doc.as_str().contains("unclosed"));
    assert!(doc.as_str().ends_with("</html>\n"));
}

#[test]
fn note_name_is_escaped() {
    let note = Note::new(NoteType::Note, "<script>alert(1)</script>");
    let mut converter = DocumentConverter::markdown(1.0);
    let doc = converter.render(&RenderRequest::persisted(&note), false, 0);
    assert!(!doc.as_str().contains("<script>alert"));
    assert!(doc.as_str().contains("&lt;script&gt;"));
}

#[test]
fn live_request_from_parsed_blocks_matches_persisted_rendering() {
    let raw = "line one\r\n*two*\r\n";
    let blocks = LineBlockParser.parse(raw);
    let live = RenderRequest::live("Plain", &blocks, NoteType::Note);

    let note = Note::new(NoteType::Note, "Plain")
        .with_description(Description::Blocks(vec!["line one".into(), "*two*".into()]));
    let stored = RenderRequest::persisted(&note);

    let mut converter = DocumentConverter::markdown(1.0);
    let live_doc = converter.render(&live, false, 0);
    let stored_doc = converter.render(&stored, false, 0);
    assert_eq!(live_doc, stored_doc);
}
