mod common;

use common::{EditorScroll, RecordingHost};
use noteview_core::{
    Description, Facet, HtmlBuffer, Note, NotePresenter, NoteType, PresenterConfig, PresenterHost,
    ScrollBackend, ScrollSurface,
};

fn presenter_with(config: PresenterConfig) -> NotePresenter<HtmlBuffer, RecordingHost> {
    NotePresenter::new(config, HtmlBuffer::new(), RecordingHost::viewing())
}

fn text_note(description: &str) -> Note {
    Note::new(NoteType::Note, "Plan").with_description(Description::Raw(description.to_string()))
}

#[test]
fn preview_renders_buffer_without_touching_note() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let mut note = text_note("stored *text*");
    presenter.refresh(&mut note);
    let after_refresh = note.clone();
    assert_eq!(after_refresh.reads, 1);
    assert!(after_refresh.read_at.is_some());

    let editor = EditorScroll { offset: 0, max: 0 };
    presenter.refresh_live_preview("Plan v2", "draft **bold**", &editor);

    let html = presenter.surface().html();
    assert!(html.contains("draft <strong>bold</strong>"));
    assert!(html.contains("Plan v2"));
    assert!(!html.contains("stored"));
    assert_eq!(note, after_refresh);
}

#[test]
fn preview_follows_editor_scroll_fraction() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let mut note = text_note("body");
    presenter.refresh(&mut note);

    presenter.surface_mut().set_next_extent(400);
    let editor = EditorScroll {
        offset: 100,
        max: 200,
    };
    presenter.refresh_live_preview("Plan", "body\nmore", &editor);

    assert_eq!(presenter.surface().scroll_offset(), 200);
}

#[test]
fn preview_of_short_document_stays_at_top() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let mut note = text_note("body");
    presenter.refresh(&mut note);

    presenter.surface_mut().set_next_extent(0);
    let editor = EditorScroll {
        offset: 150,
        max: 200,
    };
    presenter.refresh_live_preview("Plan", "short", &editor);
    assert_eq!(presenter.surface().scroll_offset(), 0);
}

#[test]
fn refreshing_same_note_keeps_reader_position() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let mut note = text_note("long body");
    presenter.surface_mut().set_next_extent(1000);
    presenter.refresh(&mut note);
    presenter.surface_mut().set_scroll_offset(250);

    presenter.surface_mut().set_next_extent(1000);
    presenter.refresh(&mut note);
    assert_eq!(presenter.surface().scroll_offset(), 250);

    let mut other = text_note("other body");
    presenter.surface_mut().set_next_extent(1000);
    presenter.refresh(&mut other);
    assert_eq!(presenter.surface().scroll_offset(), 0);
}

#[test]
fn scripted_backend_embeds_scroll_hint() {
    let config = PresenterConfig {
        scroll_backend: ScrollBackend::Scripted,
        ..PresenterConfig::default()
    };
    let mut presenter = presenter_with(config);
    let mut note = text_note("body");
    presenter.refresh(&mut note);

    let editor = EditorScroll {
        offset: 30,
        max: 120,
    };
    presenter.refresh_live_preview("Plan", "body", &editor);
    assert!(presenter.surface().html().contains("extent * 25 / 100"));
}

#[test]
fn preview_never_autolinks() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let mut note = text_note("see https://example.com");
    presenter.refresh(&mut note);
    assert!(presenter
        .surface()
        .html()
        .contains("<a href=\"https://example.com\">"));

    let editor = EditorScroll { offset: 0, max: 0 };
    presenter.refresh_live_preview("Plan", "see https://example.com", &editor);
    let html = presenter.surface().html();
    assert!(html.contains("see https://example.com"));
    assert!(!html.contains("<a href"));
}

#[test]
fn preview_without_displayed_note_is_noop() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let editor = EditorScroll { offset: 0, max: 0 };
    presenter.refresh_live_preview("Plan", "text", &editor);
    assert_eq!(presenter.surface().loads(), 0);
}

#[test]
fn missing_collaborators_turn_preview_into_noop() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let mut note = text_note("body");
    presenter.refresh(&mut note);
    let editor = EditorScroll { offset: 0, max: 0 };
    let before = presenter.surface().html().to_string();

    presenter.set_markdown_parser(None);
    presenter.refresh_live_preview("Plan", "changed", &editor);
    assert_eq!(presenter.surface().html(), before);

    presenter.set_markdown_parser(Some(Box::new(noteview_core::LineBlockParser)));
    presenter.set_html_representation(None);
    presenter.refresh_live_preview("Plan", "changed", &editor);
    presenter.refresh(&mut note);
    assert_eq!(presenter.surface().html(), before);
    assert_eq!(presenter.surface().loads(), 1);
}

#[test]
fn edit_and_link_signals_reach_host() {
    let mut presenter = presenter_with(PresenterConfig::default());
    presenter.edit_note();
    assert!(presenter.host().opened_editors.is_empty());

    let mut note = text_note("body");
    presenter.refresh(&mut note);
    presenter.double_click();
    presenter.link_clicked("https://example.com/a");

    assert_eq!(presenter.host().opened_editors, vec![note.id]);
    assert_eq!(presenter.host().links, vec!["https://example.com/a".to_string()]);
}

#[test]
fn double_click_respects_setting() {
    let config = PresenterConfig {
        double_click_to_edit: false,
        ..PresenterConfig::default()
    };
    let mut presenter = presenter_with(config);
    let mut note = text_note("body");
    presenter.refresh(&mut note);

    presenter.double_click();
    assert!(presenter.host().opened_editors.is_empty());
    presenter.edit_note();
    assert_eq!(presenter.host().opened_editors, vec![note.id]);
}

#[test]
fn back_to_outlines_reaches_host_once() {
    let mut presenter = presenter_with(PresenterConfig::default());
    let mut note = text_note("body");
    presenter.refresh(&mut note);

    presenter.back_to_outlines();
    assert_eq!(presenter.host().outlines_shown, 1);
    assert!(presenter.host().is_facet_active(Facet::Outlines));

    presenter.back_to_outlines();
    assert_eq!(presenter.host().outlines_shown, 1);
}
