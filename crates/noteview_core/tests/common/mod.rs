#![allow(dead_code)]

use noteview_core::{AssociatedNotes, Facet, LiveEditBuffer, NoteId, PresenterHost, ScrollSurface};

/// Host fake recording every signal it receives.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub active_facet: Option<Facet>,
    pub diagram_texts: Vec<String>,
    pub associations: Vec<AssociatedNotes>,
    pub opened_editors: Vec<NoteId>,
    pub links: Vec<String>,
    pub closed_editors: u32,
    pub outlines_shown: u32,
}

impl RecordingHost {
    pub fn viewing() -> Self {
        Self {
            active_facet: Some(Facet::ViewNote),
            ..Self::default()
        }
    }
}

impl LiveEditBuffer for RecordingHost {
    fn receive_diagram_text(&mut self, text: &str) {
        self.diagram_texts.push(text.to_string());
    }
}

impl PresenterHost for RecordingHost {
    fn is_facet_active(&self, facet: Facet) -> bool {
        self.active_facet == Some(facet)
    }

    fn show_associations(&mut self, associations: &AssociatedNotes) {
        self.associations.push(associations.clone());
    }

    fn open_editor(&mut self, note_id: NoteId) {
        self.opened_editors.push(note_id);
    }

    fn open_link(&mut self, url: &str) {
        self.links.push(url.to_string());
    }

    fn save_and_close_editor(&mut self) {
        self.closed_editors += 1;
    }

    fn show_outlines(&mut self) {
        self.outlines_shown += 1;
        self.active_facet = Some(Facet::Outlines);
    }
}

/// Editor scrollbar fake.
#[derive(Debug, Clone, Copy)]
pub struct EditorScroll {
    pub offset: u32,
    pub max: u32,
}

impl ScrollSurface for EditorScroll {
    fn scroll_offset(&self) -> u32 {
        self.offset
    }

    fn max_scroll_offset(&self) -> u32 {
        self.max
    }

    fn set_scroll_offset(&mut self, offset: u32) {
        self.offset = offset;
    }
}

/// Extracts the base64 payload literal embedded in a diagram page.
pub fn embedded_payload(page: &str) -> Option<&str> {
    let start = page.find("decodePayload('")? + "decodePayload('".len();
    let end = start + page[start..].find('\'')?;
    Some(&page[start..end])
}
