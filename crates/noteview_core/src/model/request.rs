//! Per-render request value.
//!
//! A `RenderRequest` is built fresh for every render pass and dropped once
//! the display surface has been updated. It is the note-like value handed to
//! the HTML representation, so live previews never need to touch the
//! persisted note.

use crate::model::note::{Note, NoteType};

/// Origin of the content being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSource {
    /// Persisted note content.
    Persisted,
    /// Unsaved editor buffer.
    LiveBuffer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub source: RenderSource,
    pub name: String,
    pub description: String,
    pub note_type: NoteType,
}

impl RenderRequest {
    /// Snapshot of a persisted note.
    pub fn persisted(note: &Note) -> Self {
        Self {
            source: RenderSource::Persisted,
            name: note.name.clone(),
            description: note.description_as_string(),
            note_type: note.note_type.clone(),
        }
    }

    /// Transient request carrying the editor's current name and parsed blocks.
    pub fn live(name: impl Into<String>, blocks: &[String], note_type: NoteType) -> Self {
        Self {
            source: RenderSource::LiveBuffer,
            name: name.into(),
            description: blocks.join("\n"),
            note_type,
        }
    }

    pub fn is_live(&self) -> bool {
        self.source == RenderSource::LiveBuffer
    }
}
