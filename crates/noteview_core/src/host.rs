//! Contract of the container hosting a note presenter.

use crate::association::AssociatedNotes;
use crate::diagram::bridge::LiveEditBuffer;
use crate::model::note::NoteId;

/// Host views whose activity gates late results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    ViewNote,
    EditNote,
    Outlines,
}

/// Signals a presenter sends to its container.
///
/// The live-edit buffer supertrait receives exported diagram payloads.
pub trait PresenterHost: LiveEditBuffer {
    fn is_facet_active(&self, facet: Facet) -> bool;
    /// Shows related notes next to the displayed note.
    fn show_associations(&mut self, associations: &AssociatedNotes);
    fn open_editor(&mut self, note_id: NoteId);
    /// Handles an activated link; the surface never navigates by itself.
    fn open_link(&mut self, url: &str);
    /// Saves the editor buffer and leaves the editor.
    fn save_and_close_editor(&mut self);
    /// Leaves the note view for the outline list.
    fn show_outlines(&mut self);
}
