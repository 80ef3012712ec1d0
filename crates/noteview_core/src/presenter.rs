//! Note view presenter.
//!
//! # Responsibility
//! - Decide what to render: the persisted note or the unsaved editor buffer.
//! - Route diagram notes to the diagram bridge and other notes through the
//!   text pipeline.
//! - Keep the reader's scroll position across re-renders.
//! - Relay host signals (open editor, links, diagram exit, back to outlines) and apply
//!   related-note results that are still current.
//!
//! # Invariants
//! - The presenter owns the only "currently displayed note" identity.
//! - Live previews never write to a note.
//! - Only the latest request's output reaches the surface; association
//!   results from older generations are discarded.
//! - Missing collaborators turn a refresh into a logged no-op.

use crate::association::{
    AssociatedNotes, AssociationReply, AssociationRequest, AssociationService, Generation,
};
use crate::config::PresenterConfig;
use crate::diagram::bridge::{BridgeOutcome, BridgeState, DiagramBridge};
use crate::diagram::page::PageMode;
use crate::host::{Facet, PresenterHost};
use crate::model::note::{Note, NoteId, NoteType};
use crate::model::request::RenderRequest;
use crate::render::cache::RenderCache;
use crate::render::converter::convert;
use crate::render::html::{HtmlRepresentation, MarkdownHtmlRepresentation};
use crate::render::parser::{LineBlockParser, MarkdownParser};
use crate::scroll::{capture, scroll_bridge_for, ScrollBridge, ScrollState, ScrollSurface};
use crate::surface::DisplaySurface;
use log::{debug, info, warn};
use std::sync::mpsc::{self, Receiver, Sender};

const ASSOCIATION_DELIMITER: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq)]
struct DisplayedNote {
    id: NoteId,
    note_type: NoteType,
}

pub struct NotePresenter<S: DisplaySurface, H: PresenterHost> {
    config: PresenterConfig,
    surface: S,
    host: H,
    parser: Option<Box<dyn MarkdownParser>>,
    representation: Option<Box<dyn HtmlRepresentation>>,
    scroll: Box<dyn ScrollBridge>,
    cache: RenderCache,
    bridge: DiagramBridge,
    current: Option<DisplayedNote>,
    generation: Generation,
    associations: Option<Box<dyn AssociationService>>,
    association_tx: Sender<AssociatedNotes>,
    association_rx: Receiver<AssociatedNotes>,
}

impl<S: DisplaySurface, H: PresenterHost> NotePresenter<S, H> {
    /// Creates a presenter with the default parser and markdown representation.
    pub fn new(config: PresenterConfig, surface: S, host: H) -> Self {
        let (association_tx, association_rx) = mpsc::channel();
        Self {
            parser: Some(Box::new(LineBlockParser)),
            representation: Some(Box::new(MarkdownHtmlRepresentation::new(
                config.html_zoom_factor,
            ))),
            scroll: scroll_bridge_for(config.scroll_backend),
            cache: RenderCache::with_capacity(config.render_buffer_capacity),
            config,
            surface,
            host,
            bridge: DiagramBridge::new(),
            current: None,
            generation: Generation::default(),
            associations: None,
            association_tx,
            association_rx,
        }
    }

    pub fn with_association_service(mut self, service: Box<dyn AssociationService>) -> Self {
        self.associations = Some(service);
        self
    }

    /// Replaces or detaches the markdown parser.
    pub fn set_markdown_parser(&mut self, parser: Option<Box<dyn MarkdownParser>>) {
        self.parser = parser;
    }

    /// Replaces or detaches the HTML representation.
    pub fn set_html_representation(&mut self, representation: Option<Box<dyn HtmlRepresentation>>) {
        self.representation = representation;
    }

    pub fn config(&self) -> &PresenterConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn bridge(&self) -> &DiagramBridge {
        &self.bridge
    }

    pub fn current_note_id(&self) -> Option<NoteId> {
        self.current.as_ref().map(|current| current.id)
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Renders the persisted content of `note` and marks it read.
    ///
    /// Re-rendering the note already on display keeps the scroll position;
    /// another note starts at the top.
    pub fn refresh(&mut self, note: &mut Note) {
        note.make_read();
        let same_note = self.current_note_id() == Some(note.id);
        self.current = Some(DisplayedNote {
            id: note.id,
            note_type: note.note_type.clone(),
        });
        self.generation = self.generation.next();
        info!(
            "event=note_refresh module=presenter status=ok note_id={} type={} generation={}",
            note.id,
            note.note_type,
            self.generation.value()
        );

        if note.note_type.is_diagram() {
            self.show_diagram(note.description_as_string(), PageMode::View);
        } else {
            self.bridge.close();
            let request = RenderRequest::persisted(note);
            let state = if same_note {
                capture(&self.surface)
            } else {
                ScrollState::TOP
            };
            self.render_text(&request, self.config.autolinking, state);
        }

        self.request_associations(note);
    }

    /// Renders the unsaved editor buffer in place of the persisted note.
    ///
    /// `editor` is the editor's own scroll surface; its position is carried
    /// over so the preview follows the text being edited. Autolinking is
    /// always off here.
    pub fn refresh_live_preview(
        &mut self,
        name: &str,
        description: &str,
        editor: &dyn ScrollSurface,
    ) {
        let Some(current) = self.current.clone() else {
            debug!("event=live_preview module=presenter status=skipped reason=no_note");
            return;
        };

        if current.note_type.is_diagram() {
            // An export echoed back by the editor buffer must not reload the page.
            let unchanged = self.bridge.session().is_some_and(|session| {
                session.mode() == PageMode::Live && session.payload() == description
            });
            if !unchanged {
                self.show_diagram(description.to_string(), PageMode::Live);
            }
            return;
        }

        let Some(parser) = self.parser.as_deref() else {
            debug!("event=live_preview module=presenter status=skipped reason=no_parser");
            return;
        };
        let blocks = parser.parse(description);
        let request = RenderRequest::live(name, &blocks, current.note_type);
        self.render_text(&request, false, capture(editor));
    }

    /// Handles one raw message relayed from the embedded diagram editor.
    pub fn on_diagram_message(&mut self, text: &str) -> BridgeOutcome {
        let outcome = self.bridge.handle_raw_message(text, &mut self.host);
        if outcome == BridgeOutcome::ExitRequested {
            self.host.save_and_close_editor();
        }
        self.flush_diagram_commands();
        outcome
    }

    /// Asks the embedded editor for its diagram, e.g. before saving.
    pub fn request_diagram_export(&mut self) -> bool {
        let requested = self.bridge.request_export();
        self.flush_diagram_commands();
        requested
    }

    pub fn diagram_state(&self) -> BridgeState {
        self.bridge.state()
    }

    /// Opens the displayed note in the editor.
    pub fn edit_note(&mut self) {
        match self.current_note_id() {
            Some(note_id) => self.host.open_editor(note_id),
            None => debug!("event=edit_note module=presenter status=skipped reason=no_note"),
        }
    }

    pub fn double_click(&mut self) {
        if self.config.double_click_to_edit {
            self.edit_note();
        }
    }

    pub fn link_clicked(&mut self, url: &str) {
        self.host.open_link(url);
    }

    /// Returns from the note view to the outline list.
    pub fn back_to_outlines(&mut self) {
        if self.host.is_facet_active(Facet::Outlines) {
            debug!("event=back_to_outlines module=presenter status=skipped reason=already_shown");
            return;
        }
        self.host.show_outlines();
    }

    /// Applies association results that arrived since the last poll.
    ///
    /// Returns the number of results shown.
    pub fn poll_associations(&mut self) -> usize {
        let mut shown = 0;
        while let Ok(result) = self.association_rx.try_recv() {
            if result.generation != self.generation {
                debug!(
                    "event=associations_apply module=presenter status=discarded reason=stale generation={} current={}",
                    result.generation.value(),
                    self.generation.value()
                );
                continue;
            }
            if !(self.host.is_facet_active(Facet::ViewNote)
                || self.host.is_facet_active(Facet::EditNote))
            {
                debug!(
                    "event=associations_apply module=presenter status=discarded reason=facet_inactive"
                );
                continue;
            }
            self.host.show_associations(&result);
            shown += 1;
        }
        shown
    }

    /// Forgets the displayed note and its diagram session.
    pub fn close(&mut self) {
        self.bridge.close();
        self.current = None;
        self.generation = self.generation.next();
    }

    fn show_diagram(&mut self, payload: String, mode: PageMode) {
        match self
            .bridge
            .open(payload, mode, &self.config.diagram_editor_url)
        {
            Ok(page) => self.surface.set_html(&page),
            Err(err) => warn!(
                "event=diagram_page module=presenter status=error mode={:?} error={}",
                mode, err
            ),
        }
    }

    fn render_text(&mut self, request: &RenderRequest, autolink: bool, state: ScrollState) {
        let Some(representation) = self.representation.as_deref() else {
            debug!("event=render module=presenter status=skipped reason=no_representation");
            return;
        };
        let hint = self.scroll.scroll_hint(state);
        let document = convert(representation, request, autolink, hint, &mut self.cache);
        self.surface.set_html(document.as_str());
        self.scroll.restore_after_render(&mut self.surface, state);
    }

    fn flush_diagram_commands(&mut self) {
        for command in self.bridge.take_outbound() {
            match command.to_json() {
                Ok(json) => self.surface.deliver_command(&json),
                Err(err) => warn!(
                    "event=diagram_command module=presenter status=error command={} error={}",
                    command.name(),
                    err
                ),
            }
        }
    }

    fn request_associations(&self, note: &Note) {
        let Some(service) = self.associations.as_deref() else {
            return;
        };
        let request = AssociationRequest {
            generation: self.generation,
            note_id: note.id,
            text: note.association_text(ASSOCIATION_DELIMITER),
        };
        let reply = AssociationReply::new(&request, self.association_tx.clone());
        service.associate(request, reply);
    }
}
