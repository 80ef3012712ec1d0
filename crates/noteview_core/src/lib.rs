//! Note rendering and live-preview core.
//!
//! Converts note descriptions into display documents, previews unsaved
//! editor buffers, keeps scroll position across re-renders and bridges the
//! embedded diagram editor's message protocol.

pub mod association;
pub mod config;
pub mod diagram;
pub mod host;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod render;
pub mod scroll;
pub mod surface;

pub use association::{
    AssociatedNotes, Association, AssociationReply, AssociationRequest, AssociationService,
    Generation, ThreadedAssociations,
};
pub use config::{ConfigError, ConfigResult, PresenterConfig, ScrollBackend};
pub use diagram::bridge::{
    BridgeOutcome, BridgeState, DiagramBridge, DiagramSession, LiveEditBuffer,
};
pub use diagram::page::{diagram_page, encode_payload, PageMode};
pub use diagram::protocol::{InboundMessage, OutboundCommand, ProtocolError};
pub use host::{Facet, PresenterHost};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Description, Note, NoteId, NoteType, NoteValidationError};
pub use model::request::{RenderRequest, RenderSource};
pub use presenter::NotePresenter;
pub use render::cache::RenderCache;
pub use render::converter::{convert, DisplayDocument, DocumentConverter};
pub use render::html::{HtmlRepresentation, MarkdownHtmlRepresentation};
pub use render::parser::{Block, LineBlockParser, MarkdownParser};
pub use scroll::{
    capture, restore, scroll_bridge_for, DirectScroll, ScriptedScroll, ScrollBridge, ScrollState,
    ScrollSurface,
};
pub use surface::{DisplaySurface, HtmlBuffer};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
