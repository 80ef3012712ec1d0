//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose note rendering, live preview and the diagram protocol to Dart via FRB.
//! - Keep error semantics simple: envelopes with `ok` + `message`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Return values are UTF-8 strings with stable meaning.
//! - Calls are stateless apart from the process-wide presenter settings.

use log::{info, warn};
use noteview_core::{
    capture, core_version as core_version_inner, diagram_page, init_logging as init_logging_inner,
    Description, DocumentConverter, InboundMessage, LineBlockParser, MarkdownParser, Note,
    NoteType, OutboundCommand, PageMode, PresenterConfig, RenderRequest, ScrollBridge,
    ScrollSurface, ScriptedScroll,
};
use std::sync::{OnceLock, RwLock};

static PRESENTER_CONFIG: OnceLock<RwLock<PresenterConfig>> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Replaces the presenter settings used by subsequent render calls.
///
/// `settings_json` is a JSON object; missing keys keep their defaults.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; returns empty string on success and error message on failure.
/// - Invalid settings leave the previous settings active.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_presenter(settings_json: String) -> String {
    let config = match PresenterConfig::from_json_str(&settings_json) {
        Ok(config) => config,
        Err(err) => {
            warn!("event=configure module=ffi status=error error={err}");
            return err.to_string();
        }
    };
    let lock = PRESENTER_CONFIG.get_or_init(|| RwLock::new(PresenterConfig::default()));
    match lock.write() {
        Ok(mut active) => {
            *active = config;
            info!("event=configure module=ffi status=ok");
            String::new()
        }
        Err(_) => "presenter settings lock poisoned".to_string(),
    }
}

/// Rendered document envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResponse {
    /// Whether `html` holds a document.
    pub ok: bool,
    /// Full HTML document; empty on failure.
    pub html: String,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl RenderResponse {
    fn success(html: String) -> Self {
        Self {
            ok: true,
            html,
            message: "ok".to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            html: String::new(),
            message: message.into(),
        }
    }
}

/// Renders the persisted content of a note.
///
/// Input semantics:
/// - `note_type`: outline type tag (`Note`, `Diagram`, ...).
/// - `description`: markdown text, or the diagram payload for `Diagram`.
///
/// # FFI contract
/// - Sync call, CPU-bound and proportional to description size.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn render_note(note_type: String, name: String, description: String) -> RenderResponse {
    let config = active_config();
    let note_type = NoteType::from_tag(&note_type);
    if note_type.is_diagram() {
        return render_diagram(&description, PageMode::View, &config);
    }

    let note = Note::new(note_type, name).with_description(Description::Raw(description));
    let mut converter = DocumentConverter::markdown(config.html_zoom_factor);
    let document = converter.render(&RenderRequest::persisted(&note), config.autolinking, 0);
    RenderResponse::success(document.into_string())
}

/// Renders an unsaved editor buffer.
///
/// The editor's scroll position is embedded as a scroll script so the
/// web view lands on the same fraction of the new document. Autolinking
/// is always off.
///
/// # FFI contract
/// - Sync call, CPU-bound and proportional to description size.
/// - Never panics; a zero `editor_max_scroll` means top.
#[flutter_rust_bridge::frb(sync)]
pub fn render_live_preview(
    note_type: String,
    name: String,
    description: String,
    editor_scroll: u32,
    editor_max_scroll: u32,
) -> RenderResponse {
    let config = active_config();
    let note_type = NoteType::from_tag(&note_type);
    if note_type.is_diagram() {
        return render_diagram(&description, PageMode::Live, &config);
    }

    let editor = EditorPosition {
        offset: editor_scroll,
        max: editor_max_scroll,
    };
    let hint = ScriptedScroll.scroll_hint(capture(&editor));
    let blocks = LineBlockParser.parse(&description);
    let request = RenderRequest::live(name, &blocks, note_type);
    let mut converter = DocumentConverter::markdown(config.html_zoom_factor);
    let document = converter.render(&request, false, hint);
    RenderResponse::success(document.into_string())
}

/// Decoded editor message envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramMessageResponse {
    /// Whether the message was understood.
    pub ok: bool,
    /// Event name (`init|save|export|exit`); empty on failure.
    pub event: String,
    /// Exported payload for `export` events.
    pub data: Option<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Decodes one raw message posted by the embedded diagram editor.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; malformed input yields `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn parse_diagram_message(text: String) -> DiagramMessageResponse {
    match InboundMessage::parse(&text) {
        Ok(message) => {
            let event = message.name().to_string();
            let data = match message {
                InboundMessage::Export { data } => Some(data),
                _ => None,
            };
            DiagramMessageResponse {
                ok: true,
                event,
                data,
                message: "ok".to_string(),
            }
        }
        Err(err) => {
            warn!("event=diagram_message module=ffi status=discarded error={err}");
            DiagramMessageResponse {
                ok: false,
                event: String::new(),
                data: None,
                message: err.to_string(),
            }
        }
    }
}

/// JSON command that loads `payload` into a ready editor.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; returns empty string if serialization fails.
#[flutter_rust_bridge::frb(sync)]
pub fn diagram_load_command(payload: String) -> String {
    command_json(OutboundCommand::load(payload))
}

/// JSON command asking the editor to export its diagram.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never panics; returns empty string if serialization fails.
#[flutter_rust_bridge::frb(sync)]
pub fn diagram_export_command() -> String {
    command_json(OutboundCommand::export_xmlpng())
}

struct EditorPosition {
    offset: u32,
    max: u32,
}

impl ScrollSurface for EditorPosition {
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

fn active_config() -> PresenterConfig {
    PRESENTER_CONFIG
        .get()
        .and_then(|lock| lock.read().ok().map(|config| config.clone()))
        .unwrap_or_default()
}

fn render_diagram(payload: &str, mode: PageMode, config: &PresenterConfig) -> RenderResponse {
    match diagram_page(payload, mode, &config.diagram_editor_url) {
        Ok(page) => RenderResponse::success(page),
        Err(err) => RenderResponse::failure(format!("diagram page failed: {err}")),
    }
}

fn command_json(command: OutboundCommand) -> String {
    match command.to_json() {
        Ok(json) => json,
        Err(err) => {
            warn!(
                "event=diagram_command module=ffi status=error command={} error={err}",
                command.name()
            );
            String::new()
        }
    }
}
