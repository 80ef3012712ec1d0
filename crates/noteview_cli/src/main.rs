//! CLI renderer.
//!
//! # Responsibility
//! - Render one note file to a display document on stdout.
//! - Exercise the same presenter path the UI uses, without a UI.
//!
//! Usage: `noteview <file> [--type <tag>] [--config <settings.json>] [--log-dir <abs dir>]`

use clap::Parser;
use log::info;
use noteview_core::{
    AssociatedNotes, Description, Facet, HtmlBuffer, LiveEditBuffer, Note, NoteId,
    NotePresenter, NoteType, PresenterConfig, PresenterHost,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "noteview")]
#[command(version, about = "Render a note file to an HTML document on stdout")]
struct Args {
    /// Note file; `.drawio` files are rendered as diagrams
    file: PathBuf,

    /// Note type tag (`Note`, `Diagram`, ...) overriding the file extension
    #[arg(long = "type")]
    note_type: Option<String>,

    /// JSON presenter settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Absolute directory for rolling log files
    #[arg(long)]
    log_dir: Option<String>,
}

/// Host without a UI: every signal is dropped.
struct HeadlessHost;

impl LiveEditBuffer for HeadlessHost {
    fn receive_diagram_text(&mut self, _text: &str) {}
}

impl PresenterHost for HeadlessHost {
    fn is_facet_active(&self, facet: Facet) -> bool {
        facet == Facet::ViewNote
    }

    fn show_associations(&mut self, _associations: &AssociatedNotes) {}

    fn open_editor(&mut self, _note_id: NoteId) {}

    fn open_link(&mut self, _url: &str) {}

    fn save_and_close_editor(&mut self) {}

    fn show_outlines(&mut self) {}
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(html) => {
            print!("{html}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("noteview: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<String, String> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        noteview_core::init_logging(noteview_core::default_log_level(), log_dir)?;
    }

    let config = match args.config.as_ref() {
        Some(path) => PresenterConfig::load(path).map_err(|err| err.to_string())?,
        None => PresenterConfig::default(),
    };
    let file = args.file;
    let text = std::fs::read_to_string(&file)
        .map_err(|err| format!("failed to read `{}`: {err}", file.display()))?;

    let note_type = match args.note_type.as_deref() {
        Some(tag) => NoteType::from_tag(tag),
        None if file.extension().is_some_and(|ext| ext == "drawio") => NoteType::Diagram,
        None => NoteType::Note,
    };
    let name = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut note = Note::new(note_type, name).with_description(Description::Raw(text));

    let mut presenter = NotePresenter::new(config, HtmlBuffer::new(), HeadlessHost);
    presenter.refresh(&mut note);
    info!(
        "event=cli_render module=cli status=ok note_id={} type={}",
        note.id, note.note_type
    );
    Ok(presenter.surface().html().to_string())
}
