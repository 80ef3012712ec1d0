//! Note domain model as seen by the rendering core.
//!
//! # Responsibility
//! - Define the note record consumed by presenter render passes.
//! - Provide the mark-as-read hook the presenter triggers on refresh.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - Rendering never mutates `name` or `description`; only `make_read`
//!   touches read-state fields.
//! - Unknown type tags are preserved verbatim and rendered as plain text.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier of a note owned by the outline model.
pub type NoteId = Uuid;

/// Type tag name used by diagram notes.
pub const DIAGRAM_TYPE_TAG: &str = "Diagram";
/// Type tag name used by ordinary markdown notes.
pub const NOTE_TYPE_TAG: &str = "Note";

/// Note type tag.
///
/// Serialized as the plain tag string (`"Note"`, `"Diagram"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NoteType {
    /// Ordinary markdown note.
    Note,
    /// Embedded diagram; description holds the editor payload.
    Diagram,
    /// Tag not recognized by this core.
    Other(String),
}

impl NoteType {
    /// Parses a type tag, keeping unknown tags as `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim() {
            NOTE_TYPE_TAG => Self::Note,
            DIAGRAM_TYPE_TAG => Self::Diagram,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            Self::Note => NOTE_TYPE_TAG,
            Self::Diagram => DIAGRAM_TYPE_TAG,
            Self::Other(tag) => tag.as_str(),
        }
    }

    pub fn is_diagram(&self) -> bool {
        matches!(self, Self::Diagram)
    }

    /// Whether the converter should treat this type as recognized markdown.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Display for NoteType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl Serialize for NoteType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

impl<'de> Deserialize<'de> for NoteType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag.trim().is_empty() {
            return Err(D::Error::custom("note type tag cannot be empty"));
        }
        Ok(Self::from_tag(&tag))
    }
}

/// Note description body.
///
/// The outline model stores descriptions as line blocks; imports and the
/// diagram editor hand over raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Blocks(Vec<String>),
    Raw(String),
}

impl Description {
    /// Returns the description as one string, blocks joined by `\n`.
    pub fn as_string(&self) -> String {
        match self {
            Self::Blocks(blocks) => blocks.join("\n"),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl Default for Description {
    fn default() -> Self {
        Self::Blocks(Vec::new())
    }
}

/// Validation errors for note construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    NilId,
    EmptyName,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "note id must not be nil"),
            Self::EmptyName => write!(f, "note name must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Note record owned by the outline/document model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    /// Serialized as `type` to match the outline file schema.
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub name: String,
    pub description: Description,
    /// Number of times the note was displayed.
    #[serde(default)]
    pub reads: u32,
    /// Unix epoch milliseconds of the last display, if any.
    #[serde(default)]
    pub read_at: Option<i64>,
}

impl Note {
    /// Creates a note with a generated stable ID.
    pub fn new(note_type: NoteType, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            note_type,
            name: name.into(),
            description: Description::default(),
            reads: 0,
            read_at: None,
        }
    }

    /// Creates a note with a caller-provided ID, e.g. when loading an outline.
    pub fn with_id(
        id: NoteId,
        note_type: NoteType,
        name: impl Into<String>,
    ) -> Result<Self, NoteValidationError> {
        if id.is_nil() {
            return Err(NoteValidationError::NilId);
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(NoteValidationError::EmptyName);
        }
        let mut note = Self::new(note_type, name);
        note.id = id;
        Ok(note)
    }

    pub fn with_description(mut self, description: Description) -> Self {
        self.description = description;
        self
    }

    pub fn description_as_string(&self) -> String {
        self.description.as_string()
    }

    /// Records one display of this note.
    pub fn make_read(&mut self) {
        self.reads = self.reads.saturating_add(1);
        self.read_at = Some(now_epoch_millis());
    }

    /// Flattens name and description for association scoring.
    pub fn association_text(&self, delimiter: char) -> String {
        let description = self.description_as_string();
        let mut text = String::with_capacity(self.name.len() + 1 + description.len());
        text.push_str(&self.name);
        text.push(delimiter);
        text.push_str(&description);
        text
    }
}

fn now_epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
