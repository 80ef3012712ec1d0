//! Presenter configuration.
//!
//! # Responsibility
//! - Hold the user options that change how notes are rendered.
//! - Load options from JSON text or a settings file and validate them.
//!
//! # Invariants
//! - Missing fields fall back to defaults; unknown fields are rejected.
//! - A loaded config is always validated before it is returned.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Embedded diagram editor entry page.
pub const DEFAULT_DIAGRAM_EDITOR_URL: &str = "qrc:///drawio/webapp/index.html";
/// Initial capacity of the reusable markup buffer.
pub const DEFAULT_RENDER_BUFFER_CAPACITY: usize = 10_000;

const MIN_ZOOM_FACTOR: f32 = 0.25;
const MAX_ZOOM_FACTOR: f32 = 5.0;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read config: {err}"),
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
            Self::Invalid { field, message } => write!(f, "invalid config `{field}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// How scroll position is carried across re-renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBackend {
    /// The display surface exposes its scrollbar; restore after rendering.
    #[default]
    Direct,
    /// The surface can only be scrolled by the document itself.
    Scripted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PresenterConfig {
    /// Wrap bare URLs in persisted note views.
    pub autolinking: bool,
    /// Double click on the note view opens the editor.
    pub double_click_to_edit: bool,
    pub html_zoom_factor: f32,
    pub diagram_editor_url: String,
    pub render_buffer_capacity: usize,
    pub scroll_backend: ScrollBackend,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            autolinking: true,
            double_click_to_edit: true,
            html_zoom_factor: 1.0,
            diagram_editor_url: DEFAULT_DIAGRAM_EDITOR_URL.to_string(),
            render_buffer_capacity: DEFAULT_RENDER_BUFFER_CAPACITY,
            scroll_backend: ScrollBackend::default(),
        }
    }
}

impl PresenterConfig {
    /// Parses and validates a JSON settings document.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !self.html_zoom_factor.is_finite()
            || !(MIN_ZOOM_FACTOR..=MAX_ZOOM_FACTOR).contains(&self.html_zoom_factor)
        {
            return Err(ConfigError::Invalid {
                field: "html_zoom_factor",
                message: format!(
                    "{} is outside {MIN_ZOOM_FACTOR}..={MAX_ZOOM_FACTOR}",
                    self.html_zoom_factor
                ),
            });
        }
        if self.diagram_editor_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "diagram_editor_url",
                message: "must not be empty".to_string(),
            });
        }
        if self.diagram_editor_url.contains(['\'', '"', '<', '>']) {
            return Err(ConfigError::Invalid {
                field: "diagram_editor_url",
                message: "must not contain quotes or angle brackets".to_string(),
            });
        }
        Ok(())
    }
}
