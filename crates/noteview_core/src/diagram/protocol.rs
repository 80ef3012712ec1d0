//! Wire messages exchanged with the embedded diagram editor.
//!
//! Inbound messages are JSON objects tagged by `event`; outbound commands
//! are JSON objects tagged by `action`. Extra fields the editor attaches to
//! its events are ignored.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Export format requested from the editor: XML embedded in a PNG.
pub const EXPORT_FORMAT_XMLPNG: &str = "xmlpng";
/// Spinner label the editor shows while exporting.
pub const EXPORT_SPIN_KEY: &str = "saving";

#[derive(Debug)]
pub enum ProtocolError {
    Malformed(serde_json::Error),
    MissingEvent,
    UnknownEvent(String),
    MissingField {
        event: &'static str,
        field: &'static str,
    },
    Encode(serde_json::Error),
}

impl Display for ProtocolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed diagram message: {err}"),
            Self::MissingEvent => write!(f, "diagram message has no `event`"),
            Self::UnknownEvent(event) => write!(f, "unknown diagram event `{event}`"),
            Self::MissingField { event, field } => {
                write!(f, "diagram `{event}` message is missing `{field}`")
            }
            Self::Encode(err) => write!(f, "failed to encode diagram command: {err}"),
        }
    }
}

impl Error for ProtocolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) | Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

/// Message sent by the embedded editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    /// Editor is listening and wants its content.
    Init,
    /// User pressed save inside the editor.
    Save,
    /// Exported diagram payload.
    Export { data: String },
    /// User left the editor.
    Exit,
}

#[derive(Deserialize)]
struct RawInbound {
    event: Option<String>,
    data: Option<String>,
}

impl InboundMessage {
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let raw: RawInbound = serde_json::from_str(text).map_err(ProtocolError::Malformed)?;
        let event = raw.event.ok_or(ProtocolError::MissingEvent)?;
        match event.as_str() {
            "init" => Ok(Self::Init),
            "save" => Ok(Self::Save),
            "export" => raw
                .data
                .map(|data| Self::Export { data })
                .ok_or(ProtocolError::MissingField {
                    event: "export",
                    field: "data",
                }),
            "exit" => Ok(Self::Exit),
            _ => Err(ProtocolError::UnknownEvent(event)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Save => "save",
            Self::Export { .. } => "export",
            Self::Exit => "exit",
        }
    }
}

/// Command sent to the embedded editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum OutboundCommand {
    Load {
        xmlpng: String,
    },
    Export {
        format: String,
        #[serde(rename = "spinKey")]
        spin_key: String,
    },
}

impl OutboundCommand {
    pub fn load(payload: impl Into<String>) -> Self {
        Self::Load {
            xmlpng: payload.into(),
        }
    }

    /// Asks the editor for an `xmlpng` export.
    pub fn export_xmlpng() -> Self {
        Self::Export {
            format: EXPORT_FORMAT_XMLPNG.to_string(),
            spin_key: EXPORT_SPIN_KEY.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::Export { .. } => "export",
        }
    }

    pub fn to_json(&self) -> Result<String, ProtocolError> {
        serde_json::to_string(self).map_err(ProtocolError::Encode)
    }
}
