//! Host side of the diagram editor protocol.
//!
//! # Responsibility
//! - Own the single diagram session of a presenter.
//! - Drive the session state machine from inbound editor messages.
//! - Buffer outbound commands until the editor has signalled readiness.
//! - Forward exported payloads to the live-edit buffer.
//!
//! # Invariants
//! - At most one session exists; `open` replaces any previous one.
//! - Nothing leaves the outbox before `init` was received.
//! - Unexpected or malformed messages are logged and discarded, never fatal.
//! - There is no export timeout: an editor that never answers leaves the
//!   session in `Exporting` until it is replaced or closed.

use crate::diagram::page::{diagram_page, PageMode};
use crate::diagram::protocol::{InboundMessage, OutboundCommand, ProtocolError};
use log::{debug, info, warn};
use std::collections::VecDeque;

/// Receiver of exported diagram payloads (the editor's description buffer).
pub trait LiveEditBuffer {
    fn receive_diagram_text(&mut self, text: &str);
}

/// Bridge state; `Idle` means no session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    Idle,
    Loading,
    Ready,
    Exporting,
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeOutcome {
    /// Message accepted; state may have changed.
    Accepted,
    /// Export payload forwarded to the live-edit buffer.
    Exported,
    /// Editor asked to leave; the session is closed.
    ExitRequested,
    /// Message did not fit the current state or could not be parsed.
    Discarded,
}

/// Diagram currently embedded in the display surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramSession {
    payload: String,
    mode: PageMode,
    state: BridgeState,
}

impl DiagramSession {
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    /// Whether the editor has not yet received its content.
    pub fn pending(&self) -> bool {
        self.state == BridgeState::Loading
    }
}

#[derive(Debug, Default)]
pub struct DiagramBridge {
    session: Option<DiagramSession>,
    outbox: VecDeque<OutboundCommand>,
    anomalies: u64,
}

impl DiagramBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BridgeState {
        self.session
            .as_ref()
            .map_or(BridgeState::Idle, |session| session.state)
    }

    pub fn session(&self) -> Option<&DiagramSession> {
        self.session.as_ref()
    }

    /// Number of discarded messages since creation.
    pub fn anomalies(&self) -> u64 {
        self.anomalies
    }

    /// Starts a session for `payload` and returns the host page.
    ///
    /// Any previous session and its undelivered commands are dropped. The
    /// load command waits in the outbox until the editor sends `init`.
    pub fn open(
        &mut self,
        payload: impl Into<String>,
        mode: PageMode,
        editor_url: &str,
    ) -> Result<String, ProtocolError> {
        let payload = payload.into();
        let page = diagram_page(&payload, mode, editor_url)?;
        if self.session.is_some() {
            debug!("event=diagram_session_replaced module=diagram status=ok");
        }
        self.outbox.clear();
        self.outbox.push_back(OutboundCommand::load(payload.clone()));
        info!(
            "event=diagram_session_open module=diagram status=ok mode={:?} payload_len={}",
            mode,
            payload.len()
        );
        self.session = Some(DiagramSession {
            payload,
            mode,
            state: BridgeState::Loading,
        });
        Ok(page)
    }

    /// Drops the session and anything still queued for it.
    pub fn close(&mut self) {
        if self.session.take().is_some() {
            self.outbox.clear();
            info!("event=diagram_session_close module=diagram status=ok");
        }
    }

    /// Asks the editor for its current diagram.
    ///
    /// Returns `false` when there is no session. While loading the request
    /// is queued behind the load command.
    pub fn request_export(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            debug!("event=diagram_export_request module=diagram status=skipped reason=idle");
            return false;
        };
        match session.state {
            BridgeState::Exporting => {}
            BridgeState::Loading => {
                let queued = self
                    .outbox
                    .iter()
                    .any(|command| matches!(command, OutboundCommand::Export { .. }));
                if !queued {
                    self.outbox.push_back(OutboundCommand::export_xmlpng());
                }
            }
            BridgeState::Ready => {
                self.outbox.push_back(OutboundCommand::export_xmlpng());
                session.state = BridgeState::Exporting;
            }
            BridgeState::Idle => return false,
        }
        true
    }

    /// Parses and handles one raw editor message.
    pub fn handle_raw_message(
        &mut self,
        text: &str,
        buffer: &mut dyn LiveEditBuffer,
    ) -> BridgeOutcome {
        match InboundMessage::parse(text) {
            Ok(message) => self.handle_message(message, buffer),
            Err(err) => {
                self.anomalies += 1;
                warn!(
                    "event=diagram_protocol_anomaly module=diagram status=discarded state={:?} error={}",
                    self.state(),
                    err
                );
                BridgeOutcome::Discarded
            }
        }
    }

    pub fn handle_message(
        &mut self,
        message: InboundMessage,
        buffer: &mut dyn LiveEditBuffer,
    ) -> BridgeOutcome {
        let state = self.state();
        let name = message.name();
        let Some(session) = self.session.as_mut() else {
            return self.discard(name, state);
        };

        match (message, session.state) {
            (InboundMessage::Init, BridgeState::Loading) => {
                let exporting = self
                    .outbox
                    .iter()
                    .any(|command| matches!(command, OutboundCommand::Export { .. }));
                session.state = if exporting {
                    BridgeState::Exporting
                } else {
                    BridgeState::Ready
                };
                debug!(
                    "event=diagram_ready module=diagram status=ok queued={}",
                    self.outbox.len()
                );
                BridgeOutcome::Accepted
            }
            (InboundMessage::Save, BridgeState::Ready) => {
                self.outbox.push_back(OutboundCommand::export_xmlpng());
                session.state = BridgeState::Exporting;
                BridgeOutcome::Accepted
            }
            (InboundMessage::Save, BridgeState::Exporting) => BridgeOutcome::Accepted,
            (InboundMessage::Export { data }, BridgeState::Ready | BridgeState::Exporting) => {
                buffer.receive_diagram_text(&data);
                debug!(
                    "event=diagram_exported module=diagram status=ok payload_len={}",
                    data.len()
                );
                session.payload = data;
                session.state = BridgeState::Ready;
                BridgeOutcome::Exported
            }
            (InboundMessage::Exit, BridgeState::Ready | BridgeState::Exporting)
                if session.mode.allows_exit() =>
            {
                self.close();
                BridgeOutcome::ExitRequested
            }
            _ => self.discard(name, state),
        }
    }

    /// Commands ready for delivery, in order. Empty until `init`.
    pub fn take_outbound(&mut self) -> Vec<OutboundCommand> {
        match self.state() {
            BridgeState::Ready | BridgeState::Exporting => self.outbox.drain(..).collect(),
            BridgeState::Idle | BridgeState::Loading => Vec::new(),
        }
    }

    fn discard(&mut self, event: &str, state: BridgeState) -> BridgeOutcome {
        self.anomalies += 1;
        warn!(
            "event=diagram_protocol_anomaly module=diagram status=discarded message={} state={:?}",
            event, state
        );
        BridgeOutcome::Discarded
    }
}
