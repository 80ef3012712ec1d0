//! Related-note ("leaderboard") requests and results.
//!
//! # Responsibility
//! - Describe the fire-and-forget request sent when a note is displayed.
//! - Carry results back to the presenter over a channel.
//! - Tag every request with a generation so stale results can be dropped.
//!
//! # Invariants
//! - Requests carry a text snapshot; services never touch the note itself.
//! - Generations are strictly increasing per presenter.

use crate::model::note::NoteId;
use log::debug;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

/// Monotonic request counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationRequest {
    pub generation: Generation,
    pub note_id: NoteId,
    /// Note name and description flattened into one string.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Association {
    pub note_id: NoteId,
    pub name: String,
    pub score: f32,
}

/// Result of one association request.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociatedNotes {
    pub generation: Generation,
    pub note_id: NoteId,
    pub items: Vec<Association>,
}

/// One-shot reply handle handed to the service with each request.
#[derive(Debug)]
pub struct AssociationReply {
    generation: Generation,
    note_id: NoteId,
    sender: Sender<AssociatedNotes>,
}

impl AssociationReply {
    pub(crate) fn new(request: &AssociationRequest, sender: Sender<AssociatedNotes>) -> Self {
        Self {
            generation: request.generation,
            note_id: request.note_id,
            sender,
        }
    }

    /// Delivers the result. A presenter that is gone simply drops it.
    pub fn send(self, items: Vec<Association>) {
        let result = AssociatedNotes {
            generation: self.generation,
            note_id: self.note_id,
            items,
        };
        if self.sender.send(result).is_err() {
            debug!("event=associations_reply module=association status=skipped reason=receiver_gone");
        }
    }
}

/// External related-notes computation.
pub trait AssociationService {
    /// Starts the computation; must not block the caller.
    fn associate(&self, request: AssociationRequest, reply: AssociationReply);
}

/// Runs a scoring function on a background thread per request.
pub struct ThreadedAssociations<F> {
    compute: Arc<F>,
}

impl<F> ThreadedAssociations<F>
where
    F: Fn(&AssociationRequest) -> Vec<Association> + Send + Sync + 'static,
{
    pub fn new(compute: F) -> Self {
        Self {
            compute: Arc::new(compute),
        }
    }
}

impl<F> AssociationService for ThreadedAssociations<F>
where
    F: Fn(&AssociationRequest) -> Vec<Association> + Send + Sync + 'static,
{
    fn associate(&self, request: AssociationRequest, reply: AssociationReply) {
        let compute = Arc::clone(&self.compute);
        thread::spawn(move || {
            let items = compute(&request);
            reply.send(items);
        });
    }
}
