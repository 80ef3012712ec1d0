//! Domain values consumed by the rendering core.
//!
//! # Responsibility
//! - Define the note record borrowed from the outline model.
//! - Define the transient request value built for each render pass.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Render requests are never retained across passes.

pub mod note;
pub mod request;
