//! Text rendering pipeline.
//!
//! # Responsibility
//! - Parse raw editor text into description blocks.
//! - Convert note-like requests into standalone HTML documents.
//! - Reuse one markup buffer across passes.
//!
//! # Invariants
//! - Rendering is pure: no note, surface or config mutation.
//! - Rendering never fails; bad input degrades to literal text.

pub mod cache;
pub mod converter;
pub mod html;
pub mod parser;
