//! Embedded diagram editor support.
//!
//! # Responsibility
//! - Generate the host page wrapping the third-party diagram editor.
//! - Model the editor's message protocol as typed inbound/outbound values.
//! - Track the single diagram session of a presenter.

pub mod bridge;
pub mod page;
pub mod protocol;
