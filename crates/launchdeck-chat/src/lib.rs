//! The AI chat mini-app: streaming conversation controller, message log,
//! and transcript export.
//!
//! The controller owns all conversation state for one mounted chat
//! surface. It reacts to user actions, stream fragments, and dictation
//! events one at a time; every failure is converted to user-visible state
//! (a banner or an alert) at the boundary where it originates, so nothing
//! propagates uncaught into the host shell.

pub mod controller;
pub mod export;
pub mod transcript;

pub use controller::ConversationController;
pub use export::{export_title, render_transcript};
pub use transcript::{Message, Sender, Transcript, STREAM_FAILURE_TEXT};
