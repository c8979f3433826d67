//! Speech capture adapter for dictation into the chat compose box.
//!
//! Wraps a continuous speech-to-text capability behind a small
//! capability-provider interface. Platforms without a recognition
//! primitive wire in [`UnsupportedCapture`]; tests use
//! [`ScriptedCapture`].

pub mod capture;
pub mod error;

pub use capture::{ScriptedCapture, SpeechCapture, TranscriptEvent, UnsupportedCapture};
pub use error::CaptureError;
