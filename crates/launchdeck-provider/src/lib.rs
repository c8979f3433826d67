//! Chat session client for the Launchdeck AI chat mini-app.
//!
//! Defines the provider-facing seam (`ChatProvider` / `ChatSession`), the
//! typed wire model for streamed response fragments, the citation
//! extractor, a real SSE-streaming Gemini client, and a scripted
//! in-process provider used by tests.

pub mod citations;
pub mod client;
pub mod error;
pub mod fragment;
pub mod gemini;
pub mod scripted;

pub use citations::extract_citations;
pub use client::{ChatProvider, ChatSession, FragmentStream, SessionOptions};
pub use error::ProviderError;
pub use fragment::ResponseFragment;
pub use gemini::GeminiProvider;
pub use scripted::{ScriptedProvider, ScriptedTurn};
