//! Provider-facing traits for stateful chat sessions.
//!
//! A `ChatProvider` opens at most one `ChatSession` per mounted chat
//! surface. A session owns the conversational context held by the model
//! provider; `send_streaming` yields a finite fragment stream that must be
//! consumed sequentially (or abandoned by dropping the receiver).

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::ProviderError;
use crate::fragment::ResponseFragment;

/// The streamed reply to one sent message. Finite; ends when the model
/// finishes the turn. Dropping the receiver abandons the stream.
pub type FragmentStream = mpsc::Receiver<Result<ResponseFragment, ProviderError>>;

/// Options applied when opening a session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// System instruction applied to the whole conversation.
    pub system_instruction: Option<String>,
    /// Enable live web-search grounding for the session.
    pub enable_live_search: bool,
}

/// A factory for conversational sessions against one model provider.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Open a stateful session.
    ///
    /// Fails with [`ProviderError::Configuration`] when required
    /// credentials are absent; callers surface that as a banner rather
    /// than terminating the mini-app.
    async fn open(&self, options: SessionOptions) -> Result<Box<dyn ChatSession>, ProviderError>;
}

/// One opened conversation. Exclusively owned by a single mounted chat
/// surface; never shared across mounts.
#[async_trait]
pub trait ChatSession: Send {
    /// Send one user message and stream the reply.
    ///
    /// The session appends the exchange to its internal history so later
    /// turns see the full conversation.
    async fn send_streaming(&mut self, message: &str) -> Result<FragmentStream, ProviderError>;
}
