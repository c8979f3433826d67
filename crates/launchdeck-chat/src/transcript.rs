//! The conversation message log and the fragment reducer.
//!
//! The log is append-only: messages are never reordered or pruned, and
//! the only in-place mutation is the accumulation of the one message
//! currently streaming. Fragment application is an explicit reducer so
//! the accumulation logic is testable without a live stream.

use chrono::Utc;

use launchdeck_core::types::Citation;
use launchdeck_provider::{extract_citations, ResponseFragment};

/// Fixed user-facing text that replaces the assistant message when a
/// stream fails. Partial text accumulated before the error is discarded
/// in its favor.
pub const STREAM_FAILURE_TEXT: &str = "Sorry, something went wrong. Please try again.";

/// Which side of the conversation a message belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Label used when rendering a transcript for export.
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "Assistant",
        }
    }
}

/// One turn in the conversation.
#[derive(Clone, Debug)]
pub struct Message {
    /// Timestamp-derived, strictly increasing within one log.
    pub id: i64,
    pub sender: Sender,
    /// Mutable while streaming, immutable once finalized.
    pub text: String,
    /// Append-only during one streaming cycle; duplicates retained.
    /// Empty means "no sources" for rendering and persistence.
    pub sources: Vec<Citation>,
    /// True only for the assistant message currently being filled.
    pub is_streaming: bool,
}

/// The ordered message log for one mounted chat surface.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    last_id: i64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log opened with a finalized assistant greeting.
    pub fn with_greeting(greeting: &str) -> Self {
        let mut transcript = Self::new();
        let id = transcript.allocate_id();
        transcript.messages.push(Message {
            id,
            sender: Sender::Assistant,
            text: greeting.to_string(),
            sources: Vec::new(),
            is_streaming: false,
        });
        transcript
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of messages currently streaming. Never exceeds one.
    pub fn streaming_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_streaming).count()
    }

    /// Append a finalized user message.
    pub fn push_user(&mut self, text: impl Into<String>) -> i64 {
        let id = self.allocate_id();
        self.messages.push(Message {
            id,
            sender: Sender::User,
            text: text.into(),
            sources: Vec::new(),
            is_streaming: false,
        });
        id
    }

    /// Append the empty assistant placeholder that the stream will fill.
    ///
    /// Callers must not start a second streaming cycle while one is open;
    /// the send guard in the controller enforces this.
    pub fn push_streaming_placeholder(&mut self) -> i64 {
        debug_assert_eq!(self.streaming_count(), 0);
        let id = self.allocate_id();
        self.messages.push(Message {
            id,
            sender: Sender::Assistant,
            text: String::new(),
            sources: Vec::new(),
            is_streaming: true,
        });
        id
    }

    /// Apply one stream fragment to the streaming message.
    ///
    /// The reducer for the streaming cycle: concatenates the text delta
    /// (the provider sends deltas, not snapshots) and appends the
    /// fragment's citations without deduplicating. Must be called exactly
    /// once per fragment, in arrival order. A fragment arriving with no
    /// open streaming message is dropped.
    pub fn apply_fragment(&mut self, fragment: &ResponseFragment) {
        let Some(message) = self.messages.iter_mut().find(|m| m.is_streaming) else {
            tracing::debug!("Dropping fragment with no streaming message open");
            return;
        };
        message.text.push_str(&fragment.text_delta());
        message.sources.extend(extract_citations(fragment));
    }

    /// Close the streaming cycle, leaving text and citations untouched.
    pub fn finalize_streaming(&mut self) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.is_streaming) {
            message.is_streaming = false;
        }
    }

    /// Close the streaming cycle after a failure.
    ///
    /// Replaces whatever partial text accumulated with the fixed failure
    /// string. Citations gathered before the error stay in place.
    pub fn fail_streaming(&mut self) {
        if let Some(message) = self.messages.iter_mut().find(|m| m.is_streaming) {
            message.text = STREAM_FAILURE_TEXT.to_string();
            message.is_streaming = false;
        }
    }

    /// Timestamp-derived id, bumped to stay strictly increasing so ids
    /// never collide within one send cycle.
    fn allocate_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        id
    }
}

// =============================================================================
// Tests
// =============================================================================
