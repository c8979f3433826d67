//! The conversation controller for one mounted chat surface.
//!
//! Owns the session, the message log, the compose buffer, and every
//! user-visible status flag. All state changes happen on the caller's
//! task: stream fragments are pulled one at a time from the fragment
//! channel, and dictation events are drained on demand, so no two
//! mutations ever race.

use std::sync::Arc;

use chrono::Local;
use tokio::sync::mpsc;

use launchdeck_cloud::drive::FileStore;
use launchdeck_core::config::ChatConfig;
use launchdeck_core::types::User;
use launchdeck_provider::{ChatProvider, ChatSession, FragmentStream, ProviderError, SessionOptions};
use launchdeck_speech::{CaptureError, SpeechCapture, TranscriptEvent};

use crate::export::{export_title, render_transcript};
use crate::transcript::{Message, Transcript, STREAM_FAILURE_TEXT};

/// Alert shown when export is attempted without a signed-in user.
const ALERT_SIGN_IN_REQUIRED: &str = "Please sign in on the home screen to save the chat.";
/// Alert shown when the log holds nothing beyond the greeting.
const ALERT_NOTHING_TO_SAVE: &str = "There is nothing to save yet.";

/// Streaming-conversation state machine for the chat mini-app.
pub struct ConversationController {
    provider: Arc<dyn ChatProvider>,
    capture: Box<dyn SpeechCapture>,
    store: Arc<dyn FileStore>,
    config: ChatConfig,
    session: Option<Box<dyn ChatSession>>,
    transcript: Transcript,
    compose_text: String,
    is_sending: bool,
    is_saving: bool,
    is_listening: bool,
    /// Persistent banner. Cleared on the next successful action or by
    /// explicit dismissal.
    last_error: Option<String>,
    /// One-shot alert. Consumed by [`take_alert`](Self::take_alert).
    last_alert: Option<String>,
    visible: bool,
    user: Option<User>,
    capture_events: Option<mpsc::UnboundedReceiver<TranscriptEvent>>,
}

impl ConversationController {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        capture: Box<dyn SpeechCapture>,
        store: Arc<dyn FileStore>,
        config: ChatConfig,
    ) -> Self {
        Self {
            provider,
            capture,
            store,
            config,
            session: None,
            transcript: Transcript::new(),
            compose_text: String::new(),
            is_sending: false,
            is_saving: false,
            is_listening: false,
            last_error: None,
            last_alert: None,
            visible: false,
            user: None,
            capture_events: None,
        }
    }

    // ---- Lifecycle ----

    /// Show or hide the chat surface.
    ///
    /// The first show opens the provider session lazily; an open failure
    /// leaves the surface in a degraded state with a banner instead of
    /// tearing it down. Hiding tears the whole conversation down unless
    /// `retain_session_on_hide` is set.
    pub async fn set_visible(&mut self, visible: bool) {
        if visible == self.visible {
            return;
        }
        self.visible = visible;
        if visible {
            if self.session.is_none() {
                self.initialize_session().await;
            }
        } else if !self.config.retain_session_on_hide {
            self.teardown();
        }
    }

    async fn initialize_session(&mut self) {
        let options = SessionOptions {
            system_instruction: Some(self.config.system_instruction.clone()),
            enable_live_search: self.config.enable_live_search,
        };
        match self.provider.open(options).await {
            Ok(session) => {
                self.session = Some(session);
                self.transcript = Transcript::with_greeting(&self.config.greeting);
                self.last_error = None;
                tracing::info!(model = %self.config.model, "Chat session opened");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to open chat session");
                self.last_error = Some(format!("Failed to initialize chat: {}", e));
            }
        }
    }

    fn teardown(&mut self) {
        self.stop_dictation();
        self.session = None;
        self.transcript = Transcript::new();
        self.compose_text.clear();
        self.is_sending = false;
        self.is_saving = false;
        self.last_error = None;
        self.last_alert = None;
        tracing::debug!("Chat surface torn down");
    }

    // ---- Composing and sending ----

    /// Replace the compose buffer with typed input.
    ///
    /// Ignored while dictation is active: the recognizer is the sole
    /// writer of the buffer until it stops.
    pub fn set_compose_text(&mut self, text: impl Into<String>) {
        if self.is_listening {
            return;
        }
        self.compose_text = text.into();
    }

    /// Send the compose buffer and consume the streamed reply.
    ///
    /// No-op when the buffer is blank, a send is already in flight, or no
    /// session is open. Active dictation is stopped first, so the buffer
    /// freezes at whatever the recognizer last delivered.
    pub async fn submit(&mut self) {
        if self.is_listening {
            self.stop_dictation();
        }
        if let Some(stream) = self.start_send().await {
            self.drive_stream(stream).await;
        }
    }

    /// Run the send preconditions and open the reply stream.
    ///
    /// Split from [`submit`](Self::submit) so the in-flight guard is
    /// observable before the stream is consumed.
    async fn start_send(&mut self) -> Option<FragmentStream> {
        if self.compose_text.trim().is_empty() || self.is_sending || self.session.is_none() {
            return None;
        }
        let message = std::mem::take(&mut self.compose_text);
        self.transcript.push_user(message.clone());
        self.transcript.push_streaming_placeholder();
        self.is_sending = true;
        self.last_error = None;

        let result = match self.session.as_mut() {
            Some(session) => session.send_streaming(&message).await,
            None => return None,
        };
        match result {
            Ok(stream) => Some(stream),
            Err(e) => {
                self.on_stream_error(e);
                None
            }
        }
    }

    /// Consume the reply stream to completion, one fragment at a time.
    ///
    /// A transport error ends the cycle immediately; the receiver is
    /// dropped on return, which abandons whatever the provider had left.
    async fn drive_stream(&mut self, mut stream: FragmentStream) {
        while let Some(item) = stream.recv().await {
            match item {
                Ok(fragment) => self.transcript.apply_fragment(&fragment),
                Err(e) => {
                    self.on_stream_error(e);
                    return;
                }
            }
        }
        self.transcript.finalize_streaming();
        self.is_sending = false;
    }

    fn on_stream_error(&mut self, error: ProviderError) {
        tracing::warn!(error = %error, "Chat stream failed");
        self.transcript.fail_streaming();
        self.last_error = Some(STREAM_FAILURE_TEXT.to_string());
        self.is_sending = false;
    }

    // ---- Dictation ----

    /// Toggle voice capture on or off.
    pub fn toggle_dictation(&mut self) {
        if self.is_listening {
            self.stop_dictation();
            return;
        }
        if !self.capture.is_available() {
            self.last_error = Some(CaptureError::Unsupported.to_string());
            return;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        match self.capture.start(tx) {
            Ok(()) => {
                self.is_listening = true;
                self.capture_events = Some(rx);
                self.last_error = None;
                tracing::debug!("Dictation started");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dictation failed to start");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn stop_dictation(&mut self) {
        if self.is_listening {
            self.capture.stop();
            self.is_listening = false;
        }
        self.capture_events = None;
    }

    /// Drain pending dictation events into controller state.
    ///
    /// Interim transcripts carry the full utterance, so each one replaces
    /// the compose buffer outright.
    pub fn poll_dictation(&mut self) {
        let mut events = Vec::new();
        if let Some(rx) = self.capture_events.as_mut() {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }
        for event in events {
            match event {
                TranscriptEvent::Interim(text) => {
                    if self.is_listening {
                        self.compose_text = text;
                    }
                }
                TranscriptEvent::Ended => {
                    self.is_listening = false;
                }
                TranscriptEvent::Failed(e) => {
                    tracing::warn!(error = %e, "Dictation failed");
                    self.is_listening = false;
                    self.last_error = Some(e.to_string());
                }
            }
        }
    }

    // ---- Export ----

    /// Render the log and save it through the file store.
    ///
    /// Guarded: requires a signed-in user and at least one message beyond
    /// the greeting. Both guard failures and the save outcome surface as
    /// one-shot alerts.
    pub async fn export_transcript(&mut self) {
        if self.is_saving {
            return;
        }
        if self.user.is_none() {
            self.last_alert = Some(ALERT_SIGN_IN_REQUIRED.to_string());
            return;
        }
        if self.transcript.len() <= 1 {
            self.last_alert = Some(ALERT_NOTHING_TO_SAVE.to_string());
            return;
        }
        self.is_saving = true;
        let content = render_transcript(self.transcript.messages());
        let title = export_title(Local::now());
        match self.store.save_file(&title, &content).await {
            Ok(location) => {
                self.last_alert = Some(format!("Chat saved to {}", location));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Transcript export failed");
                self.last_alert = Some(format!("Could not save chat: {}", e));
            }
        }
        self.is_saving = false;
    }

    // ---- State access ----

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn compose_text(&self) -> &str {
        &self.compose_text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    pub fn is_saving(&self) -> bool {
        self.is_saving
    }

    pub fn is_listening(&self) -> bool {
        self.is_listening
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Take the pending one-shot alert, if any.
    pub fn take_alert(&mut self) -> Option<String> {
        self.last_alert.take()
    }
}

// =============================================================================
// Tests
// =============================================================================
