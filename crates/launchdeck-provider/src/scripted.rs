//! Scripted in-process provider.
//!
//! Replays queued fragment turns through the same streaming seam as the
//! real client. Used by controller tests and anywhere a deterministic
//! conversation is needed without network access.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::client::{ChatProvider, ChatSession, FragmentStream, SessionOptions};
use crate::error::ProviderError;
use crate::fragment::ResponseFragment;

/// The scripted reply to one send: fragments delivered in order, each of
/// which may be an error to exercise failure paths.
pub type ScriptedTurn = Vec<Result<ResponseFragment, ProviderError>>;

/// A provider that replays scripted turns.
#[derive(Default)]
pub struct ScriptedProvider {
    turns: Arc<Mutex<VecDeque<ScriptedTurn>>>,
    sent: Arc<Mutex<Vec<String>>>,
    open_failure: Option<String>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose `open` always fails with a configuration error.
    pub fn failing_open(message: impl Into<String>) -> Self {
        Self {
            open_failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Queue the reply for the next unanswered send.
    pub fn push_turn(&self, turn: ScriptedTurn) {
        self.turns
            .lock()
            .expect("turns mutex poisoned")
            .push_back(turn);
    }

    /// Builder-style variant of [`push_turn`](Self::push_turn).
    pub fn with_turn(self, turn: ScriptedTurn) -> Self {
        self.push_turn(turn);
        self
    }

    /// Queue a reply made of plain text deltas.
    pub fn with_text_turn(self, deltas: &[&str]) -> Self {
        self.push_turn(
            deltas
                .iter()
                .map(|d| Ok(ResponseFragment::from_text(*d)))
                .collect(),
        );
        self
    }

    /// Messages received by sessions of this provider, in send order.
    pub fn sent_messages(&self) -> Vec<String> {
        self.sent.lock().expect("sent mutex poisoned").clone()
    }
}

#[async_trait]
impl ChatProvider for ScriptedProvider {
    async fn open(&self, _options: SessionOptions) -> Result<Box<dyn ChatSession>, ProviderError> {
        if let Some(message) = &self.open_failure {
            return Err(ProviderError::Configuration(message.clone()));
        }
        Ok(Box::new(ScriptedSession {
            turns: Arc::clone(&self.turns),
            sent: Arc::clone(&self.sent),
        }))
    }
}

struct ScriptedSession {
    turns: Arc<Mutex<VecDeque<ScriptedTurn>>>,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ChatSession for ScriptedSession {
    async fn send_streaming(&mut self, message: &str) -> Result<FragmentStream, ProviderError> {
        self.sent
            .lock()
            .expect("sent mutex poisoned")
            .push(message.to_string());
        let turn = self
            .turns
            .lock()
            .expect("turns mutex poisoned")
            .pop_front()
            .unwrap_or_default();

        let (tx, rx) = mpsc::channel(turn.len().max(1));
        tokio::spawn(async move {
            for item in turn {
                if tx.send(item).await.is_err() {
                    return;
                }
            }
        });
        Ok(rx)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_turn_streams_in_order() {
        let provider = ScriptedProvider::new().with_text_turn(&["Hi", " there"]);
        let mut session = provider.open(SessionOptions::default()).await.unwrap();
        let mut stream = session.send_streaming("Hello").await.unwrap();

        let mut text = String::new();
        while let Some(item) = stream.recv().await {
            text.push_str(&item.unwrap().text_delta());
        }
        assert_eq!(text, "Hi there");
        assert_eq!(provider.sent_messages(), vec!["Hello".to_string()]);
    }

    #[tokio::test]
    async fn test_unscripted_send_yields_empty_stream() {
        let provider = ScriptedProvider::new();
        let mut session = provider.open(SessionOptions::default()).await.unwrap();
        let mut stream = session.send_streaming("anyone there?").await.unwrap();
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_failing_open() {
        let provider = ScriptedProvider::failing_open("no key");
        let result = provider.open(SessionOptions::default()).await;
        match result {
            Err(ProviderError::Configuration(msg)) => assert_eq!(msg, "no key"),
            _ => panic!("expected Configuration error"),
        }
    }

    #[tokio::test]
    async fn test_mid_stream_error_is_delivered() {
        let provider = ScriptedProvider::new().with_turn(vec![
            Ok(ResponseFragment::from_text("partial")),
            Err(ProviderError::Stream("reset".to_string())),
        ]);
        let mut session = provider.open(SessionOptions::default()).await.unwrap();
        let mut stream = session.send_streaming("q").await.unwrap();

        assert!(stream.recv().await.unwrap().is_ok());
        assert!(matches!(
            stream.recv().await.unwrap(),
            Err(ProviderError::Stream(_))
        ));
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_turns_consumed_in_order_across_sends() {
        let provider = ScriptedProvider::new()
            .with_text_turn(&["one"])
            .with_text_turn(&["two"]);
        let mut session = provider.open(SessionOptions::default()).await.unwrap();

        let mut first = session.send_streaming("a").await.unwrap();
        assert_eq!(first.recv().await.unwrap().unwrap().text_delta(), "one");
        let mut second = session.send_streaming("b").await.unwrap();
        assert_eq!(second.recv().await.unwrap().unwrap().text_delta(), "two");
    }
}
