//! SSE-streaming Gemini client.
//!
//! Speaks the `streamGenerateContent?alt=sse` endpoint: the request body
//! carries the full conversation history (`contents`), an optional
//! `systemInstruction`, and the Google Search grounding tool when live
//! search is enabled. The response is a server-sent-event stream whose
//! `data:` lines each decode to one [`ResponseFragment`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::StreamExt;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use launchdeck_core::config::ChatConfig;

use crate::client::{ChatProvider, ChatSession, FragmentStream, SessionOptions};
use crate::error::ProviderError;
use crate::fragment::ResponseFragment;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Channel capacity for in-flight fragments. The consuming loop is strictly
/// sequential, so a small buffer only smooths network bursts.
const FRAGMENT_BUFFER: usize = 32;

/// Factory for Gemini-backed chat sessions.
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    /// Create a provider for the given key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a provider from the chat configuration.
    ///
    /// Fails with `Configuration` when no API key is available from the
    /// config or the environment.
    pub fn from_config(config: &ChatConfig) -> Result<Self, ProviderError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ProviderError::Configuration(
                "no API key: set chat.api_key or GEMINI_API_KEY".to_string(),
            )
        })?;
        Ok(Self::new(api_key, config.model.clone()))
    }

    /// Override the API base URL (used by tests and proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ChatProvider for GeminiProvider {
    async fn open(&self, options: SessionOptions) -> Result<Box<dyn ChatSession>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Configuration("empty API key".to_string()));
        }
        tracing::info!(model = %self.model, live_search = options.enable_live_search, "Chat session opened");
        Ok(Box::new(GeminiSession {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            options,
            history: Arc::new(Mutex::new(Vec::new())),
        }))
    }
}

/// One Gemini conversation. History lives client-side and is replayed in
/// full on every turn; the streaming task appends the model's reply once
/// the turn completes.
pub struct GeminiSession {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    options: SessionOptions,
    history: Arc<Mutex<Vec<Value>>>,
}

impl GeminiSession {
    fn request_body(&self) -> Value {
        let contents = self
            .history
            .lock()
            .expect("history mutex poisoned")
            .clone();
        let mut body = json!({ "contents": contents });
        if let Some(instruction) = &self.options.system_instruction {
            body["systemInstruction"] = json!({ "parts": [{ "text": instruction }] });
        }
        if self.options.enable_live_search {
            body["tools"] = json!([{ "googleSearch": {} }]);
        }
        body
    }
}

#[async_trait]
impl ChatSession for GeminiSession {
    async fn send_streaming(&mut self, message: &str) -> Result<FragmentStream, ProviderError> {
        self.history
            .lock()
            .expect("history mutex poisoned")
            .push(json!({ "role": "user", "parts": [{ "text": message }] }));

        let url = format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        );
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body())
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Request(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&body, 300)
            )));
        }

        let (tx, rx) = mpsc::channel(FRAGMENT_BUFFER);
        let history = Arc::clone(&self.history);
        tokio::spawn(async move {
            let mut accumulated = String::new();
            let mut buf: Vec<u8> = Vec::new();
            let mut stream = response.bytes_stream();

            'outer: while let Some(chunk) = stream.next().await {
                let bytes = match chunk {
                    Ok(b) => b,
                    Err(e) => {
                        let _ = tx.send(Err(ProviderError::Stream(e.to_string()))).await;
                        return;
                    }
                };
                buf.extend_from_slice(&bytes);

                while let Some(pos) = buf.iter().position(|&b| b == b'\n') {
                    let line: Vec<u8> = buf.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&line);
                    let Some(data) = parse_sse_line(&line) else {
                        continue;
                    };
                    match serde_json::from_str::<ResponseFragment>(data) {
                        Ok(fragment) => {
                            accumulated.push_str(&fragment.text_delta());
                            if tx.send(Ok(fragment)).await.is_err() {
                                // Receiver dropped: the stream was abandoned.
                                tracing::debug!("Fragment stream abandoned mid-turn");
                                break 'outer;
                            }
                        }
                        Err(e) => {
                            let _ = tx.send(Err(ProviderError::Decode(e.to_string()))).await;
                            return;
                        }
                    }
                }
            }

            if !accumulated.is_empty() {
                history
                    .lock()
                    .expect("history mutex poisoned")
                    .push(json!({ "role": "model", "parts": [{ "text": accumulated }] }));
            }
        });

        Ok(rx)
    }
}

/// Extract the payload of one SSE line.
///
/// Returns `None` for blank lines, comments, and non-`data` fields. The
/// `data:` prefix allows an optional single leading space per the SSE spec.
pub fn parse_sse_line(line: &str) -> Option<&str> {
    let line = line.trim_end_matches(['\r', '\n']);
    let rest = line.strip_prefix("data:")?;
    let data = rest.strip_prefix(' ').unwrap_or(rest);
    if data.is_empty() {
        None
    } else {
        Some(data)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// =============================================================================
// Tests
// =============================================================================
