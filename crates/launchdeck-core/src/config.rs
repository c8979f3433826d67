use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LaunchdeckError, Result};

/// Top-level configuration for the Launchdeck application.
///
/// Loaded from `~/.launchdeck/config.toml` by default. Each section
/// corresponds to one subsystem of the shell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchdeckConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub speech: SpeechConfig,
    #[serde(default)]
    pub drive: DriveConfig,
}

impl LaunchdeckConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LaunchdeckConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| LaunchdeckError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the session file and exported transcripts.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.launchdeck/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Chat mini-app configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Model identifier passed to the chat provider.
    pub model: String,
    /// API key for the chat provider. Empty means "use the environment".
    pub api_key: String,
    /// System instruction applied to every session.
    pub system_instruction: String,
    /// Whether to enable live web-search grounding for the session.
    pub enable_live_search: bool,
    /// Assistant greeting shown when a session opens.
    pub greeting: String,
    /// Keep the session and transcript alive while the sheet is hidden.
    ///
    /// The default (`false`) tears the conversation down on hide, so a
    /// close/reopen cycle starts fresh.
    pub retain_session_on_hide: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_key: String::new(),
            system_instruction: "You are a smart, helpful, and friendly AI assistant. \
                 You can search the internet to give accurate and up-to-date answers. \
                 Keep answers short and to the point unless asked to explain in detail."
                .to_string(),
            enable_live_search: true,
            greeting: "Hello! I can search the web for current information, analyze data, \
                 and help with writing. What do you need?"
                .to_string(),
            retain_session_on_hide: false,
        }
    }
}

impl ChatConfig {
    /// Resolve the API key: config value first, then `GEMINI_API_KEY`.
    ///
    /// Returns `None` when neither source yields a non-empty key.
    pub fn resolve_api_key(&self) -> Option<String> {
        if !self.api_key.is_empty() {
            return Some(self.api_key.clone());
        }
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
    }
}

/// Speech capture (dictation) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Whether dictation is offered at all.
    pub enabled: bool,
    /// BCP-47 language tag for recognition.
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            language: "en-US".to_string(),
        }
    }
}

/// Transcript export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    /// Directory the local drive capability writes exported files into.
    pub export_dir: String,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            export_dir: "~/.launchdeck/exports".to_string(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
