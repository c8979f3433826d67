//! Plain-text transcript rendering for export.

use chrono::{DateTime, Local};

use crate::transcript::Message;

/// Separator between rendered turns.
const TURN_SEPARATOR: &str = "\n\n---\n\n";

/// Render the message log as plain text.
///
/// Each turn becomes `"<You|Assistant>: <text>"`; messages with citations
/// get a bracketed source list on the next line. Turns are joined by a
/// blank-line-delimited rule.
pub fn render_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|message| {
            let mut content = format!("{}: {}", message.sender.label(), message.text);
            if !message.sources.is_empty() {
                let uris: Vec<&str> = message.sources.iter().map(|s| s.uri.as_str()).collect();
                content.push_str(&format!("\n[Sources: {}]", uris.join(", ")));
            }
            content
        })
        .collect::<Vec<_>>()
        .join(TURN_SEPARATOR)
}

/// Timestamped document title for one export.
pub fn export_title(now: DateTime<Local>) -> String {
    format!("Chat - {}", now.format("%Y-%m-%d %H.%M.%S"))
}

// =============================================================================
// Tests
// =============================================================================
