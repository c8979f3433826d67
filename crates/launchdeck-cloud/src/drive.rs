//! The file persistence capability.
//!
//! `FileStore` is what the transcript exporter hands its output to.
//! `LocalDrive` stands in for a cloud drive upload: it writes plain-text
//! files under a configured directory and returns the resulting path as
//! the location identifier.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::PersistenceError;

/// Saves a named document and returns a location identifier for it.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn save_file(&self, name: &str, content: &str) -> Result<String, PersistenceError>;
}

/// File store writing into a local directory.
pub struct LocalDrive {
    root: PathBuf,
}

impl LocalDrive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for LocalDrive {
    async fn save_file(&self, name: &str, content: &str) -> Result<String, PersistenceError> {
        std::fs::create_dir_all(&self.root)
            .map_err(|e| PersistenceError::Upload(e.to_string()))?;
        let path = self.root.join(format!("{}.txt", sanitize_file_name(name)));
        std::fs::write(&path, content).map_err(|e| PersistenceError::Upload(e.to_string()))?;
        tracing::info!(path = %path.display(), bytes = content.len(), "Transcript saved");
        Ok(path.display().to_string())
    }
}

/// Make a document title safe to use as a file name.
///
/// Path separators, the Windows-reserved punctuation set, and control
/// characters become underscores. An empty title gets a placeholder.
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn resolve_dir(dir: &str) -> PathBuf {
    if let Some(rest) = dir.strip_prefix("~/") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(dir)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_file_writes_content() {
        let dir = tempfile::tempdir().unwrap();
        let drive = LocalDrive::new(dir.path());

        let location = drive.save_file("My Chat", "hello world").await.unwrap();
        assert!(location.ends_with("My Chat.txt"));
        let content = std::fs::read_to_string(dir.path().join("My Chat.txt")).unwrap();
        assert_eq!(content, "hello world");
    }

    #[tokio::test]
    async fn test_save_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let drive = LocalDrive::new(&nested);

        drive.save_file("doc", "x").await.unwrap();
        assert!(nested.join("doc.txt").exists());
    }

    #[tokio::test]
    async fn test_save_file_sanitizes_name() {
        let dir = tempfile::tempdir().unwrap();
        let drive = LocalDrive::new(dir.path());

        drive
            .save_file("Chat - 1/2/2026, 10:30:00", "x")
            .await
            .unwrap();
        assert!(dir.path().join("Chat - 1_2_2026, 10_30_00.txt").exists());
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("plain name"), "plain name");
        assert_eq!(sanitize_file_name("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_file_name("tab\there"), "tab_here");
        assert_eq!(sanitize_file_name("   "), "untitled");
        assert_eq!(sanitize_file_name(""), "untitled");
    }

    #[test]
    fn test_resolve_dir_plain_path() {
        assert_eq!(resolve_dir("/tmp/x"), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_resolve_dir_expands_home() {
        let resolved = resolve_dir("~/exports");
        assert!(!resolved.to_string_lossy().starts_with('~'));
        assert!(resolved.to_string_lossy().ends_with("exports"));
    }
}
