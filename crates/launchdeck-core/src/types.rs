use serde::{Deserialize, Serialize};

/// Fallback label for a web source whose title the provider omitted.
pub const DEFAULT_CITATION_TITLE: &str = "Source";

/// A signed-in user profile, as reported by the identity capability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Account email address.
    pub email: String,
    /// Avatar image URL.
    pub picture: String,
}

/// A web source the model claims to have consulted for an answer.
///
/// Citations are surfaced to the user as links next to the assistant
/// message they ground. Duplicates across stream fragments are retained;
/// the message log never deduplicates them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Link to the source.
    pub uri: String,
    /// Human-readable title, `DEFAULT_CITATION_TITLE` when absent upstream.
    pub title: String,
}

impl Citation {
    /// Create a citation, substituting the default title when none is given.
    pub fn new(uri: impl Into<String>, title: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_CITATION_TITLE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citation_with_title() {
        let c = Citation::new("https://example.com", Some("Example".to_string()));
        assert_eq!(c.uri, "https://example.com");
        assert_eq!(c.title, "Example");
    }

    #[test]
    fn test_citation_without_title_uses_default() {
        let c = Citation::new("https://example.com", None);
        assert_eq!(c.title, DEFAULT_CITATION_TITLE);
    }

    #[test]
    fn test_citation_empty_title_uses_default() {
        let c = Citation::new("https://example.com", Some(String::new()));
        assert_eq!(c.title, DEFAULT_CITATION_TITLE);
    }

    #[test]
    fn test_user_serde_round_trip() {
        let user = User {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            picture: "https://example.com/ada.png".to_string(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_citation_equality_allows_duplicates_in_collections() {
        let a = Citation::new("https://a", Some("A".to_string()));
        let b = Citation::new("https://a", Some("A".to_string()));
        let list = vec![a.clone(), b];
        assert_eq!(list.len(), 2);
        assert_eq!(list[0], list[1]);
    }
}
