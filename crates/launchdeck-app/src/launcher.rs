//! The home-screen tile registry and the modal host.
//!
//! The launcher grid is a fixed registry of tiles. Selecting a tile
//! either hands off to an external web app or mounts one of the built-in
//! mini-apps in the modal host. At most one tile is active at a time;
//! closing it returns to the home screen.

/// Built-in mini-apps the shell can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiniAppKind {
    Chat,
    Notes,
    Weather,
}

/// What selecting a tile does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileTarget {
    /// Open an external web application.
    ExternalUrl(String),
    /// Mount a built-in mini-app in the modal host.
    MiniApp(MiniAppKind),
}

/// One entry in the launcher grid.
#[derive(Debug, Clone)]
pub struct TileDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub target: TileTarget,
    /// Accent color for the tile, as a CSS hex string.
    pub accent: &'static str,
    pub description: &'static str,
}

/// The launcher grid, in display order.
pub fn default_tiles() -> Vec<TileDefinition> {
    vec![
        TileDefinition {
            id: "meeting-minutes",
            name: "Meeting Minutes",
            target: TileTarget::ExternalUrl("https://bien-ban-hop.vercel.app/".to_string()),
            accent: "#0d9488",
            description: "Meeting Assistant",
        },
        TileDefinition {
            id: "business-plan",
            name: "Business Plan",
            target: TileTarget::ExternalUrl("https://kehoach-kd-cuong.vercel.app/".to_string()),
            accent: "#16a34a",
            description: "Business Consultant",
        },
        TileDefinition {
            id: "bank-digital",
            name: "Bank Statement Converter",
            target: TileTarget::ExternalUrl(
                "https://vr-2-1-bank-statement-accounting-co.vercel.app/".to_string(),
            ),
            accent: "#2563eb",
            description: "Finance Tech Expert",
        },
        TileDefinition {
            id: "notebook-lm",
            name: "Notebook LM Clone",
            target: TileTarget::ExternalUrl("https://notebook-lm-cuong.vercel.app/".to_string()),
            accent: "#9333ea",
            description: "AI-Powered Notes",
        },
        TileDefinition {
            id: "chat",
            name: "Gemini Chat",
            target: TileTarget::MiniApp(MiniAppKind::Chat),
            accent: "#4f46e5",
            description: "AI Assistant",
        },
        TileDefinition {
            id: "notes",
            name: "Notes",
            target: TileTarget::MiniApp(MiniAppKind::Notes),
            accent: "#d97706",
            description: "Quick Memos",
        },
        TileDefinition {
            id: "calculator",
            name: "Online Accounting",
            target: TileTarget::ExternalUrl("https://vr-1-0-ketoan-online.vercel.app/".to_string()),
            accent: "#64748b",
            description: "Accounting Tools",
        },
        TileDefinition {
            id: "weather",
            name: "Weather",
            target: TileTarget::MiniApp(MiniAppKind::Weather),
            accent: "#0ea5e9",
            description: "Forecast",
        },
    ]
}

/// Tracks which tile, if any, is currently active in the modal host.
pub struct Launcher {
    tiles: Vec<TileDefinition>,
    active: Option<usize>,
}

impl Launcher {
    pub fn new(tiles: Vec<TileDefinition>) -> Self {
        Self {
            tiles,
            active: None,
        }
    }

    pub fn tiles(&self) -> &[TileDefinition] {
        &self.tiles
    }

    /// The active tile, if one is open.
    pub fn active_tile(&self) -> Option<&TileDefinition> {
        self.active.map(|i| &self.tiles[i])
    }

    /// Activate the tile with the given id.
    ///
    /// Selecting a tile while another is open replaces it. Unknown ids
    /// leave the launcher unchanged and return `None`.
    pub fn open(&mut self, id: &str) -> Option<&TileDefinition> {
        let index = self.tiles.iter().position(|t| t.id == id)?;
        self.active = Some(index);
        tracing::debug!(tile = id, "Tile opened");
        Some(&self.tiles[index])
    }

    /// Close the active tile and return to the home screen.
    pub fn close(&mut self) {
        if let Some(index) = self.active.take() {
            tracing::debug!(tile = self.tiles[index].id, "Tile closed");
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tiles_have_unique_ids() {
        let tiles = default_tiles();
        let mut ids: Vec<&str> = tiles.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), tiles.len());
    }

    #[test]
    fn test_chat_tile_is_a_mini_app() {
        let tiles = default_tiles();
        let chat = tiles.iter().find(|t| t.id == "chat").unwrap();
        assert_eq!(chat.target, TileTarget::MiniApp(MiniAppKind::Chat));
    }

    #[test]
    fn test_open_and_close() {
        let mut launcher = Launcher::new(default_tiles());
        assert!(launcher.active_tile().is_none());

        let tile = launcher.open("chat").unwrap();
        assert_eq!(tile.id, "chat");
        assert_eq!(launcher.active_tile().unwrap().id, "chat");

        launcher.close();
        assert!(launcher.active_tile().is_none());
    }

    #[test]
    fn test_open_unknown_tile_is_noop() {
        let mut launcher = Launcher::new(default_tiles());
        launcher.open("chat");
        assert!(launcher.open("nope").is_none());
        assert_eq!(launcher.active_tile().unwrap().id, "chat");
    }

    #[test]
    fn test_open_replaces_active_tile() {
        let mut launcher = Launcher::new(default_tiles());
        launcher.open("chat");
        launcher.open("notes");
        assert_eq!(launcher.active_tile().unwrap().id, "notes");
    }

    #[test]
    fn test_close_without_active_is_noop() {
        let mut launcher = Launcher::new(default_tiles());
        launcher.close();
        assert!(launcher.active_tile().is_none());
    }
}
