//! Shared foundation for the Launchdeck shell.
//!
//! Holds the configuration model, the top-level error taxonomy, and the
//! small set of types shared across the launcher and its mini-apps.

pub mod config;
pub mod error;
pub mod types;

pub use config::LaunchdeckConfig;
pub use error::{LaunchdeckError, Result};
pub use types::{Citation, User, DEFAULT_CITATION_TITLE};
