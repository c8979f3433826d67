//! External capabilities consumed by the Launchdeck shell.
//!
//! Identity (sign-in, sign-out, session restore) and file persistence
//! (transcript save) live behind capability traits. The local mock
//! implementations are what the binary wires in when no real cloud
//! backend is configured.

pub mod drive;
pub mod error;
pub mod identity;

pub use drive::{FileStore, LocalDrive};
pub use error::{AuthError, PersistenceError};
pub use identity::{Identity, MockIdentity};
