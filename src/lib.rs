// ModSync - Interactive mod selection and installation for Beat Saber
//
// This is the library crate containing the selection, resolution and installation logic.
// The binary crate (main.rs) provides the interactive terminal entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod services;
pub mod session;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ModRecord, Selection, Settings};
pub use session::{Session, SessionError, SessionOutcome};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
