//! # urlfor-core
//!
//! Foundation types shared by the urlfor-rs crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - The settings that shape generated URLs
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{ArgumentKind, UrlForError, UrlForResult};
pub use settings::Settings;
