//! # urlfor-cli
//!
//! The `urlfor` command-line tool: load a route manifest and settings, then
//! resolve handlers to URLs, list the route table, or check it for problems.
//!
//! ## Quick Start
//!
//! ```rust
//! use urlfor_cli::command::CommandRegistry;
//! use urlfor_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert_eq!(names, vec!["check", "resolve", "routes"]);
//! ```

pub mod command;
pub mod commands;

pub use command::{Command, CommandContext, CommandRegistry};

use urlfor_core::UrlForResult;

/// Builds the registry of built-in commands.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);
    registry
}

/// Parses `args`, loads the context, and runs the selected command.
///
/// Returns what the command printed. Argument errors from clap (including
/// `--help`) are returned as [`urlfor_core::UrlForError::ConfigurationError`].
///
/// # Examples
///
/// ```no_run
/// let out = urlfor_cli::run(["urlfor", "--manifest", "routes.toml", "routes"]).unwrap();
/// println!("{out}");
/// ```
pub fn run<I, T>(args: I) -> UrlForResult<String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let registry = default_registry();
    let matches = registry.build_cli().try_get_matches_from(args).map_err(|e| {
        urlfor_core::UrlForError::ConfigurationError(e.to_string())
    })?;
    let ctx = CommandContext::from_matches(&matches)?;
    registry.execute(&matches, &ctx)
}
