//! Command framework for the `urlfor` tool.
//!
//! Each subcommand implements [`Command`] and is registered in a
//! [`CommandRegistry`], which builds the clap parser and dispatches to the
//! selected command.
//!
//! ## Defining a Command
//!
//! ```rust
//! use urlfor_cli::command::{Command, CommandContext};
//! use urlfor_core::UrlForResult;
//!
//! struct CountCommand;
//!
//! impl Command for CountCommand {
//!     fn name(&self) -> &'static str { "count" }
//!     fn help(&self) -> &'static str { "Count reversible handlers" }
//!
//!     fn handle(&self, _matches: &clap::ArgMatches, ctx: &CommandContext) -> UrlForResult<String> {
//!         Ok(ctx.table().len().to_string())
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use urlfor_core::{settings_loader, Settings, UrlForError, UrlForResult};
use urlfor_routing::{Application, Manifest, RouteRegistry, RouteTable, UrlBuilder};

/// A subcommand of the `urlfor` tool.
pub trait Command: Send + Sync {
    /// Returns the name the command is invoked by.
    fn name(&self) -> &'static str;

    /// Returns a short help description.
    fn help(&self) -> &'static str;

    /// Adds command-specific arguments. The default adds none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the command and returns its output.
    fn handle(&self, matches: &clap::ArgMatches, ctx: &CommandContext) -> UrlForResult<String>;
}

/// What every command runs against: the settings and the mounted
/// applications.
pub struct CommandContext {
    settings: Settings,
    apps: Vec<Application>,
    routes: RouteRegistry,
}

impl CommandContext {
    /// Creates a context from already-loaded settings and applications.
    pub fn new(settings: Settings, apps: Vec<Application>) -> Self {
        Self {
            settings,
            apps,
            routes: RouteRegistry::new(),
        }
    }

    /// Loads the context named by the global `--settings` and `--manifest`
    /// options.
    ///
    /// Without `--settings`, defaults plus `URLFOR_*` environment overrides
    /// are used.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::ConfigurationError`] if `--manifest` is missing
    /// or either file cannot be loaded.
    pub fn from_matches(matches: &clap::ArgMatches) -> UrlForResult<Self> {
        let settings = match matches.get_one::<PathBuf>("settings") {
            Some(path) => settings_loader::from_file_with_env(path)?,
            None => settings_loader::from_env(),
        };
        let manifest = matches
            .get_one::<PathBuf>("manifest")
            .ok_or_else(|| {
                UrlForError::ConfigurationError("No route manifest given (--manifest)".to_string())
            })?;
        let apps = Manifest::from_file(manifest)?.into_applications()?;
        tracing::debug!(manifest = %manifest.display(), apps = apps.len(), "loaded route manifest");
        Ok(Self::new(settings, apps))
    }

    /// Returns the loaded settings.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the mounted applications.
    pub fn apps(&self) -> &[Application] {
        &self.apps
    }

    /// Returns the route table, building it on first use.
    pub fn table(&self) -> Arc<RouteTable> {
        self.routes.get_or_build(&self.apps)
    }

    /// Returns a URL builder over the route table.
    pub fn url_builder(&self) -> UrlBuilder {
        UrlBuilder::new(self.table(), &self.settings)
    }
}

/// A registry of commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns the registered command names, sorted.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with every registered subcommand
    /// and the global `--settings` and `--manifest` options.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("urlfor")
            .about("Reverse URL generation for controller trees and named routes")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .short('s')
                    .global(true)
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Settings file (TOML or JSON)"),
            )
            .arg(
                clap::Arg::new("manifest")
                    .long("manifest")
                    .short('m')
                    .global(true)
                    .value_parser(clap::value_parser!(PathBuf))
                    .help("Route manifest file (TOML or JSON)"),
            );

        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| **name);

        for (name, cmd) in entries {
            let subcmd = clap::Command::new(*name).about(cmd.help());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches to the subcommand selected in `matches`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::ConfigurationError`] if no known subcommand was
    /// selected, or the error of the command itself.
    pub fn execute(&self, matches: &clap::ArgMatches, ctx: &CommandContext) -> UrlForResult<String> {
        let (name, sub_matches) = matches.subcommand().ok_or_else(|| {
            UrlForError::ConfigurationError("No subcommand specified".to_string())
        })?;

        let cmd = self
            .get(name)
            .ok_or_else(|| UrlForError::ConfigurationError(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "running command");
        cmd.handle(sub_matches, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlfor_routing::{Controller, Handler, Signature};

    struct EchoCommand {
        cmd_name: &'static str,
    }

    impl Command for EchoCommand {
        fn name(&self) -> &'static str {
            self.cmd_name
        }

        fn help(&self) -> &'static str {
            "Echo a word"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(clap::Arg::new("word").required(true))
        }

        fn handle(&self, matches: &clap::ArgMatches, _ctx: &CommandContext) -> UrlForResult<String> {
            Ok(matches
                .get_one::<String>("word")
                .cloned()
                .unwrap_or_default())
        }
    }

    struct FailingCommand;

    impl Command for FailingCommand {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn help(&self) -> &'static str {
            "A command that always fails"
        }

        fn handle(&self, _matches: &clap::ArgMatches, _ctx: &CommandContext) -> UrlForResult<String> {
            Err(UrlForError::ConfigurationError("deliberate failure".to_string()))
        }
    }

    fn ctx() -> CommandContext {
        let root = Controller::new("site.Root").handler(Handler::exposed("index", Signature::new()));
        CommandContext::new(Settings::default(), vec![Application::tree("", root)])
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "echo" }));
        registry.register(Box::new(EchoCommand { cmd_name: "echo" }));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("echo").unwrap().help(), "Echo a word");
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_list_commands_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "zebra" }));
        registry.register(Box::new(FailingCommand));
        registry.register(Box::new(EchoCommand { cmd_name: "alpha" }));
        assert_eq!(registry.list_commands(), vec!["alpha", "fail", "zebra"]);
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "echo" }));
        let matches = registry
            .build_cli()
            .try_get_matches_from(["urlfor", "echo", "hi", "--manifest", "routes.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<PathBuf>("manifest").unwrap(),
            &PathBuf::from("routes.toml")
        );
    }

    #[test]
    fn test_execute() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "echo" }));
        registry.register(Box::new(FailingCommand));
        let cli = registry.build_cli();

        let matches = cli.clone().try_get_matches_from(["urlfor", "echo", "hi"]).unwrap();
        assert_eq!(registry.execute(&matches, &ctx()).unwrap(), "hi");

        let matches = cli.try_get_matches_from(["urlfor", "fail"]).unwrap();
        assert!(registry.execute(&matches, &ctx()).is_err());
    }

    #[test]
    fn test_missing_manifest() {
        let registry = CommandRegistry::new();
        let matches = registry
            .build_cli()
            .subcommand_required(false)
            .try_get_matches_from(["urlfor"])
            .unwrap();
        let err = CommandContext::from_matches(&matches).err().unwrap();
        assert!(matches!(err, UrlForError::ConfigurationError(_)));
    }

    #[test]
    fn test_context_table_is_built_once() {
        let ctx = ctx();
        assert!(Arc::ptr_eq(&ctx.table(), &ctx.table()));
        assert!(ctx.table().class_route("site.root").is_some());
    }
}
