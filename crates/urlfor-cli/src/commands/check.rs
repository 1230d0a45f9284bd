//! The `check` command.
//!
//! Builds the route table and reports configuration problems: a base URL
//! without a scheme, a relative static prefix, unknown settings keys, mounts
//! with nothing to reverse, and named routes registered by more than one
//! application.

use std::collections::HashMap;
use std::fmt::{self, Write};

use urlfor_core::{Settings, UrlForError, UrlForResult};
use urlfor_routing::tree::AppRoot;
use urlfor_routing::{Application, RouteTable};

use crate::command::{Command, CommandContext};

/// Validates settings and the route manifest.
pub struct CheckCommand;

/// The result of a single check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// Severity.
    pub level: CheckLevel,
    /// What is wrong.
    pub msg: String,
    /// Check identifier, e.g. `settings.E001`.
    pub id: &'static str,
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    /// Informational message.
    Info,
    /// May indicate a problem.
    Warning,
    /// Must be resolved.
    Error,
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl CheckMessage {
    fn new(level: CheckLevel, id: &'static str, msg: impl Into<String>) -> Self {
        Self {
            level,
            msg: msg.into(),
            id,
        }
    }
}

/// Runs every check against the settings, applications, and built table.
pub fn run_checks(settings: &Settings, apps: &[Application], table: &RouteTable) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    if !(settings.base_app_url.starts_with("http://") || settings.base_app_url.starts_with("https://")) {
        messages.push(CheckMessage::new(
            CheckLevel::Error,
            "settings.E001",
            format!("base_app_url '{}' has no http(s) scheme", settings.base_app_url),
        ));
    }

    if !settings.static_url.starts_with('/') {
        messages.push(CheckMessage::new(
            CheckLevel::Warning,
            "settings.W001",
            format!("static_url '{}' does not start with '/'", settings.static_url),
        ));
    }

    if settings.app_name.is_empty() {
        messages.push(CheckMessage::new(
            CheckLevel::Warning,
            "settings.W002",
            "app_name is empty; class-based handlers must be fully qualified",
        ));
    }

    let mut unknown: Vec<&str> = settings.extra.keys().map(String::as_str).collect();
    unknown.sort_unstable();
    for key in unknown {
        messages.push(CheckMessage::new(
            CheckLevel::Warning,
            "settings.W003",
            format!("unknown setting '{key}' is ignored"),
        ));
    }

    let mut owners: HashMap<&str, Vec<&str>> = HashMap::new();
    for app in apps {
        match app.root() {
            None => messages.push(CheckMessage::new(
                CheckLevel::Info,
                "routes.I001",
                format!("app at '{}' has nothing to reverse", app.script_name()),
            )),
            Some(AppRoot::Mapper(mapper)) => {
                for name in mapper.names() {
                    owners.entry(name).or_default().push(app.script_name());
                }
            }
            Some(AppRoot::Tree(_)) => {}
        }
    }
    let mut shadowed: Vec<_> = owners.into_iter().filter(|(_, s)| s.len() > 1).collect();
    shadowed.sort_unstable_by_key(|(name, _)| *name);
    for (name, scripts) in shadowed {
        messages.push(CheckMessage::new(
            CheckLevel::Warning,
            "routes.W001",
            format!("route '{name}' is registered by {scripts:?}; the last one wins"),
        ));
    }

    if table.is_empty() {
        messages.push(CheckMessage::new(
            CheckLevel::Error,
            "routes.E001",
            "route table is empty",
        ));
    }

    messages
}

impl Command for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Check settings and the route manifest"
    }

    fn handle(&self, _matches: &clap::ArgMatches, ctx: &CommandContext) -> UrlForResult<String> {
        let table = ctx.table();
        let messages = run_checks(ctx.settings(), ctx.apps(), &table);

        let mut out = String::new();
        for msg in &messages {
            tracing::warn!(level = %msg.level, id = msg.id, "{}", msg.msg);
            let _ = writeln!(out, "{} ({}): {}", msg.level, msg.id, msg.msg);
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        if errors > 0 {
            return Err(UrlForError::ConfigurationError(format!(
                "Check found {errors} error(s)"
            )));
        }

        let _ = writeln!(
            out,
            "{} class-based route(s), {} named route(s) across {} app(s)",
            table.class_routes().len(),
            table.named_routes().len(),
            ctx.apps().len()
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlfor_routing::{Controller, Handler, RouteMapper, Signature};

    fn apps() -> Vec<Application> {
        let root = Controller::new("site.Root").handler(Handler::exposed("index", Signature::new()));
        vec![
            Application::tree("", root),
            Application::mapper("/a", RouteMapper::new().route("ping", "/ping").unwrap()),
            Application::mapper("/b", RouteMapper::new().route("ping", "/ping").unwrap()),
            Application::empty("/static"),
        ]
    }

    fn ids(messages: &[CheckMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_default_settings_pass() {
        let apps = apps();
        let messages = run_checks(&Settings::default(), &apps, &RouteTable::build(&apps));
        assert_eq!(ids(&messages), vec!["routes.I001", "routes.W001"]);
        assert!(messages[1].msg.contains("ping"));
    }

    #[test]
    fn test_bad_settings() {
        let settings = Settings {
            base_app_url: "gdg.org.ua".to_string(),
            static_url: "static".to_string(),
            app_name: String::new(),
            ..Settings::default()
        };
        let messages = run_checks(&settings, &[], &RouteTable::default());
        assert_eq!(
            ids(&messages),
            vec!["settings.E001", "settings.W001", "settings.W002", "routes.E001"]
        );
    }

    #[test]
    fn test_unknown_settings_keys() {
        let mut settings = Settings::default();
        settings.extra.insert("statik_url".to_string(), "/assets".into());
        settings.extra.insert("base_url".to_string(), "http://x".into());
        let apps = apps();
        let messages = run_checks(&settings, &apps, &RouteTable::build(&apps));
        let unknown: Vec<&str> = messages
            .iter()
            .filter(|m| m.id == "settings.W003")
            .map(|m| m.msg.as_str())
            .collect();
        assert_eq!(
            unknown,
            vec![
                "unknown setting 'base_url' is ignored",
                "unknown setting 'statik_url' is ignored",
            ]
        );
    }

    #[test]
    fn test_check_level_ordering() {
        assert!(CheckLevel::Info < CheckLevel::Warning);
        assert!(CheckLevel::Warning < CheckLevel::Error);
        assert_eq!(CheckLevel::Error.to_string(), "ERROR");
    }

    #[test]
    fn test_handle_reports_counts() {
        let ctx = CommandContext::new(Settings::default(), apps());
        let matches = clap::Command::new("check").get_matches_from(["check"]);
        let out = CheckCommand.handle(&matches, &ctx).unwrap();
        assert!(out.ends_with("2 class-based route(s), 1 named route(s) across 4 app(s)\n"));
    }

    #[test]
    fn test_handle_fails_on_errors() {
        let ctx = CommandContext::new(Settings::default(), Vec::new());
        let matches = clap::Command::new("check").get_matches_from(["check"]);
        assert!(CheckCommand.handle(&matches, &ctx).is_err());
    }
}
