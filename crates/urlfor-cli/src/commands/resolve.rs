//! The `resolve` command.
//!
//! Builds the URL of one handler:
//!
//! ```text
//! urlfor --manifest routes.toml resolve Controller.Root.auth.logout \
//!     --kind class-based --arg sdf --arg sdf2 --param asdf=1
//! ```

use urlfor_core::{UrlForError, UrlForResult};
use urlfor_routing::{CallArgs, UrlKind, Value};

use crate::command::{Command, CommandContext};

/// Resolves a handler identifier to an absolute URL.
pub struct ResolveCommand;

impl Command for ResolveCommand {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn help(&self) -> &'static str {
        "Build the URL of a handler"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("handler")
                .required(true)
                .help("Dotted controller path, route name, or plain path"),
        )
        .arg(
            clap::Arg::new("kind")
                .long("kind")
                .short('k')
                .default_value("class-based")
                .value_parser(["plain", "cherrypy", "class-based", "routes", "static"])
                .help("How the handler is interpreted"),
        )
        .arg(
            clap::Arg::new("arg")
                .long("arg")
                .short('a')
                .action(clap::ArgAction::Append)
                .allow_hyphen_values(true)
                .help("Positional argument (repeatable)"),
        )
        .arg(
            clap::Arg::new("param")
                .long("param")
                .short('p')
                .action(clap::ArgAction::Append)
                .help("Keyword argument as KEY=VALUE (repeatable)"),
        )
    }

    fn handle(&self, matches: &clap::ArgMatches, ctx: &CommandContext) -> UrlForResult<String> {
        let handler = matches
            .get_one::<String>("handler")
            .ok_or_else(|| UrlForError::ConfigurationError("No handler given".to_string()))?;
        let kind: UrlKind = matches
            .get_one::<String>("kind")
            .map_or(Ok(UrlKind::ClassBased), |k| k.parse())?;

        let mut call = CallArgs::new();
        for raw in matches.get_many::<String>("arg").into_iter().flatten() {
            call.push_arg(parse_value(raw));
        }
        for raw in matches.get_many::<String>("param").into_iter().flatten() {
            let (key, value) = parse_param(raw)?;
            call.insert_kwarg(key, value);
        }

        ctx.url_builder().url_for(handler, kind, &call)
    }
}

/// Parses a command-line value: integers become [`Value::Integer`], anything
/// else stays a string.
pub fn parse_value(raw: &str) -> Value {
    raw.parse::<i64>()
        .map_or_else(|_| Value::String(raw.to_string()), Value::Integer)
}

/// Splits a `KEY=VALUE` pair at the first `=`.
///
/// # Errors
///
/// Returns [`UrlForError::InvalidArgument`] if there is no `=` or the key is
/// empty.
pub fn parse_param(raw: &str) -> UrlForResult<(String, Value)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), parse_value(value))),
        _ => Err(UrlForError::InvalidArgument(format!(
            "Expected KEY=VALUE, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlfor_core::Settings;
    use urlfor_routing::{Application, Controller, Handler, RouteMapper, Signature};

    fn ctx() -> CommandContext {
        let root = Controller::new("gdgukraine.Controller.Root").mount(
            "auth",
            Controller::new("gdgukraine.Controller.Auth").handler(Handler::exposed(
                "logout",
                Signature::new().var_positional("args").var_keyword("kwargs"),
            )),
        );
        let events = RouteMapper::new().route("event", "/<int:id>").unwrap();
        CommandContext::new(
            Settings::default(),
            vec![Application::tree("", root), Application::mapper("/events", events)],
        )
    }

    fn resolve(args: &[&str]) -> UrlForResult<String> {
        let cmd = ResolveCommand.add_arguments(clap::Command::new("resolve"));
        let matches = cmd
            .try_get_matches_from(std::iter::once("resolve").chain(args.iter().copied()))
            .unwrap();
        ResolveCommand.handle(&matches, &ctx())
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("-1"), Value::Integer(-1));
        assert_eq!(parse_value("sdf"), Value::from("sdf"));
        assert_eq!(parse_value(""), Value::from(""));
    }

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("a=1").unwrap(), ("a".to_string(), Value::Integer(1)));
        assert_eq!(
            parse_param("next=/a=b").unwrap(),
            ("next".to_string(), Value::from("/a=b"))
        );
        assert!(matches!(parse_param("novalue"), Err(UrlForError::InvalidArgument(_))));
        assert!(parse_param("=1").is_err());
    }

    #[test]
    fn test_resolve_class_based() {
        let url = resolve(&[
            "Controller.Root.auth.logout",
            "--arg",
            "sdf",
            "--arg",
            "sdf2",
            "--param",
            "4=1",
            "--param",
            "asdf=1",
        ])
        .unwrap();
        assert_eq!(url, "https://gdg.org.ua/auth/logout/sdf/sdf2?4=1&asdf=1");
    }

    #[test]
    fn test_resolve_routes() {
        let url = resolve(&["event", "--kind", "routes", "--param", "id=7"]).unwrap();
        assert_eq!(url, "https://gdg.org.ua/events/7");
    }

    #[test]
    fn test_resolve_plain_rejects_arguments() {
        assert!(resolve(&["about", "--kind", "plain"]).is_ok());
        assert!(resolve(&["about", "--kind", "plain", "--arg", "x"]).is_err());
    }

    #[test]
    fn test_resolve_unknown_handler() {
        let err = resolve(&["Controller.Root.nope"]).unwrap_err();
        assert!(matches!(err, UrlForError::UnknownHandler(_)));
    }
}
