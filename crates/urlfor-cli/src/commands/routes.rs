//! The `routes` command.
//!
//! Lists every reversible handler in the route table, class-based routes
//! first, each with the path it is served at.

use std::fmt::Write;

use urlfor_core::UrlForResult;
use urlfor_routing::RouteTable;

use crate::command::{Command, CommandContext};

/// Lists the route table.
pub struct RoutesCommand;

impl Command for RoutesCommand {
    fn name(&self) -> &'static str {
        "routes"
    }

    fn help(&self) -> &'static str {
        "List the route table"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("signatures")
                .long("signatures")
                .action(clap::ArgAction::SetTrue)
                .help("Show the parameters of class-based handlers"),
        )
    }

    fn handle(&self, matches: &clap::ArgMatches, ctx: &CommandContext) -> UrlForResult<String> {
        Ok(render_table(&ctx.table(), matches.get_flag("signatures")))
    }
}

/// Renders the table as one `key  path` line per route.
pub fn render_table(table: &RouteTable, signatures: bool) -> String {
    let class_routes = table.class_routes();
    let named_routes = table.named_routes();
    let width = class_routes
        .iter()
        .map(|(key, _)| key.len())
        .chain(named_routes.iter().map(|(name, _)| name.len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    for (key, route) in class_routes {
        let _ = write!(out, "{key:<width$}  {}", route.path());
        if signatures {
            let _ = write!(out, "  {}", route.signature());
        }
        out.push('\n');
    }
    for (name, mounted) in named_routes {
        let template = mounted
            .mapper
            .get(name)
            .map(|route| route.template().to_string())
            .unwrap_or_default();
        let script = mounted.script_name.trim_end_matches('/');
        let _ = writeln!(out, "{name:<width$}  {script}{template}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use urlfor_routing::{Application, Controller, Handler, RouteMapper, Signature};

    fn table() -> RouteTable {
        let root = Controller::new("site.Root")
            .handler(Handler::exposed("index", Signature::new()))
            .handler(Handler::exposed("event", Signature::new().positional("id")));
        let api = RouteMapper::new().route("ping", "/ping").unwrap();
        RouteTable::build(&[
            Application::tree("", root),
            Application::mapper("/api/", api),
        ])
    }

    #[test]
    fn test_render_table() {
        let out = render_table(&table(), false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "site.root        /",
                "site.root.event  /event",
                "site.root.index  /",
                "ping             /api/ping",
            ]
        );
    }

    #[test]
    fn test_render_signatures() {
        let out = render_table(&table(), true);
        assert!(out.contains("/event  (id)"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_table(&RouteTable::default(), false), "");
    }
}
