use std::process::ExitCode;

use urlfor_cli::{default_registry, CommandContext};
use urlfor_core::logging::setup_logging;

fn main() -> ExitCode {
    let registry = default_registry();
    let matches = registry.build_cli().get_matches();

    let result = CommandContext::from_matches(&matches).and_then(|ctx| {
        setup_logging(ctx.settings());
        registry.execute(&matches, &ctx)
    });

    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
