//! Built-in commands.

pub mod check;
pub mod resolve;
pub mod routes;

pub use check::CheckCommand;
pub use resolve::ResolveCommand;
pub use routes::RoutesCommand;

use crate::command::CommandRegistry;

/// Registers all built-in commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(ResolveCommand));
    registry.register(Box::new(RoutesCommand));
    registry.register(Box::new(CheckCommand));
}
