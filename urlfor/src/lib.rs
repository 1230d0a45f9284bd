//! # urlfor
//!
//! Reverse URL generation for controller trees and named routes.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on `urlfor`
//! for everything, or on the individual crates for finer-grained control.

/// Error types, settings, and logging.
pub use urlfor_core as core;

/// Argument binding, route tables, and URL building.
pub use urlfor_routing as routing;

/// The `urlfor` command-line tool.
#[cfg(feature = "cli")]
pub use urlfor_cli as cli;

/// Commonly used types, importable with `use urlfor::prelude::*`.
pub mod prelude {
    pub use urlfor_core::{ArgumentKind, Settings, UrlForError, UrlForResult};
    pub use urlfor_routing::{
        bind, Application, CallArgs, Controller, Handler, Manifest, RouteMapper, RouteRegistry,
        RouteTable, Signature, UrlBuilder, UrlKind, Value, ROUTES,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_builds_urls() {
        let root = Controller::new("gdgukraine.Controller.Root")
            .handler(Handler::exposed("index", Signature::new()));
        let table = ROUTES.get_or_build(&[Application::tree("", root)]);
        let urls = UrlBuilder::new(table, &Settings::default());
        assert_eq!(
            urls.url_for("Controller.Root", UrlKind::ClassBased, &CallArgs::new())
                .unwrap(),
            "https://gdg.org.ua/"
        );
    }
}
