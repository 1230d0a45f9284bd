//! # urlfor-routing
//!
//! Reverse URL generation: handlers are referenced by a dotted controller
//! path or a route name, and their URLs are rebuilt from the declared route
//! table instead of being hard-coded.
//!
//! ## Modules
//!
//! - [`value`] - Dynamic argument values
//! - [`signature`] - Declared handler parameters and caller arguments
//! - [`binder`] - Matching a call against a signature
//! - [`encode`] - URL encoding and rendering of bound arguments
//! - [`converters`] - Placeholder converters for named routes
//! - [`mapper`] - Named routes and the route mapper
//! - [`tree`] - Applications and controller trees
//! - [`table`] - The route table built from applications
//! - [`registry`] - Build-once holder for the route table
//! - [`manifest`] - Declaring applications in TOML or JSON
//! - [`url_for`] - Building absolute URLs
//!
//! ## Example
//!
//! ```
//! use urlfor_core::Settings;
//! use urlfor_routing::registry::RouteRegistry;
//! use urlfor_routing::signature::{CallArgs, Signature};
//! use urlfor_routing::tree::{Application, Controller, Handler};
//! use urlfor_routing::url_for::{UrlBuilder, UrlKind};
//!
//! let root = Controller::new("gdgukraine.Controller.Root").mount(
//!     "auth",
//!     Controller::new("Controller.Auth").handler(Handler::exposed(
//!         "logout",
//!         Signature::new().var_positional("args").var_keyword("kwargs"),
//!     )),
//! );
//! let apps = vec![Application::tree("", root)];
//!
//! let registry = RouteRegistry::new();
//! let urls = UrlBuilder::new(registry.get_or_build(&apps), &Settings::default());
//!
//! let call = CallArgs::new().arg("sdf").arg("sdf2").kwarg("4", 1).kwarg("asdf", "1");
//! let url = urls
//!     .url_for("Controller.Root.auth.logout", UrlKind::ClassBased, &call)
//!     .unwrap();
//! assert_eq!(url, "https://gdg.org.ua/auth/logout/sdf/sdf2?4=1&asdf=1");
//! ```

pub mod binder;
pub mod converters;
pub mod encode;
pub mod manifest;
pub mod mapper;
pub mod registry;
pub mod signature;
pub mod table;
pub mod tree;
pub mod url_for;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use binder::{bind, BindingResult};
pub use manifest::Manifest;
pub use mapper::{NamedRoute, RouteMapper};
pub use registry::{RouteRegistry, ROUTES};
pub use signature::{CallArgs, ParamKind, ParameterSpec, Signature};
pub use table::{RouteTable, RouteTemplate};
pub use tree::{Application, Controller, Handler};
pub use url_for::{UrlBuilder, UrlKind};
pub use value::Value;
