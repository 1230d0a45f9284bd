//! Declared application structure.
//!
//! An [`Application`] is mounted at a script name and is routed either by a
//! tree of [`Controller`]s (each exposing [`Handler`]s and mounting child
//! controllers under attribute names) or by a [`RouteMapper`] of named routes.

use std::sync::Arc;

use crate::mapper::RouteMapper;
use crate::signature::Signature;

/// A handler method on a controller.
#[derive(Debug, Clone)]
pub struct Handler {
    /// The method name. `index` is served at the controller's mount point.
    pub name: String,
    /// Whether the handler is reachable over HTTP.
    pub exposed: bool,
    /// The declared parameters.
    pub signature: Signature,
}

impl Handler {
    /// Creates an exposed handler.
    pub fn exposed(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            exposed: true,
            signature,
        }
    }

    /// Creates a handler that is not reachable over HTTP.
    pub fn hidden(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            exposed: false,
            signature,
        }
    }

    /// Returns `true` if this is the controller's index handler.
    pub fn is_index(&self) -> bool {
        self.name == "index"
    }
}

/// A controller: a set of handlers plus child controllers mounted under it.
///
/// # Examples
///
/// ```
/// use urlfor_routing::signature::Signature;
/// use urlfor_routing::tree::{Controller, Handler};
///
/// let root = Controller::new("Controller.Root")
///     .handler(Handler::exposed("index", Signature::new()))
///     .mount(
///         "auth",
///         Controller::new("Controller.Auth")
///             .handler(Handler::exposed("logout", Signature::new().var_positional("args"))),
///     );
/// assert_eq!(root.children().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Controller {
    class_path: String,
    handlers: Vec<Handler>,
    children: Vec<(String, Controller)>,
}

impl Controller {
    /// Creates a controller identified by its dotted class path.
    pub fn new(class_path: impl Into<String>) -> Self {
        Self {
            class_path: class_path.into(),
            handlers: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a handler.
    #[must_use]
    pub fn handler(mut self, handler: Handler) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Mounts a child controller under `attr`.
    #[must_use]
    pub fn mount(mut self, attr: impl Into<String>, child: Self) -> Self {
        self.children.push((attr.into(), child));
        self
    }

    /// Returns the dotted class path.
    pub fn class_path(&self) -> &str {
        &self.class_path
    }

    /// Returns the handlers in declaration order.
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    /// Returns the mounted children in declaration order.
    pub fn children(&self) -> &[(String, Self)] {
        &self.children
    }
}

/// How an application is routed.
#[derive(Debug, Clone)]
pub enum AppRoot {
    /// Routed by walking a controller tree.
    Tree(Controller),
    /// Routed by a mapper of named routes.
    Mapper(Arc<RouteMapper>),
}

/// An application mounted at a script name.
#[derive(Debug, Clone)]
pub struct Application {
    script_name: String,
    root: Option<AppRoot>,
}

impl Application {
    /// An application routed by a controller tree.
    pub fn tree(script_name: impl Into<String>, root: Controller) -> Self {
        Self {
            script_name: script_name.into(),
            root: Some(AppRoot::Tree(root)),
        }
    }

    /// An application routed by named routes.
    pub fn mapper(script_name: impl Into<String>, mapper: RouteMapper) -> Self {
        Self {
            script_name: script_name.into(),
            root: Some(AppRoot::Mapper(Arc::new(mapper))),
        }
    }

    /// An application with nothing to reverse (e.g. a static file mount).
    pub fn empty(script_name: impl Into<String>) -> Self {
        Self {
            script_name: script_name.into(),
            root: None,
        }
    }

    /// Returns the script name the application is mounted at.
    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    /// Returns how the application is routed, if at all.
    pub const fn root(&self) -> Option<&AppRoot> {
        self.root.as_ref()
    }
}
