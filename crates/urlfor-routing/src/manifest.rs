//! Route manifests.
//!
//! Applications can be declared in a TOML or JSON file instead of in code:
//!
//! ```toml
//! [[apps]]
//! script_name = ""
//!
//! [apps.controller]
//! class = "Controller.Root"
//!
//! [[apps.controller.handlers]]
//! name = "index"
//!
//! [apps.controller.mounts.auth]
//! class = "Controller.Auth"
//!
//! [[apps.controller.mounts.auth.handlers]]
//! name = "logout"
//! params = [
//!     { name = "args", kind = "var_positional" },
//!     { name = "next", kind = "keyword_only", default = "/" },
//! ]
//!
//! [[apps]]
//! script_name = "/events"
//! routes = [
//!     { name = "event_detail", path = "/<int:id>" },
//! ]
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use urlfor_core::{UrlForError, UrlForResult};

use crate::mapper::{NamedRoute, RouteMapper};
use crate::signature::{ParameterSpec, Signature};
use crate::tree::{Application, Controller, Handler};

/// The top-level manifest document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    /// The applications, in mount order.
    #[serde(default)]
    pub apps: Vec<AppManifest>,
}

/// One application entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppManifest {
    /// Where the application is mounted.
    #[serde(default)]
    pub script_name: String,
    /// The root controller, for class-based apps.
    #[serde(default)]
    pub controller: Option<ControllerManifest>,
    /// Named routes, for mapper apps.
    #[serde(default)]
    pub routes: Vec<RouteManifest>,
}

/// A controller entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ControllerManifest {
    /// Dotted class path, e.g. `Controller.Root`.
    pub class: String,
    /// Handler methods.
    #[serde(default)]
    pub handlers: Vec<HandlerManifest>,
    /// Child controllers keyed by attribute name.
    #[serde(default)]
    pub mounts: BTreeMap<String, ControllerManifest>,
}

/// A handler entry.
#[derive(Debug, Clone, Deserialize)]
pub struct HandlerManifest {
    /// Method name.
    pub name: String,
    /// Whether the handler is reachable; defaults to `true`.
    #[serde(default = "default_exposed")]
    pub exposed: bool,
    /// Declared parameters in order.
    #[serde(default)]
    pub params: Vec<ParameterSpec>,
}

/// A named route entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteManifest {
    /// Route name.
    pub name: String,
    /// Path template with `<type:name>` placeholders.
    pub path: String,
}

const fn default_exposed() -> bool {
    true
}

impl Manifest {
    /// Parses a manifest from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::ConfigurationError`] if the TOML is malformed.
    pub fn from_toml_str(input: &str) -> UrlForResult<Self> {
        toml::from_str(input).map_err(|e| {
            UrlForError::ConfigurationError(format!("Failed to parse route manifest TOML: {e}"))
        })
    }

    /// Parses a manifest from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::ConfigurationError`] if the JSON is malformed.
    pub fn from_json_str(input: &str) -> UrlForResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            UrlForError::ConfigurationError(format!("Failed to parse route manifest JSON: {e}"))
        })
    }

    /// Reads a manifest file; `.json` is parsed as JSON, anything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> UrlForResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            UrlForError::ConfigurationError(format!(
                "Failed to read route manifest '{}': {e}",
                path.display()
            ))
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Converts the manifest into applications.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::ConfigurationError`] if an app declares both a
    /// controller and routes, or the errors of [`NamedRoute::new`].
    pub fn into_applications(self) -> UrlForResult<Vec<Application>> {
        self.apps.into_iter().map(AppManifest::into_application).collect()
    }
}

impl AppManifest {
    fn into_application(self) -> UrlForResult<Application> {
        match (self.controller, self.routes.is_empty()) {
            (Some(_), false) => Err(UrlForError::ConfigurationError(format!(
                "App '{}' declares both a controller and routes",
                self.script_name
            ))),
            (Some(controller), true) => Ok(Application::tree(
                self.script_name,
                controller.into_controller(),
            )),
            (None, false) => {
                let mut mapper = RouteMapper::new();
                for route in self.routes {
                    mapper.connect(NamedRoute::new(route.name, &route.path)?);
                }
                Ok(Application::mapper(self.script_name, mapper))
            }
            (None, true) => Ok(Application::empty(self.script_name)),
        }
    }
}

impl ControllerManifest {
    fn into_controller(self) -> Controller {
        let mut controller = Controller::new(self.class);
        for handler in self.handlers {
            let signature = Signature::from_params(handler.params);
            controller = controller.handler(if handler.exposed {
                Handler::exposed(handler.name, signature)
            } else {
                Handler::hidden(handler.name, signature)
            });
        }
        for (attr, child) in self.mounts {
            controller = controller.mount(attr, child.into_controller());
        }
        controller
    }
}
