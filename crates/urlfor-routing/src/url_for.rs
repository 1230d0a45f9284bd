//! The `url_for` front door.
//!
//! [`UrlBuilder`] turns a handler identifier plus arguments into an absolute
//! URL, using a built [`RouteTable`] and the base URL settings.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use urlfor_core::logging::url_for_span;
use urlfor_core::{ArgumentKind, Settings, UrlForError, UrlForResult};

use crate::signature::CallArgs;
use crate::table::RouteTable;

/// How a handler identifier is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlKind {
    /// The identifier is already a path.
    #[default]
    Plain,
    /// A dotted controller path, bound against the handler's signature.
    ClassBased,
    /// A named route in a mapper app.
    Routes,
    /// A path under the static prefix.
    Static,
}

impl FromStr for UrlKind {
    type Err = UrlForError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" | "cherrypy" => Ok(Self::Plain),
            "class-based" => Ok(Self::ClassBased),
            "routes" => Ok(Self::Routes),
            "static" => Ok(Self::Static),
            other => Err(UrlForError::ConfigurationError(format!(
                "Unknown URL kind '{other}'"
            ))),
        }
    }
}

impl fmt::Display for UrlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Plain => "plain",
            Self::ClassBased => "class-based",
            Self::Routes => "routes",
            Self::Static => "static",
        })
    }
}

/// Builds absolute URLs from handler identifiers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use urlfor_core::Settings;
/// use urlfor_routing::signature::{CallArgs, Signature};
/// use urlfor_routing::table::RouteTable;
/// use urlfor_routing::tree::{Application, Controller, Handler};
/// use urlfor_routing::url_for::{UrlBuilder, UrlKind};
///
/// let root = Controller::new("gdgukraine.Controller.Root")
///     .handler(Handler::exposed("event", Signature::new().positional("id")));
/// let table = Arc::new(RouteTable::build(&[Application::tree("", root)]));
/// let urls = UrlBuilder::new(table, &Settings::default());
///
/// let url = urls
///     .url_for("Controller.Root.event", UrlKind::ClassBased, &CallArgs::new().arg(5))
///     .unwrap();
/// assert_eq!(url, "https://gdg.org.ua/event/5");
/// ```
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    table: Arc<RouteTable>,
    base_url: String,
    app_name: String,
    static_url: String,
}

impl UrlBuilder {
    /// Creates a builder over `table` using the URL settings.
    pub fn new(table: Arc<RouteTable>, settings: &Settings) -> Self {
        Self {
            table,
            base_url: settings.base_app_url.clone(),
            app_name: settings.app_name.to_lowercase(),
            static_url: settings.static_url.clone(),
        }
    }

    /// Returns the route table in use.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Builds the URL for `handler` according to `kind`.
    ///
    /// # Errors
    ///
    /// See [`class_based`](Self::class_based) and [`routes`](Self::routes).
    /// `Plain` and `Static` reject any arguments with
    /// [`UrlForError::TooManyArguments`].
    pub fn url_for(&self, handler: &str, kind: UrlKind, call: &CallArgs) -> UrlForResult<String> {
        let span = url_for_span(handler);
        let _guard = span.enter();

        let url = match kind {
            UrlKind::ClassBased => self.class_based(handler, call),
            UrlKind::Routes => self.routes(handler, call),
            UrlKind::Static => no_arguments(call).map(|()| self.static_asset(handler)),
            UrlKind::Plain => no_arguments(call).map(|()| self.plain(handler)),
        }?;
        tracing::debug!(%kind, url = %url, "resolved");
        Ok(url)
    }

    /// Builds the URL of a class-based handler.
    ///
    /// The identifier is matched case-insensitively and the configured app
    /// name is prepended when its first component differs.
    ///
    /// # Errors
    ///
    /// [`UrlForError::UnknownHandler`] if the handler is not in the table, or
    /// the binding errors if `call` does not fit its signature.
    pub fn class_based(&self, handler: &str, call: &CallArgs) -> UrlForResult<String> {
        let key = self.qualify(handler);
        let route = self
            .table
            .class_route(&key)
            .ok_or_else(|| UrlForError::UnknownHandler(handler.to_string()))?;
        let path = route.build(call)?;
        Ok(join_url(&self.base_url, "", &path))
    }

    /// Builds the URL of a named route. Only keyword arguments are accepted.
    ///
    /// # Errors
    ///
    /// [`UrlForError::UnknownHandler`] for an unknown name,
    /// [`UrlForError::TooManyArguments`] for positional arguments, or the
    /// generation errors of the route.
    pub fn routes(&self, name: &str, call: &CallArgs) -> UrlForResult<String> {
        let mounted = self
            .table
            .named_route(name)
            .ok_or_else(|| UrlForError::UnknownHandler(name.to_string()))?;
        if !call.args().is_empty() {
            return Err(UrlForError::TooManyArguments(ArgumentKind::Positional));
        }
        let path = mounted.mapper.generate(name, call.kwargs())?;
        Ok(join_url(&self.base_url, &mounted.script_name, &path))
    }

    /// Builds the URL of a static asset. Paths already under the static
    /// prefix, or equal to it, are not prefixed again.
    pub fn static_asset(&self, path: &str) -> String {
        let path = leading_slash(path);
        let prefix = self.static_url.trim_end_matches('/');
        if prefix.is_empty() || path == prefix || path.starts_with(&format!("{prefix}/")) {
            join_url(&self.base_url, "", &path)
        } else {
            join_url(&self.base_url, prefix, &path)
        }
    }

    /// Builds the URL of a plain path.
    pub fn plain(&self, path: &str) -> String {
        join_url(&self.base_url, "", &leading_slash(path))
    }

    fn qualify(&self, handler: &str) -> String {
        let handler = handler.to_lowercase();
        let first = handler.split('.').next().unwrap_or_default();
        if self.app_name.is_empty() || first == self.app_name {
            handler
        } else {
            format!("{}.{handler}", self.app_name)
        }
    }
}

fn no_arguments(call: &CallArgs) -> UrlForResult<()> {
    if !call.args().is_empty() {
        Err(UrlForError::TooManyArguments(ArgumentKind::Positional))
    } else if !call.kwargs().is_empty() {
        Err(UrlForError::TooManyArguments(ArgumentKind::Keyword))
    } else {
        Ok(())
    }
}

fn leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Joins a base URL, a script name, and a path into one URL.
///
/// The base loses its trailing slashes and the script name is normalised to
/// `/name` with no trailing slash.
///
/// # Examples
///
/// ```
/// use urlfor_routing::url_for::join_url;
///
/// assert_eq!(join_url("https://gdg.org.ua/", "events/", "/42"), "https://gdg.org.ua/events/42");
/// assert_eq!(join_url("https://gdg.org.ua", "", "/"), "https://gdg.org.ua/");
/// ```
pub fn join_url(base: &str, script_name: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let script = script_name.trim_matches('/');
    let path = leading_slash(path);
    if script.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}/{script}{path}")
    }
}
