//! The route table.
//!
//! [`RouteTable::build`] walks a set of [`Application`]s once and records, for
//! every reachable handler, the path it is served at and its signature. The
//! table is immutable afterwards and is shared through an `Arc`.

use std::collections::HashMap;
use std::sync::Arc;

use urlfor_core::UrlForResult;

use crate::binder::bind;
use crate::encode::render;
use crate::mapper::RouteMapper;
use crate::signature::{CallArgs, Signature};
use crate::tree::{AppRoot, Application, Controller};

/// A resolvable class-based handler: its path and declared parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteTemplate {
    path: String,
    signature: Signature,
}

impl RouteTemplate {
    /// Creates a template served at `path`.
    pub fn new(path: impl Into<String>, signature: Signature) -> Self {
        Self {
            path: path.into(),
            signature,
        }
    }

    /// Returns the base path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the declared signature.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Binds `call` and renders the resulting path with query string.
    ///
    /// # Errors
    ///
    /// Returns the binding errors of [`bind`].
    pub fn build(&self, call: &CallArgs) -> UrlForResult<String> {
        let bound = bind(&self.signature, call)?;
        Ok(render(&self.path, &bound))
    }
}

/// A route mapper together with the script name its application is mounted at.
#[derive(Debug, Clone)]
pub struct MountedMapper {
    /// The application's script name.
    pub script_name: String,
    /// The application's named routes.
    pub mapper: Arc<RouteMapper>,
}

/// Every reversible handler across all applications.
#[derive(Debug, Default)]
pub struct RouteTable {
    class_routes: HashMap<String, RouteTemplate>,
    named_routes: HashMap<String, MountedMapper>,
}

impl RouteTable {
    /// Builds the table from the given applications.
    ///
    /// Class-based keys are the lower-cased dotted path of the root
    /// controller, extended with the attribute names leading to each handler.
    /// `index` handlers are keyed by their controller alone (and also under
    /// `<controller>.index`) and served at the controller's mount point.
    /// Within one application the first registration of a key wins; a later
    /// application overrides an earlier one.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlfor_routing::signature::Signature;
    /// use urlfor_routing::table::RouteTable;
    /// use urlfor_routing::tree::{Application, Controller, Handler};
    ///
    /// let root = Controller::new("app.Root").handler(Handler::exposed("about", Signature::new()));
    /// let table = RouteTable::build(&[Application::tree("", root)]);
    /// assert_eq!(table.class_route("app.root.about").unwrap().path(), "/about");
    /// ```
    pub fn build(apps: &[Application]) -> Self {
        let mut table = Self::default();

        for app in apps {
            match app.root() {
                Some(AppRoot::Tree(root)) => {
                    tracing::debug!(script_name = app.script_name(), "class-based routed app");
                    let mut routes = HashMap::new();
                    collect_class_routes(
                        root,
                        app.script_name(),
                        &root.class_path().to_lowercase(),
                        &mut routes,
                    );
                    table.class_routes.extend(routes);
                }
                Some(AppRoot::Mapper(mapper)) => {
                    tracing::debug!(script_name = app.script_name(), "mapper routed app");
                    for name in mapper.names() {
                        if table.named_routes.contains_key(name) {
                            tracing::warn!(
                                "Handler name `{name}` is already in routes URL map. \
                                 Avoid having same identifier for different paths!"
                            );
                        }
                        table.named_routes.insert(
                            name.to_string(),
                            MountedMapper {
                                script_name: app.script_name().to_string(),
                                mapper: Arc::clone(mapper),
                            },
                        );
                    }
                }
                None => {
                    tracing::debug!(script_name = app.script_name(), "nothing to reverse, skipping");
                }
            }
        }

        tracing::debug!(
            class_routes = table.class_routes.len(),
            named_routes = table.named_routes.len(),
            "route table built"
        );
        table
    }

    /// Returns the class-based route under a lower-case dotted key.
    pub fn class_route(&self, key: &str) -> Option<&RouteTemplate> {
        self.class_routes.get(key)
    }

    /// Returns the mapper owning the named route `name`.
    pub fn named_route(&self, name: &str) -> Option<&MountedMapper> {
        self.named_routes.get(name)
    }

    /// Returns the class-based routes sorted by key.
    pub fn class_routes(&self) -> Vec<(&str, &RouteTemplate)> {
        let mut routes: Vec<_> = self
            .class_routes
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        routes.sort_by_key(|(k, _)| *k);
        routes
    }

    /// Returns the named routes sorted by name.
    pub fn named_routes(&self) -> Vec<(&str, &MountedMapper)> {
        let mut routes: Vec<_> = self
            .named_routes
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        routes.sort_by_key(|(k, _)| *k);
        routes
    }

    /// Returns the total number of reversible handlers.
    pub fn len(&self) -> usize {
        self.class_routes.len() + self.named_routes.len()
    }

    /// Returns `true` if nothing is reversible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect_class_routes(
    controller: &Controller,
    mount: &str,
    key: &str,
    out: &mut HashMap<String, RouteTemplate>,
) {
    let mount = if mount.ends_with('/') {
        mount.to_string()
    } else {
        format!("{mount}/")
    };

    for handler in controller.handlers().iter().filter(|h| h.exposed) {
        let (handler_key, path) = if handler.is_index() {
            (key.to_string(), mount.clone())
        } else {
            (
                format!("{key}.{}", handler.name.to_lowercase()),
                format!("{mount}{}", handler.name),
            )
        };
        out.entry(handler_key)
            .or_insert_with(|| RouteTemplate::new(path, handler.signature.clone()));
    }

    for (attr, child) in controller.children() {
        collect_class_routes(
            child,
            &format!("{mount}{attr}"),
            &format!("{key}.{}", attr.to_lowercase()),
            out,
        );
    }

    if let Some(index) = out.get(key).cloned() {
        out.entry(format!("{key}.index")).or_insert(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Handler;

    fn site() -> Controller {
        Controller::new("Controller.Root")
            .handler(Handler::exposed("index", Signature::new()))
            .handler(Handler::exposed("about", Signature::new()))
            .handler(Handler::hidden("helper", Signature::new()))
            .mount(
                "auth",
                Controller::new("Controller.Auth")
                    .handler(Handler::exposed("google", Signature::new()))
                    .handler(Handler::exposed(
                        "logout",
                        Signature::new().var_positional("args").var_keyword("kwargs"),
                    )),
            )
    }

    #[test]
    fn test_build_class_routes() {
        let table = RouteTable::build(&[Application::tree("", site())]);
        assert_eq!(table.class_route("controller.root").unwrap().path(), "/");
        assert_eq!(table.class_route("controller.root.index").unwrap().path(), "/");
        assert_eq!(table.class_route("controller.root.about").unwrap().path(), "/about");
        assert_eq!(
            table.class_route("controller.root.auth.google").unwrap().path(),
            "/auth/google"
        );
        assert_eq!(
            table.class_route("controller.root.auth.logout").unwrap().path(),
            "/auth/logout"
        );
    }

    #[test]
    fn test_hidden_handlers_skipped() {
        let table = RouteTable::build(&[Application::tree("", site())]);
        assert!(table.class_route("controller.root.helper").is_none());
    }

    #[test]
    fn test_child_without_index_has_no_bare_key() {
        let table = RouteTable::build(&[Application::tree("", site())]);
        assert!(table.class_route("controller.root.auth").is_none());
        assert!(table.class_route("controller.root.auth.index").is_none());
    }

    #[test]
    fn test_script_name_prefixes_paths() {
        let api = Controller::new("api.Root")
            .handler(Handler::exposed("index", Signature::new()))
            .handler(Handler::exposed("events", Signature::new().positional("id")));
        let table = RouteTable::build(&[Application::tree("/api", api)]);
        assert_eq!(table.class_route("api.root").unwrap().path(), "/api/");
        assert_eq!(table.class_route("api.root.events").unwrap().path(), "/api/events");
    }

    #[test]
    fn test_first_registration_wins_within_app() {
        let root = Controller::new("r.Root")
            .handler(Handler::exposed("page", Signature::new()))
            .handler(Handler::exposed("page", Signature::new().positional("x")));
        let table = RouteTable::build(&[Application::tree("", root)]);
        assert!(table.class_route("r.root.page").unwrap().signature().is_empty());
    }

    #[test]
    fn test_mapper_apps_and_duplicates() {
        let first = RouteMapper::new().route("home", "/").unwrap();
        let second = RouteMapper::new().route("home", "/landing").unwrap();
        let table = RouteTable::build(&[
            Application::mapper("/a", first),
            Application::mapper("/b", second),
            Application::empty("/static"),
        ]);
        let mounted = table.named_route("home").unwrap();
        assert_eq!(mounted.script_name, "/b");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_route_template_build() {
        let template = RouteTemplate::new(
            "/auth/logout",
            Signature::new().var_positional("args").var_keyword("kwargs"),
        );
        let url = template
            .build(&CallArgs::new().arg("sdf").arg("sdf2").kwarg("4", 1).kwarg("asdf", "1"))
            .unwrap();
        assert_eq!(url, "/auth/logout/sdf/sdf2?4=1&asdf=1");
    }

    #[test]
    fn test_listing_is_sorted() {
        let table = RouteTable::build(&[Application::tree("", site())]);
        let keys: Vec<&str> = table.class_routes().into_iter().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert!(!table.is_empty());
    }
}
