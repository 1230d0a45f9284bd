//! Named routes and the route mapper.
//!
//! A [`NamedRoute`] is a path template such as `events/<int:id>/edit` with a
//! name handlers are referenced by. A [`RouteMapper`] is the set of named
//! routes mounted by one application and generates paths from keyword
//! arguments.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;

use urlfor_core::{UrlForError, UrlForResult};

use crate::converters::{self, PathConverter};
use crate::encode::render_query;
use crate::value::Value;

/// One piece of a parsed route template.
enum Part {
    Literal(String),
    Param {
        name: String,
        converter: Box<dyn PathConverter>,
        check: Regex,
    },
}

impl fmt::Debug for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Self::Param {
                name, converter, ..
            } => f
                .debug_struct("Param")
                .field("name", name)
                .field("converter", converter)
                .finish_non_exhaustive(),
        }
    }
}

/// A named path template.
///
/// Placeholders use `<type:name>` syntax; a bare `<name>` is a `str`
/// placeholder. Names are matched against keyword arguments verbatim, so any
/// non-empty name is accepted (`<str:event-id>` is filled by `event-id`).
#[derive(Debug)]
pub struct NamedRoute {
    name: String,
    template: String,
    parts: Vec<Part>,
}

/// Parses the `<type:name>` portion of a placeholder, returning `(type_name, param_name)`.
/// Defaults to `"str"` if no colon is present.
fn parse_type_and_name(inner: &str) -> (&str, &str) {
    inner
        .find(':')
        .map_or(("str", inner), |pos| (&inner[..pos], &inner[pos + 1..]))
}

impl NamedRoute {
    /// Parses `template` into a named route.
    ///
    /// A leading `/` is added if the template lacks one.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::ImproperlyConfigured`] for an unclosed `<`, an
    /// empty or repeated placeholder name, or an unknown converter type.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlfor_routing::mapper::NamedRoute;
    ///
    /// let route = NamedRoute::new("event_detail", "events/<int:id>").unwrap();
    /// assert_eq!(route.template(), "/events/<int:id>");
    /// assert_eq!(route.param_names(), vec!["id"]);
    /// ```
    pub fn new(name: impl Into<String>, template: &str) -> UrlForResult<Self> {
        let template = if template.starts_with('/') {
            template.to_string()
        } else {
            format!("/{template}")
        };

        let mut parts = Vec::new();
        let mut remaining = template.as_str();

        while let Some(start) = remaining.find('<') {
            let prefix = &remaining[..start];
            if !prefix.is_empty() {
                parts.push(Part::Literal(prefix.to_string()));
            }

            let end = remaining[start..].find('>').ok_or_else(|| {
                UrlForError::ImproperlyConfigured(format!(
                    "Unclosed angle bracket in route: {template}"
                ))
            })? + start;

            let (type_name, param_name) = parse_type_and_name(&remaining[start + 1..end]);
            if param_name.is_empty() {
                return Err(UrlForError::ImproperlyConfigured(format!(
                    "Empty placeholder name in route: {template}"
                )));
            }
            let repeated = parts
                .iter()
                .any(|part| matches!(part, Part::Param { name, .. } if name == param_name));
            if repeated {
                return Err(UrlForError::ImproperlyConfigured(format!(
                    "Placeholder <{param_name}> appears more than once in route: {template}"
                )));
            }

            let converter = converters::get_converter(type_name)?;
            let check = Regex::new(&format!("^(?:{})$", converter.regex())).map_err(|e| {
                UrlForError::ImproperlyConfigured(format!("Invalid converter regex: {e}"))
            })?;

            parts.push(Part::Param {
                name: param_name.to_string(),
                converter,
                check,
            });
            remaining = &remaining[end + 1..];
        }
        if !remaining.is_empty() {
            parts.push(Part::Literal(remaining.to_string()));
        }

        Ok(Self {
            name: name.into(),
            template,
            parts,
        })
    }

    /// Returns the route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the normalized template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the placeholder names in template order.
    pub fn param_names(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Param { name, .. } => Some(name.as_str()),
                Part::Literal(_) => None,
            })
            .collect()
    }

    /// Generates a path from keyword arguments.
    ///
    /// Placeholders are filled from same-named keywords; keywords that match
    /// no placeholder are appended as a query string in call order, dropping
    /// falsy values.
    ///
    /// # Errors
    ///
    /// - [`UrlForError::MissingArgument`] if a placeholder has no value (or `None`).
    /// - [`UrlForError::InvalidArgument`] if a value does not fit its converter.
    pub fn generate(&self, kwargs: &[(String, Value)]) -> UrlForResult<String> {
        let mut path = String::new();
        let mut used = Vec::new();

        for part in &self.parts {
            match part {
                Part::Literal(text) => path.push_str(text),
                Part::Param {
                    name,
                    converter,
                    check,
                } => {
                    let value = kwargs
                        .iter()
                        .find(|(k, _)| k == name)
                        .map(|(_, v)| v)
                        .filter(|v| **v != Value::None)
                        .ok_or_else(|| UrlForError::MissingArgument(name.clone()))?;
                    let raw = converter.to_url(value)?;
                    if !check.is_match(&raw) {
                        return Err(UrlForError::InvalidArgument(format!(
                            "'{raw}' does not match <{name}> in route '{}'",
                            self.name
                        )));
                    }
                    path.push_str(&converter.encode(&raw));
                    used.push(name.as_str());
                }
            }
        }

        let query = render_query(
            kwargs
                .iter()
                .filter(|(k, _)| !used.contains(&k.as_str()))
                .map(|(k, v)| (k.as_str(), v)),
        );
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }
        Ok(path)
    }
}

/// The named routes mounted by one application.
#[derive(Debug, Default)]
pub struct RouteMapper {
    routes: Vec<NamedRoute>,
    index: HashMap<String, usize>,
}

impl RouteMapper {
    /// Creates an empty mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route. A later route with the same name replaces the earlier one.
    pub fn connect(&mut self, route: NamedRoute) {
        if let Some(&existing) = self.index.get(route.name()) {
            tracing::warn!(name = route.name(), "replacing route with the same name");
            self.routes[existing] = route;
        } else {
            self.index.insert(route.name().to_string(), self.routes.len());
            self.routes.push(route);
        }
    }

    /// Builder-style [`connect`](Self::connect) that parses the template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed.
    pub fn route(mut self, name: &str, template: &str) -> UrlForResult<Self> {
        self.connect(NamedRoute::new(name, template)?);
        Ok(self)
    }

    /// Returns the route registered under `name`.
    pub fn get(&self, name: &str) -> Option<&NamedRoute> {
        self.index.get(name).map(|&i| &self.routes[i])
    }

    /// Returns the routes in registration order.
    pub fn routes(&self) -> &[NamedRoute] {
        &self.routes
    }

    /// Returns the route names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(NamedRoute::name)
    }

    /// Generates the path for the route called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::UnknownHandler`] if no route has that name, or
    /// the errors of [`NamedRoute::generate`].
    pub fn generate(&self, name: &str, kwargs: &[(String, Value)]) -> UrlForResult<String> {
        self.get(name)
            .ok_or_else(|| UrlForError::UnknownHandler(name.to_string()))?
            .generate(kwargs)
    }
}
