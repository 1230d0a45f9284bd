//! Path converters for named-route placeholders.
//!
//! A converter decides which values a `<type:name>` placeholder accepts and
//! how an accepted value is written into the path.
//!
//! # Built-in converters
//!
//! | Name   | Regex                                  |
//! |--------|----------------------------------------|
//! | `int`  | `[0-9]+`                               |
//! | `str`  | `[^/]+`                                |
//! | `slug` | `[-a-zA-Z0-9_]+`                       |
//! | `uuid` | `[0-9a-f]{8}-...-[0-9a-f]{12}`         |
//! | `path` | `.+`                                   |

use std::fmt;

use urlfor_core::{UrlForError, UrlForResult};

use crate::encode::{quote_path, quote_plus};
use crate::value::Value;

/// Converts values into URL path text for one placeholder type.
pub trait PathConverter: Send + Sync + fmt::Debug {
    /// Returns the regex (unanchored) that a rendered value must fully match.
    fn regex(&self) -> &'static str;

    /// Renders a value to its unencoded path form.
    ///
    /// # Errors
    ///
    /// Returns [`UrlForError::InvalidArgument`] if the value has no sensible
    /// path form for this converter.
    fn to_url(&self, value: &Value) -> UrlForResult<String> {
        Ok(value.to_display_string())
    }

    /// Percent-encodes a rendered value for inclusion in the path.
    fn encode(&self, raw: &str) -> String {
        quote_plus(raw).replace('+', "%20")
    }
}

/// Integer segments: one or more digits.
#[derive(Debug, Clone, Copy)]
pub struct IntConverter;

impl PathConverter for IntConverter {
    fn regex(&self) -> &'static str {
        "[0-9]+"
    }

    fn to_url(&self, value: &Value) -> UrlForResult<String> {
        match value {
            Value::Integer(i) => Ok(i.to_string()),
            Value::String(s) => Ok(s.clone()),
            other => Err(UrlForError::InvalidArgument(format!(
                "int placeholder cannot take {other:?}"
            ))),
        }
    }
}

/// String segments: anything without a slash.
#[derive(Debug, Clone, Copy)]
pub struct StrConverter;

impl PathConverter for StrConverter {
    fn regex(&self) -> &'static str {
        "[^/]+"
    }
}

/// Slug segments: ASCII letters, digits, hyphens, and underscores.
#[derive(Debug, Clone, Copy)]
pub struct SlugConverter;

impl PathConverter for SlugConverter {
    fn regex(&self) -> &'static str {
        "[-a-zA-Z0-9_]+"
    }
}

/// UUID segments in canonical lower-case hyphenated form.
#[derive(Debug, Clone, Copy)]
pub struct UuidConverter;

impl PathConverter for UuidConverter {
    fn regex(&self) -> &'static str {
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}"
    }

    fn to_url(&self, value: &Value) -> UrlForResult<String> {
        let raw = value.to_display_string();
        raw.parse::<uuid::Uuid>()
            .map(|uuid| uuid.hyphenated().to_string())
            .map_err(|_| UrlForError::InvalidArgument(format!("Invalid UUID: {raw}")))
    }
}

/// Path segments that may contain slashes.
#[derive(Debug, Clone, Copy)]
pub struct PathSegmentConverter;

impl PathConverter for PathSegmentConverter {
    fn regex(&self) -> &'static str {
        ".+"
    }

    fn encode(&self, raw: &str) -> String {
        quote_path(raw)
    }
}

/// Looks up a built-in converter by its placeholder type name.
///
/// # Errors
///
/// Returns [`UrlForError::ImproperlyConfigured`] for unknown type names.
pub fn get_converter(name: &str) -> UrlForResult<Box<dyn PathConverter>> {
    match name {
        "int" => Ok(Box::new(IntConverter)),
        "str" => Ok(Box::new(StrConverter)),
        "slug" => Ok(Box::new(SlugConverter)),
        "uuid" => Ok(Box::new(UuidConverter)),
        "path" => Ok(Box::new(PathSegmentConverter)),
        other => Err(UrlForError::ImproperlyConfigured(format!(
            "Unknown path converter: '{other}'"
        ))),
    }
}
