//! URL encoding and rendering of bound arguments.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::binder::BindingResult;

/// Everything except ASCII alphanumerics and `_.-~` is escaped.
const QUOTE_PLUS: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'~');

/// Same as [`QUOTE_PLUS`] but keeps `/` for multi-segment values.
const QUOTE_PATH: &AsciiSet = &QUOTE_PLUS.remove(b'/');

/// Form-encodes a single value: spaces become `+`, `/` is escaped.
///
/// # Examples
///
/// ```
/// use urlfor_routing::encode::quote_plus;
///
/// assert_eq!(quote_plus("http://test.ua/xx"), "http%3A%2F%2Ftest.ua%2Fxx");
/// assert_eq!(quote_plus("a b"), "a+b");
/// ```
pub fn quote_plus(input: &str) -> String {
    // A literal "%20" in the input is escaped to "%2520", so this only hits spaces.
    utf8_percent_encode(input, QUOTE_PLUS)
        .to_string()
        .replace("%20", "+")
}

/// Percent-encodes a value for a path, keeping `/` intact.
pub fn quote_path(input: &str) -> String {
    utf8_percent_encode(input, QUOTE_PATH).to_string()
}

/// Renders a query string from key/value pairs, dropping falsy values.
pub fn render_query<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a crate::value::Value)>,
{
    pairs
        .into_iter()
        .filter(|(_, value)| value.is_truthy())
        .map(|(key, value)| {
            format!(
                "{}={}",
                quote_plus(key),
                quote_plus(&value.to_display_string())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends bound arguments to `base_path`.
///
/// Truthy segments are form-encoded and joined with `/` after the base path;
/// truthy query values become `key=value` pairs after a `?`. Falsy values are
/// left out of the URL entirely.
///
/// # Examples
///
/// ```
/// use urlfor_routing::binder::BindingResult;
/// use urlfor_routing::encode::render;
/// use urlfor_routing::value::Value;
///
/// let bound = BindingResult {
///     segments: vec![Value::from("sdf"), Value::from("")],
///     query: vec![("asdf".to_string(), Value::from("1")), ("x".to_string(), Value::Integer(0))],
/// };
/// assert_eq!(render("/auth/logout", &bound), "/auth/logout/sdf?asdf=1");
/// ```
pub fn render(base_path: &str, bound: &BindingResult) -> String {
    let path = bound
        .segments
        .iter()
        .filter(|value| value.is_truthy())
        .map(|value| quote_plus(&value.to_display_string()))
        .collect::<Vec<_>>()
        .join("/");

    let query = render_query(bound.query.iter().map(|(k, v)| (k.as_str(), v)));

    let mut url = base_path.to_string();
    if !path.is_empty() {
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(&path);
    }
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_quote_plus_reserved() {
        assert_eq!(quote_plus("a/b?c=d&e"), "a%2Fb%3Fc%3Dd%26e");
        assert_eq!(quote_plus("safe_-.~"), "safe_-.~");
        assert_eq!(quote_plus("100%20"), "100%2520");
    }

    #[test]
    fn test_quote_plus_unicode() {
        assert_eq!(quote_plus("київ"), "%D0%BA%D0%B8%D1%97%D0%B2");
    }

    #[test]
    fn test_quote_path_keeps_slashes() {
        assert_eq!(quote_path("docs/read me.md"), "docs/read%20me.md");
    }

    #[test]
    fn test_render_no_arguments() {
        assert_eq!(render("/", &BindingResult::default()), "/");
        assert_eq!(render("/events", &BindingResult::default()), "/events");
    }

    #[test]
    fn test_render_segments_and_query() {
        let bound = BindingResult {
            segments: vec![Value::from("sdf"), Value::from("sdf2")],
            query: vec![
                ("4".to_string(), Value::Integer(1)),
                ("asdf".to_string(), Value::from("1")),
            ],
        };
        assert_eq!(
            render("/auth/logout", &bound),
            "/auth/logout/sdf/sdf2?4=1&asdf=1"
        );
    }

    #[test]
    fn test_render_base_with_trailing_slash() {
        let bound = BindingResult {
            segments: vec![Value::Integer(7)],
            query: Vec::new(),
        };
        assert_eq!(render("/auth/", &bound), "/auth/7");
    }

    #[test]
    fn test_render_drops_falsy_values() {
        let bound = BindingResult {
            segments: vec![Value::None, Value::Integer(0), Value::from("")],
            query: vec![
                ("flag".to_string(), Value::Bool(false)),
                ("q".to_string(), Value::from("")),
            ],
        };
        assert_eq!(render("/search", &bound), "/search");
    }

    #[test]
    fn test_render_query_only() {
        let bound = BindingResult {
            segments: Vec::new(),
            query: vec![("next".to_string(), Value::from("/a b"))],
        };
        assert_eq!(render("/login", &bound), "/login?next=%2Fa+b");
    }
}
