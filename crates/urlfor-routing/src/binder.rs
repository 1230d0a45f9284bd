//! Argument binding.
//!
//! [`bind`] matches a caller's [`CallArgs`] against a handler's [`Signature`]
//! the same way calling the handler would, and splits the outcome into URL
//! path segments (everything bound positionally) and query parameters
//! (everything bound by keyword).

use std::collections::VecDeque;

use urlfor_core::{ArgumentKind, UrlForError, UrlForResult};

use crate::signature::{CallArgs, ParamKind, Signature};
use crate::value::Value;

/// The outcome of binding one call against one signature.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingResult {
    /// Values bound to positional parameters, in binding order.
    pub segments: Vec<Value>,
    /// Values bound to keyword parameters, in binding order.
    pub query: Vec<(String, Value)>,
}

impl BindingResult {
    /// Returns the query value bound under `key`.
    pub fn query_value(&self, key: &str) -> Option<&Value> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Binds `call` against `signature`.
///
/// Parameters are visited in declaration order:
///
/// - positional: a same-named keyword wins, then the next positional value,
///   then the default;
/// - variadic positional: takes every remaining positional value;
/// - keyword-only: only a same-named keyword, else the default;
/// - variadic keyword: takes every remaining keyword in call order.
///
/// # Errors
///
/// - [`UrlForError::MissingArgument`] when a parameter without a default gets
///   no value.
/// - [`UrlForError::DuplicateArgument`] when a keyword-only parameter's name
///   is already bound as a query parameter.
/// - [`UrlForError::TooManyArguments`] when positional or keyword values are
///   left over.
///
/// # Examples
///
/// ```
/// use urlfor_routing::binder::bind;
/// use urlfor_routing::signature::{CallArgs, Signature};
/// use urlfor_routing::value::Value;
///
/// let sig = Signature::new().positional("a").positional_default("b", 1).keyword_only("c");
/// let bound = bind(&sig, &CallArgs::new().arg("x").kwarg("c", 5)).unwrap();
/// assert_eq!(bound.segments, vec![Value::from("x"), Value::Integer(1)]);
/// assert_eq!(bound.query_value("c"), Some(&Value::Integer(5)));
/// ```
pub fn bind(signature: &Signature, call: &CallArgs) -> UrlForResult<BindingResult> {
    let mut positional: VecDeque<&Value> = call.args().iter().collect();
    let mut keywords: Vec<(&str, &Value)> = call
        .kwargs()
        .iter()
        .map(|(k, v)| (k.as_str(), v))
        .collect();

    let mut bound = BindingResult::default();

    for spec in signature.params() {
        match spec.kind {
            ParamKind::Positional => {
                let value = take_keyword(&mut keywords, &spec.name)
                    .or_else(|| positional.pop_front())
                    .or(spec.default.as_ref())
                    .ok_or_else(|| UrlForError::MissingArgument(spec.name.clone()))?;
                bound.segments.push(value.clone());
            }
            ParamKind::VarPositional => {
                bound.segments.extend(positional.drain(..).cloned());
            }
            ParamKind::KeywordOnly => {
                if bound.query_value(&spec.name).is_some() {
                    return Err(UrlForError::DuplicateArgument(spec.name.clone()));
                }
                let value = take_keyword(&mut keywords, &spec.name)
                    .or(spec.default.as_ref())
                    .ok_or_else(|| UrlForError::MissingArgument(spec.name.clone()))?;
                bound.query.push((spec.name.clone(), value.clone()));
            }
            ParamKind::VarKeyword => {
                for (key, value) in keywords.drain(..) {
                    upsert(&mut bound.query, key, value);
                }
            }
        }
    }

    if !positional.is_empty() {
        return Err(UrlForError::TooManyArguments(ArgumentKind::Positional));
    }
    if !keywords.is_empty() {
        return Err(UrlForError::TooManyArguments(ArgumentKind::Keyword));
    }

    tracing::trace!(
        segments = bound.segments.len(),
        query = bound.query.len(),
        "bound call against {signature}"
    );
    Ok(bound)
}

fn take_keyword<'a>(keywords: &mut Vec<(&str, &'a Value)>, name: &str) -> Option<&'a Value> {
    let index = keywords.iter().position(|(k, _)| *k == name)?;
    Some(keywords.remove(index).1)
}

fn upsert(query: &mut Vec<(String, Value)>, key: &str, value: &Value) {
    if let Some(slot) = query.iter_mut().find(|(k, _)| k == key) {
        slot.1 = value.clone();
    } else {
        query.push((key.to_string(), value.clone()));
    }
}
