//! Handler signatures and call arguments.
//!
//! A [`Signature`] is the statically declared parameter list of a handler:
//! required positionals, a variadic positional, keyword-only parameters, and a
//! variadic keyword, each optionally carrying a default. [`CallArgs`] is what a
//! caller supplies when asking for a URL.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// The kind of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Filled by position or by a same-named keyword (`a` in `f(a, b=1)`).
    Positional,
    /// Collects the remaining positional arguments (`*args`).
    VarPositional,
    /// Filled only by a same-named keyword (`c` in `f(*, c)`).
    KeywordOnly,
    /// Collects the remaining keyword arguments (`**kwargs`).
    VarKeyword,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// The parameter name.
    pub name: String,
    /// How arguments bind to it.
    pub kind: ParamKind,
    /// The value used when the caller supplies none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParameterSpec {
    /// Creates a parameter with no default.
    pub fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// The ordered parameter list of a handler.
///
/// Parameters are processed in declaration order when binding; the builder
/// does not reorder or validate them.
///
/// # Examples
///
/// ```
/// use urlfor_routing::signature::Signature;
///
/// // (a, b=1, *, c)
/// let sig = Signature::new()
///     .positional("a")
///     .positional_default("b", 1)
///     .keyword_only("c");
/// assert_eq!(sig.to_string(), "(a, b=1, *, c)");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature {
    params: Vec<ParameterSpec>,
}

impl Signature {
    /// Creates an empty signature.
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Creates a signature from an existing parameter list.
    pub const fn from_params(params: Vec<ParameterSpec>) -> Self {
        Self { params }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Appends a required positional parameter.
    #[must_use]
    pub fn positional(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::new(name, ParamKind::Positional))
    }

    /// Appends a positional parameter with a default.
    #[must_use]
    pub fn positional_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(ParameterSpec::new(name, ParamKind::Positional).with_default(default))
    }

    /// Appends a variadic positional parameter.
    #[must_use]
    pub fn var_positional(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::new(name, ParamKind::VarPositional))
    }

    /// Appends a keyword-only parameter with no default.
    #[must_use]
    pub fn keyword_only(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::new(name, ParamKind::KeywordOnly))
    }

    /// Appends a keyword-only parameter with a default.
    #[must_use]
    pub fn keyword_only_default(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.param(ParameterSpec::new(name, ParamKind::KeywordOnly).with_default(default))
    }

    /// Appends a variadic keyword parameter.
    #[must_use]
    pub fn var_keyword(self, name: impl Into<String>) -> Self {
        self.param(ParameterSpec::new(name, ParamKind::VarKeyword))
    }

    /// Returns the declared parameters in order.
    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    /// Returns `true` if no parameters are declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(self.params.len() + 1);
        let mut keyword_section = false;
        for spec in &self.params {
            let rendered = match spec.kind {
                ParamKind::Positional | ParamKind::KeywordOnly => {
                    if spec.kind == ParamKind::KeywordOnly && !keyword_section {
                        parts.push("*".to_string());
                        keyword_section = true;
                    }
                    match &spec.default {
                        Some(Value::String(s)) => format!("{}='{s}'", spec.name),
                        Some(default) => format!("{}={default}", spec.name),
                        None => spec.name.clone(),
                    }
                }
                ParamKind::VarPositional => {
                    keyword_section = true;
                    format!("*{}", spec.name)
                }
                ParamKind::VarKeyword => format!("**{}", spec.name),
            };
            parts.push(rendered);
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// Caller-supplied arguments: ordered positionals and insertion-ordered keywords.
///
/// Inserting a keyword that is already present replaces its value in place.
///
/// # Examples
///
/// ```
/// use urlfor_routing::signature::CallArgs;
///
/// let call = CallArgs::new().arg("x").kwarg("c", 5);
/// assert_eq!(call.args().len(), 1);
/// assert_eq!(call.kwargs()[0].0, "c");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    args: Vec<Value>,
    kwargs: Vec<(String, Value)>,
}

impl CallArgs {
    /// Creates an empty argument set.
    pub const fn new() -> Self {
        Self {
            args: Vec::new(),
            kwargs: Vec::new(),
        }
    }

    /// Builds an argument set from positional values and keyword pairs.
    pub fn from_parts<A, K, S>(args: A, kwargs: K) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Value>,
        K: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut call = Self::new();
        for arg in args {
            call.push_arg(arg);
        }
        for (key, value) in kwargs {
            call.insert_kwarg(key, value);
        }
        call
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.push_arg(value);
        self
    }

    /// Adds a keyword argument.
    #[must_use]
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_kwarg(key, value);
        self
    }

    /// Appends a positional argument in place.
    pub fn push_arg(&mut self, value: impl Into<Value>) {
        self.args.push(value.into());
    }

    /// Adds a keyword argument in place.
    pub fn insert_kwarg(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.kwargs.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.kwargs.push((key, value));
        }
    }

    /// Returns the positional arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Returns the keyword arguments in insertion order.
    pub fn kwargs(&self) -> &[(String, Value)] {
        &self.kwargs
    }

    /// Returns `true` if no arguments were supplied.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }
}
