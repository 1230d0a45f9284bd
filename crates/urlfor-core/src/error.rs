//! Core error types for urlfor-rs.
//!
//! [`UrlForError`] covers the three families of failure that reverse URL
//! generation can hit: a call that does not match a handler's signature, a
//! lookup for a handler that is not in the route table, and configuration
//! problems while loading settings or route manifests.

use std::fmt;

use thiserror::Error;

/// Which side of a call carried surplus arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Extra positional values (path segments).
    Positional,
    /// Extra keyword values (query parameters).
    Keyword,
}

impl fmt::Display for ArgumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positional => f.write_str("positional"),
            Self::Keyword => f.write_str("keyword"),
        }
    }
}

/// The primary error type for urlfor-rs.
///
/// The first group of variants mirrors the `TypeError`s a handler call would
/// raise if invoked with the same arguments; see [`UrlForError::is_call_error`].
#[derive(Error, Debug)]
pub enum UrlForError {
    // ── Call/signature mismatches ────────────────────────────────────

    /// A required parameter received no value and has no default.
    #[error("Missing required argument `{0}`")]
    MissingArgument(String),

    /// A keyword-only parameter was bound more than once.
    #[error("Got multiple values for argument `{0}`")]
    DuplicateArgument(String),

    /// Values were left over after every parameter was bound.
    #[error("Too many {0} arguments passed!")]
    TooManyArguments(ArgumentKind),

    /// A value was supplied but cannot be rendered into the route.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ── Lookup ───────────────────────────────────────────────────────

    /// No route is registered under the requested handler identifier.
    #[error("url_for could not find handler name {0}")]
    UnknownHandler(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A route declaration is malformed.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl UrlForError {
    /// Returns `true` for errors caused by a call that does not fit the
    /// handler's declared signature.
    pub const fn is_call_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument(_)
                | Self::DuplicateArgument(_)
                | Self::TooManyArguments(_)
                | Self::InvalidArgument(_)
        )
    }
}

/// A convenience type alias for `Result<T, UrlForError>`.
pub type UrlForResult<T> = Result<T, UrlForError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_display() {
        let err = UrlForError::MissingArgument("c".into());
        assert_eq!(err.to_string(), "Missing required argument `c`");
    }

    #[test]
    fn test_duplicate_argument_display() {
        let err = UrlForError::DuplicateArgument("c".into());
        assert_eq!(err.to_string(), "Got multiple values for argument `c`");
    }

    #[test]
    fn test_too_many_arguments_display() {
        assert_eq!(
            UrlForError::TooManyArguments(ArgumentKind::Positional).to_string(),
            "Too many positional arguments passed!"
        );
        assert_eq!(
            UrlForError::TooManyArguments(ArgumentKind::Keyword).to_string(),
            "Too many keyword arguments passed!"
        );
    }

    #[test]
    fn test_is_call_error() {
        assert!(UrlForError::MissingArgument("a".into()).is_call_error());
        assert!(UrlForError::DuplicateArgument("a".into()).is_call_error());
        assert!(UrlForError::TooManyArguments(ArgumentKind::Keyword).is_call_error());
        assert!(!UrlForError::UnknownHandler("x".into()).is_call_error());
        assert!(!UrlForError::ConfigurationError("x".into()).is_call_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: UrlForError = io_err.into();
        assert!(!err.is_call_error());
        assert!(err.to_string().contains("file missing"));
    }
}
