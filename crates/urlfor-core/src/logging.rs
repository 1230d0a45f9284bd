//! Logging integration.
//!
//! Configures [`tracing`]-based logging from [`Settings`](crate::settings::Settings).

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`, falling back to "info" if it
/// does not parse. Debug mode gets a pretty, human-readable format; otherwise
/// a structured JSON format is used. Installing twice is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a span that groups all events emitted while building one URL.
///
/// # Examples
///
/// ```
/// use urlfor_core::logging::url_for_span;
///
/// let span = url_for_span("controller.root.auth.logout");
/// let _guard = span.enter();
/// tracing::debug!("resolving");
/// ```
pub fn url_for_span(handler: &str) -> tracing::Span {
    tracing::debug_span!("url_for", handler = handler)
}
