//! Settings for urlfor-rs.
//!
//! [`Settings`] holds the handful of values that shape generated URLs. It is
//! loaded once (see [`settings_loader`](crate::settings_loader)) and passed
//! explicitly to whatever builds URLs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use urlfor_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.base_app_url, "https://gdg.org.ua");
/// assert_eq!(settings.static_url, "/static");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled. Selects the pretty log format.
    pub debug: bool,
    /// Scheme and host every generated URL is rooted at.
    pub base_app_url: String,
    /// Dotted prefix prepended to class-based handler ids that lack it.
    pub app_name: String,
    /// Path prefix for static assets.
    pub static_url: String,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,
    /// Top-level keys that matched none of the fields above, kept so they
    /// can be reported instead of silently ignored.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            base_app_url: "https://gdg.org.ua".to_string(),
            app_name: "gdgukraine".to_string(),
            static_url: "/static".to_string(),
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}
