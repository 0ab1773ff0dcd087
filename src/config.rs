//! Server settings.
//!
//! Settings arrive through the LSP `initializationOptions` object. Every
//! field is optional; anything missing falls back to the defaults, and a
//! malformed object is logged and ignored rather than failing startup.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::navigation::{DEFAULT_ACCEPT_DELAYS, DEFAULT_METHOD_SETTLE, NavigationDriver};

/// Language identifiers links are provided for by default.
pub const DEFAULT_LANGUAGES: [&str; 3] = ["javascript", "typescript", "vue"];

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Language identifiers to scan.
    pub languages: Vec<String>,
    /// Delays in milliseconds before each quick-open accept.
    pub accept_delays_ms: Vec<u64>,
    /// Delay in milliseconds before jumping to a method.
    pub method_settle_ms: u64,
    /// Whether workspace search skips files matched by `.gitignore`.
    pub respect_gitignore: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect(),
            accept_delays_ms: DEFAULT_ACCEPT_DELAYS
                .iter()
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
                .collect(),
            method_settle_ms: u64::try_from(DEFAULT_METHOD_SETTLE.as_millis())
                .unwrap_or(u64::MAX),
            respect_gitignore: true,
        }
    }
}

impl Settings {
    /// Reads settings from LSP initialization options.
    pub fn from_initialization_options(options: Option<Value>) -> Self {
        let Some(options) = options.filter(|v| !v.is_null()) else {
            return Self::default();
        };

        match serde_json::from_value(options) {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "ignoring invalid initialization options");
                Self::default()
            }
        }
    }

    /// Whether documents of `language_id` are scanned.
    pub fn scans_language(&self, language_id: &str) -> bool {
        self.languages.iter().any(|l| l == language_id)
    }

    /// Builds a navigation driver with the configured delays.
    pub fn driver(&self) -> NavigationDriver {
        NavigationDriver::new()
            .accept_delays(self.accept_delays_ms.iter().copied().map(Duration::from_millis))
            .method_settle(Duration::from_millis(self.method_settle_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.scans_language("vue"));
        assert!(settings.scans_language("typescript"));
        assert!(!settings.scans_language("php"));
        assert_eq!(settings.accept_delays_ms, vec![20, 100, 200, 200]);
        assert_eq!(settings.method_settle_ms, 200);
        assert_eq!(settings.driver(), NavigationDriver::new());
    }

    #[test]
    fn test_partial_options() {
        let settings = Settings::from_initialization_options(Some(json!({
            "languages": ["javascriptreact"],
            "acceptDelaysMs": [0, 50],
        })));
        assert_eq!(settings.languages, vec!["javascriptreact"]);
        assert_eq!(settings.accept_delays_ms, vec![0, 50]);
        assert_eq!(settings.method_settle_ms, 200);
        assert!(settings.respect_gitignore);
    }

    #[test]
    fn test_invalid_options_fall_back() {
        let settings =
            Settings::from_initialization_options(Some(json!({ "languages": "vue" })));
        assert_eq!(settings, Settings::default());
        assert_eq!(
            Settings::from_initialization_options(Some(Value::Null)),
            Settings::default()
        );
        assert_eq!(Settings::from_initialization_options(None), Settings::default());
    }
}
