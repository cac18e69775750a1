//! Telemetry configuration from environment variables.

use std::env;

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Filter directive (`warn`, `pn_monitor=debug`, ...)
    pub log_level: String,

    /// Emit JSON lines instead of human-readable text
    pub json_logs: bool,

    /// Colored output (human-readable format only)
    pub ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json_logs: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `PN_LOG_LEVEL` or `RUST_LOG`: Log filter (default: warn)
    /// - `PN_JSON_LOGS`: Enable JSON logs (default: false)
    /// - `PN_LOG_ANSI`: Enable colors (default: true)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            log_level: lookup("PN_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),

            json_logs: lookup("PN_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),

            ansi: lookup("PN_LOG_ANSI")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.ansi),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TelemetryConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TelemetryConfig::default());
        assert_eq!(config.log_level, "warn");
        assert!(!config.json_logs);
        assert!(config.ansi);
    }

    #[test]
    fn test_pn_log_level_wins_over_rust_log() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("PN_LOG_LEVEL", "pn_monitor=debug"),
            ("RUST_LOG", "error"),
        ]));
        assert_eq!(config.log_level, "pn_monitor=debug");

        let config = TelemetryConfig::from_lookup(lookup(&[("RUST_LOG", "error")]));
        assert_eq!(config.log_level, "error");
    }

    #[test]
    fn test_flags() {
        let config = TelemetryConfig::from_lookup(lookup(&[
            ("PN_JSON_LOGS", "1"),
            ("PN_LOG_ANSI", "false"),
        ]));
        assert!(config.json_logs);
        assert!(!config.ansi);

        let config = TelemetryConfig::from_lookup(lookup(&[("PN_JSON_LOGS", "yes")]));
        assert!(!config.json_logs);
    }
}
