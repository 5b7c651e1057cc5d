use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (default: "info")
    /// Options: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl LoggingConfig {
    /// Level implied by the `--verbose` / `--quiet` flags. Quiet wins.
    pub fn from_verbosity(verbose: bool, quiet: bool) -> Self {
        let level = if quiet {
            "warn"
        } else if verbose {
            "debug"
        } else {
            "info"
        };
        Self {
            level: level.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
