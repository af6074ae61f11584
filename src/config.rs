use std::path::PathBuf;

use crate::version::registry::ParseOptions;

// =============================================================================
// Input and logging constants
// =============================================================================

/// Candidate argument that switches to reading candidates from stdin, one per line
pub const STDIN_SENTINEL: &str = "-";

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax)
pub const LOG_ENV: &str = "SEMVER_SELECT_LOG";

/// Log filter used when `LOG_ENV` is unset or empty
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Options for one selection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectConfig {
    /// Constraint expression candidates must satisfy
    pub constraint: String,
    /// Maximum number of versions to output, 0 for unlimited
    pub max_results: usize,
    /// Drop unparseable candidates instead of failing
    pub ignore_invalid: bool,
    /// Only validate the constraint; candidates are not read
    pub validate_only: bool,
    /// Accept Go-style candidates such as `go1.20` or `1.21rc2`
    pub lenient: bool,
    /// Output the raw candidate strings instead of canonical versions
    pub use_original: bool,
}

impl SelectConfig {
    pub fn new(constraint: impl Into<String>) -> Self {
        Self {
            constraint: constraint.into(),
            ..Default::default()
        }
    }

    /// Candidate parsing options derived from this configuration
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            tolerant: self.ignore_invalid,
            lenient: self.lenient,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    /// Also write JSON logs to this file
    pub file: Option<PathBuf>,
}

impl LogConfig {
    /// Read the filter from `SEMVER_SELECT_LOG`
    pub fn from_env(file: Option<PathBuf>) -> Self {
        Self {
            filter: log_filter_with_env(std::env::var(LOG_ENV).ok()),
            file,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            file: None,
        }
    }
}

fn log_filter_with_env(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
