//! Environment-driven settings. There is no config file and no CLI flag.

use std::env;
use std::path::PathBuf;

/// `EnvFilter` directives, e.g. `tickloop_core=debug`.
pub const LOG_ENV: &str = "TICKLOOP_LOG";
/// Append logs to this file instead of standard error.
pub const LOG_FILE_ENV: &str = "TICKLOOP_LOG_FILE";

pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());

        Self {
            log_filter: non_blank(LOG_ENV)
                .map_or_else(|| DEFAULT_LOG_FILTER.to_string(), |v| v.trim().to_string()),
            log_file: non_blank(LOG_FILE_ENV).map(PathBuf::from),
        }
    }
}
