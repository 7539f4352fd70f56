//! Environment-driven runtime settings.
//!
//! Values are trimmed; blank values fall back to defaults.

use std::path::PathBuf;

pub const ENV_LOG_DIR: &str = "CARELOG_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "CARELOG_LOG_LEVEL";
pub const ENV_SEED_DEMO: &str = "CARELOG_SEED_DEMO";
const DEFAULT_LOG_DIR_NAME: &str = "carelog-logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub log_level: String,
    pub log_dir: PathBuf,
    pub seed_demo: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            log_level: read(ENV_LOG_LEVEL)
                .unwrap_or_else(|| carelog_core::default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME)),
            seed_demo: read(ENV_SEED_DEMO).map_or(true, |value| !is_disabled(&value)),
        }
    }
}

fn is_disabled(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}
