use super::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Top-level keys a complete configuration file carries.
const EXPECTED_KEYS: &[&str] = &[
    "database",
    "user_id",
    "late_after",
    "break_cutoff",
    "expected_daily_hours",
    "week_start",
    "monthly_navigation",
    "sites",
    "retry",
    "notifier",
];

/// Return the keys absent from a YAML document (in declaration order).
pub fn missing_fields(content: &str) -> AppResult<Vec<&'static str>> {
    let yaml: Value = serde_yaml::from_str(content)?;
    let empty = Mapping::new();
    let map = yaml.as_mapping().unwrap_or(&empty);

    Ok(EXPECTED_KEYS
        .iter()
        .copied()
        .filter(|k| !map.contains_key(Value::String((*k).to_string())))
        .collect())
}

/// Rewrite the config file with every missing field filled with its default.
/// Returns Ok(true) when the file changed, Ok(false) when nothing was needed.
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    if !path.exists() {
        return Err(AppError::Config(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path)?;
    let missing = missing_fields(&content)?;

    if missing.is_empty() {
        info("Configuration file is up to date.");
        return Ok(false);
    }

    let cfg = Config::from_yaml(&content)?;
    fs::write(path, serde_yaml::to_string(&cfg)?)?;

    success(format!(
        "Configuration migrated, added: {}",
        missing.join(", ")
    ));
    Ok(true)
}
