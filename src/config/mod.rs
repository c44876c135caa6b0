use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate;
pub mod settings;

pub use settings::Settings;

/// A geofenced work site as written in the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SiteConfig {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotifierConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_notifier_url")]
    pub url: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default = "default_late_after")]
    pub late_after: String,
    #[serde(default = "default_break_cutoff")]
    pub break_cutoff: String,
    #[serde(default = "default_expected_daily_hours")]
    pub expected_daily_hours: f64,
    #[serde(default = "default_week_start")]
    pub week_start: String,
    #[serde(default = "default_monthly_navigation")]
    pub monthly_navigation: String,
    #[serde(default = "default_sites")]
    pub sites: Vec<SiteConfig>,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
}

fn default_radius_km() -> f64 {
    0.5
}
fn default_max_attempts() -> u32 {
    3
}
fn default_initial_delay_ms() -> u64 {
    200
}
fn default_max_delay_ms() -> u64 {
    2000
}
fn default_true() -> bool {
    true
}
fn default_notifier_url() -> String {
    "http://localhost:4000/send-alertemail".to_string()
}
fn default_subject() -> String {
    "Message From EMS Alerts".to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_late_after() -> String {
    "09:30".to_string()
}
fn default_break_cutoff() -> String {
    "14:10".to_string()
}
fn default_expected_daily_hours() -> f64 {
    8.0
}
fn default_week_start() -> String {
    "sunday".to_string()
}
fn default_monthly_navigation() -> String {
    "calendar".to_string()
}
fn default_sites() -> Vec<SiteConfig> {
    vec![SiteConfig {
        name: "office".to_string(),
        latitude: 34.1299,
        longitude: 72.4656,
        radius_km: default_radius_km(),
    }]
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_notifier_url(),
            subject: default_subject(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    fn with_database(database: String) -> Self {
        Self {
            database,
            user_id: None,
            late_after: default_late_after(),
            break_cutoff: default_break_cutoff(),
            expected_daily_hours: default_expected_daily_hours(),
            week_start: default_week_start(),
            monthly_navigation: default_monthly_navigation(),
            sites: default_sites(),
            retry: RetryConfig::default(),
            notifier: NotifierConfig::default(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("emstrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".emstrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("emstrack.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("emstrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("failed to parse configuration: {e}")))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    /// Validated, typed view used by the core.
    pub fn settings(&self) -> AppResult<Settings> {
        Settings::from_config(self)
    }

    /// Initialize configuration and database file location.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        let db_path = match custom_name {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("emstrack.sqlite"),
        };

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config = Config::with_database(db_path.to_string_lossy().to_string());

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let cfg = Config::from_yaml("database: /tmp/ems.sqlite\nbreak_cutoff: \"13:00\"\n").unwrap();
        assert_eq!(cfg.database, "/tmp/ems.sqlite");
        assert_eq!(cfg.break_cutoff, "13:00");
        assert_eq!(cfg.late_after, "09:30");
        assert_eq!(cfg.sites.len(), 1);
        assert_eq!(cfg.sites[0].radius_km, 0.5);
        assert_eq!(cfg.retry.max_attempts, 3);
        assert!(cfg.notifier.enabled);
    }

    #[test]
    fn multiple_sites_are_read() {
        let yaml = r#"
database: /tmp/ems.sqlite
sites:
  - name: hq
    latitude: 34.0
    longitude: 72.0
  - name: lab
    latitude: 35.0
    longitude: 73.0
    radius_km: 1.2
"#;
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.sites.len(), 2);
        assert_eq!(cfg.sites[0].radius_km, 0.5);
        assert_eq!(cfg.sites[1].name, "lab");
    }

    #[test]
    fn broken_yaml_is_a_config_error() {
        let err = Config::from_yaml("database: [").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
