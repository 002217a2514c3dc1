use crate::http::ValidationPolicy;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub prefs: PrefsSettings,
    #[serde(default)]
    pub guard: GuardSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Remote REST backend
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token sent on calls made with credentials.
    pub token: Option<String>,
    #[serde(default)]
    pub validation: ValidationPolicy,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            version: default_version(),
            timeout_secs: default_timeout_secs(),
            token: None,
            validation: ValidationPolicy::default(),
        }
    }
}

fn default_base_url() -> String { "http://localhost:8080".to_string() }
fn default_prefix() -> String { "api".to_string() }
fn default_version() -> String { "v1".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_mailbox_size")]
    pub mailbox_size: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self { mailbox_size: default_mailbox_size() }
    }
}

fn default_mailbox_size() -> usize { 32 }

#[derive(Debug, Clone, Deserialize)]
pub struct PrefsSettings {
    #[serde(default = "default_prefs_path")]
    pub path: PathBuf,
}

impl Default for PrefsSettings {
    fn default() -> Self {
        Self { path: default_prefs_path() }
    }
}

fn default_prefs_path() -> PathBuf { PathBuf::from("jobboard-prefs.json") }

#[derive(Debug, Clone, Deserialize)]
pub struct GuardSettings {
    #[serde(default = "default_sign_in_route")]
    pub sign_in_route: String,
    #[serde(default = "default_home_route")]
    pub home_route: String,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            sign_in_route: default_sign_in_route(),
            home_route: default_home_route(),
        }
    }
}

fn default_sign_in_route() -> String { "/sign-in".to_string() }
fn default_home_route() -> String { "/".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String { "info".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with JOBBOARD__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JOBBOARD__API__BASE_URL -> api.base_url
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("JOBBOARD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:8080");
        assert_eq!(settings.api.prefix, "api");
        assert_eq!(settings.api.version, "v1");
        assert_eq!(settings.api.timeout_secs, 30);
        assert_eq!(settings.api.validation, ValidationPolicy::Enforce);
        assert_eq!(settings.store.mailbox_size, 32);
        assert_eq!(settings.guard.sign_in_route, "/sign-in");
    }

    #[test]
    fn test_load_from_file_fills_missing_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"https://jobs.example.com\"\nvalidation = \"warn\"\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.api.base_url, "https://jobs.example.com");
        assert_eq!(settings.api.validation, ValidationPolicy::Warn);
        assert_eq!(settings.api.version, "v1");
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.prefs.path, PathBuf::from("jobboard-prefs.json"));
    }
}
