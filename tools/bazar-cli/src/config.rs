//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use bazar_commerce::checkout::CheckoutMode;
use bazar_data::{BackoffStrategy, RetryPolicy};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "BAZAR_API_URL";
/// Environment variable overriding `reports.base_url`.
pub const REPORTS_URL_ENV: &str = "BAZAR_REPORTS_URL";

/// Config file names searched from the working directory upwards.
pub const CONFIG_NAMES: [&str; 3] = ["bazar.toml", ".bazar.toml", "bazar.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BazarConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub reports: ReportsConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub checkout: CheckoutConfig,

    #[serde(default)]
    pub toast: ToastConfig,
}

impl BazarConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if path.extension().is_some_and(|e| e == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Apply `BAZAR_API_URL` and `BAZAR_REPORTS_URL`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(REPORTS_URL_ENV).ok(),
        )
    }

    fn with_overrides(mut self, api_url: Option<String>, reports_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(url) = reports_url.filter(|u| !u.trim().is_empty()) {
            self.reports.base_url = url;
        }
        self
    }
}

/// Storefront API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://localhost:5005".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Reporting service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportsConfig {
    #[serde(default = "default_reports_url")]
    pub base_url: String,

    /// Where downloaded reports are saved. Defaults to the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

fn default_reports_url() -> String {
    "http://localhost:5002".to_string()
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            base_url: default_reports_url(),
            download_dir: None,
        }
    }
}

/// Retry settings for idempotent and non-idempotent requests alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_multiplier() -> f64 {
    1.5
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            multiplier: default_multiplier(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries).with_backoff(BackoffStrategy::Exponential {
            initial: Duration::from_millis(self.initial_delay_ms),
            multiplier: self.multiplier,
            max: Duration::from_secs(30),
        })
    }
}

/// Durable storage settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file. Defaults to `~/.local/share/bazar/storage.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub mode: CheckoutMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_toast_ms")]
    pub duration_ms: u64,
}

fn default_toast_ms() -> u64 {
    3000
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_ms(),
        }
    }
}

/// Find the nearest config file from `start` upwards.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.exists() {
                return Some(candidate);
            }
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Generate a default bazar.toml config file.
pub fn generate_default_config() -> String {
    r#"# Bazar storefront client configuration

[api]
base_url = "http://localhost:5005"
timeout_secs = 5

[reports]
base_url = "http://localhost:5002"
# download_dir = "reports"

[retry]
max_retries = 3
initial_delay_ms = 1000
multiplier = 1.5

[storage]
# path = "/home/me/.local/share/bazar/storage.json"

[checkout]
# "sequential" submits one purchase at a time, "concurrent" submits them together.
mode = "sequential"

[toast]
duration_ms = 3000
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_matches_defaults() {
        let parsed: BazarConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, BazarConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: BazarConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://bazar.internal:8080"

            [checkout]
            mode = "concurrent"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "http://bazar.internal:8080");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.checkout.mode, CheckoutMode::Concurrent);
        assert_eq!(config.retry.policy().max_retries, 3);
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".bazar.toml"), generate_default_config()).unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, dir.path().join(".bazar.toml"));
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bazar.json");
        let mut config = BazarConfig::default();
        config.retry.max_retries = 1;
        config.save(&path).unwrap();

        assert_eq!(BazarConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_overrides_ignore_blank_values() {
        let config = BazarConfig::default()
            .with_overrides(Some("http://api:9000".into()), Some("  ".into()));
        assert_eq!(config.api.base_url, "http://api:9000");
        assert_eq!(config.reports.base_url, "http://localhost:5002");
    }
}
