use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use dashboard_domain::{RuntimeConfig, MAX_MONITORING_MINUTES};

pub const CONFIG_ENV: &str = "FUEL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "./fuel-dashboard.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_seconds: u64,
    pub data_dir: String,
    pub report_dir: String,
    pub monitoring_interval_minutes: u64,
    pub notice_ttl_seconds: u64,
    pub history_limit: usize,
    pub log_dir: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            request_timeout_seconds: 30,
            data_dir: "./.fuel-dashboard".to_string(),
            report_dir: "./reports".to_string(),
            monitoring_interval_minutes: 5,
            notice_ttl_seconds: 5,
            history_limit: 50,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Loads from the path in `FUEL_CONFIG`, or the default path.
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path)).await
    }

    pub async fn load_from(file_path: &Path) -> Result<Self> {
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", file_path.display(), err))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if let Some(log_dir) = &self.log_dir {
            if log_dir.trim().is_empty() {
                self.log_dir = None;
            }
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        self.report_dir = resolve_path(base, &self.report_dir);
        if let Some(log_dir) = &self.log_dir {
            self.log_dir = Some(resolve_path(base, log_dir));
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(anyhow!(
                "api_base_url must start with http:// or https://: {}",
                self.api_base_url
            ));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.monitoring_interval_minutes == 0 {
            return Err(anyhow!("monitoring_interval_minutes must be greater than 0"));
        }
        if self.monitoring_interval_minutes > MAX_MONITORING_MINUTES {
            return Err(anyhow!(
                "monitoring_interval_minutes must be at most {}",
                MAX_MONITORING_MINUTES
            ));
        }
        if self.history_limit == 0 {
            return Err(anyhow!("history_limit must be greater than 0"));
        }
        if self.data_dir.trim().is_empty() || self.report_dir.trim().is_empty() {
            return Err(anyhow!("data_dir and report_dir must not be empty"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.clone(),
            request_timeout_seconds: self.request_timeout_seconds,
            data_dir: self.data_dir.clone(),
            report_dir: self.report_dir.clone(),
            monitoring_interval_minutes: self.monitoring_interval_minutes,
            notice_ttl_seconds: self.notice_ttl_seconds,
            history_limit: self.history_limit,
        }
    }

    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(PathBuf::from)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("FUEL_API_BASE_URL") {
            self.api_base_url = value;
        }
        if let Ok(value) = env::var("FUEL_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
        if let Ok(value) = env::var("FUEL_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("FUEL_REPORT_DIR") {
            self.report_dir = value;
        }
        if let Ok(value) = env::var("FUEL_MONITORING_INTERVAL_MINUTES") {
            self.monitoring_interval_minutes =
                value.parse().unwrap_or(self.monitoring_interval_minutes);
        }
        if let Ok(value) = env::var("FUEL_NOTICE_TTL_SECONDS") {
            self.notice_ttl_seconds = value.parse().unwrap_or(self.notice_ttl_seconds);
        }
        if let Ok(value) = env::var("FUEL_HISTORY_LIMIT") {
            self.history_limit = value.parse().unwrap_or(self.history_limit);
        }
        if let Ok(value) = env::var("FUEL_LOG_DIR") {
            self.log_dir = Some(value);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
