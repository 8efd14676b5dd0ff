use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::api::{ApiUser, ApiUserKind};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Upstream backend; when set, the mock server takes its doctors from it
    #[serde(default)]
    pub api: Option<ApiConfig>,
    pub storage: StorageConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, e.g. http://localhost:8080/api
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_admin_email")]
    pub admin_email: String,
    #[serde(default = "default_password")]
    pub admin_password: String,
    /// Shared password accepted for every doctor
    #[serde(default = "default_password")]
    pub doctor_password: String,
    #[serde(default)]
    pub doctors: Vec<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            admin_email: default_admin_email(),
            admin_password: default_password(),
            doctor_password: default_password(),
            doctors: Vec::new(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            num_threads: default_num_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_timeout_secs() -> u64 {
    30
}

fn default_admin_email() -> String {
    "admin@example.com".to_string()
}

fn default_password() -> String {
    "123456".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(api) = &self.api {
            let base_url = api.base_url.trim();
            if base_url.is_empty() {
                bail!("api.base_url must not be empty");
            }

            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                bail!("api.base_url must start with http:// or https://");
            }

            if api.timeout_secs == 0 {
                bail!("api.timeout_secs must be greater than 0");
            }
        }

        if self.storage.path.as_os_str().is_empty() {
            bail!("storage.path must not be empty");
        }

        if self.mock.admin_email.is_empty() {
            bail!("mock.admin_email must not be empty");
        }

        if self.mock.admin_password.is_empty() || self.mock.doctor_password.is_empty() {
            bail!("mock passwords must not be empty");
        }

        for doctor in &self.mock.doctors {
            if doctor.kind != ApiUserKind::Doctor {
                bail!(
                    "mock.doctors entry {} ({}) must have tipo = \"MEDICO\"",
                    doctor.id,
                    doctor.email
                );
            }
            if doctor.email == self.mock.admin_email {
                bail!("mock doctor {} reuses the admin email", doctor.id);
            }
        }

        let mut emails: Vec<&str> = self.mock.doctors.iter().map(|d| d.email.as_str()).collect();
        emails.sort_unstable();
        if let Some(pair) = emails.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("mock.doctors contains duplicate email {}", pair[0]);
        }

        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
