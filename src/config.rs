//! Server configuration file (`mentorship.yml`)
//!
//! Example:
//!
//! ```yaml
//! server:
//!   bind_addr: "0.0.0.0:3000"
//!   enable_cors: true
//!   cors_origins:
//!     - "https://mentors.example.com"
//! database:
//!   url: "postgres://mentorship@localhost/mentorship"
//!   password: "${DATABASE_PASSWORD}"
//! logging:
//!   level: info
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;
use url::Url;

/// Config file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "mentorship.yml";

/// Top-level server configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    /// Address the HTTP API binds to
    pub bind_addr: String,
    pub enable_cors: bool,
    /// Allowed CORS origins; localhost origins when unset
    pub cors_origins: Option<Vec<String>>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            enable_cors: true,
            cors_origins: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseSection {
    /// SQLite: "sqlite://./mentorship.db?mode=rwc"
    /// PostgreSQL: "postgres://user@localhost/mentorship"
    pub url: String,
    /// Credential injected into the URL at connect time
    pub password: Option<String>,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: "sqlite://./mentorship.db?mode=rwc".to_string(),
            password: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSection {
    /// Default filter when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load config from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content)
    }

    /// Load `path` if given, else `mentorship.yml` if present, else defaults
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse config from YAML string
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes as YAML null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut config: AppConfig =
            serde_yaml::from_str(content).context("Failed to parse YAML config")?;

        config.server.bind_addr = expand_env_vars(&config.server.bind_addr);
        if let Some(origins) = config.server.cors_origins.as_mut() {
            for origin in origins.iter_mut() {
                *origin = expand_env_vars(origin);
            }
        }
        config.database.url = expand_env_vars(&config.database.url);
        config.database.password = config
            .database
            .password
            .as_deref()
            .map(expand_env_vars)
            .filter(|p| !p.is_empty());
        config.logging.level = expand_env_vars(&config.logging.level);

        Ok(config)
    }
}

impl DatabaseSection {
    /// The URL to connect with, carrying the password when one is configured
    pub fn connection_url(&self) -> Result<String> {
        let Some(password) = self.password.as_deref() else {
            return Ok(self.url.clone());
        };

        if self.url.starts_with("sqlite:") {
            warn!("Ignoring database password: SQLite connections do not use credentials");
            return Ok(self.url.clone());
        }

        let mut url = Url::parse(&self.url)
            .with_context(|| format!("Invalid database URL: {}", self.url))?;

        if !url.has_host() {
            warn!("Ignoring database password: URL has no host to authenticate against");
            return Ok(self.url.clone());
        }

        url.set_password(Some(password))
            .map_err(|_| anyhow::anyhow!("Cannot set a password on database URL"))?;

        Ok(url.to_string())
    }
}

/// Expand environment variables in a string
///
/// Supports `${VAR}` syntax. If the variable is not set, returns empty string.
pub fn expand_env_vars(input: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}").expect("valid pattern");

    re.replace_all(input, |caps: &regex_lite::Captures| {
        std::env::var(&caps[1]).unwrap_or_default()
    })
    .into_owned()
}
