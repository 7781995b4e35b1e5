use crate::constants::{
    DEFAULT_MANAGEMENT_API_URL, ENV_ACCOUNT_ID, ENV_CLUSTER_ID, ENV_DATABASE, ENV_HOST,
    ENV_MANAGEMENT_TOKEN, ENV_MANAGEMENT_URL, ENV_TOKEN,
};
use crate::error::{DedicatedError, Result};
use serde::Deserialize;
use std::env::VarError;
use std::fmt;
use std::fs;
use std::path::Path;
use url::Url;

/// Data-plane client settings. Only `database` is used by the management
/// calls: it names the database being created.
#[derive(Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub database: String,
}

/// Control-plane settings for a Cloud Dedicated cluster.
#[derive(Clone, Deserialize)]
pub struct DedicatedClientConfig {
    pub account_id: String,
    pub cluster_id: String,
    pub management_token: String,
    #[serde(default = "default_management_api_url")]
    pub management_api_url: Url,
}

/// File layout accepted by [`Config::load`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    pub dedicated: DedicatedClientConfig,
}

fn default_management_api_url() -> Url {
    Url::parse(DEFAULT_MANAGEMENT_API_URL).expect("default management API URL is valid")
}

fn required_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Err(DedicatedError::Config(format!(
            "environment variable '{}' is not set",
            name
        ))),
        Err(e) => Err(DedicatedError::Env(e)),
    }
}

/// Unset reads as empty; a set but non-Unicode value is an error.
fn optional_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) => Ok(value),
        Err(VarError::NotPresent) => Ok(String::new()),
        Err(e) => Err(DedicatedError::Env(e)),
    }
}

impl ClientConfig {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..Self::default()
        }
    }

    /// Reads `INFLUX_URL`, `INFLUX_TOKEN` and `INFLUX_DATABASE`. Missing values
    /// are left empty; an empty database is rejected later by the call that needs it.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: optional_env(ENV_HOST)?,
            token: optional_env(ENV_TOKEN)?,
            database: optional_env(ENV_DATABASE)?,
        })
    }
}

impl DedicatedClientConfig {
    pub fn new(
        account_id: impl Into<String>,
        cluster_id: impl Into<String>,
        management_token: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            cluster_id: cluster_id.into(),
            management_token: management_token.into(),
            management_api_url: default_management_api_url(),
        }
    }

    pub fn with_management_api_url(mut self, url: Url) -> Self {
        self.management_api_url = url;
        self
    }

    /// Reads the account, cluster and management token from the environment.
    /// `INFLUX_MANAGEMENT_URL` is optional.
    pub fn from_env() -> Result<Self> {
        let config = Self::new(
            required_env(ENV_ACCOUNT_ID)?,
            required_env(ENV_CLUSTER_ID)?,
            required_env(ENV_MANAGEMENT_TOKEN)?,
        );
        let raw = optional_env(ENV_MANAGEMENT_URL)?;
        if raw.trim().is_empty() {
            return Ok(config);
        }
        let url = Url::parse(raw.trim()).map_err(|e| {
            DedicatedError::Config(format!("invalid {} '{}': {}", ENV_MANAGEMENT_URL, raw, e))
        })?;
        Ok(config.with_management_api_url(url))
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config_path = path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            DedicatedError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: ClientConfig::from_env()?,
            dedicated: DedicatedClientConfig::from_env()?,
        })
    }
}

// Tokens stay out of logs.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

impl fmt::Debug for DedicatedClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DedicatedClientConfig")
            .field("account_id", &self.account_id)
            .field("cluster_id", &self.cluster_id)
            .field("management_token", &"<redacted>")
            .field("management_api_url", &self.management_api_url.as_str())
            .finish()
    }
}
