//! Configuration loader for environment variables and files.
//!
//! Responsibilities:
//! - Load configuration from `.env` files and environment variables.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical merging:
//!   explicit overrides win over environment values, which win over defaults.
//! - Enforce the `DOTENV_DISABLED` gate to prevent accidental dotenv loading
//!   in tests.
//!
//! Invariants / Assumptions:
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - `ICEPANEL_LANDSCAPE_ID` and `ICEPANEL_API_KEY` are required; everything
//!   else has a default.

use std::net::SocketAddr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

use crate::types::Config;

/// Default IcePanel API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.icepanel.io/v1";

/// Default bind address for the HTTP surface.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8093";

/// Default timeout for outbound IcePanel calls, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Configuration loader that builds config from environment variables.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    landscape_id: Option<String>,
    api_key: Option<SecretString>,
    timeout: Option<Duration>,
    bind_addr: Option<SocketAddr>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If the `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the `.env` file will not be loaded (useful for testing).
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("true")
            && std::env::var("DOTENV_DISABLED").ok().as_deref() != Some("1")
        {
            dotenvy::dotenv().ok();
        }
        Ok(self)
    }

    /// Override the IcePanel API base URL.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Override the landscape identifier.
    pub fn with_landscape_id(mut self, id: String) -> Self {
        self.landscape_id = Some(id);
        self
    }

    /// Override the API key.
    pub fn with_api_key(mut self, key: SecretString) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Override the outbound call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the bind address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Read an environment variable, returning None if unset, empty, or whitespace-only.
    fn env_var_or_none(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    /// Read configuration from environment variables.
    ///
    /// Values already set through `with_*` overrides are left untouched.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if self.base_url.is_none() {
            self.base_url = Self::env_var_or_none("ICEPANEL_BASE_URL");
        }
        if self.landscape_id.is_none() {
            self.landscape_id = Self::env_var_or_none("ICEPANEL_LANDSCAPE_ID");
        }
        if self.api_key.is_none() {
            self.api_key =
                Self::env_var_or_none("ICEPANEL_API_KEY").map(|k| SecretString::new(k.into()));
        }
        if self.timeout.is_none()
            && let Some(timeout) = Self::env_var_or_none("PROVISIONER_TIMEOUT_SECS")
        {
            let secs: u64 = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    var: "PROVISIONER_TIMEOUT_SECS".to_string(),
                    message: "must be a positive integer".to_string(),
                })?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        if self.bind_addr.is_none()
            && let Some(addr) = Self::env_var_or_none("PROVISIONER_BIND_ADDR")
        {
            let addr: SocketAddr =
                addr.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    var: "PROVISIONER_BIND_ADDR".to_string(),
                    message: "must be a socket address such as 0.0.0.0:8093".to_string(),
                })?;
            self.bind_addr = Some(addr);
        }
        Ok(self)
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let landscape_id = self
            .landscape_id
            .ok_or_else(|| ConfigError::MissingEnvVar("ICEPANEL_LANDSCAPE_ID".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| ConfigError::MissingEnvVar("ICEPANEL_API_KEY".to_string()))?;

        let bind_addr = match self.bind_addr {
            Some(addr) => addr,
            // The default is a constant and always parses.
            None => DEFAULT_BIND_ADDR.parse().map_err(|_| ConfigError::InvalidValue {
                var: "PROVISIONER_BIND_ADDR".to_string(),
                message: "default bind address failed to parse".to_string(),
            })?,
        };

        Ok(Config {
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            landscape_id,
            api_key,
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            bind_addr,
        })
    }
}
