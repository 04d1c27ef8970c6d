//! Connection settings resolved from `MG_*` environment variables.
//!
//! # Responsibility
//! - Provide defaults matching a local Memgraph instance.
//! - Parse and validate overrides before any connection attempt.
//!
//! # Invariants
//! - `host` is never blank and `port` is never zero after resolution.
//! - The password never appears in `Debug` output.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub const ENV_HOST: &str = "MG_HOST";
pub const ENV_PORT: &str = "MG_PORT";
pub const ENV_USERNAME: &str = "MG_USERNAME";
pub const ENV_PASSWORD: &str = "MG_PASSWORD";
pub const ENV_ENCRYPTED: &str = "MG_ENCRYPTED";
pub const ENV_CLIENT_NAME: &str = "MG_CLIENT_NAME";
pub const ENV_LAZY: &str = "MG_LAZY";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 7687;
const DEFAULT_CLIENT_NAME: &str = "GQLAlchemy";

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid connection setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyHost,
    InvalidPort(String),
    InvalidBool { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyHost => write!(f, "{ENV_HOST} cannot be empty"),
            Self::InvalidPort(value) => {
                write!(f, "{ENV_PORT} must be a port in 1..=65535, got `{value}`")
            }
            Self::InvalidBool { key, value } => {
                write!(f, "{key} must be true|false|1|0|yes|no, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings needed to open a database session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub encrypted: bool,
    pub client_name: String,
    /// Defer fetching until rows are consumed.
    pub lazy: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: String::new(),
            password: String::new(),
            encrypted: false,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            lazy: false,
        }
    }
}

impl Debug for ConnectionConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("encrypted", &self.encrypted)
            .field("client_name", &self.client_name)
            .field("lazy", &self.lazy)
            .finish()
    }
}

impl ConnectionConfig {
    /// Resolves settings from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; missing keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(ENV_HOST) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = parse_port(&port)?;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            config.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            config.password = password;
        }
        if let Some(encrypted) = lookup(ENV_ENCRYPTED) {
            config.encrypted = parse_bool(ENV_ENCRYPTED, &encrypted)?;
        }
        if let Some(client_name) = lookup(ENV_CLIENT_NAME) {
            config.client_name = client_name;
        }
        if let Some(lazy) = lookup(ENV_LAZY) {
            config.lazy = parse_bool(ENV_LAZY, &lazy)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks invariants for configs built by hand or deserialized.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }
        Ok(())
    }

    /// Bolt URI of the target server, `bolt+s` when encrypted.
    pub fn bolt_uri(&self) -> String {
        let scheme = if self.encrypted { "bolt+s" } else { "bolt" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}

fn parse_port(raw: &str) -> ConfigResult<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort(raw.to_string())),
    }
}

fn parse_bool(key: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_port, ConfigError};

    #[test]
    fn parse_port_rejects_zero_and_overflow() {
        assert_eq!(parse_port(" 7688 ").unwrap(), 7688);
        assert_eq!(
            parse_port("0").unwrap_err(),
            ConfigError::InvalidPort("0".to_string())
        );
        assert!(parse_port("70000").is_err());
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("MG_LAZY", "YES").unwrap());
        assert!(!parse_bool("MG_LAZY", "0").unwrap());
        assert!(matches!(
            parse_bool("MG_LAZY", "maybe"),
            Err(ConfigError::InvalidBool { key: "MG_LAZY", .. })
        ));
    }
}
