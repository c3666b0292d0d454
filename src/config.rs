use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::transport::{BaseUrl, Credential, PageLocation, TransportError, DEFAULT_API_PORT};

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Explicit API base URL; bypasses derivation from `location`
    pub base_url: ConfigValue<Option<String>>,
    /// Page location the base URL is derived from
    pub location: ConfigValue<PageLocation>,
    /// API port used when `location` has an explicit port
    pub api_port: ConfigValue<u16>,
    /// Credential sent with every call
    #[serde(skip_serializing)]
    pub auth_token: ConfigValue<Option<String>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    location: Option<PageLocation>,
    api_port: Option<u16>,
    auth_token: Option<String>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut base_url = ConfigValue::new(None, ConfigSource::Default);
        let mut location = ConfigValue::new(PageLocation::default(), ConfigSource::Default);
        let mut api_port = ConfigValue::new(DEFAULT_API_PORT, ConfigSource::Default);
        let mut auth_token = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(url) = file_config.base_url {
                base_url = ConfigValue::new(Some(url), ConfigSource::File);
            }
            if let Some(page) = file_config.location {
                location = ConfigValue::new(page, ConfigSource::File);
            }
            if let Some(port) = file_config.api_port {
                api_port = ConfigValue::new(port, ConfigSource::File);
            }
            if let Some(token) = file_config.auth_token {
                auth_token = ConfigValue::new(Some(token), ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("SLOTO_BASE_URL") {
            base_url = ConfigValue::new(Some(url), ConfigSource::Environment);
        }
        if let Ok(port) = std::env::var("SLOTO_API_PORT") {
            let port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SLOTO_API_PORT".to_string(), port))?;
            api_port = ConfigValue::new(port, ConfigSource::Environment);
        }
        if let Ok(token) = std::env::var("SLOTO_AUTH_TOKEN") {
            auth_token = ConfigValue::new(Some(token), ConfigSource::Environment);
        }

        Ok(Self {
            base_url,
            location,
            api_port,
            auth_token,
            config_file,
        })
    }

    /// Effective API base URL.
    pub fn base_url(&self) -> Result<BaseUrl, TransportError> {
        match &self.base_url.value {
            Some(url) => BaseUrl::parse(url),
            None => Ok(BaseUrl::from_location(
                &self.location.value,
                self.api_port.value,
            )),
        }
    }

    pub fn credential(&self) -> Option<Credential> {
        self.auth_token
            .value
            .as_deref()
            .and_then(Credential::from_token)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/sloto/
    /// - macOS: ~/Library/Application Support/sloto/
    /// - Windows: %APPDATA%/sloto/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sloto")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(String, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, value) => {
                write!(f, "Invalid value '{}' for {}", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError(_, e) => Some(e),
            ConfigError::ParseError(_, e) => Some(e),
            ConfigError::InvalidValue(..) => None,
        }
    }
}
