use std::path::PathBuf;
use std::time::Duration;
use crate::conversion::CurrencyApiClient;
use crate::detection::ocr;
use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "CURRENCY_API_KEY";
pub const API_URL_VAR: &str = "CURRENCY_API_URL";
pub const MODELS_DIR_VAR: &str = "OCRS_MODELS_DIR";
pub const TIMEOUT_VAR: &str = "RATE_TIMEOUT_SECS";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Runtime settings, injected at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_url: String,
    pub models_dir: Option<PathBuf>,
    pub rate_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: CurrencyApiClient::DEFAULT_URL.to_string(),
            models_dir: ocr::default_models_dir(),
            rate_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read settings from the process environment, after loading `.env` if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        config.api_key = non_empty(API_KEY_VAR);
        if let Some(url) = non_empty(API_URL_VAR) {
            config.api_url = url;
        }
        if let Some(dir) = non_empty(MODELS_DIR_VAR) {
            config.models_dir = Some(PathBuf::from(dir));
        }
        if let Some(secs) = non_empty(TIMEOUT_VAR) {
            config.rate_timeout = Duration::from_secs(parse_timeout_secs(&secs)?);
        }

        Ok(config)
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }

    pub fn models_dir(&self) -> Result<&PathBuf, ConfigError> {
        self.models_dir.as_ref().ok_or(ConfigError::InvalidValue {
            name: MODELS_DIR_VAR,
            value: "<unset, and no home directory>".to_string(),
        })
    }
}

/// Timeout in whole seconds; zero is rejected
pub fn parse_timeout_secs(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| ConfigError::InvalidValue {
            name: TIMEOUT_VAR,
            value: value.to_string(),
        })
}
