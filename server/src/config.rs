//! Server configuration loading.
//!
//! Layers, later wins:
//! 1. Hardcoded defaults
//! 2. TOML file (`--config`, `$LANDING_CONFIG`, or `./landing.toml` if present)
//! 3. `LANDING_*` environment variables
//! 4. CLI flags (applied by `main`)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Errors raised while assembling the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for ${var}: '{value}' (expected: {expected})")]
    InvalidEnvValue {
        var: String,
        value: String,
        expected: String,
    },

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Deployment environment. Controls whether 500 responses include the
/// underlying error message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Landing page document.
    pub content_path: PathBuf,
    /// A/B test list.
    pub ab_tests_path: PathBuf,
    pub environment: Environment,
    /// Bearer tokens accepted on admin routes. Empty means no admin access.
    pub admin_tokens: Vec<String>,
    /// Origins allowed by CORS. Empty disables the CORS layer.
    pub cors_origins: Vec<String>,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// When unset the in-process cache is used.
    pub redis_url: Option<String>,
    pub ttl_secs: u64,
    /// Entry limit for the in-process cache.
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            redis_url: None,
            ttl_secs: 300,
            max_entries: 16,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3001)),
            content_path: PathBuf::from("data/landing-page.json"),
            ab_tests_path: PathBuf::from("data/ab-tests.json"),
            environment: Environment::default(),
            admin_tokens: Vec::new(),
            cors_origins: Vec::new(),
            cache: CacheConfig::default(),
        }
    }
}

impl ServerConfig {
    pub const ENV_CONFIG_PATH: &'static str = "LANDING_CONFIG";
    pub const DEFAULT_CONFIG_FILENAME: &'static str = "landing.toml";

    /// Load file and environment layers.
    ///
    /// `explicit` is the `--config` flag. An explicit or `$LANDING_CONFIG`
    /// path must exist; the implicit `./landing.toml` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match explicit {
            Some(path) => (path.to_path_buf(), true),
            None => match std::env::var(Self::ENV_CONFIG_PATH) {
                Ok(path) => (PathBuf::from(path), true),
                Err(_) => (PathBuf::from(Self::DEFAULT_CONFIG_FILENAME), false),
            },
        };

        let mut config = if required || path.exists() {
            Self::load_from_path(&path)?
        } else {
            tracing::info!(path = %path.display(), "config not found, using defaults");
            Self::default()
        };

        config.apply_env(|var| std::env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `LANDING_*` overrides using `lookup` to read variables.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup("LANDING_BIND_ADDR") {
            self.bind_addr = value.parse().map_err(|_| ConfigError::InvalidEnvValue {
                var: "LANDING_BIND_ADDR".to_string(),
                value: value.clone(),
                expected: "socket address such as 127.0.0.1:3001".to_string(),
            })?;
        }
        if let Some(value) = lookup("LANDING_CONTENT_PATH") {
            self.content_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("LANDING_AB_TESTS_PATH") {
            self.ab_tests_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("LANDING_REDIS_URL") {
            let value = value.trim();
            self.cache.redis_url = (!value.is_empty()).then(|| value.to_string());
        }
        if let Some(value) = lookup("LANDING_CACHE_TTL_SECS") {
            self.cache.ttl_secs = value.parse().map_err(|_| ConfigError::InvalidEnvValue {
                var: "LANDING_CACHE_TTL_SECS".to_string(),
                value: value.clone(),
                expected: "positive integer".to_string(),
            })?;
        }
        if let Some(value) = lookup("LANDING_ADMIN_TOKENS") {
            self.admin_tokens = value
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = lookup("LANDING_ENV") {
            self.environment =
                Environment::parse(&value).ok_or_else(|| ConfigError::InvalidEnvValue {
                    var: "LANDING_ENV".to_string(),
                    value: value.clone(),
                    expected: "development or production".to_string(),
                })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.ttl_secs must be greater than zero".to_string(),
            ));
        }
        if self.admin_tokens.iter().any(|token| token.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "admin_tokens must not contain empty tokens".to_string(),
            ));
        }
        Ok(())
    }
}
