use std::env;
use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError};

use crate::auth::memory::RateLimitSettings;
use crate::i18n::Locale;

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const CONFIG_DIR: &str = "config";
const DEFAULT_STORAGE_NAMESPACE: &str = "@costura_conectada";
const DEFAULT_SIGN_IN_ATTEMPTS: u32 = 5;
const DEFAULT_ATTEMPT_WINDOW_SECS: u64 = 5 * 60;
const DEFAULT_LOCKOUT_SECS: u64 = 15 * 60;

/// Sign-in attempt limiter knobs handed to the auth provider.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// Failed attempts tolerated inside one window before lockout
    #[serde(default = "default_sign_in_attempts")]
    #[validate(range(min = 1))]
    pub max_sign_in_attempts: u32,

    /// Rolling window (seconds) failures are counted in
    #[serde(default = "default_attempt_window_secs")]
    #[validate(range(min = 1))]
    pub attempt_window_secs: u64,

    /// Lockout duration (seconds) once the budget is spent
    #[serde(default = "default_lockout_secs")]
    #[validate(range(min = 1))]
    pub lockout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            max_sign_in_attempts: default_sign_in_attempts(),
            attempt_window_secs: default_attempt_window_secs(),
            lockout_secs: default_lockout_secs(),
        }
    }
}

impl AuthConfig {
    /// Converts the config representation into provider settings.
    pub fn rate_limits(&self) -> RateLimitSettings {
        RateLimitSettings {
            max_attempts: self.max_sign_in_attempts,
            window: Duration::from_secs(self.attempt_window_secs),
            lockout: Duration::from_secs(self.lockout_secs),
        }
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Language used before any preference is saved or user signs in
    #[serde(default)]
    pub default_language: Locale,

    /// Prefix for preference-store keys
    #[serde(default = "default_storage_namespace")]
    #[validate(length(min = 1))]
    pub storage_namespace: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Sign-in limiter configuration
    #[serde(default)]
    #[validate]
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: Locale::default(),
            storage_namespace: default_storage_namespace(),
            log_level: default_log_level(),
            log_json: false,
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_storage_namespace() -> String {
    DEFAULT_STORAGE_NAMESPACE.to_string()
}

fn default_sign_in_attempts() -> u32 {
    DEFAULT_SIGN_IN_ATTEMPTS
}

fn default_attempt_window_secs() -> u64 {
    DEFAULT_ATTEMPT_WINDOW_SECS
}

fn default_lockout_secs() -> u64 {
    DEFAULT_LOCKOUT_SECS
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Default config (config/default.toml)
/// 2. Environment-specific config (config/{env}.toml)
/// 3. Environment variables (COSTURA__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !Path::new(CONFIG_DIR).exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            CONFIG_DIR
        );
    }

    let config = Config::builder()
        .add_source(File::with_name(&format!("{}/default", CONFIG_DIR)).required(false))
        .add_source(File::with_name(&format!("{}/{}", CONFIG_DIR, run_env)).required(false))
        .add_source(Environment::with_prefix("COSTURA").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_settings() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.default_language, Locale::Pt);
        assert_eq!(cfg.storage_namespace, "@costura_conectada");
        assert_eq!(cfg.log_level, "info");
        assert!(!cfg.log_json);
        assert_eq!(cfg.auth.max_sign_in_attempts, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn auth_limits_convert_to_provider_settings() {
        let limits = AppConfig::default().auth.rate_limits();
        assert_eq!(limits.max_attempts, 5);
        assert_eq!(limits.window, Duration::from_secs(300));
        assert_eq!(limits.lockout, Duration::from_secs(900));
    }

    #[test]
    fn zero_attempt_budget_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.auth.max_sign_in_attempts = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.log_level = "verbose".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_namespace_is_rejected() {
        let mut cfg = AppConfig::default();
        cfg.storage_namespace.clear();
        assert!(cfg.validate().is_err());
    }
}
