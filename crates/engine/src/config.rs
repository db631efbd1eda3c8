//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CROSSCART_API_BASE_URL` - Base URL of the CrossCart backend API
//! - `CROSSCART_API_TOKEN` - Bearer token for backend calls
//!
//! ## Optional
//! - `CROSSCART_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Workflow engine configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct EngineConfig {
    /// Base URL of the CrossCart backend API
    pub api_base_url: Url,
    /// Bearer token for backend calls
    pub api_token: SecretString,
    /// HTTP request timeout
    pub http_timeout: Duration,
}

impl std::fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("api_token", &"[REDACTED]")
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_required_env("CROSSCART_API_BASE_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CROSSCART_API_BASE_URL".to_string(), e.to_string())
            })?;
        let api_token = get_required_secret("CROSSCART_API_TOKEN")?;
        let http_timeout_secs = get_env_or_default(
            "CROSSCART_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("CROSSCART_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            api_token,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
