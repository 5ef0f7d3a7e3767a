//! Gateway configuration.
//!
//! Everything here is resolved once at startup from raw environment values and then handed to
//! [`crate::GeminiGateway::new`]. Nothing in this crate reads the environment while serving
//! requests.

use crate::{GatewayError, GatewayResult};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct GatewayConfig {
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a new `GatewayConfig`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingApiKey` if `api_key` is blank, and
    /// `GatewayError::InvalidConfig` if `model` or `base_url` is blank.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(GatewayError::MissingApiKey);
        }

        let model = model.into().trim().to_string();
        if model.is_empty() {
            return Err(GatewayError::InvalidConfig("model name cannot be empty".into()));
        }

        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GatewayError::InvalidConfig("base URL cannot be empty".into()));
        }

        Ok(Self {
            api_key,
            model,
            base_url,
            timeout,
        })
    }

    /// Builds a configuration from optional raw values, applying the defaults.
    ///
    /// # Arguments
    ///
    /// * `api_key` - preferred key value (`GEMINI_API_KEY`)
    /// * `fallback_api_key` - used when `api_key` is absent or blank (`API_KEY`)
    /// * `model`, `base_url`, `timeout_secs` - optional overrides
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::MissingApiKey` if neither key is set, and
    /// `GatewayError::InvalidConfig` if `timeout_secs` is not a positive integer.
    pub fn from_env_values(
        api_key: Option<String>,
        fallback_api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout_secs: Option<String>,
    ) -> GatewayResult<Self> {
        let api_key = non_blank(api_key)
            .or_else(|| non_blank(fallback_api_key))
            .ok_or(GatewayError::MissingApiKey)?;
        let model = non_blank(model).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = non_blank(base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = timeout_from_env_value(timeout_secs)?;

        Self::new(api_key, model, base_url, timeout)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `{base_url}/models/{model}:generateContent`
    pub fn generate_content_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Parse the HTTP timeout in whole seconds.
///
/// If `value` is `None` or empty/whitespace, returns the default of 60 seconds.
pub fn timeout_from_env_value(value: Option<String>) -> GatewayResult<Duration> {
    let Some(value) = non_blank(value) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(GatewayError::InvalidConfig(format!(
            "timeout must be a positive number of seconds, got {value:?}"
        ))),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
