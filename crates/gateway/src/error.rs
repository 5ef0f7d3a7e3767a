use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("API key not configured: set GEMINI_API_KEY or API_KEY")]
    MissingApiKey,
    #[error("invalid gateway configuration: {0}")]
    InvalidConfig(String),
    #[error("request to AI service failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("AI service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("AI service rate limit reached: {0}")]
    RateLimited(String),
    #[error("AI service rejected the API key: {0}")]
    Unauthorised(String),
    #[error("failed to parse AI service response: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("AI service returned no text")]
    EmptyResponse,
    #[error("chat session not started")]
    SessionNotStarted,
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Maps a non-success HTTP status and its body onto a gateway error.
///
/// Gemini error bodies look like `{"error": {"message": "..."}}`; the inner message is used when
/// present, the raw body otherwise.
pub fn http_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string());

    match status {
        401 | 403 => GatewayError::Unauthorised(message),
        429 => GatewayError::RateLimited(message),
        _ => GatewayError::Api { status, message },
    }
}
