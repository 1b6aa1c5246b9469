//! LLM error types

use thiserror::Error;

/// Error signal substrings the remote service emits for quota and rate-limit
/// failures. Substring matching is the only signal available at this
/// boundary, so the detection rule has to stay wire-compatible with the
/// service's error format.
const RECOVERABLE_SIGNALS: [&str; 3] = ["insufficient_quota", "RateLimitError", "429"];

/// Errors that can occur when talking to the completion service
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited (HTTP 429), retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("API key not found in the {0} environment variable")]
    MissingApiKey(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Whether the gateway may absorb this failure and answer offline.
    ///
    /// Rate limits are recoverable by construction; every other failure is
    /// recoverable only when its rendered signal carries one of the known
    /// quota/rate-limit markers.
    pub fn is_recoverable(&self) -> bool {
        if matches!(self, LlmError::RateLimited { .. }) {
            return true;
        }
        let signal = self.to_string();
        RECOVERABLE_SIGNALS.iter().any(|marker| signal.contains(marker))
    }
}
