//! Provider configuration parsed from environment variables.

use super::types::GenAiError;

/// Environment variables checked for the API key, in precedence order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenAiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenAiConfig {
    pub api_key: String,
    pub model: String,
    pub timeouts: GenAiTimeouts,
}

impl GenAiConfig {
    /// Build typed provider config from environment variables.
    ///
    /// - `GEMINI_API_KEY` / `GOOGLE_API_KEY`: API key; the first non-empty
    ///   value wins.
    /// - `GEMINI_MODEL`: model identifier, default `gemini-2.5-flash`.
    /// - `GENAI_REQUEST_TIMEOUT_SECS`: default 120.
    /// - `GENAI_CONNECT_TIMEOUT_SECS`: default 10.
    ///
    /// # Errors
    ///
    /// Returns [`GenAiError::MissingApiKey`] when no key variable is set to
    /// a non-empty value.
    pub fn from_env() -> Result<Self, GenAiError> {
        let api_key = API_KEY_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|key| !key.trim().is_empty())
            .ok_or_else(|| GenAiError::MissingApiKey { tried: API_KEY_VARS.join(", ") })?;

        let model = model_from_env();
        let timeouts = GenAiTimeouts {
            request_secs: env_parse_u64("GENAI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("GENAI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { api_key, model, timeouts })
    }
}

/// Model identifier from `GEMINI_MODEL`, falling back to the default.
///
/// Split out from [`GenAiConfig::from_env`] so `/health` can report the
/// configured model even when no API key is present.
#[must_use]
pub fn model_from_env() -> String {
    std::env::var("GEMINI_MODEL")
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
