//! Environment-based configuration.
//!
//! A missing `OPENAI_API_KEY` is not an error: every model-backed mode
//! degrades to its static fallback instead.

use std::time::Duration;

const DEFAULT_ADDR: &str = "127.0.0.1:7870";
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server.
    pub addr: String,
    /// API key for the chat-completion provider; `None` means degraded mode.
    pub openai_api_key: Option<String>,
    /// Chat-completions endpoint (OpenAI-compatible).
    pub openai_url: String,
    /// Model name sent with every request.
    pub model: String,
    /// Timeout applied to each outbound model call.
    pub llm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let llm_timeout_secs = std::env::var("QUILL_LLM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS);

        Self {
            addr: std::env::var("QUILL_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string()),
            openai_api_key,
            openai_url: std::env::var("QUILL_OPENAI_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_URL.to_string()),
            model: std::env::var("QUILL_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_timeout: Duration::from_secs(llm_timeout_secs),
        }
    }

    /// Config with no API key, for tests and offline runs.
    pub fn offline() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            openai_api_key: None,
            openai_url: DEFAULT_OPENAI_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_config_has_no_key() {
        let config = Config::offline();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.llm_timeout, Duration::from_secs(30));
    }
}
