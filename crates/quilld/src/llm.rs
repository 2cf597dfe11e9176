//! Chat-completion client and untrusted-JSON handling.
//!
//! The model's output is treated as an untyped value at this boundary: parse
//! best-effort (bare JSON, or JSON buried in commentary), then coerce
//! field-by-field with safe defaults. Nothing past this module ever sees a
//! partially-shaped payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model request failed: {0}")]
    Request(String),
    #[error("model returned error status {0}")]
    Status(u16),
    #[error("model returned no content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct LlmClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
}

impl LlmClient {
    /// Build a client from config. `None` when no API key is configured;
    /// callers then serve their static fallbacks.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.openai_api_key.clone()?;
        let http = reqwest::Client::builder()
            .timeout(config.llm_timeout)
            .build()
            .unwrap_or_default();
        Some(Self {
            http,
            api_key,
            url: config.openai_url.clone(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// One chat call: system instruction + user prompt, awaited to
    /// completion. Returns the raw message content; parsing is the caller's
    /// problem via [`extract_json`].
    pub async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature,
        };

        debug!(
            model = %self.model,
            prompt_chars = user_prompt.len(),
            "Sending chat-completion request"
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(status, "Model endpoint returned non-success status");
            return Err(LlmError::Status(status));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyContent);
        }

        info!(model = %self.model, content_chars = content.len(), "Model call completed");
        Ok(content)
    }
}

/// Parse model output as JSON. Tries the text as-is first; if that fails,
/// extracts the substring between the first `{` and the last `}` (models
/// like wrapping JSON in commentary) and retries. `None` means unusable.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(v) = serde_json::from_str::<Value>(trimmed) {
        return Some(v);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&trimmed[start..=end]).ok()
}

/// Coerce a field to a trimmed string. Non-strings are stringified rather
/// than dropped; missing/null becomes empty.
pub fn coerce_string(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
    }
}

/// Coerce a field to a list of non-empty strings; anything that is not an
/// array becomes the empty list.
pub fn coerce_string_list(v: Option<&Value>) -> Vec<String> {
    v.and_then(Value::as_array)
        .map(|arr| {
            arr.iter()
                .map(|x| coerce_string(Some(x)))
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Coerce a field to an integer, defaulting to 0. Accepts numbers only; the
/// value is trusted as returned beyond that.
pub fn coerce_i64(v: Option<&Value>) -> i64 {
    v.and_then(Value::as_i64).unwrap_or(0)
}

/// Load config into a client, logging the degraded mode once at startup.
pub fn client_from_config(config: &Config) -> Option<LlmClient> {
    match LlmClient::from_config(config) {
        Some(client) => {
            info!(model = %client.model(), "Model client initialized");
            Some(client)
        }
        None => {
            warn!("OPENAI_API_KEY not set - model-backed modes will use static fallbacks");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_json_accepts_bare_json() {
        let v = extract_json(r#"{"reply":"ok","follow_up_question":""}"#).unwrap();
        assert_eq!(v["reply"], "ok");
    }

    #[test]
    fn extract_json_recovers_json_wrapped_in_commentary() {
        let wrapped = "here you go: {\"reply\":\"ok\",\"follow_up_question\":\"\"} thanks";
        let bare = "{\"reply\":\"ok\",\"follow_up_question\":\"\"}";
        assert_eq!(extract_json(wrapped), extract_json(bare));
        assert!(extract_json(wrapped).is_some());
    }

    #[test]
    fn extract_json_gives_up_on_garbage() {
        assert!(extract_json("no json here at all").is_none());
        assert!(extract_json("} backwards {").is_none());
        assert!(extract_json("{ not: valid").is_none());
    }

    #[test]
    fn coerce_string_defaults_missing_and_null_to_empty() {
        assert_eq!(coerce_string(None), "");
        assert_eq!(coerce_string(Some(&Value::Null)), "");
    }

    #[test]
    fn coerce_string_trims_and_stringifies() {
        assert_eq!(coerce_string(Some(&json!("  hello  "))), "hello");
        assert_eq!(coerce_string(Some(&json!(42))), "42");
        assert_eq!(coerce_string(Some(&json!(true))), "true");
    }

    #[test]
    fn coerce_string_list_filters_empties_and_non_arrays() {
        let v = json!(["a", "", null, "b", 3]);
        assert_eq!(coerce_string_list(Some(&v)), vec!["a", "b", "3"]);
        assert_eq!(coerce_string_list(Some(&json!("not an array"))), Vec::<String>::new());
        assert_eq!(coerce_string_list(None), Vec::<String>::new());
    }

    #[test]
    fn no_client_without_api_key() {
        let config = Config::offline();
        assert!(LlmClient::from_config(&config).is_none());
    }
}
