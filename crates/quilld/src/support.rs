//! Support mode: one model turn in the Quill voice, or the static fallback.
//!
//! This path must never error outward. No client, a failed call, unusable
//! JSON, or an empty reply all collapse to the same safe envelope.

use quill_common::{Mode, ModeReply, SUPPORT_FALLBACK_REPLY};
use tracing::warn;

use crate::llm::{self, LlmClient};
use crate::prompts;

const SUPPORT_TEMPERATURE: f32 = 0.2;

fn fallback() -> ModeReply {
    ModeReply {
        mode: Mode::Support,
        reply: SUPPORT_FALLBACK_REPLY.to_string(),
        follow_up_question: String::new(),
    }
}

/// Produce the support reply for already-validated input text.
pub async fn support_reply(llm: Option<&LlmClient>, text: &str) -> ModeReply {
    let Some(client) = llm else {
        return fallback();
    };

    let prompt = prompts::build_support_prompt(text);
    let content = match client
        .chat(prompts::STRICT_JSON_SYSTEM_PROMPT, &prompt, SUPPORT_TEMPERATURE)
        .await
    {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Support model call failed, serving fallback");
            return fallback();
        }
    };

    let Some(parsed) = llm::extract_json(&content) else {
        warn!("Support reply was not parseable JSON, serving fallback");
        return fallback();
    };

    let mut reply = llm::coerce_string(parsed.get("reply"));
    if reply.is_empty() {
        reply = SUPPORT_FALLBACK_REPLY.to_string();
    }
    let follow_up_question = llm::coerce_string(parsed.get("follow_up_question"));

    ModeReply {
        mode: Mode::Support,
        reply,
        follow_up_question,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_client_serves_the_static_fallback() {
        let out = support_reply(None, "I'm scared and I can't cope").await;
        assert_eq!(out.mode, Mode::Support);
        assert_eq!(out.reply, SUPPORT_FALLBACK_REPLY);
        assert!(out.follow_up_question.is_empty());
    }
}
