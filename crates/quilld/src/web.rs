//! Embedded single-page chat UI.
//!
//! Static HTML+JS, no build step, no websockets. The page holds the
//! conversation state: an append-only thread, a hard support latch (once
//! distress fires, every later message stays in support mode), and a yes/no
//! gate before the grounding step. The opener is substituted server-side so
//! the banner never flashes empty.

use std::sync::Arc;

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::clarify;
use crate::server::AppState;

const CHAT_PAGE: &str = include_str!("chat.html");

pub fn ui_routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(chat_page))
}

async fn chat_page() -> Html<String> {
    let opener = clarify::pick_opener(&mut rand::thread_rng());
    Html(CHAT_PAGE.replace("{{OPENER}}", opener))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_common::QUILL_OPENERS;

    #[tokio::test]
    async fn page_substitutes_a_real_opener() {
        let Html(page) = chat_page().await;
        assert!(!page.contains("{{OPENER}}"));
        assert!(QUILL_OPENERS.iter().any(|o| page.contains(o)));
    }

    #[test]
    fn template_wires_the_three_endpoints() {
        assert!(CHAT_PAGE.contains("/v1/support"));
        assert!(CHAT_PAGE.contains("/v1/clarify"));
        assert!(CHAT_PAGE.contains("/v1/grounding"));
    }
}
