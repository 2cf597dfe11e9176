//! HTTP handlers, one router builder per concern.
//!
//! Status-code contract: missing input on the POST endpoints is a 400 with an
//! in-band `{error}` body; everything past validation is a 200, with failures
//! expressed inside the envelope. A malformed body is treated as an empty one
//! (via `Option<Json<...>>`), so "bad JSON" and "missing field" reject the
//! same way.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use quill_common::{
    ErrorBody, GroundingRequest, GroundingResponse, HealthResponse, IntakeRequest, ModeReply,
    RichGroundingResponse, UsageNote,
};
use serde::Deserialize;
use tracing::info;

use crate::clarify;
use crate::grounding;
use crate::server::AppState;
use crate::support;
use crate::triggers::{self, Classification};

type Rejection = (StatusCode, Json<ErrorBody>);

fn bad_request(message: &str) -> Rejection {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message)))
}

fn usage(note: &str) -> Json<UsageNote> {
    Json(UsageNote {
        status: "ok".to_string(),
        note: note.to_string(),
    })
}

pub fn clarify_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/v1/clarify",
        post(clarify_handler).get(|| async { usage("POST { text } to this route.") }),
    )
}

pub fn support_routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/v1/support",
        post(support_handler).get(|| async { usage("POST { text } to this route.") }),
    )
}

pub fn grounding_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/v1/grounding",
            post(grounding_handler).get(|| async { usage("POST { concern } to this route.") }),
        )
        .route("/v1/grounding/live", get(live_grounding_handler))
}

pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/v1/health", get(health_handler))
}

/// Clarify is the general intake: distress goes to support, everything else
/// gets the deterministic clarify reply.
async fn clarify_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<IntakeRequest>>,
) -> Result<Json<ModeReply>, Rejection> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let text = request.text.trim().to_string();
    if text.is_empty() {
        return Err(bad_request("Missing text"));
    }

    if triggers::classify(&text) == Classification::Support {
        info!(chars = text.len(), "Clarify input escalated to support");
        return Ok(Json(support::support_reply(state.llm.as_ref(), &text).await));
    }

    Ok(Json(clarify::build_clarify_reply(
        &text,
        &mut rand::thread_rng(),
    )))
}

/// Support only answers when distress triggered (or the caller latched it
/// with `force_support`); otherwise the caller is told to use clarify.
async fn support_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<IntakeRequest>>,
) -> Result<Json<ModeReply>, Rejection> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let text = request.text.trim().to_string();
    if text.is_empty() {
        return Err(bad_request("Missing text"));
    }

    if !request.force_support && !triggers::has_support_cue(&text) {
        return Err(bad_request("Support not triggered"));
    }

    Ok(Json(support::support_reply(state.llm.as_ref(), &text).await))
}

async fn grounding_handler(
    State(state): State<Arc<AppState>>,
    body: Option<Json<GroundingRequest>>,
) -> Result<Json<GroundingResponse>, Rejection> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let concern = request.concern.trim().to_string();
    if concern.is_empty() {
        return Err(bad_request("Missing concern"));
    }

    Ok(Json(
        grounding::tiered_grounding(state.llm.as_ref(), &concern).await,
    ))
}

#[derive(Debug, Default, Deserialize)]
struct LiveQuery {
    #[serde(default)]
    concern: String,
    #[serde(default)]
    more_cases: Option<String>,
    #[serde(default)]
    explain_law: Option<String>,
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true") | Some("yes"))
}

/// Rich lookup. Always 200; a missing concern is an in-band error so the
/// browser client renders it like any other result.
async fn live_grounding_handler(
    State(state): State<Arc<AppState>>,
    query: Option<Query<LiveQuery>>,
) -> Json<RichGroundingResponse> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let concern = query.concern.trim().to_string();
    if concern.is_empty() {
        return Json(RichGroundingResponse::error("Missing concern."));
    }

    Json(
        grounding::rich_grounding(
            state.llm.as_ref(),
            &concern,
            flag(query.more_cases.as_deref()),
            flag(query.explain_law.as_deref()),
        )
        .await,
    )
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accepts_the_usual_truthy_spellings() {
        assert!(flag(Some("1")));
        assert!(flag(Some("true")));
        assert!(flag(Some("yes")));
        assert!(!flag(Some("0")));
        assert!(!flag(Some("TRUE")));
        assert!(!flag(None));
    }
}
