//! Quill daemon - conversational intake for offshore-safety concerns.
//!
//! Request flow: parse body -> trigger predicates -> either the deterministic
//! clarify builder or one awaited model call -> typed envelope. No state
//! survives a request except the immutable pools (openers, trigger phrases,
//! incident catalog).

pub mod clarify;
pub mod config;
pub mod grounding;
pub mod incidents;
pub mod llm;
pub mod prompts;
pub mod routes;
pub mod server;
pub mod support;
pub mod triggers;
pub mod web;
