//! Quill Common - shared envelopes and text pools for the intake service.
//!
//! Everything here is either a wire type (request/response JSON shapes) or an
//! immutable process-wide text pool. No I/O, no state.

pub mod pools;
pub mod types;

pub use pools::*;
pub use types::*;
