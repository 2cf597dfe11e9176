//! Deterministic clarify replies - no model call, Quill voice, short.
//!
//! Every reply is prefixed with one opener drawn uniformly at random from the
//! canonical pool. The opener is decorative framing only; nothing downstream
//! may parse it. The RNG is injected so tests can seed it.

use quill_common::{Mode, ModeReply, QUILL_OPENERS};
use rand::Rng;

use crate::triggers;

/// Literal follow-up example for the very-short ask. Also asserted verbatim
/// by the integration suite.
pub const SHORT_FOLLOW_UP: &str =
    "Example: “winch hauling in wire on deck, people near the bight”";

pub const DEFAULT_FOLLOW_UP: &str = "Example: “unguarded pinch point on hatch crane pedestal”";

/// Pick one opener uniformly at random.
pub fn pick_opener<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    QUILL_OPENERS[rng.gen_range(0..QUILL_OPENERS.len())]
}

/// Build the deterministic clarify reply. Dispatch order is the builder's
/// own: very-short -> noise -> snapback -> winch/tugger -> default, first
/// match wins. Support cues are irrelevant here: the very-short ask applies
/// to ANY trimmed input under the limit, whatever it says, so this function
/// must not route through the support-first classifier.
pub fn build_clarify_reply<R: Rng + ?Sized>(text: &str, rng: &mut R) -> ModeReply {
    let opener = pick_opener(rng);

    let (body, follow_up_question) = if triggers::is_very_short(text) {
        (
            "Right — keep it simple. Give me ONE extra detail so I don’t guess wrong:\n\
             • What exactly is happening (1 line)?"
                .to_string(),
            SHORT_FOLLOW_UP.to_string(),
        )
    } else if triggers::has_noise_cue(text) {
        (
            "Okay — noise.\n\
             Which bit is making it (winch/tugger/motor/gearbox), and where is it (deck/engine room/near bunks)?"
                .to_string(),
            "Is it continuous, or only under load?".to_string(),
        )
    } else if triggers::has_snapback_cue(text) {
        (
            "Snapback risk then.\n\
             Where’s the line under tension, and where are people standing right now (relative to the line)?"
                .to_string(),
            "Also: what’s missing — marking, barricade, or someone enforcing it?".to_string(),
        )
    } else if triggers::has_winch_tugger_cue(text) {
        (
            "Right — winch/tugger situation.\n\
             What’s the task (hauling/lifting/positioning), and what’s the line/load doing (moving/static/under tension)?"
                .to_string(),
            "And what’s missing: marking/barricade/signage/toolbox talk/PTW?".to_string(),
        )
    } else {
        (
            "Right — keep it simple.\n\
             What’s the hazard (in 3–6 words), and where is it (exact location)?"
                .to_string(),
            DEFAULT_FOLLOW_UP.to_string(),
        )
    };

    ModeReply {
        mode: Mode::Clarify,
        reply: format!("{opener}\n\n{body}"),
        follow_up_question,
    }
}
