//! Canonical Quill text pools.
//!
//! The openers are verbatim and must not be clipped, paraphrased, or edited.
//! One is chosen uniformly at random per clarify reply; the choice is purely
//! cosmetic framing and carries no meaning downstream.

/// Canonical Quill openers (verbatim).
pub const QUILL_OPENERS: &[&str] = &[
    "Sonia sent you here while this is still a conversation and not yet a clean-up. That usually means we’ve got a window. What’s starting to look like it won’t stay boring?",
    "Right — this is the bit before everything tips from “bit dodgy” into “well, that went to shit”. Let’s get ahead of it. What’s lining itself up?",
    "Sonia routed you here before the fan’s spinning and the explanations start. Good call. What’s about to get flung everywhere?",
    "You’ve arrived in the narrow gap where we can still change the ending instead of narrating it afterwards. That’s rare. What’s brewing?",
    "Sonia doesn’t send people once it’s already gone bang — she sends them just before. So tell me what’s primed and waiting.",
    "This feels like the calm moment right before someone says “oh shit” and everything speeds up. Let’s avoid that sentence. What’s happening?",
    "Sonia sent you early enough that nobody’s pretending this was unavoidable yet. That’s useful. What’s the first thing that breaks if we do nothing?",
    "We’re still in the phase where this is a concern, not a salvage operation. That’s the best time to talk. What’s building?",
    "If this carries on unchanged, what’s the point where everyone looks at each other and goes “yeah… that tracks”? Let’s stop there.",
    "Sonia routed you here before the fan starts doing what fans do. What’s standing in its line of fire?",
    "Good — you’re here while this is still uncomfortable, not expensive or painful. That’s a gift. What’s the pressure point?",
    "This is the moment before things get loud, fast, or properly memorable for the wrong reasons. Let’s intervene. What’s the risk?",
    "Sonia sent you while “near miss” still applies. What’s the *near* bit before it graduates into something with forms?",
    "Let’s deal with this while it’s still a conversation you can have standing up, not a debrief you sit through later. What’s the trigger?",
    "You don’t end up here unless something’s about to tip from mildly shit into properly shit. What’s tipping?",
    "Sonia routed you here before anyone’s rehearsing the phrase “in hindsight”. That’s the sweet spot. What’s the first domino?",
    "This is still a heads-up, not an “ah hell” moment. That window doesn't stay open long. What's off?",
    "If nothing changes, what’s the exact moment everyone realises this was a bad idea? Let’s not reach it.",
    "Sonia sent you while the mess is still theoretical and nobody’s sweeping yet. Let’s keep it hypothetical. What’s the mechanism?",
    "This is the bit where we can still say “good catch” instead of “how the hell did we miss that?”. What did you catch?",
    "You’re here before the phrase “we should’ve sorted that” starts doing serious work. Let’s sort it. What’s wrong?",
    "Sonia doesn’t escalate after the bang — she escalates just before. So what’s primed to go bang if left alone?",
    "This is the last sensible moment before chaos starts adding its own commentary. What’s being ignored?",
    "If this keeps going, what’s the point where it all turns to shit and everyone pretends they saw it coming? Let’s beat that.",
    "Sonia sent you while the situation is still mostly intact. What’s threatening to make that no longer true?",
    "Let’s interrupt this before it turns into one of those “everyone bloody knew” situations that nobody actually acted on. What did everyone know?",
    "You’re here before the clean-up crew, the questions, and the awkward silences. That’s rare. What’s going wrong?",
    "Sonia routed you here while this is still preventable, not just explainable. What needs stopping right now?",
    "This is the “say it now or explain it forever” phase of events. What would you warn a mate about if they were walking in?",
    "Sonia sent you before the fan, the shit, gravity, and probability all have strong opinions. Take your time — what’s coming?",
];

/// Static support reply used whenever the model is unavailable or unusable.
pub const SUPPORT_FALLBACK_REPLY: &str =
    "I’m with you. One line only — what’s hitting you hardest right now?";

/// Note returned by tiered grounding when no tier and no catalog entry match.
pub const GROUNDING_NO_MATCH_NOTE: &str =
    "I couldn’t verify a suitable offshore case from your description. Go back and add 1–2 lines: \
     task, equipment, what’s under tension/moving, where people stand, and what control is missing.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opener_pool_is_complete() {
        assert_eq!(QUILL_OPENERS.len(), 30);
        assert!(QUILL_OPENERS.iter().all(|o| !o.trim().is_empty()));
    }

    #[test]
    fn fallback_reply_is_nonempty() {
        assert!(!SUPPORT_FALLBACK_REPLY.is_empty());
    }
}
