//! Trigger predicates - substring cues that route a concern.
//!
//! Classification is resolved by priority order, not by content exclusivity:
//! a support cue always wins, even when the same text also carries hazard or
//! mechanical keywords. Within clarify mode the order is very-short -> noise
//! -> snapback -> winch/tugger -> default, first match wins.

/// Inputs shorter than this after trimming get the "one extra detail" ask.
pub const VERY_SHORT_LIMIT: usize = 25;

/// Emotional-distress cues. One canonical list, used by both the clarify and
/// support endpoints so they can never disagree about what counts as distress.
pub const SUPPORT_CUES: &[&str] = &[
    // explicit distress
    "i'm scared",
    "im scared",
    "scared",
    "terrified",
    "frightened",
    "panic",
    "panicking",
    "anxious",
    "anxiety",
    "overwhelmed",
    "can't cope",
    "cannot cope",
    "i can't cope",
    "i cannot cope",
    "i can't do this",
    "i cannot do this",
    "crying",
    "shaking",
    "i'm not ok",
    "im not ok",
    // alone / isolated / feeling unsafe
    "insecure",
    "alone",
    "lonely",
    "isolated",
    "no one to talk to",
    "unsafe",
    "not safe",
    "i don't feel safe",
    // new to the job
    "first time offshore",
    "first time off shore",
    "first trip offshore",
    "first hitch",
    "new offshore",
    "new to offshore",
    "never been offshore before",
    "new starter",
    "newbie",
    // mental health
    "depression",
    "depressed",
    "mental health",
    "mental-health",
    "burnt out",
    "burned out",
    "suicidal",
    // home and family
    "marriage",
    "divorce",
    "relationship",
    "partner",
    "missing my family",
    "miss my family",
    "missing family",
    "homesick",
    "kids",
    "children",
    "my mum",
    "my dad",
    "personal issue",
    "personal problems",
    "family issue",
    "stuff at home",
    "problems at home",
];

pub const NOISE_CUES: &[&str] = &[
    "noise", "noisy", "loud", "screech", "whine", "vibration", "rattle",
];

pub const SNAPBACK_CUES: &[&str] = &[
    "snapback",
    "snap-back",
    "snap back",
    "bight",
    "under tension",
    "taut",
    "tight line",
    "line of fire",
];

pub const WINCH_TUGGER_CUES: &[&str] = &[
    "winch", "tugger", "capstan", "heave", "hauling", "wire", "rope", "line", "cable", "chain",
];

/// General mechanical-hazard cues. Not part of the clarify dispatch order;
/// used to qualify degraded-mode grounding notes.
pub const HAZARD_CUES: &[&str] = &[
    "snapback",
    "snap-back",
    "snap back",
    "under tension",
    "tensioned",
    "tight line",
    "taut",
    "line of fire",
    "bight",
    "standing in the bight",
    "rope",
    "wire",
    "cable",
    "chain",
    "shackle",
    "tagline",
    "tugger",
    "winch",
    "snapback zone",
    "snapback zones",
    "unmarked",
    "no marking",
    "no signage",
    "no signs",
    "no barricade",
    "no barricades",
    "not barricaded",
    "exclusion zone",
    "no exclusion",
    "no demarcation",
    "not demarcated",
    "unguarded",
    "guard missing",
    "missing guard",
    "pinch point",
    "caught in",
    "trap point",
    "slip",
    "trip",
    "fall",
    "dropped object",
    "overhead",
    "working below",
];

/// How a piece of input text is classified. Computed fresh per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Support,
    ClarifyShort,
    ClarifyNoise,
    ClarifySnapback,
    ClarifyWinch,
    ClarifyDefault,
}

fn contains_any(text: &str, cues: &[&str]) -> bool {
    let t = text.to_lowercase();
    cues.iter().any(|c| t.contains(c))
}

pub fn has_support_cue(text: &str) -> bool {
    contains_any(text, SUPPORT_CUES)
}

pub fn has_noise_cue(text: &str) -> bool {
    contains_any(text, NOISE_CUES)
}

pub fn has_snapback_cue(text: &str) -> bool {
    contains_any(text, SNAPBACK_CUES)
}

pub fn has_winch_tugger_cue(text: &str) -> bool {
    contains_any(text, WINCH_TUGGER_CUES)
}

pub fn has_hazard_cue(text: &str) -> bool {
    contains_any(text, HAZARD_CUES)
}

pub fn is_very_short(text: &str) -> bool {
    text.trim().chars().count() < VERY_SHORT_LIMIT
}

/// Classify input in the fixed priority order. The route layer rejects
/// empty/whitespace-only input before this runs.
pub fn classify(text: &str) -> Classification {
    if has_support_cue(text) {
        return Classification::Support;
    }
    if is_very_short(text) {
        return Classification::ClarifyShort;
    }
    if has_noise_cue(text) {
        return Classification::ClarifyNoise;
    }
    if has_snapback_cue(text) {
        return Classification::ClarifySnapback;
    }
    if has_winch_tugger_cue(text) {
        return Classification::ClarifyWinch;
    }
    Classification::ClarifyDefault
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_cue_beats_hazard_keywords() {
        // Contains winch + snapback + noise cues, but "anxious" must win.
        let text = "the winch snapback zone is so loud I'm getting anxious about it";
        assert!(has_winch_tugger_cue(text));
        assert!(has_snapback_cue(text));
        assert!(has_noise_cue(text));
        assert_eq!(classify(text), Classification::Support);
    }

    #[test]
    fn very_short_beats_mechanical_cues() {
        // Under 25 chars, so the short ask wins even with a winch cue.
        assert_eq!(classify("winch is broken"), Classification::ClarifyShort);
    }

    #[test]
    fn noise_checked_before_snapback_and_winch() {
        let text = "there is a loud screech whenever the winch line goes taut";
        assert_eq!(classify(text), Classification::ClarifyNoise);
    }

    #[test]
    fn snapback_checked_before_winch() {
        let text = "people keep standing in the bight while the tugger is hauling";
        assert_eq!(classify(text), Classification::ClarifySnapback);
    }

    #[test]
    fn winch_cue_when_no_higher_priority_match() {
        let text = "crew positioning loads with the capstan without a toolbox talk";
        assert_eq!(classify(text), Classification::ClarifyWinch);
    }

    #[test]
    fn default_when_nothing_matches() {
        let text = "handrail on the mezzanine deck has been corroded through for weeks";
        assert_eq!(classify(text), Classification::ClarifyDefault);
    }

    #[test]
    fn cues_match_case_insensitively() {
        assert!(has_support_cue("I AM SCARED OF THIS"));
        assert!(has_noise_cue("LOUD rattle"));
    }

    #[test]
    fn short_limit_counts_chars_after_trim() {
        assert!(is_very_short("   hi   "));
        assert!(!is_very_short("this sentence is definitely long enough"));
    }

    #[test]
    fn hazard_cues_cover_controls_gaps() {
        assert!(has_hazard_cue("the pinch point is unguarded"));
        assert!(has_hazard_cue("no barricade around the lift"));
        assert!(!has_hazard_cue("the canteen menu changed"));
    }
}
