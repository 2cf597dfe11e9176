//! Prompt builders for the model-backed modes.
//!
//! Prompts are the product here: wording changes alter behaviour, so the
//! templates are kept verbatim and assembled with plain `format!`. Every
//! prompt demands strict JSON and pairs with the same system instruction.

use quill_common::Tier;

/// System instruction shared by every model call.
pub const STRICT_JSON_SYSTEM_PROMPT: &str = "Return STRICT JSON ONLY. No markdown. No extra keys.";

/// User prompt for the support mode. Human-centred rules; the model must not
/// mention incidents or reach for jargon.
pub fn build_support_prompt(text: &str) -> String {
    format!(
        "Return STRICT JSON ONLY.\n\
         \n\
         Schema:\n\
         {{ \"reply\": string, \"follow_up_question\": string }}\n\
         \n\
         Rules:\n\
         - No humour, no sarcasm.\n\
         - Brief validation (1–2 lines).\n\
         - 1–4 practical calming/grounding steps max.\n\
         - Ask ONE gentle question max.\n\
         - Do NOT mention incidents.\n\
         -You are calm, grounded, and unafraid of silence.\n\
         -You do not rush, fix, or escalate.\n\
         -You recognise before you advise.\n\
         \n\
         -You sound like a human who has been here before — steady, present, and not surprised by what you’re hearing.\n\
         \n\
         -Start by reflecting what you heard in plain language.\n\
         -Avoid labels, techniques, or mental-health jargon unless the user uses them first.\n\
         \n\
         -Stay with the feeling for one turn longer than feels efficient.\n\
         -If you offer help, ask permission first.\n\
         \n\
         -Your job is not to solve the problem.\n\
         -Your job is to make this moment safer to be in.\n\
         \n\
         -This is human-centred safety.\n\
         -We haven’t lost the HSE core — we’ve wrapped it in care, instead of compliance.\n\
         -If the user shares grief, loss, shock, or something they cannot change right now, do NOT ask a question.\n\
         -Stay with them for one full turn longer than feels efficient.\n\
         -Silence and presence are valid responses.\n\
         -If the user repeats the same feeling (e.g. “depressed”, “still depressed”, “I already said that”), acknowledge that you heard it the first time.\n\
         -Do NOT ask another question in that turn.\n\
         -Name the repetition gently (e.g. “I hear that this hasn’t shifted”).\n\
         -Stay present rather than moving the conversation forward.\n\
         \n\
         \n\
         \n\
         {text}"
    )
}

fn tier_line(tier: Tier) -> &'static str {
    match tier {
        Tier::FatalOrLifeAltering => {
            "Find EXACTLY ONE real-world OFFSHORE fatality OR life-altering injury incident"
        }
        Tier::SeriousInjury => {
            "Find EXACTLY ONE real-world OFFSHORE serious injury incident (non-fatal, but major harm)"
        }
        Tier::Incident => {
            "Find EXACTLY ONE real-world OFFSHORE incident/accident (significant event; may be dangerous occurrence/near miss)"
        }
    }
}

fn tier_constraint(tier: Tier) -> &'static str {
    match tier {
        Tier::FatalOrLifeAltering => "- Extreme-only: fatality or life-altering injury",
        Tier::SeriousInjury => {
            "- Serious-injury: non-fatal but major harm (e.g., hospitalisation/major trauma/amputation etc.)"
        }
        Tier::Incident => "- Significant incident: credible severe potential (still offshore-only).",
    }
}

/// User prompt for one severity tier of the grounding lookup.
pub fn build_tier_prompt(tier: Tier, concern: &str) -> String {
    format!(
        "Return STRICT JSON ONLY.\n\
         \n\
         {tier_line}\n\
         where the user's concern would be a clear contributory factor.\n\
         \n\
         Hard constraints:\n\
         - Offshore-only (platform, rig, vessel, offshore wind, marine ops)\n\
         {tier_constraint}\n\
         - Exactly ONE incident (no multiples)\n\
         - Prefer UK sources (HSE, MAIB). If none, best offshore source\n\
         - Do NOT fabricate\n\
         - If you cannot verify, return status=\"no_match\"\n\
         - Provide ONE source_url\n\
         \n\
         Then provide UK HSE legislation duties (Acts/Regs only) with plain-English duties.\n\
         \n\
         Legislation rules (IMPORTANT):\n\
         - Acts/Regs only (no guidance)\n\
         - 2–5 items\n\
         - Each item MUST cite a specific section/regulation (e.g. \"HSWA 1974 s.2(1)-(2)\", \"MHSWR 1999 reg.3\")\n\
         - Each item link MUST be a legislation.gov.uk link that goes to that specific section/regulation page\n\
         \x20 (not the top of the Act/Regs)\n\
         \n\
         Schema:\n\
         {{\n\
         \x20 \"status\": \"ok\" | \"no_match\",\n\
         \x20 \"incident\": {{\n\
         \x20   \"title\": string,\n\
         \x20   \"date\": string,\n\
         \x20   \"what_happened\": string,\n\
         \x20   \"why_relevant\": string[],\n\
         \x20   \"source_url\": string\n\
         \x20 }} | null,\n\
         \x20 \"legislation\": {{\n\
         \x20   \"title\": string,\n\
         \x20   \"why_it_applies\": string,\n\
         \x20   \"link\": string\n\
         \x20 }}[] | null\n\
         }}\n\
         \n\
         User concern:\n\
         {concern}",
        tier_line = tier_line(tier),
        tier_constraint = tier_constraint(tier),
    )
}

/// User prompt for the rich grounding lookup: several cases plus HSE items
/// tagged with their origin, and optionally a plain-English law explanation.
pub fn build_rich_prompt(concern: &str, case_count: usize, explain_law: bool) -> String {
    let explain_clause = if explain_law {
        "\n- Also provide \"explain_law\": a short plain-English paragraph tying the duties to this concern.\n"
    } else {
        "\n"
    };
    format!(
        "Return STRICT JSON ONLY.\n\
         \n\
         Find up to {case_count} real-world OFFSHORE incidents/accidents where the user's concern\n\
         would be a clear contributory factor.\n\
         \n\
         Hard constraints:\n\
         - Offshore-only (platform, rig, vessel, offshore wind, marine ops)\n\
         - Order from most to least severe\n\
         - severity is an integer 1–5 (5 = fatality/life-altering)\n\
         - Prefer UK sources (HSE, MAIB). If none, best offshore source\n\
         - Do NOT fabricate\n\
         - Each case needs ONE source_url\n\
         \n\
         Then provide UK HSE legislation duties (Acts/Regs only) with plain-English duties.\n\
         \n\
         Legislation rules (IMPORTANT):\n\
         - Acts/Regs only (no guidance)\n\
         - 2–5 items\n\
         - Each item MUST cite a specific section/regulation\n\
         - Each item link MUST be a legislation.gov.uk link to that specific section/regulation page\n\
         - Each item carries \"origin\": which regime it comes from (e.g. \"HSWA\", \"PUWER\", \"LOLER\", \"MHSWR\", \"PFEER\")\n\
         {explain_clause}\
         Schema:\n\
         {{\n\
         \x20 \"status\": \"ok\" | \"no_match\",\n\
         \x20 \"cases\": {{\n\
         \x20   \"title\": string,\n\
         \x20   \"date\": string,\n\
         \x20   \"severity\": number,\n\
         \x20   \"what_happened\": string,\n\
         \x20   \"why_relevant\": string[],\n\
         \x20   \"source_url\": string\n\
         \x20 }}[],\n\
         \x20 \"hse\": {{\n\
         \x20   \"title\": string,\n\
         \x20   \"why_it_applies\": string,\n\
         \x20   \"link\": string,\n\
         \x20   \"origin\": string\n\
         \x20 }}[],\n\
         \x20 \"explain_law\": string | null\n\
         }}\n\
         \n\
         User concern:\n\
         {concern}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn support_prompt_embeds_the_text_last() {
        let p = build_support_prompt("I feel alone out here");
        assert!(p.ends_with("I feel alone out here"));
        assert!(p.contains("Do NOT mention incidents."));
    }

    #[test]
    fn tier_prompts_differ_only_in_tier_wording() {
        let fatal = build_tier_prompt(Tier::FatalOrLifeAltering, "winch wire under tension");
        let serious = build_tier_prompt(Tier::SeriousInjury, "winch wire under tension");
        let incident = build_tier_prompt(Tier::Incident, "winch wire under tension");
        assert!(fatal.contains("fatality OR life-altering injury"));
        assert!(serious.contains("non-fatal, but major harm"));
        assert!(incident.contains("dangerous occurrence/near miss"));
        for p in [&fatal, &serious, &incident] {
            assert!(p.contains("legislation.gov.uk"));
            assert!(p.ends_with("winch wire under tension"));
        }
    }

    #[test]
    fn rich_prompt_respects_flags() {
        let plain = build_rich_prompt("dropped object zone", 2, false);
        let explained = build_rich_prompt("dropped object zone", 4, true);
        assert!(plain.contains("up to 2 real-world"));
        assert!(!plain.contains("plain-English paragraph"));
        assert!(explained.contains("up to 4 real-world"));
        assert!(explained.contains("plain-English paragraph"));
        assert!(explained.contains("\"origin\""));
    }
}
