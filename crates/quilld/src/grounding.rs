//! Grounding lookups: tiered single-incident and rich multi-case.
//!
//! Both lookups are model-backed when a client exists and fall back to the
//! static catalog when it doesn't, so the endpoints keep working without an
//! API key. Model output is coerced field-by-field; an incident missing any
//! of title/date/what_happened/source_url does not count as verified.

use quill_common::{
    GroundingIncident, GroundingResponse, HseItem, Incident, LegislationItem, RichCase,
    RichGroundingResponse, Tier, GROUNDING_NO_MATCH_NOTE,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::incidents;
use crate::llm::{self, LlmClient};
use crate::prompts;

const GROUNDING_TEMPERATURE: f32 = 0.1;

/// Cases returned by the rich lookup, without and with `more_cases`.
pub const RICH_DEFAULT_CASES: usize = 2;
pub const RICH_MORE_CASES: usize = 4;

fn tier_note(tier: Tier) -> &'static str {
    match tier {
        Tier::FatalOrLifeAltering => "Matched fatal/life-altering tier.",
        Tier::SeriousInjury => {
            "No verified fatal/life-altering match found; returned a verified serious-injury case instead."
        }
        Tier::Incident => {
            "No verified fatal/serious-injury match found; returned a verified offshore incident/accident instead."
        }
    }
}

/// Accept legislation in either of the two shapes the model produces: a flat
/// array of `{title, why_it_applies, link}`, or `{items: [{name, duty, link}]}`
/// from the older schema. Items missing any field are dropped; an empty
/// result becomes `None`.
fn coerce_legislation(parsed: &Value) -> Option<Vec<LegislationItem>> {
    let leg = parsed.get("legislation")?;

    let cleaned: Vec<LegislationItem> = if let Some(arr) = leg.as_array() {
        arr.iter()
            .map(|x| LegislationItem {
                title: llm::coerce_string(x.get("title")),
                why_it_applies: llm::coerce_string(x.get("why_it_applies")),
                link: llm::coerce_string(x.get("link")),
            })
            .filter(|x| !x.title.is_empty() && !x.why_it_applies.is_empty() && !x.link.is_empty())
            .collect()
    } else if let Some(items) = leg.get("items").and_then(Value::as_array) {
        items
            .iter()
            .map(|x| LegislationItem {
                title: llm::coerce_string(x.get("name")),
                why_it_applies: llm::coerce_string(x.get("duty")),
                link: llm::coerce_string(x.get("link")),
            })
            .filter(|x| !x.title.is_empty() && !x.why_it_applies.is_empty() && !x.link.is_empty())
            .collect()
    } else {
        return None;
    };

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

fn coerce_incident(parsed: &Value) -> Option<GroundingIncident> {
    let raw = parsed.get("incident")?;
    let incident = GroundingIncident {
        title: llm::coerce_string(raw.get("title")),
        date: llm::coerce_string(raw.get("date")),
        what_happened: llm::coerce_string(raw.get("what_happened")),
        why_relevant: llm::coerce_string_list(raw.get("why_relevant")),
        source_url: llm::coerce_string(raw.get("source_url")),
    };

    if incident.title.is_empty()
        || incident.date.is_empty()
        || incident.what_happened.is_empty()
        || incident.source_url.is_empty()
    {
        return None;
    }
    Some(incident)
}

/// One tier of the lookup. `None` means no verified match at this tier,
/// whatever the reason (call failure, unparseable output, unverified fields).
async fn call_tier(client: &LlmClient, tier: Tier, concern: &str) -> Option<GroundingResponse> {
    let prompt = prompts::build_tier_prompt(tier, concern);
    let content = match client
        .chat(prompts::STRICT_JSON_SYSTEM_PROMPT, &prompt, GROUNDING_TEMPERATURE)
        .await
    {
        Ok(content) => content,
        Err(e) => {
            warn!(?tier, error = %e, "Grounding tier call failed");
            return None;
        }
    };

    let parsed = llm::extract_json(&content)?;
    if parsed.get("status").and_then(Value::as_str) != Some("ok") {
        return None;
    }
    let incident = coerce_incident(&parsed)?;
    let legislation = coerce_legislation(&parsed);

    info!(?tier, title = %incident.title, "Grounding tier matched");
    Some(GroundingResponse::ok(tier, incident, legislation, tier_note(tier)))
}

fn catalog_incident(inc: &Incident) -> GroundingIncident {
    GroundingIncident {
        title: inc.title.clone(),
        date: inc.date.clone(),
        what_happened: inc.what_happened.clone(),
        why_relevant: inc.why_it_matters.clone(),
        source_url: inc.source_url.clone(),
    }
}

/// Grounding without a model: pick from the static catalog by tag overlap.
fn catalog_grounding(concern: &str) -> GroundingResponse {
    let (incident, matched) = incidents::select_incident(concern);
    match incident {
        Some(inc) => {
            let note = format!(
                "Matched against the built-in offshore case library (tags: {}).",
                matched.join(", ")
            );
            GroundingResponse::ok(Tier::Incident, catalog_incident(inc), None, note)
        }
        None => GroundingResponse::no_match(GROUNDING_NO_MATCH_NOTE),
    }
}

/// Tiered single-incident lookup: strictest tier first, stop at the first
/// verified match. Tier exhaustion (and an absent client) falls back to the
/// catalog before giving up. Always a 200-shaped envelope.
pub async fn tiered_grounding(llm: Option<&LlmClient>, concern: &str) -> GroundingResponse {
    if let Some(client) = llm {
        for tier in Tier::SEQUENCE {
            if let Some(response) = call_tier(client, tier, concern).await {
                return response;
            }
        }
    }

    catalog_grounding(concern)
}

fn coerce_rich_case(raw: &Value) -> RichCase {
    RichCase {
        title: llm::coerce_string(raw.get("title")),
        date: llm::coerce_string(raw.get("date")),
        severity: llm::coerce_i64(raw.get("severity")),
        what_happened: llm::coerce_string(raw.get("what_happened")),
        why_relevant: llm::coerce_string_list(raw.get("why_relevant")),
        source_url: llm::coerce_string(raw.get("source_url")),
    }
}

fn coerce_hse_item(raw: &Value) -> HseItem {
    HseItem {
        title: llm::coerce_string(raw.get("title")),
        why_it_applies: llm::coerce_string(raw.get("why_it_applies")),
        link: llm::coerce_string(raw.get("link")),
        origin: llm::coerce_string(raw.get("origin")),
    }
}

/// Map catalog severity (0-100) onto the 1-5 scale the rich shape uses.
fn banded_severity(severity: u32) -> i64 {
    ((severity / 20).clamp(1, 5)) as i64
}

/// Rich lookup without a model: top-ranked catalog entries, no legislation.
fn catalog_rich(concern: &str, limit: usize) -> RichGroundingResponse {
    let ranked = incidents::rank_incidents(&incidents::OFFSHORE_INCIDENTS, concern);
    if ranked.is_empty() {
        return RichGroundingResponse::error(
            "No matching case in the built-in offshore case library. Add 1–2 lines of detail: task, equipment, what’s moving, where people stand.",
        );
    }

    let cases: Vec<RichCase> = ranked
        .into_iter()
        .take(limit)
        .map(|(inc, _)| RichCase {
            title: inc.title.clone(),
            date: inc.date.clone(),
            severity: banded_severity(inc.severity),
            what_happened: inc.what_happened.clone(),
            why_relevant: inc.why_it_matters.clone(),
            source_url: inc.source_url.clone(),
        })
        .collect();

    RichGroundingResponse::ok(
        concern,
        cases,
        Vec::new(),
        None,
        Some("Served from the built-in offshore case library; no live lookup available.".to_string()),
    )
}

/// Rich multi-case lookup. Always a 200-shaped envelope; failures travel as
/// `status:"error"`.
pub async fn rich_grounding(
    llm: Option<&LlmClient>,
    concern: &str,
    more_cases: bool,
    explain_law: bool,
) -> RichGroundingResponse {
    let limit = if more_cases {
        RICH_MORE_CASES
    } else {
        RICH_DEFAULT_CASES
    };

    let Some(client) = llm else {
        return catalog_rich(concern, limit);
    };

    let prompt = prompts::build_rich_prompt(concern, limit, explain_law);
    let content = match client
        .chat(prompts::STRICT_JSON_SYSTEM_PROMPT, &prompt, GROUNDING_TEMPERATURE)
        .await
    {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Rich grounding call failed");
            return RichGroundingResponse::error("Lookup failed. Try again in a moment.");
        }
    };

    let Some(parsed) = llm::extract_json(&content) else {
        return RichGroundingResponse::error("Lookup returned an unusable response.");
    };

    // The rich shape is validated as a whole: status, cases and hse must all
    // be present, or the caller gets an explicit error instead of a partial.
    if parsed.get("status").and_then(Value::as_str) != Some("ok") {
        return RichGroundingResponse::error("Lookup found no verified match.");
    }
    let (Some(raw_cases), Some(raw_hse)) = (
        parsed.get("cases").and_then(Value::as_array),
        parsed.get("hse").and_then(Value::as_array),
    ) else {
        return RichGroundingResponse::error("Lookup returned an unusable response.");
    };

    let cases: Vec<RichCase> = raw_cases
        .iter()
        .map(coerce_rich_case)
        .filter(|c| !c.title.is_empty() && !c.source_url.is_empty())
        .take(limit)
        .collect();

    let hse: Vec<HseItem> = raw_hse
        .iter()
        .map(coerce_hse_item)
        .filter(|h| !h.title.is_empty() && !h.link.is_empty())
        .collect();

    let explain = if explain_law {
        let text = llm::coerce_string(parsed.get("explain_law"));
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    } else {
        None
    };

    RichGroundingResponse::ok(concern, cases, hse, explain, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn legislation_accepts_the_flat_shape() {
        let parsed = json!({
            "legislation": [
                { "title": "HSWA 1974 s.2(1)", "why_it_applies": "duty of care", "link": "https://www.legislation.gov.uk/ukpga/1974/37/section/2" },
                { "title": "", "why_it_applies": "dropped", "link": "x" }
            ]
        });
        let items = coerce_legislation(&parsed).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "HSWA 1974 s.2(1)");
    }

    #[test]
    fn legislation_accepts_the_older_items_shape() {
        let parsed = json!({
            "legislation": {
                "items": [
                    { "name": "LOLER 1998 reg.8", "duty": "plan lifts", "link": "https://www.legislation.gov.uk/uksi/1998/2307/regulation/8" }
                ]
            }
        });
        let items = coerce_legislation(&parsed).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "LOLER 1998 reg.8");
        assert_eq!(items[0].why_it_applies, "plan lifts");
    }

    #[test]
    fn legislation_empty_or_wrong_shape_is_none() {
        assert!(coerce_legislation(&json!({})).is_none());
        assert!(coerce_legislation(&json!({ "legislation": "nope" })).is_none());
        assert!(coerce_legislation(&json!({ "legislation": [] })).is_none());
        assert!(coerce_legislation(&json!({ "legislation": { "items": [{ "name": "", "duty": "", "link": "" }] } })).is_none());
    }

    #[test]
    fn incident_missing_required_fields_is_unverified() {
        let no_url = json!({ "incident": {
            "title": "t", "date": "d", "what_happened": "w", "why_relevant": [], "source_url": ""
        }});
        assert!(coerce_incident(&no_url).is_none());

        let full = json!({ "incident": {
            "title": "t", "date": "d", "what_happened": "w",
            "why_relevant": ["a"], "source_url": "https://example.invalid"
        }});
        assert!(coerce_incident(&full).is_some());
    }

    #[tokio::test]
    async fn degraded_tiered_grounding_uses_the_catalog() {
        let out = tiered_grounding(None, "water flooding in the lift shaft").await;
        assert_eq!(out.status, "ok");
        assert_eq!(out.tier, Some(Tier::Incident));
        let incident = out.incident.unwrap();
        assert!(incident.title.contains("FPF-1"));
        assert!(out.note.contains("lift"));
    }

    #[tokio::test]
    async fn degraded_tiered_grounding_no_overlap_is_no_match() {
        let out = tiered_grounding(None, "paperwork backlog in the office").await;
        assert_eq!(out.status, "no_match");
        assert!(out.incident.is_none());
        assert_eq!(out.note, GROUNDING_NO_MATCH_NOTE);
    }

    #[tokio::test]
    async fn degraded_rich_grounding_slices_and_bands_severity() {
        let out = rich_grounding(None, "gas leak and fire near the winch", false, false).await;
        assert_eq!(out.status, "ok");
        let cases = out.cases.unwrap();
        assert!(cases.len() <= RICH_DEFAULT_CASES);
        for case in &cases {
            assert!((1..=5).contains(&case.severity));
        }
        assert_eq!(out.hse.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn degraded_rich_grounding_no_overlap_is_an_error_envelope() {
        let out = rich_grounding(None, "nothing relevant here", true, true).await;
        assert_eq!(out.status, "error");
        assert!(out.error.is_some());
        assert!(out.cases.is_none());
    }

    #[test]
    fn severity_banding_stays_in_range() {
        assert_eq!(banded_severity(100), 5);
        assert_eq!(banded_severity(85), 4);
        assert_eq!(banded_severity(70), 3);
        assert_eq!(banded_severity(65), 3);
        assert_eq!(banded_severity(0), 1);
    }
}
