//! Wire types for the Quill intake endpoints.
//!
//! Every field that can arrive from outside (client body, query string, model
//! output) is defaulted so a partially-shaped payload deserializes instead of
//! erroring; the route layer decides what counts as missing.

use serde::{Deserialize, Serialize};

/// Conversational mode chosen for a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Support,
    Clarify,
}

/// Body for `POST /v1/clarify` and `POST /v1/support`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntakeRequest {
    #[serde(default)]
    pub text: String,
    /// Support endpoint only: skip the trigger check and stay in support mode.
    #[serde(default)]
    pub force_support: bool,
}

/// Reply envelope for the clarify and support modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeReply {
    pub mode: Mode,
    pub reply: String,
    pub follow_up_question: String,
}

/// In-band error body for non-200 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Usage hint returned by `GET` on the POST-only endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageNote {
    pub status: String,
    pub note: String,
}

/// Health envelope for `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// A record in the static offshore incident catalog.
///
/// `severity` is a relative extremity score (higher = more severe) used only
/// to break ties between incidents with equal tag overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub title: String,
    pub date: String,
    pub location: String,
    pub severity: u32,
    pub hazard_tags: Vec<String>,
    pub what_happened: String,
    pub why_it_matters: Vec<String>,
    pub source_url: String,
}

/// Severity band tried in sequence during tiered grounding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    FatalOrLifeAltering,
    SeriousInjury,
    Incident,
}

impl Tier {
    /// All tiers, strictest first. Lookup stops at the first verified match.
    pub const SEQUENCE: [Tier; 3] = [
        Tier::FatalOrLifeAltering,
        Tier::SeriousInjury,
        Tier::Incident,
    ];
}

/// Body for `POST /v1/grounding`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroundingRequest {
    #[serde(default)]
    pub concern: String,
}

/// A single verified real-world incident in a grounding response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundingIncident {
    pub title: String,
    pub date: String,
    pub what_happened: String,
    pub why_relevant: Vec<String>,
    pub source_url: String,
}

/// One legal-duty item (Acts/Regs only, with a section-level link).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegislationItem {
    pub title: String,
    pub why_it_applies: String,
    pub link: String,
}

/// Envelope for `POST /v1/grounding`. Always returned with HTTP 200 once the
/// concern field is present, so the client renders no-match in-band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundingResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    pub incident: Option<GroundingIncident>,
    pub legislation: Option<Vec<LegislationItem>>,
    pub note: String,
}

impl GroundingResponse {
    pub fn ok(
        tier: Tier,
        incident: GroundingIncident,
        legislation: Option<Vec<LegislationItem>>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            status: "ok".to_string(),
            tier: Some(tier),
            incident: Some(incident),
            legislation,
            note: note.into(),
        }
    }

    pub fn no_match(note: impl Into<String>) -> Self {
        Self {
            status: "no_match".to_string(),
            tier: None,
            incident: None,
            legislation: None,
            note: note.into(),
        }
    }
}

/// One case in a rich grounding response. `severity` (1-5) is trusted as the
/// model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichCase {
    pub title: String,
    pub date: String,
    pub severity: i64,
    pub what_happened: String,
    pub why_relevant: Vec<String>,
    pub source_url: String,
}

/// One legal-duty item in a rich grounding response. `origin` is trusted as
/// the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HseItem {
    pub title: String,
    pub why_it_applies: String,
    pub link: String,
    pub origin: String,
}

/// Envelope for `GET /v1/grounding/live`. Always HTTP 200; failures travel
/// in-band as `status:"error"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RichGroundingResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cases: Option<Vec<RichCase>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hse: Option<Vec<HseItem>>,
    #[serde(rename = "explainLaw", skip_serializing_if = "Option::is_none")]
    pub explain_law: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RichGroundingResponse {
    pub fn ok(
        concern: impl Into<String>,
        cases: Vec<RichCase>,
        hse: Vec<HseItem>,
        explain_law: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            status: "ok".to_string(),
            concern: Some(concern.into()),
            cases: Some(cases),
            hse: Some(hse),
            explain_law,
            note,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            concern: None,
            cases: None,
            hse: None,
            explain_law: None,
            note: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Mode::Support).unwrap(), "\"support\"");
        assert_eq!(serde_json::to_string(&Mode::Clarify).unwrap(), "\"clarify\"");
    }

    #[test]
    fn tier_serializes_like_the_wire_contract() {
        assert_eq!(
            serde_json::to_string(&Tier::FatalOrLifeAltering).unwrap(),
            "\"fatal_or_life_altering\""
        );
        assert_eq!(
            serde_json::to_string(&Tier::SeriousInjury).unwrap(),
            "\"serious_injury\""
        );
        assert_eq!(serde_json::to_string(&Tier::Incident).unwrap(), "\"incident\"");
    }

    #[test]
    fn intake_request_tolerates_empty_object() {
        let req: IntakeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_empty());
        assert!(!req.force_support);
    }

    #[test]
    fn grounding_no_match_has_null_incident_and_legislation() {
        let v = serde_json::to_value(GroundingResponse::no_match("note")).unwrap();
        assert_eq!(v["status"], "no_match");
        assert!(v["incident"].is_null());
        assert!(v["legislation"].is_null());
        assert!(v.get("tier").is_none());
    }
}
