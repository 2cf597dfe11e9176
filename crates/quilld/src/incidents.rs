//! Static offshore incident catalog and the tag-overlap selector.
//!
//! The catalog is read-only, built once, and shared across requests. The
//! selector is pure: tokenize the concern, count hazard-tag overlap per
//! incident, rank by overlap then severity. Tags are single words; a
//! multi-word tag ("line of fire") can never match a token and is carried
//! for display only.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use quill_common::Incident;

/// The catalog. Severity is a relative extremity score, higher = more severe.
pub static OFFSHORE_INCIDENTS: Lazy<Vec<Incident>> = Lazy::new(|| {
    vec![
        Incident {
            id: "piper-alpha-1988".to_string(),
            title: "Piper Alpha disaster (explosion & fire)".to_string(),
            date: "6 July 1988".to_string(),
            location: "North Sea (UK sector), ~120 miles NE of Aberdeen".to_string(),
            severity: 100,
            hazard_tags: tags(&[
                "hydrocarbon",
                "gas",
                "leak",
                "fire",
                "explosion",
                "permit",
                "handover",
                "isolation",
                "maintenance",
                "process",
                "pfeer",
                "major accident",
            ]),
            what_happened: "A catastrophic offshore installation explosion and fire led to the \
                loss of 167 lives. The subsequent public inquiry drove fundamental changes in \
                offshore safety management and control of major accident hazards."
                .to_string(),
            why_it_matters: lines(&[
                "Major accident hazards offshore escalate fast: leaks + ignition + compromised barriers.",
                "Shift handover / isolation / permit-to-work failures can become fatal at system scale.",
                "Once control and emergency systems are impaired, people run out of options quickly.",
            ]),
            source_url: "https://www.hse.gov.uk/offshore/piper-alpha-disaster-public-inquiry.htm"
                .to_string(),
        },
        Incident {
            id: "brent-charlie-hcr-2017".to_string(),
            title: "Shell Brent Charlie: major hydrocarbon release in a confined leg".to_string(),
            date: "19 May 2017".to_string(),
            location: "Brent Charlie platform, North Sea".to_string(),
            severity: 85,
            hazard_tags: tags(&[
                "hydrocarbon",
                "gas",
                "release",
                "leak",
                "corrosion",
                "pipework",
                "confined space",
                "ventilation",
                "asphyxiation",
                "fire",
                "explosion",
                "pfeer",
                "major accident",
            ]),
            what_happened: "An uncontrolled release involved ~200kg of gas and ~1,550kg of crude \
                oil inside a concrete leg column. HSE described it as the largest uncontrolled \
                hydrocarbon release on the UK Continental Shelf reported to HSE in 2017, with \
                potential catastrophic consequences if ignited."
                .to_string(),
            why_it_matters: lines(&[
                "Confined spaces offshore can become unsurvivable quickly (asphyxiation + explosion risk).",
                "Temporary systems left in place can corrode and fail if not managed as safety-critical.",
                "Safety-critical ventilation and maintenance history matter when something goes wrong.",
            ]),
            source_url: "https://press.hse.gov.uk/2025/11/28/shell-uk-fined-560000-following-major-hydrocarbon-release/"
                .to_string(),
        },
        Incident {
            id: "fpf1-lift-shaft-flooding-2020".to_string(),
            title: "FPF-1: lift shaft flooding during descent (near drowning / entrapment risk)"
                .to_string(),
            date: "10 December 2020".to_string(),
            location: "FPF-1 floating platform, North Sea".to_string(),
            severity: 70,
            hazard_tags: tags(&[
                "lift",
                "elevator",
                "shaft",
                "flooding",
                "water",
                "confined space",
                "entrapment",
                "night shift",
                "procedure",
                "alarm",
                "maintenance",
            ]),
            what_happened: "Three workers descended into a lift in a platform leg when water \
                began flooding the shaft. The lift contacted water and they emergency-stopped \
                and escaped. HSE described the outcome as only a matter of good fortune not \
                becoming serious injury or worse."
                .to_string(),
            why_it_matters: lines(&[
                "Entrapment + flooding + limited egress is a rapid escalation pathway offshore.",
                "Missing alarms and incorrect procedures remove the early warning you rely on.",
                "Night shift and task pressure increase the chance people proceed into a bad state.",
            ]),
            source_url: "https://press.hse.gov.uk/2025/06/17/oil-and-gas-operator-following-incident-on-north-sea-platform/"
                .to_string(),
        },
        Incident {
            id: "rowan-gorilla-vii-crane-boom-collapse-2016".to_string(),
            title: "Rowan Gorilla VII: offshore crane boom collapse (catastrophic near-miss)"
                .to_string(),
            date: "31 March 2016".to_string(),
            location: "North Sea (offshore)".to_string(),
            severity: 65,
            hazard_tags: tags(&[
                "crane",
                "lifting",
                "boom",
                "collapse",
                "dropped object",
                "line of fire",
                "cement",
                "hose",
                "rig",
            ]),
            what_happened: "A crane boom collapsed catastrophically offshore; debris damaged a \
                nearby vessel and a hose whipped and ruptured, releasing cement dust. Nobody \
                was hurt, but HSE called it an “accident waiting to happen”."
                .to_string(),
            why_it_matters: lines(&[
                "Lifting failures can turn into multi-person fatalities without warning.",
                "Flying debris + hose whip + loss of control = line-of-fire chaos.",
                "Near-misses offshore are often ‘missed by inches’ not ‘safe by design’.",
            ]),
            source_url: "https://press.hse.gov.uk/2023/12/21/offshore-drilling-company-fined-after-crane-boom-collapse/"
                .to_string(),
        },
    ]
});

fn tags(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|t| t.to_string()).collect()
}

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|l| l.to_string()).collect()
}

/// Lower-case, strip everything but letters/digits/hyphen, split on
/// whitespace, collapse duplicates.
fn tokenize(s: &str) -> HashSet<String> {
    s.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .map(|t| t.to_string())
        .collect()
}

/// Rank every incident in `catalog` against the concern: matched tags keep
/// their declared order, score is the match count, order is score descending
/// then severity descending. Equal score and severity keeps catalog order
/// (stable sort), so results are deterministic.
pub fn rank_incidents<'a>(
    catalog: &'a [Incident],
    concern: &str,
) -> Vec<(&'a Incident, Vec<&'a str>)> {
    let tokens = tokenize(concern);

    let mut scored: Vec<(&Incident, Vec<&str>)> = catalog
        .iter()
        .filter_map(|inc| {
            let matched: Vec<&str> = inc
                .hazard_tags
                .iter()
                .map(String::as_str)
                .filter(|t| tokens.contains(*t))
                .collect();
            if matched.is_empty() {
                None
            } else {
                Some((inc, matched))
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.1.len()
            .cmp(&a.1.len())
            .then_with(|| b.0.severity.cmp(&a.0.severity))
    });
    scored
}

/// Pick the single most relevant incident from `catalog`, or `(None, [])`
/// when nothing overlaps at all.
pub fn select_from<'a>(
    catalog: &'a [Incident],
    concern: &str,
) -> (Option<&'a Incident>, Vec<&'a str>) {
    let mut ranked = rank_incidents(catalog, concern);
    if ranked.is_empty() {
        (None, Vec::new())
    } else {
        let (incident, matched) = ranked.remove(0);
        (Some(incident), matched)
    }
}

/// Select against the static catalog.
pub fn select_incident(concern: &str) -> (Option<&'static Incident>, Vec<&'static str>) {
    select_from(&OFFSHORE_INCIDENTS, concern)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(id: &str, severity: u32, tag_list: &[&str]) -> Incident {
        Incident {
            id: id.to_string(),
            title: format!("Synthetic {id}"),
            date: "1 January 2000".to_string(),
            location: "North Sea".to_string(),
            severity,
            hazard_tags: tags(tag_list),
            what_happened: "test".to_string(),
            why_it_matters: vec![],
            source_url: "https://example.invalid".to_string(),
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let concern = "gas leak near the permit office during maintenance handover";
        let first = select_incident(concern);
        for _ in 0..5 {
            let again = select_incident(concern);
            assert_eq!(first.0.map(|i| &i.id), again.0.map(|i| &i.id));
            assert_eq!(first.1, again.1);
        }
    }

    #[test]
    fn zero_overlap_returns_none_and_empty_tags() {
        assert_eq!(select_incident(""), (None, Vec::new()));
        assert_eq!(
            select_incident("the coffee machine in the mess is out of order"),
            (None, Vec::new())
        );
    }

    #[test]
    fn highest_overlap_wins() {
        // lift + shaft + flooding + water: four FPF-1 tags, nothing else
        // scores above one.
        let (incident, matched) =
            select_incident("water flooding the lift shaft again on nights");
        assert_eq!(incident.unwrap().id, "fpf1-lift-shaft-flooding-2020");
        assert_eq!(matched, vec!["lift", "shaft", "flooding", "water"]);
    }

    #[test]
    fn matched_tags_keep_declared_order_not_token_order() {
        // Tokens arrive in a different order than the tag declarations.
        let (_, matched) = select_incident("water in the shaft, flooding, lift stuck");
        assert_eq!(matched, vec!["lift", "shaft", "flooding", "water"]);
    }

    #[test]
    fn equal_overlap_breaks_tie_by_severity() {
        let catalog = vec![
            synthetic("low-severity", 50, &["winch"]),
            synthetic("high-severity", 90, &["winch"]),
        ];
        let (incident, matched) = select_from(&catalog, "the winch is playing up");
        assert_eq!(incident.unwrap().id, "high-severity");
        assert_eq!(matched, vec!["winch"]);
    }

    #[test]
    fn equal_score_and_severity_keeps_catalog_order() {
        let catalog = vec![
            synthetic("first", 70, &["winch"]),
            synthetic("second", 70, &["winch"]),
        ];
        let (incident, _) = select_from(&catalog, "winch trouble on deck");
        assert_eq!(incident.unwrap().id, "first");
    }

    #[test]
    fn tokenizer_strips_punctuation_and_collapses_duplicates() {
        let tokens = tokenize("Gas, gas!! LEAK... (gas) fire-watch");
        assert!(tokens.contains("gas"));
        assert!(tokens.contains("leak"));
        assert!(tokens.contains("fire-watch"));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn multi_word_tags_never_match_single_tokens() {
        // "major accident" is declared on two incidents but tokens are single
        // words, so on its own it selects nothing.
        assert_eq!(select_incident("major accident"), (None, Vec::new()));
    }
}
