//! Behavior Index: job → competency → normalized behavior → expected rating.
//!
//! Built once from the raw Behaviors table. Rows with no job, competency or
//! behavior (after normalization) or with a non-numeric rating are dropped.
//! Duplicate (job, competency, behavior) keys resolve last-write-wins in row order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

static ORDINAL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid regex"));

/// One row of the Behaviors table as read from the catalog, before normalization.
#[derive(Debug, Clone, Default)]
pub struct RawBehaviorRow {
    pub job_title: Option<String>,
    pub competency: Option<String>,
    pub behavior: Option<String>,
    pub rating: Option<f64>,
}

/// A behavior as shown on the survey form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SurveyBehavior {
    /// Ordinal prefix stripped, original casing.
    pub label: String,
    /// Normalized key used for rating lookups.
    pub key: String,
}

/// Strips a leading `"<digits>. "` prefix and surrounding whitespace, keeping case.
pub fn display_label(raw: &str) -> String {
    ORDINAL_PREFIX.replace(raw.trim(), "").trim().to_string()
}

/// Normalizes a behavior description into its lookup key:
/// ordinal prefix stripped, trimmed, lowercased.
pub fn normalize_behavior(raw: &str) -> String {
    display_label(raw).to_lowercase()
}

type CompetencyBehaviors = HashMap<String, BTreeMap<String, f64>>;

#[derive(Debug, Clone, Default)]
pub struct BehaviorIndex {
    by_job: HashMap<String, CompetencyBehaviors>,
    /// Survey listing: competency → behaviors sorted by raw text, unique by key.
    survey: BTreeMap<String, Vec<SurveyBehavior>>,
    known_keys: BTreeSet<String>,
}

impl BehaviorIndex {
    pub fn build(rows: &[RawBehaviorRow]) -> Self {
        let mut by_job: HashMap<String, CompetencyBehaviors> = HashMap::new();
        let mut raw_by_competency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut dropped = 0usize;

        for row in rows {
            let job = row.job_title.as_deref().map(str::trim).unwrap_or_default();
            let competency = row.competency.as_deref().map(str::trim).unwrap_or_default();
            let raw_behavior = row.behavior.as_deref().unwrap_or_default();
            let behavior = normalize_behavior(raw_behavior);

            let rating = match row.rating {
                Some(r) if r.is_finite() => r,
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            if job.is_empty() || competency.is_empty() || behavior.is_empty() {
                dropped += 1;
                continue;
            }

            by_job
                .entry(job.to_string())
                .or_default()
                .entry(competency.to_string())
                .or_default()
                .insert(behavior, rating);

            raw_by_competency
                .entry(competency.to_string())
                .or_default()
                .insert(raw_behavior.trim().to_string());
        }

        let mut known_keys = BTreeSet::new();
        let survey = raw_by_competency
            .into_iter()
            .map(|(competency, raws)| {
                let mut seen = BTreeSet::new();
                let behaviors: Vec<SurveyBehavior> = raws
                    .iter()
                    .filter_map(|raw| {
                        let key = normalize_behavior(raw);
                        seen.insert(key.clone()).then(|| SurveyBehavior {
                            label: display_label(raw),
                            key,
                        })
                    })
                    .collect();
                known_keys.extend(seen);
                (competency, behaviors)
            })
            .collect();

        debug!(
            jobs = by_job.len(),
            dropped, "Behavior index built from {} rows", rows.len()
        );

        Self {
            by_job,
            survey,
            known_keys,
        }
    }

    /// Expected behaviors for a job under one competency, if any.
    pub fn expectations(&self, job_title: &str, competency: &str) -> Option<&BTreeMap<String, f64>> {
        self.by_job.get(job_title)?.get(competency)
    }

    #[cfg(test)]
    pub fn expected_rating(&self, job_title: &str, competency: &str, behavior: &str) -> Option<f64> {
        self.expectations(job_title, competency)?.get(behavior).copied()
    }

    pub fn survey_behaviors(&self, competency: &str) -> &[SurveyBehavior] {
        self.survey.get(competency).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_known_behavior(&self, key: &str) -> bool {
        self.known_keys.contains(key)
    }

    pub fn job_count(&self) -> usize {
        self.by_job.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(job: &str, comp: &str, beh: &str, rating: f64) -> RawBehaviorRow {
        RawBehaviorRow {
            job_title: Some(job.to_string()),
            competency: Some(comp.to_string()),
            behavior: Some(beh.to_string()),
            rating: Some(rating),
        }
    }

    #[test]
    fn test_normalize_strips_ordinal_prefix_once() {
        assert_eq!(normalize_behavior("3. Escucha Activamente"), "escucha activamente");
        assert_eq!(normalize_behavior("  12.Lidera equipos  "), "lidera equipos");
        assert_eq!(normalize_behavior("1. 2. Doble"), "2. doble");
    }

    #[test]
    fn test_normalize_without_prefix() {
        assert_eq!(normalize_behavior("Comunica con claridad"), "comunica con claridad");
        assert_eq!(normalize_behavior("2024 objetivos"), "2024 objetivos");
    }

    #[test]
    fn test_display_label_keeps_case() {
        assert_eq!(display_label("4. Toma Decisiones"), "Toma Decisiones");
    }

    #[test]
    fn test_build_nested_lookup() {
        let index = BehaviorIndex::build(&[
            row("Analyst", "Liderazgo", "1. Guía al equipo", 3.0),
            row("Analyst", "Comunicación", "2. Escucha", 4.0),
            row("Manager", "Liderazgo", "1. Guía al equipo", 5.0),
        ]);
        assert_eq!(index.job_count(), 2);
        assert_eq!(
            index.expected_rating("Analyst", "Liderazgo", "guía al equipo"),
            Some(3.0)
        );
        assert_eq!(
            index.expected_rating("Manager", "Liderazgo", "guía al equipo"),
            Some(5.0)
        );
        assert_eq!(index.expected_rating("Analyst", "Liderazgo", "escucha"), None);
    }

    #[test]
    fn test_last_write_wins_in_row_order() {
        let index = BehaviorIndex::build(&[
            row("Analyst", "Liderazgo", "1. Guía al equipo", 2.0),
            row("Analyst", "Liderazgo", "7. guía al equipo", 4.0),
        ]);
        assert_eq!(
            index.expected_rating("Analyst", "Liderazgo", "guía al equipo"),
            Some(4.0)
        );
        assert_eq!(index.expectations("Analyst", "Liderazgo").unwrap().len(), 1);
    }

    #[test]
    fn test_incomplete_rows_are_dropped() {
        let index = BehaviorIndex::build(&[
            RawBehaviorRow {
                job_title: None,
                ..row("", "Liderazgo", "Guía", 3.0)
            },
            row("Analyst", "  ", "Guía", 3.0),
            row("Analyst", "Liderazgo", "5. ", 3.0),
            RawBehaviorRow {
                rating: None,
                ..row("Analyst", "Liderazgo", "Guía", 3.0)
            },
        ]);
        assert_eq!(index.job_count(), 0);
        assert!(!index.is_known_behavior("guía"));
    }

    #[test]
    fn test_survey_listing_sorted_and_unique() {
        let index = BehaviorIndex::build(&[
            row("Analyst", "Liderazgo", "2. Delega", 3.0),
            row("Manager", "Liderazgo", "1. Inspira", 4.0),
            row("Director", "Liderazgo", "2. Delega", 5.0),
        ]);
        let listed = index.survey_behaviors("Liderazgo");
        assert_eq!(
            listed,
            &[
                SurveyBehavior {
                    label: "Inspira".to_string(),
                    key: "inspira".to_string()
                },
                SurveyBehavior {
                    label: "Delega".to_string(),
                    key: "delega".to_string()
                },
            ]
        );
        assert!(index.survey_behaviors("Unknown").is_empty());
        assert!(index.is_known_behavior("delega"));
    }
}
