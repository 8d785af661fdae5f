use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Points a person distributes across the competencies.
pub const TOTAL_POINTS: u32 = 100;
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

// ────────────────────────────────────────────────────────────────────────────
// Survey submission
// ────────────────────────────────────────────────────────────────────────────

/// Raw survey submission as posted by the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub current_job: Option<String>,
    /// competency name → points (whole numbers, 0–100)
    #[serde(default)]
    pub competencies: BTreeMap<String, f64>,
    /// behavior label (display or normalized) → rating (whole numbers, 1–5)
    #[serde(default)]
    pub behaviors: BTreeMap<String, f64>,
}

/// Validated competency weights, one entry per catalog competency in catalog order.
/// Weights always sum to [`TOTAL_POINTS`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompetencyProfile {
    weights: Vec<(String, u32)>,
}

impl CompetencyProfile {
    /// Only built by validation, which has already checked the total.
    pub(crate) fn new(weights: Vec<(String, u32)>) -> Self {
        Self { weights }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.weights.iter().map(|(c, w)| (c.as_str(), *w))
    }

    pub fn weight(&self, competency: &str) -> u32 {
        self.weights
            .iter()
            .find(|(c, _)| c == competency)
            .map(|(_, w)| *w)
            .unwrap_or(0)
    }

    /// Weight as a fraction of the total (weight / 100).
    pub fn fraction(&self, competency: &str) -> f64 {
        self.weight(competency) as f64 / TOTAL_POINTS as f64
    }

    /// The `n` highest-weighted competencies; ties keep catalog order.
    pub fn strongest(&self, n: usize) -> Vec<(&str, u32)> {
        let mut sorted: Vec<(&str, u32)> = self.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

/// Validated behavior ratings keyed by normalized behavior label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviorRating {
    ratings: BTreeMap<String, u8>,
}

impl BehaviorRating {
    pub(crate) fn new(ratings: BTreeMap<String, u8>) -> Self {
        Self { ratings }
    }

    pub fn get(&self, behavior: &str) -> Option<u8> {
        self.ratings.get(behavior).copied()
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Career plan output
// ────────────────────────────────────────────────────────────────────────────

/// One recommended job. Field names match the legacy report columns so the same
/// struct feeds the JSON response and the spreadsheet export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Area")]
    pub area: String,
    #[serde(rename = "IPE")]
    pub ipe: f64,
    #[serde(rename = "Gap Total")]
    pub gap_total: f64,
    #[serde(rename = "Gap Comp")]
    pub gap_comp: f64,
    #[serde(rename = "Gap Beh")]
    pub gap_beh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentJob {
    pub title: String,
    pub area: String,
    pub ipe: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strength {
    pub competency: String,
    pub points: u32,
}

/// A complete, never-persisted assessment result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerPlan {
    pub assessment_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub name: String,
    pub current_job: CurrentJob,
    pub strengths: Vec<Strength>,
    pub recommendations: Vec<Recommendation>,
    /// Jobs that passed the eligibility filter and were scored.
    pub scored_jobs: usize,
    pub scorer_backend: String,
}
