//! Gap Scoring: pluggable, trait-based scorer that measures a person's survey
//! answers against one catalog job.
//!
//! Default: `WeightedGapScorer` (the weighted absolute-difference model).
//! `AppState` holds an `Arc<dyn GapScorer>` so the model can be swapped without
//! touching handlers or the selector.

use serde::{Deserialize, Serialize};

use crate::assessment::models::{BehaviorRating, CompetencyProfile};
use crate::catalog::behavior_index::BehaviorIndex;
use crate::models::job::JobRecord;

/// Share of the combined gap taken by the competency gap.
pub const COMPETENCY_SHARE: f64 = 0.7;
/// Share of the combined gap taken by the behavior gap.
pub const BEHAVIOR_SHARE: f64 = 0.3;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Gap between one person and one job. Lower is better.
///
/// Values are kept at full precision; [`GapResult::rounded`] produces the
/// two-decimal form shown in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapResult {
    pub job_title: String,
    pub area: String,
    pub level: f64,
    pub competency_gap: f64,
    pub behavior_gap: f64,
    pub combined_gap: f64,
    /// How many (competency, behavior) pairs the person and the job had in common.
    pub matched_behaviors: usize,
}

impl GapResult {
    pub fn rounded(&self) -> Self {
        Self {
            competency_gap: round2(self.competency_gap),
            behavior_gap: round2(self.behavior_gap),
            combined_gap: round2(self.combined_gap),
            ..self.clone()
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Scores a person's profile against a single job.
///
/// Carried in `AppState` as `Arc<dyn GapScorer>`. Callers guarantee `job.level`
/// is known (eligibility is filtered before scoring).
pub trait GapScorer: Send + Sync {
    fn score(
        &self,
        profile: &CompetencyProfile,
        ratings: &BehaviorRating,
        job: &JobRecord,
        index: &BehaviorIndex,
    ) -> GapResult;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedGapScorer (default)
// ────────────────────────────────────────────────────────────────────────────

/// Algorithm:
/// 1. competency gap = Σ |person_points − job_reference| × (person_points / 100)
///    over every competency. Heavily weighted competencies amplify the mismatch.
/// 2. behavior gap = Σ |rating − expected| × w / Σ w over behaviors the job
///    expects and the person rated, w being the competency's fractional weight.
///    No overlap (or zero total weight) gives 0, which reads as a perfect match.
/// 3. combined = 0.7 × competency gap + 0.3 × behavior gap
pub struct WeightedGapScorer;

impl GapScorer for WeightedGapScorer {
    fn score(
        &self,
        profile: &CompetencyProfile,
        ratings: &BehaviorRating,
        job: &JobRecord,
        index: &BehaviorIndex,
    ) -> GapResult {
        let competency_gap = competency_gap(profile, job);
        let (behavior_gap, matched_behaviors) = behavior_gap(profile, ratings, job, index);

        GapResult {
            job_title: job.title.clone(),
            area: job.area.clone(),
            level: job.level.unwrap_or(f64::NAN),
            competency_gap,
            behavior_gap,
            combined_gap: combine(competency_gap, behavior_gap),
            matched_behaviors,
        }
    }

    fn backend(&self) -> &'static str {
        "weighted"
    }
}

pub fn combine(competency_gap: f64, behavior_gap: f64) -> f64 {
    COMPETENCY_SHARE * competency_gap + BEHAVIOR_SHARE * behavior_gap
}

fn competency_gap(profile: &CompetencyProfile, job: &JobRecord) -> f64 {
    profile
        .iter()
        .map(|(competency, points)| {
            let person = points as f64;
            (person - job.reference_value(competency)).abs() * profile.fraction(competency)
        })
        .sum()
}

fn behavior_gap(
    profile: &CompetencyProfile,
    ratings: &BehaviorRating,
    job: &JobRecord,
    index: &BehaviorIndex,
) -> (f64, usize) {
    let mut weighted_gap = 0.0;
    let mut total_weight = 0.0;
    let mut matched = 0;

    for (competency, _) in profile.iter() {
        let Some(expected) = index.expectations(&job.title, competency) else {
            continue;
        };
        let weight = profile.fraction(competency);

        for (behavior, expected_rating) in expected {
            if let Some(rating) = ratings.get(behavior) {
                weighted_gap += (rating as f64 - expected_rating).abs() * weight;
                total_weight += weight;
                matched += 1;
            }
        }
    }

    let gap = if total_weight > 0.0 {
        weighted_gap / total_weight
    } else {
        0.0
    };
    (gap, matched)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
