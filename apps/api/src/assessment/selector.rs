//! Recommendation Selector: eligibility filter and level-band selection.
//!
//! Bands are the distinct level metrics at or above the person's current level:
//! - lateral band (same level): the single lowest-gap job
//! - every higher band, ascending: the two lowest-gap jobs
//!
//! Ordering inside a band is a stable sort on combined gap, so equal gaps keep
//! catalog order. No cap on the number of bands.

use serde::{Deserialize, Serialize};

use crate::assessment::gap_scoring::{round2, GapResult};
use crate::models::job::JobRecord;

pub const LATERAL_PICKS: usize = 1;
pub const PER_LEVEL_PICKS: usize = 2;

/// Which combined-gap value ranking compares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingPrecision {
    /// Rank on the two-decimal value shown in reports (legacy behavior).
    #[default]
    Rounded,
    /// Rank on the unrounded value.
    Full,
}

impl RankingPrecision {
    fn key(self, result: &GapResult) -> f64 {
        match self {
            RankingPrecision::Rounded => round2(result.combined_gap),
            RankingPrecision::Full => result.combined_gap,
        }
    }
}

/// Jobs with a known level metric at or above `current_level`, in catalog order.
pub fn eligible_jobs(jobs: &[JobRecord], current_level: f64) -> Vec<&JobRecord> {
    jobs.iter()
        .filter(|j| j.level.is_some_and(|level| level >= current_level))
        .collect()
}

pub fn select_recommendations(
    results: &[GapResult],
    current_level: f64,
    precision: RankingPrecision,
) -> Vec<GapResult> {
    let mut levels: Vec<f64> = results
        .iter()
        .map(|r| r.level)
        .filter(|level| *level >= current_level)
        .collect();
    levels.sort_by(f64::total_cmp);
    levels.dedup();

    let mut selected = Vec::new();
    for level in levels {
        let mut band: Vec<&GapResult> = results.iter().filter(|r| r.level == level).collect();
        band.sort_by(|a, b| precision.key(a).total_cmp(&precision.key(b)));

        let picks = if level == current_level {
            LATERAL_PICKS
        } else {
            PER_LEVEL_PICKS
        };
        selected.extend(band.into_iter().take(picks).cloned());
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{finance_catalog, job};

    fn result(title: &str, level: f64, combined: f64) -> GapResult {
        GapResult {
            job_title: title.to_string(),
            area: "Finance".to_string(),
            level,
            competency_gap: combined,
            behavior_gap: combined,
            combined_gap: combined,
            matched_behaviors: 0,
        }
    }

    fn titles(results: &[GapResult]) -> Vec<&str> {
        results.iter().map(|r| r.job_title.as_str()).collect()
    }

    #[test]
    fn test_eligibility_excludes_lower_and_unknown_levels() {
        let catalog = finance_catalog();
        let eligible: Vec<&str> = eligible_jobs(catalog.jobs(), 3.0)
            .iter()
            .map(|j| j.title.as_str())
            .collect();
        assert!(!eligible.contains(&"Clerk"));
        assert!(!eligible.contains(&"Mystery Role"));
        assert_eq!(
            eligible,
            ["Analyst", "Senior Analyst", "Team Lead", "Controller", "Finance Manager", "Recruiter"]
        );
    }

    #[test]
    fn test_eligibility_with_range_level() {
        let jobs = vec![
            job("Mid", "A", Some(3.5), [0.0; 8]),
            job("Low", "A", Some(3.0), [0.0; 8]),
        ];
        let eligible = eligible_jobs(&jobs, 3.5);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].title, "Mid");
    }

    #[test]
    fn test_band_selection_counts() {
        let results = vec![
            result("L3a", 3.0, 5.0),
            result("L3b", 3.0, 1.0),
            result("L4a", 4.0, 3.0),
            result("L4b", 4.0, 2.0),
            result("L4c", 4.0, 1.0),
            result("L5a", 5.0, 9.0),
        ];
        let picked = select_recommendations(&results, 3.0, RankingPrecision::Rounded);
        assert_eq!(titles(&picked), ["L3b", "L4c", "L4b", "L5a"]);
    }

    #[test]
    fn test_no_lateral_band() {
        let results = vec![result("L4a", 4.0, 3.0), result("L6a", 6.0, 1.0)];
        let picked = select_recommendations(&results, 3.0, RankingPrecision::Rounded);
        assert_eq!(titles(&picked), ["L4a", "L6a"]);
    }

    #[test]
    fn test_bands_unbounded() {
        let results: Vec<GapResult> = (0..10)
            .flat_map(|i| {
                let level = 4.0 + i as f64;
                vec![
                    result(&format!("{i}a"), level, 1.0),
                    result(&format!("{i}b"), level, 2.0),
                    result(&format!("{i}c"), level, 3.0),
                ]
            })
            .chain([result("lateral", 3.0, 0.0)])
            .collect();
        let picked = select_recommendations(&results, 3.0, RankingPrecision::Rounded);
        assert_eq!(picked.len(), 21);
        assert_eq!(picked[0].job_title, "lateral");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let results = vec![
            result("first", 4.0, 2.0),
            result("second", 4.0, 2.0),
            result("third", 4.0, 2.0),
        ];
        let picked = select_recommendations(&results, 3.0, RankingPrecision::Full);
        assert_eq!(titles(&picked), ["first", "second"]);
    }

    #[test]
    fn test_rounded_ranking_collapses_near_ties() {
        let results = vec![result("first", 3.0, 1.004), result("second", 3.0, 1.001)];

        let legacy = select_recommendations(&results, 3.0, RankingPrecision::Rounded);
        assert_eq!(titles(&legacy), ["first"]);

        let full = select_recommendations(&results, 3.0, RankingPrecision::Full);
        assert_eq!(titles(&full), ["second"]);
    }

    #[test]
    fn test_results_below_current_level_never_selected() {
        let results = vec![result("below", 2.0, 0.0), result("same", 3.0, 5.0)];
        let picked = select_recommendations(&results, 3.0, RankingPrecision::Rounded);
        assert_eq!(titles(&picked), ["same"]);
    }
}
