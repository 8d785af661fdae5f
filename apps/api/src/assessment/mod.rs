//! Assessment pipeline: validate submission → eligibility filter → gap scoring →
//! band selection → career plan. Everything here is synchronous and pure; the
//! catalog snapshot is read-only for the whole run.

pub mod gap_scoring;
pub mod handlers;
pub mod models;
pub mod selector;
pub mod validation;

use chrono::Utc;
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::assessment::gap_scoring::{GapResult, GapScorer};
use crate::assessment::models::{CareerPlan, CurrentJob, Recommendation, Strength};
use crate::assessment::selector::{eligible_jobs, select_recommendations, RankingPrecision};
use crate::assessment::validation::ValidatedAssessment;
use crate::catalog::Catalog;

/// Number of top-weighted competencies reported as strengths.
const STRENGTH_COUNT: usize = 2;

pub fn build_plan(
    catalog: &Catalog,
    scorer: &dyn GapScorer,
    assessment: &ValidatedAssessment<'_>,
    precision: RankingPrecision,
) -> CareerPlan {
    let assessment_id = Uuid::new_v4();
    let span = info_span!("assessment", %assessment_id, current_job = %assessment.current_job.title);
    let _guard = span.enter();

    let candidates = eligible_jobs(catalog.jobs(), assessment.current_level);
    let results: Vec<GapResult> = candidates
        .iter()
        .map(|job| {
            scorer.score(
                &assessment.profile,
                &assessment.ratings,
                job,
                catalog.behaviors(),
            )
        })
        .collect();
    debug!(
        eligible = results.len(),
        rated_behaviors = assessment.ratings.len(),
        "Scored eligible jobs"
    );
    if assessment.ratings.is_empty() {
        debug!("No behavior ratings submitted; every behavior gap is 0");
    }

    let selected = select_recommendations(&results, assessment.current_level, precision);
    let recommendations: Vec<Recommendation> = selected
        .iter()
        .map(|r| {
            let r = r.rounded();
            Recommendation {
                job_title: r.job_title,
                area: r.area,
                ipe: r.level,
                gap_total: r.combined_gap,
                gap_comp: r.competency_gap,
                gap_beh: r.behavior_gap,
            }
        })
        .collect();

    let strengths = assessment
        .profile
        .strongest(STRENGTH_COUNT)
        .into_iter()
        .map(|(competency, points)| Strength {
            competency: competency.to_string(),
            points,
        })
        .collect();

    info!(
        scored = results.len(),
        recommended = recommendations.len(),
        ?precision,
        "Career plan built"
    );

    CareerPlan {
        assessment_id,
        generated_at: Utc::now(),
        name: assessment.name.clone(),
        current_job: CurrentJob {
            title: assessment.current_job.title.clone(),
            area: assessment.current_job.area.clone(),
            ipe: assessment.current_level,
        },
        strengths,
        recommendations,
        scored_jobs: results.len(),
        scorer_backend: scorer.backend().to_string(),
    }
}
