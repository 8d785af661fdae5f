use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::assessment::models::{MAX_RATING, MIN_RATING, TOTAL_POINTS};
use crate::catalog::behavior_index::SurveyBehavior;
use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SurveyJob {
    pub title: String,
    /// `None` when the catalog level cell could not be parsed.
    pub ipe: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SurveyArea {
    pub area: String,
    pub jobs: Vec<SurveyJob>,
}

#[derive(Debug, Serialize)]
pub struct SurveyCompetency {
    pub name: String,
    pub behaviors: Vec<SurveyBehavior>,
}

/// Everything the survey form renders: area/job pickers, the competencies to
/// distribute points across, and the behaviors to rate under each.
#[derive(Debug, Serialize)]
pub struct SurveyResponse {
    pub areas: Vec<SurveyArea>,
    pub competencies: Vec<SurveyCompetency>,
    pub total_points: u32,
    pub rating_scale: [u8; 2],
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub jobs: usize,
    pub areas: usize,
    pub competencies: Vec<String>,
    pub reloaded_at: DateTime<Utc>,
}

pub fn build_survey(catalog: &Catalog) -> SurveyResponse {
    SurveyResponse {
        areas: catalog
            .areas()
            .iter()
            .map(|area| SurveyArea {
                area: area.clone(),
                jobs: catalog
                    .jobs_in_area(area)
                    .into_iter()
                    .map(|j| SurveyJob {
                        title: j.title.clone(),
                        ipe: j.level,
                    })
                    .collect(),
            })
            .collect(),
        competencies: catalog
            .competencies()
            .iter()
            .map(|c| SurveyCompetency {
                name: c.clone(),
                behaviors: catalog.behaviors().survey_behaviors(c).to_vec(),
            })
            .collect(),
        total_points: TOTAL_POINTS,
        rating_scale: [MIN_RATING, MAX_RATING],
    }
}

/// GET /api/v1/survey
pub async fn handle_survey(State(state): State<AppState>) -> Json<SurveyResponse> {
    let catalog = state.catalog().await;
    Json(build_survey(&catalog))
}

/// POST /api/v1/catalog/reload
///
/// Re-reads both catalog tables from the configured paths. On failure the
/// previous catalog stays in place.
pub async fn handle_reload(State(state): State<AppState>) -> Result<Json<ReloadResponse>, AppError> {
    let jobs_path = state.config.catalog_jobs_path.clone();
    let behaviors_path = state.config.catalog_behaviors_path.clone();
    let schema = state.config.catalog_schema.clone();

    let catalog = tokio::task::spawn_blocking(move || {
        Catalog::load(&jobs_path, &behaviors_path, &schema)
    })
    .await
    .map_err(|e| AppError::Internal(e.into()))??;

    let response = ReloadResponse {
        jobs: catalog.jobs().len(),
        areas: catalog.areas().len(),
        competencies: catalog.competencies().to_vec(),
        reloaded_at: Utc::now(),
    };
    state.replace_catalog(catalog).await;
    info!(jobs = response.jobs, "Catalog reloaded");

    Ok(Json(response))
}
