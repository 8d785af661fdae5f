//! Axum route handlers for the Assessment API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::assessment::build_plan;
use crate::assessment::models::{AssessmentRequest, CareerPlan};
use crate::assessment::validation::validate_submission;
use crate::errors::AppError;
use crate::report::{document, export_file_name, spreadsheet};
use crate::state::AppState;

/// Validates and scores one submission against the current catalog snapshot.
async fn plan_for(state: &AppState, request: &AssessmentRequest) -> Result<CareerPlan, AppError> {
    let catalog = state.catalog().await;
    let validated = validate_submission(request, &catalog)?;
    Ok(build_plan(
        &catalog,
        state.scorer.as_ref(),
        &validated,
        state.config.ranking_precision,
    ))
}

fn attachment(content_type: &'static str, file_name: String, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// POST /api/v1/assessments
///
/// Returns the career plan: lateral pick first, then two picks per higher level.
pub async fn handle_create_assessment(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Result<Json<CareerPlan>, AppError> {
    let Json(request) = payload?;
    Ok(Json(plan_for(&state, &request).await?))
}

/// POST /api/v1/assessments/export/spreadsheet
pub async fn handle_export_spreadsheet(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let plan = plan_for(&state, &request).await?;
    let body = spreadsheet::render_spreadsheet(&plan)?;
    Ok(attachment(
        spreadsheet::CONTENT_TYPE,
        export_file_name(&plan.name, "csv"),
        body,
    ))
}

/// POST /api/v1/assessments/export/document
pub async fn handle_export_document(
    State(state): State<AppState>,
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;
    let plan = plan_for(&state, &request).await?;
    Ok(attachment(
        document::CONTENT_TYPE,
        export_file_name(&plan.name, "md"),
        document::render_document(&plan),
    ))
}
