pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::catalog::handlers as catalog;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Survey form data
        .route("/api/v1/survey", get(catalog::handle_survey))
        // Assessments
        .route(
            "/api/v1/assessments",
            post(assessment::handle_create_assessment),
        )
        .route(
            "/api/v1/assessments/export/spreadsheet",
            post(assessment::handle_export_spreadsheet),
        )
        .route(
            "/api/v1/assessments/export/document",
            post(assessment::handle_export_document),
        )
        // Administration
        .route("/api/v1/catalog/reload", post(catalog::handle_reload))
        .with_state(state)
}
