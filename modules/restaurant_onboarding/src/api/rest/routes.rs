//! Route registration
//!
//! Handlers receive the service and asset limits through `Extension` layers.

use super::mapper::AssetLimits;
use super::{dto::*, error::Problem, handlers};
use crate::domain::Service;
use axum::{
    extract::{DefaultBodyLimit, Path, Query},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

/// Register all REST routes
pub fn register_routes(router: Router, service: Arc<Service>, limits: AssetLimits) -> Router {
    router
        // Wizard endpoints
        .route("/wizard/sessions", post(create_session_handler))
        .route(
            "/wizard/sessions/{id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route(
            "/wizard/sessions/{id}/sections/{section}",
            put(update_section_handler).layer(DefaultBodyLimit::max(limits.body_limit())),
        )
        .route("/wizard/sessions/{id}/next", post(next_step_handler))
        .route("/wizard/sessions/{id}/back", post(previous_step_handler))
        // Submission endpoints
        .route("/submissions", get(list_submissions_handler))
        .route("/submissions/{id}", get(get_submission_handler))
        .route("/submissions/{id}/status", put(update_status_handler))
        .route("/submissions/{id}/generate-site", post(generate_site_handler))
        .route("/openapi.json", get(handlers::openapi))
        // Add service and limits as extensions for handlers
        .layer(Extension(service))
        .layer(Extension(limits))
}

// ===== Handler wrappers that extract service from Extension =====

async fn create_session_handler(
    Extension(service): Extension<Arc<Service>>,
) -> Result<(StatusCode, Json<WizardStateDto>), Problem> {
    handlers::create_session(service).await
}

async fn get_session_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<WizardStateDto>, Problem> {
    handlers::get_session(service, path).await
}

async fn delete_session_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::delete_session(service, path).await
}

async fn update_section_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(limits): Extension<AssetLimits>,
    path: Path<(Uuid, String)>,
    json: Json<serde_json::Value>,
) -> Result<Json<WizardStateDto>, Problem> {
    handlers::update_section(service, limits, path, json).await
}

async fn next_step_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<(StatusCode, Json<NextResponse>), Problem> {
    handlers::next_step(service, path).await
}

async fn previous_step_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<WizardStateDto>, Problem> {
    handlers::previous_step(service, path).await
}

async fn list_submissions_handler(
    Extension(service): Extension<Arc<Service>>,
    query: Query<ListSubmissionsQuery>,
) -> Result<Json<SubmissionListResponse>, Problem> {
    handlers::list_submissions(service, query).await
}

async fn get_submission_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<Json<SubmissionDetailDto>, Problem> {
    handlers::get_submission(service, path).await
}

async fn update_status_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
    json: Json<UpdateStatusRequest>,
) -> Result<Json<SubmissionDto>, Problem> {
    handlers::update_status(service, path, json).await
}

async fn generate_site_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<Uuid>,
) -> Result<StatusCode, Problem> {
    handlers::generate_site(service, path).await
}
