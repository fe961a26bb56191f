//! HTTP request handlers - thin layer that delegates to domain service

use super::{
    dto::*,
    error::{map_domain_error, Problem},
    mapper::{parse_section, AssetLimits},
};
use crate::contract::{OnboardingError, SubmissionFilter, SubmissionStatus, UnknownStatus};
use crate::domain::{NextOutcome, Notification, Service};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

// ===== Wizard Handlers =====

/// Open a new wizard session
pub async fn create_session(
    service: Arc<Service>,
) -> Result<(StatusCode, Json<WizardStateDto>), Problem> {
    let snapshot = service.start_wizard().map_err(map_domain_error)?;
    Ok((StatusCode::CREATED, Json(snapshot.into())))
}

/// Get the state of a wizard session
pub async fn get_session(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardStateDto>, Problem> {
    let snapshot = service.wizard_state(id).map_err(map_domain_error)?;
    Ok(Json(snapshot.into()))
}

/// Discard a wizard session and its draft
pub async fn delete_session(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service.discard_wizard(id).map_err(map_domain_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace one section of the draft
pub async fn update_section(
    service: Arc<Service>,
    limits: AssetLimits,
    Path((id, section)): Path<(Uuid, String)>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<WizardStateDto>, Problem> {
    let section = parse_section(&section, body, &limits).map_err(map_domain_error)?;
    let snapshot = service
        .update_wizard_section(id, section)
        .map_err(map_domain_error)?;
    Ok(Json(snapshot.into()))
}

/// Advance the wizard; on the last step this submits the draft
pub async fn next_step(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<NextResponse>), Problem> {
    let outcome = service.wizard_next(id).await.map_err(map_domain_error)?;

    let (status, response) = match outcome {
        NextOutcome::Advanced(snapshot) => (
            StatusCode::OK,
            NextResponse {
                state: snapshot.into(),
                submission_id: None,
                notification: None,
            },
        ),
        NextOutcome::Submitted { receipt, wizard } => {
            let submission_id = receipt.submission.id;
            let notification = Notification::Submitted { submission_id };
            (
                StatusCode::CREATED,
                NextResponse {
                    state: wizard.into(),
                    submission_id: Some(submission_id),
                    notification: Some((&notification).into()),
                },
            )
        }
    };

    Ok((status, Json(response)))
}

/// Go back one step
pub async fn previous_step(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardStateDto>, Problem> {
    let snapshot = service.wizard_back(id).map_err(map_domain_error)?;
    Ok(Json(snapshot.into()))
}

// ===== Submission Handlers =====

/// List submissions with optional search and status filters
pub async fn list_submissions(
    service: Arc<Service>,
    Query(query): Query<ListSubmissionsQuery>,
) -> Result<Json<SubmissionListResponse>, Problem> {
    let filter = SubmissionFilter::try_from(query).map_err(map_domain_error)?;
    let overview = service
        .submission_overview(&filter)
        .await
        .map_err(map_domain_error)?;

    let items: Vec<SubmissionDto> = overview.submissions.into_iter().map(|s| s.into()).collect();
    let total = items.len();
    let counts = overview
        .counts
        .into_iter()
        .map(|(status, count)| (status.to_string(), count))
        .collect();

    Ok(Json(SubmissionListResponse { items, total, counts }))
}

/// Get a submission with its dishes and photos
pub async fn get_submission(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<Json<SubmissionDetailDto>, Problem> {
    let detail = service
        .get_submission_detail(id)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(detail.into()))
}

/// Set the review status of a submission
pub async fn update_status(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<SubmissionDto>, Problem> {
    let status: SubmissionStatus = req.status.parse().map_err(|e: UnknownStatus| {
        map_domain_error(OnboardingError::Validation {
            message: e.to_string(),
        })
    })?;
    let submission = service
        .update_submission_status(id, status)
        .await
        .map_err(map_domain_error)?;
    Ok(Json(submission.into()))
}

/// Request generation of the restaurant site
pub async fn generate_site(
    service: Arc<Service>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, Problem> {
    service
        .request_site_generation(id)
        .await
        .map_err(map_domain_error)?;
    Ok(StatusCode::ACCEPTED)
}

// ===== OpenAPI =====

#[derive(OpenApi)]
#[openapi(
    info(title = "Restaurant Onboarding API"),
    components(schemas(
        AssetUpload,
        AssetInfo,
        BusinessInfoDto,
        AboutRequest,
        DishUpload,
        PopularDishesRequest,
        MenuPdfRequest,
        DeliveryHoursDto,
        PhotosRequest,
        SocialDto,
        AboutView,
        DishView,
        DraftView,
        WizardStateDto,
        NotificationDto,
        NextResponse,
        SubmissionDto,
        DishDto,
        PhotoDto,
        SubmissionDetailDto,
        SubmissionListResponse,
        ListSubmissionsQuery,
        UpdateStatusRequest,
    ))
)]
pub struct ApiDoc;

/// OpenAPI document of the DTO schemas
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
