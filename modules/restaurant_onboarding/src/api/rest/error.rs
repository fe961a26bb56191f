//! HTTP error mapping to RFC-9457 Problem Details

use crate::contract::OnboardingError;
use crate::domain::Notification;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Wizard step the problem refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            step: None,
        }
    }

    /// Add detail message
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    fn from_notification(status: StatusCode, notification: &Notification) -> Self {
        Self::new(status, notification.title()).with_detail(notification.description())
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Map domain errors to HTTP Problem Details
pub fn map_domain_error(error: OnboardingError) -> Problem {
    match error {
        OnboardingError::NotFound { resource, id } => Problem::new(
            StatusCode::NOT_FOUND,
            format!("{} Not Found", resource),
        )
        .with_detail(format!("{} with id '{}' was not found", resource, id)),

        OnboardingError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        OnboardingError::IncompleteStep { step, .. } => Problem::from_notification(
            StatusCode::UNPROCESSABLE_ENTITY,
            &Notification::ValidationFailed { step },
        )
        .with_step(step),

        OnboardingError::Busy => Problem::new(StatusCode::CONFLICT, "Submission In Progress")
            .with_detail("A submission is already running for this wizard session"),

        OnboardingError::TooManySessions { limit } => {
            Problem::new(StatusCode::SERVICE_UNAVAILABLE, "Too Many Wizard Sessions")
                .with_detail(format!("{} wizard sessions are open; try again later", limit))
        }

        OnboardingError::SubmissionFailed => {
            Problem::from_notification(StatusCode::BAD_GATEWAY, &Notification::SubmissionFailed)
        }

        OnboardingError::Internal => Problem::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
        )
        .with_detail("An unexpected error occurred"),
    }
}
