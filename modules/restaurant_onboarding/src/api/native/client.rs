//! Native client implementation - wraps domain service for in-process calls

use crate::contract::{
    OnboardingApi, OnboardingError, Submission, SubmissionDetail, SubmissionFilter,
    SubmissionStatus,
};
use crate::domain::Service;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Native client implementation that directly calls the domain service
///
/// Used by in-process consumers such as the site generator, without HTTP.
#[derive(Clone)]
pub struct NativeClient {
    service: Arc<Service>,
}

impl NativeClient {
    /// Create a new native client
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl OnboardingApi for NativeClient {
    async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, OnboardingError> {
        self.service.list_submissions(filter).await
    }

    async fn get_submission_detail(&self, id: Uuid) -> Result<SubmissionDetail, OnboardingError> {
        self.service.get_submission_detail(id).await
    }

    async fn update_submission_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Submission, OnboardingError> {
        self.service.update_submission_status(id, status).await
    }
}
