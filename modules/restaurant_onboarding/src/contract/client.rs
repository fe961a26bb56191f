//! Native client trait for inter-module communication
//!
//! This trait defines the read/review API that other modules (the site
//! generator, reporting) use to interact with submissions.
//! NO HTTP - direct function calls for performance.

use super::{
    error::OnboardingError,
    model::{Submission, SubmissionDetail, SubmissionFilter, SubmissionStatus},
};
use async_trait::async_trait;
use uuid::Uuid;

/// Onboarding service API for inter-module communication
#[async_trait]
pub trait OnboardingApi: Send + Sync {
    /// List submissions, newest first, narrowed by the filter
    async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, OnboardingError>;

    /// Get a submission with its dishes and photos
    async fn get_submission_detail(&self, id: Uuid) -> Result<SubmissionDetail, OnboardingError>;

    /// Set the review status of a submission
    async fn update_submission_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Submission, OnboardingError>;
}
