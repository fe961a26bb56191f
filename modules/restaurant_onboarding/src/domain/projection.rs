//! Read-side projections for the admin surface

use super::repository::SubmissionRepository;
use crate::contract::{
    OnboardingError, Submission, SubmissionDetail, SubmissionFilter, SubmissionStatus,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Admin list: every submission, newest first, held in memory between fetches
pub struct SubmissionList {
    repo: Arc<dyn SubmissionRepository>,
    submissions: Vec<Submission>,
}

impl SubmissionList {
    pub fn new(repo: Arc<dyn SubmissionRepository>) -> Self {
        Self {
            repo,
            submissions: Vec::new(),
        }
    }

    /// Build a list and fetch it once
    pub async fn load(repo: Arc<dyn SubmissionRepository>) -> Result<Self, OnboardingError> {
        let mut list = Self::new(repo);
        list.refresh().await?;
        Ok(list)
    }

    /// Replace the in-memory copy with a fresh backend scan
    pub async fn refresh(&mut self) -> Result<(), OnboardingError> {
        let mut submissions = self.repo.list_submissions().await.map_err(|e| {
            tracing::error!(error = ?e, "failed to fetch submissions");
            OnboardingError::Internal
        })?;
        submissions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.submissions = submissions;
        Ok(())
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn filtered<'a>(
        &'a self,
        filter: &'a SubmissionFilter,
    ) -> impl Iterator<Item = &'a Submission> + 'a {
        self.submissions.iter().filter(move |s| filter.matches(s))
    }

    /// Submissions per status, every status present
    pub fn status_counts(&self) -> BTreeMap<SubmissionStatus, usize> {
        let mut counts: BTreeMap<_, _> = SubmissionStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for submission in &self.submissions {
            *counts.entry(submission.status).or_default() += 1;
        }
        counts
    }

    /// Write the status to the backend, then patch the local copy.
    ///
    /// The local copy is only touched after the write succeeded, so a
    /// failure needs no rollback.
    pub async fn update_status(
        &mut self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Submission, OnboardingError> {
        let updated = self
            .repo
            .update_status(id, status)
            .await
            .map_err(|e| {
                tracing::error!(error = ?e, submission_id = %id, "failed to update status");
                OnboardingError::Internal
            })?
            .ok_or_else(|| OnboardingError::submission_not_found(id))?;

        if let Some(local) = self.submissions.iter_mut().find(|s| s.id == id) {
            local.status = status;
        }
        tracing::info!(submission_id = %id, status = %status, "submission status updated");
        Ok(updated)
    }

    /// Apply the review action offered for the current status.
    ///
    /// Returns the new status, or `None` when the status has no action.
    pub async fn advance(&mut self, id: Uuid) -> Result<Option<SubmissionStatus>, OnboardingError> {
        let current = self
            .submissions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.status)
            .ok_or_else(|| OnboardingError::submission_not_found(id))?;

        match current.review_action() {
            Some(next) => {
                self.update_status(id, next).await?;
                Ok(Some(next))
            }
            None => Ok(None),
        }
    }
}

/// Admin detail: one submission with its dishes and photos
pub struct SubmissionDetailView {
    detail: SubmissionDetail,
}

impl SubmissionDetailView {
    pub async fn load(repo: &dyn SubmissionRepository, id: Uuid) -> Result<Self, OnboardingError> {
        let internal = |e: anyhow::Error| {
            tracing::error!(error = ?e, submission_id = %id, "failed to load submission detail");
            OnboardingError::Internal
        };

        let submission = repo
            .find_submission(id)
            .await
            .map_err(&internal)?
            .ok_or_else(|| OnboardingError::submission_not_found(id))?;
        let mut dishes = repo.list_dishes(id).await.map_err(&internal)?;
        let mut photos = repo.list_photos(id).await.map_err(&internal)?;
        dishes.sort_by_key(|d| d.display_order);
        photos.sort_by_key(|p| p.display_order);

        Ok(Self {
            detail: SubmissionDetail {
                submission,
                dishes,
                photos,
            },
        })
    }

    pub fn detail(&self) -> &SubmissionDetail {
        &self.detail
    }

    pub fn into_detail(self) -> SubmissionDetail {
        self.detail
    }

    /// Request site generation. Not wired to a generator yet: it records the
    /// request and leaves the submission untouched.
    pub fn generate_site(&self) {
        let submission = &self.detail.submission;
        tracing::info!(
            submission_id = %submission.id,
            restaurant = %submission.restaurant_name,
            "site generation requested"
        );
    }
}
