//! Domain service - business logic orchestration

use super::draft::{Draft, Section};
use super::events::{Notification, Notifier};
use super::projection::{SubmissionDetailView, SubmissionList};
use super::repository::SubmissionRepository;
use super::session::{SessionLimits, SubmitGuard, WizardHandle, WizardSessions, WizardSnapshot};
use super::submission::{SubmissionPipeline, SubmissionReceipt};
use super::upload::Uploader;
use super::wizard::{NextStep, WizardError};
use crate::contract::{
    OnboardingError, Submission, SubmissionDetail, SubmissionFilter, SubmissionStatus,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

/// Outcome of a successful `wizard_next`
#[derive(Debug, Clone)]
pub enum NextOutcome {
    /// The wizard moved to the next step
    Advanced(WizardSnapshot),
    /// The last step was confirmed and the submission went through.
    /// The wizard has been reset to its initial state.
    Submitted {
        receipt: SubmissionReceipt,
        wizard: WizardSnapshot,
    },
}

/// Admin list page: filtered submissions plus per-status counts over all of them
#[derive(Debug, Clone)]
pub struct SubmissionOverview {
    pub submissions: Vec<Submission>,
    pub counts: BTreeMap<SubmissionStatus, usize>,
}

/// Domain service for restaurant onboarding
pub struct Service {
    repo: Arc<dyn SubmissionRepository>,
    uploader: Arc<Uploader>,
    notifier: Arc<dyn Notifier>,
    sessions: WizardSessions,
}

impl Service {
    /// Create a new service instance with default session limits
    pub fn new(
        repo: Arc<dyn SubmissionRepository>,
        uploader: Arc<Uploader>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_session_limits(repo, uploader, notifier, SessionLimits::default())
    }

    pub fn with_session_limits(
        repo: Arc<dyn SubmissionRepository>,
        uploader: Arc<Uploader>,
        notifier: Arc<dyn Notifier>,
        limits: SessionLimits,
    ) -> Self {
        Self {
            repo,
            uploader,
            notifier,
            sessions: WizardSessions::with_limits(limits),
        }
    }

    // ===== Wizard Operations =====

    /// Open a new wizard session in its initial state
    pub fn start_wizard(&self) -> Result<WizardSnapshot, OnboardingError> {
        let (id, handle) = self.sessions.create().map_err(|full| {
            tracing::warn!(limit = full.limit, "wizard session limit reached");
            OnboardingError::TooManySessions { limit: full.limit }
        })?;
        tracing::debug!(
            wizard_id = %id,
            open_sessions = self.sessions.len(),
            "wizard session started"
        );
        let wizard = handle.lock();
        Ok(WizardSnapshot::capture(id, &wizard))
    }

    /// Current state of a wizard session
    pub fn wizard_state(&self, id: Uuid) -> Result<WizardSnapshot, OnboardingError> {
        let handle = self.session(id)?;
        let wizard = handle.lock();
        Ok(WizardSnapshot::capture(id, &wizard))
    }

    /// Drop a wizard session and its draft
    pub fn discard_wizard(&self, id: Uuid) -> Result<(), OnboardingError> {
        if self.sessions.remove(id) {
            Ok(())
        } else {
            Err(OnboardingError::session_not_found(id))
        }
    }

    /// Replace one section of the session's draft
    pub fn update_wizard_section(
        &self,
        id: Uuid,
        section: Section,
    ) -> Result<WizardSnapshot, OnboardingError> {
        let handle = self.session(id)?;
        let mut wizard = handle.lock();
        let name = section.name();
        wizard.update_field(section).map_err(map_wizard_error)?;
        tracing::debug!(wizard_id = %id, section = name, "draft section replaced");
        Ok(WizardSnapshot::capture(id, &wizard))
    }

    /// Move the session back one step
    pub fn wizard_back(&self, id: Uuid) -> Result<WizardSnapshot, OnboardingError> {
        let handle = self.session(id)?;
        let mut wizard = handle.lock();
        wizard.back().map_err(map_wizard_error)?;
        Ok(WizardSnapshot::capture(id, &wizard))
    }

    /// Validate the current step and move forward; on the last step run the
    /// submission pipeline.
    pub async fn wizard_next(&self, id: Uuid) -> Result<NextOutcome, OnboardingError> {
        let handle = self.session(id)?;
        let step = {
            let mut wizard = handle.lock();
            wizard.next()
        };

        match step {
            Ok(NextStep::Advanced(to)) => {
                tracing::debug!(wizard_id = %id, step = to, "wizard advanced");
                let wizard = handle.lock();
                Ok(NextOutcome::Advanced(WizardSnapshot::capture(id, &wizard)))
            }
            Ok(NextStep::Submit(draft)) => self.submit(id, handle, draft).await,
            Err(e @ WizardError::Incomplete { step, .. }) => {
                self.publish(id, Notification::ValidationFailed { step }).await;
                Err(map_wizard_error(e))
            }
            Err(e) => Err(map_wizard_error(e)),
        }
    }

    async fn submit(
        &self,
        id: Uuid,
        handle: WizardHandle,
        draft: Draft,
    ) -> Result<NextOutcome, OnboardingError> {
        let guard = SubmitGuard::new(handle.clone());
        tracing::info!(
            wizard_id = %id,
            uploads = draft.pending_uploads(),
            dishes = draft.popular_dishes.len(),
            photos = draft.photos.len(),
            "submitting restaurant draft"
        );

        let result = SubmissionPipeline::new(self.repo.as_ref(), &self.uploader)
            .run(&draft)
            .await;

        match result {
            Ok(receipt) => {
                guard.succeed();
                self.publish(
                    id,
                    Notification::Submitted {
                        submission_id: receipt.submission.id,
                    },
                )
                .await;
                let wizard = handle.lock();
                Ok(NextOutcome::Submitted {
                    receipt,
                    wizard: WizardSnapshot::capture(id, &wizard),
                })
            }
            Err(e) => {
                drop(guard);
                let committed: Vec<&str> = e.committed.iter().map(|s| s.name()).collect();
                tracing::error!(
                    wizard_id = %id,
                    stage = %e.stage,
                    committed = ?committed,
                    orphan_records = e.left_orphan_records(),
                    error = ?e.source,
                    "submission failed; committed stages were not rolled back"
                );
                self.publish(id, Notification::SubmissionFailed).await;
                Err(OnboardingError::SubmissionFailed)
            }
        }
    }

    // ===== Submission Operations =====

    /// Submissions newest first, narrowed by the filter
    pub async fn list_submissions(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<Vec<Submission>, OnboardingError> {
        Ok(self.submission_overview(filter).await?.submissions)
    }

    /// Filtered submissions with status counts across the whole collection
    pub async fn submission_overview(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<SubmissionOverview, OnboardingError> {
        let list = SubmissionList::load(self.repo.clone()).await?;
        Ok(SubmissionOverview {
            submissions: list.filtered(filter).cloned().collect(),
            counts: list.status_counts(),
        })
    }

    /// A submission with dishes and photos in display order
    pub async fn get_submission_detail(
        &self,
        id: Uuid,
    ) -> Result<SubmissionDetail, OnboardingError> {
        Ok(SubmissionDetailView::load(self.repo.as_ref(), id)
            .await?
            .into_detail())
    }

    /// Set any status; no transition rules are enforced
    pub async fn update_submission_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Submission, OnboardingError> {
        let mut list = SubmissionList::new(self.repo.clone());
        list.update_status(id, status).await
    }

    /// Site generation hook. Records the request without changing the submission.
    pub async fn request_site_generation(&self, id: Uuid) -> Result<(), OnboardingError> {
        let view = SubmissionDetailView::load(self.repo.as_ref(), id).await?;
        view.generate_site();
        Ok(())
    }

    // ===== Helper Methods =====

    fn session(&self, id: Uuid) -> Result<WizardHandle, OnboardingError> {
        self.sessions
            .get(id)
            .ok_or_else(|| OnboardingError::session_not_found(id))
    }

    async fn publish(&self, id: Uuid, notification: Notification) {
        if let Err(e) = self.notifier.notify(id, &notification).await {
            // Log error but don't fail the operation
            tracing::warn!(wizard_id = %id, error = ?e, "failed to deliver notification");
        }
    }
}

fn map_wizard_error(error: WizardError) -> OnboardingError {
    match error {
        WizardError::Incomplete { step, title } => OnboardingError::IncompleteStep {
            step,
            title: title.to_string(),
        },
        WizardError::Busy => OnboardingError::Busy,
    }
}
