//! User-facing notifications for the onboarding flow
//!
//! The wizard reports three outcomes to the restaurant owner:
//! - a step is missing required fields (dismissable, recoverable)
//! - the submission went through
//! - the submission failed (one generic message, the cause is only logged)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    /// Forward transition blocked by the step validator
    ValidationFailed { step: usize },
    /// Submission created and the wizard reset
    Submitted { submission_id: Uuid },
    /// Submission aborted; the draft is kept
    SubmissionFailed,
}

impl Notification {
    pub fn title(&self) -> &'static str {
        match self {
            Notification::ValidationFailed { .. } => "Please complete required fields",
            Notification::Submitted { .. } => "Restaurant information submitted!",
            Notification::SubmissionFailed => "Submission failed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Notification::ValidationFailed { .. } => {
                "Fill in all required information before proceeding."
            }
            Notification::Submitted { .. } => {
                "Thank you for sharing your restaurant details with us."
            }
            Notification::SubmissionFailed => "Please try again or contact support.",
        }
    }

    /// Rendered as an error toast
    pub fn is_destructive(&self) -> bool {
        !matches!(self, Notification::Submitted { .. })
    }
}

/// Delivers notifications to whoever presents them
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, wizard_id: Uuid, notification: &Notification) -> anyhow::Result<()>;
}

/// No-op notifier for testing or when no presenter is attached
pub struct NoOpNotifier;

#[async_trait::async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, _wizard_id: Uuid, _notification: &Notification) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Writes notifications to the log
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, wizard_id: Uuid, notification: &Notification) -> anyhow::Result<()> {
        if notification.is_destructive() {
            tracing::warn!(%wizard_id, title = notification.title(), "wizard notification");
        } else {
            tracing::info!(%wizard_id, title = notification.title(), "wizard notification");
        }
        Ok(())
    }
}
