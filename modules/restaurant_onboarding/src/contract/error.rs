//! Contract error types for the onboarding service
//!
//! These errors are transport-agnostic and used for inter-module communication.

use uuid::Uuid;

/// Onboarding service domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OnboardingError {
    /// Submission or wizard session not found
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource type (submission, wizard_session)
        resource: String,
        /// Resource identifier
        id: String,
    },

    /// Malformed input that never reaches the wizard (bad section payload, oversized asset)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The current wizard step is missing required fields
    #[error("Step {step} ({title}) is missing required fields")]
    IncompleteStep { step: usize, title: String },

    /// A submission is already running for this wizard session
    #[error("A submission is already in progress")]
    Busy,

    /// No room for another wizard session until idle ones expire
    #[error("Too many open wizard sessions (limit {limit})")]
    TooManySessions { limit: usize },

    /// Final submission failed; the draft is kept for resubmission.
    /// The specific cause is logged, never surfaced.
    #[error("Submission failed")]
    SubmissionFailed,

    /// Internal error
    #[error("Internal error")]
    Internal,
}

impl OnboardingError {
    pub fn submission_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "submission".to_string(),
            id: id.to_string(),
        }
    }

    pub fn session_not_found(id: Uuid) -> Self {
        Self::NotFound {
            resource: "wizard_session".to_string(),
            id: id.to_string(),
        }
    }
}
