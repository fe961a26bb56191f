//! Contract models for the onboarding service
//!
//! These models are transport-agnostic and used for inter-module communication.
//! NO serde derives - these are pure domain models.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Review status of a persisted submission.
///
/// The ordering `submitted -> in-review -> generated -> live` is the intended
/// workflow, but the backend accepts any value at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubmissionStatus {
    #[default]
    Submitted,
    InReview,
    Generated,
    Live,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::Submitted,
        SubmissionStatus::InReview,
        SubmissionStatus::Generated,
        SubmissionStatus::Live,
    ];

    /// Wire/database representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::InReview => "in-review",
            SubmissionStatus::Generated => "generated",
            SubmissionStatus::Live => "live",
        }
    }

    /// The status the admin review action moves to, if any.
    ///
    /// `submitted` starts a review and `in-review` marks the site generated;
    /// the remaining statuses offer no action.
    pub fn review_action(&self) -> Option<SubmissionStatus> {
        match self {
            SubmissionStatus::Submitted => Some(SubmissionStatus::InReview),
            SubmissionStatus::InReview => Some(SubmissionStatus::Generated),
            SubmissionStatus::Generated | SubmissionStatus::Live => None,
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status string is not one of the known values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown submission status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for SubmissionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "submitted" => Ok(SubmissionStatus::Submitted),
            "in-review" => Ok(SubmissionStatus::InReview),
            "generated" => Ok(SubmissionStatus::Generated),
            "live" => Ok(SubmissionStatus::Live),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Persisted restaurant submission (parent record)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Generated by the backend on insert
    pub id: Uuid,
    pub restaurant_name: String,
    pub address: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<String>,
    pub story: String,
    pub owner_quote: Option<String>,
    /// Resolved address of the uploaded about image
    pub about_image_url: Option<String>,
    /// Resolved address of the uploaded menu PDF
    pub menu_pdf_url: Option<String>,
    pub delivery_areas: String,
    pub delivery_instructions: Option<String>,
    pub hours: String,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub comments: Option<String>,
    pub status: SubmissionStatus,
    /// Address of the generated site, set by the site generator
    pub generated_site_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a submission. Id, status and timestamps are assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewSubmission {
    pub restaurant_name: String,
    pub address: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<String>,
    pub story: String,
    pub owner_quote: Option<String>,
    pub about_image_url: Option<String>,
    pub menu_pdf_url: Option<String>,
    pub delivery_areas: String,
    pub delivery_instructions: Option<String>,
    pub hours: String,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    pub comments: Option<String>,
}

/// Persisted dish, child of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dish {
    pub id: Uuid,
    pub restaurant_submission_id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDish {
    pub restaurant_submission_id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub display_order: i32,
}

/// Persisted photo, child of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: Uuid,
    pub restaurant_submission_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPhoto {
    pub restaurant_submission_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
}

/// A submission with its child collections, each ordered by `display_order`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDetail {
    pub submission: Submission,
    pub dishes: Vec<Dish>,
    pub photos: Vec<Photo>,
}

/// Admin list filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    /// Case-insensitive substring matched against restaurant name and email
    pub search: Option<String>,
    /// Exact status match; `None` means all statuses
    pub status: Option<SubmissionStatus>,
}

impl SubmissionFilter {
    pub fn matches(&self, submission: &Submission) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                submission.restaurant_name.to_lowercase().contains(&term)
                    || submission.email.to_lowercase().contains(&term)
            }
        };
        let matches_status = self.status.map_or(true, |s| submission.status == s);
        matches_search && matches_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_name() {
        for status in SubmissionStatus::ALL {
            assert_eq!(status.as_str().parse::<SubmissionStatus>(), Ok(status));
        }
        assert!("archived".parse::<SubmissionStatus>().is_err());
    }

    #[test]
    fn review_action_follows_workflow() {
        assert_eq!(
            SubmissionStatus::Submitted.review_action(),
            Some(SubmissionStatus::InReview)
        );
        assert_eq!(
            SubmissionStatus::InReview.review_action(),
            Some(SubmissionStatus::Generated)
        );
        assert_eq!(SubmissionStatus::Generated.review_action(), None);
        assert_eq!(SubmissionStatus::Live.review_action(), None);
    }
}
