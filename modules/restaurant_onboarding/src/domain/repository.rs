//! Repository traits for data access
//!
//! These traits define the interface to the managed backend tables.
//! Implementations are in infra/storage/repositories.rs

use crate::contract::{
    Dish, NewDish, NewPhoto, NewSubmission, Photo, Submission, SubmissionStatus,
};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository over the submission, dish and photo tables.
///
/// Every call commits on its own; nothing coordinates across calls.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert a submission; the backend assigns id, status and timestamps
    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission>;

    /// All submissions, newest first
    async fn list_submissions(&self) -> Result<Vec<Submission>>;

    /// Find a submission by id
    async fn find_submission(&self, id: Uuid) -> Result<Option<Submission>>;

    /// Set the status of one submission, returning the updated row
    async fn update_status(&self, id: Uuid, status: SubmissionStatus) -> Result<Option<Submission>>;

    /// Bulk insert dishes in one call
    async fn insert_dishes(&self, dishes: &[NewDish]) -> Result<Vec<Dish>>;

    /// Dishes of a submission ordered by display_order
    async fn list_dishes(&self, submission_id: Uuid) -> Result<Vec<Dish>>;

    /// Bulk insert photos in one call
    async fn insert_photos(&self, photos: &[NewPhoto]) -> Result<Vec<Photo>>;

    /// Photos of a submission ordered by display_order
    async fn list_photos(&self, submission_id: Uuid) -> Result<Vec<Photo>>;
}
