//! Contract layer - public API for inter-module communication
//!
//! This layer contains transport-agnostic models and the native client trait.
//! NO serde derives on models - these are pure domain types.

pub mod client;
pub mod error;
pub mod model;

pub use client::OnboardingApi;
pub use error::OnboardingError;
pub use model::{
    Dish, NewDish, NewPhoto, NewSubmission, Photo, Submission, SubmissionDetail,
    SubmissionFilter, SubmissionStatus, UnknownStatus,
};
