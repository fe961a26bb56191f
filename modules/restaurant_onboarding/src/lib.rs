//! Restaurant Onboarding Module
//!
//! Guided seven-step wizard that collects a restaurant's details, a
//! submission pipeline that uploads the collected files and persists the
//! records, and admin read models for reviewing submissions.

// Public exports
pub mod contract;
pub use contract::{
    client::OnboardingApi, error::OnboardingError, Dish, Photo, Submission, SubmissionDetail,
    SubmissionFilter, SubmissionStatus,
};

pub mod config;
pub use config::{Config, StorageConfig};

pub mod module;
pub use module::OnboardingModule;

// Internal modules (hidden from public API)
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
