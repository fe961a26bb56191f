//! Domain layer - business logic and services

pub mod draft;
pub mod events;
pub mod projection;
pub mod repository;
pub mod service;
pub mod session;
pub mod submission;
pub mod upload;
pub mod validation;
pub mod wizard;

pub use draft::{BinaryAsset, Draft, Section};
pub use events::{LogNotifier, NoOpNotifier, Notification, Notifier};
pub use repository::SubmissionRepository;
pub use service::{NextOutcome, Service, SubmissionOverview};
pub use upload::{BlobStore, BucketKind, Buckets, UploadError, Uploader};
pub use wizard::{NextStep, Wizard, WizardError};
