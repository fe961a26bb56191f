//! Submission pipeline
//!
//! Turns a confirmed draft into persisted records as an ordered list of
//! fallible stages. Each stage consumes what the earlier ones resolved:
//!
//! 1. about image upload
//! 2. menu PDF upload
//! 3. photo uploads, in order
//! 4. dish image uploads, in order, sparse by dish index
//! 5. parent submission insert
//! 6. dish inserts (bulk)
//! 7. photo inserts (bulk)
//!
//! The first failure aborts every later stage. Nothing already written is
//! undone: uploaded objects and inserted rows stay in place, and the error
//! lists the stages that committed before the failure.

use super::draft::Draft;
use super::repository::SubmissionRepository;
use super::upload::{BucketKind, UploadError, Uploader};
use crate::contract::{Dish, NewDish, NewPhoto, NewSubmission, Photo, Submission};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    AboutImage,
    MenuPdf,
    PhotoUploads,
    DishImages,
    Submission,
    Dishes,
    Photos,
}

impl Stage {
    /// Execution order
    pub const ORDER: [Stage; 7] = [
        Stage::AboutImage,
        Stage::MenuPdf,
        Stage::PhotoUploads,
        Stage::DishImages,
        Stage::Submission,
        Stage::Dishes,
        Stage::Photos,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::AboutImage => "about_image",
            Stage::MenuPdf => "menu_pdf",
            Stage::PhotoUploads => "photo_uploads",
            Stage::DishImages => "dish_images",
            Stage::Submission => "submission",
            Stage::Dishes => "dishes",
            Stage::Photos => "photos",
        }
    }

    /// Whether the stage writes backend records rather than content objects
    pub fn writes_records(&self) -> bool {
        matches!(self, Stage::Submission | Stage::Dishes | Stage::Photos)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionFailure {
    #[error(transparent)]
    Upload(#[from] UploadError),
    #[error("backend write failed")]
    Persistence(#[source] anyhow::Error),
}

/// Pipeline failure with the stages that had already committed
#[derive(Debug, thiserror::Error)]
#[error("submission aborted at stage '{stage}'")]
pub struct SubmissionError {
    pub stage: Stage,
    /// Stages that completed before the failure, in order
    pub committed: Vec<Stage>,
    #[source]
    pub source: SubmissionFailure,
}

impl SubmissionError {
    /// Whether any backend rows were written before the failure
    pub fn left_orphan_records(&self) -> bool {
        self.committed.iter().any(Stage::writes_records)
    }
}

/// Records created by a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission: Submission,
    pub dishes: Vec<Dish>,
    pub photos: Vec<Photo>,
    /// Number of assets uploaded
    pub uploaded: usize,
}

/// Values resolved by earlier stages
#[derive(Debug, Default)]
struct Resolved {
    about_image_url: Option<String>,
    menu_pdf_url: Option<String>,
    photo_urls: Vec<String>,
    dish_image_urls: BTreeMap<usize, String>,
    submission: Option<Submission>,
    dishes: Vec<Dish>,
    photos: Vec<Photo>,
    uploaded: usize,
}

pub struct SubmissionPipeline<'a> {
    repo: &'a dyn SubmissionRepository,
    uploader: &'a Uploader,
}

impl<'a> SubmissionPipeline<'a> {
    pub fn new(repo: &'a dyn SubmissionRepository, uploader: &'a Uploader) -> Self {
        Self { repo, uploader }
    }

    /// Run every stage in order, stopping at the first failure
    pub async fn run(&self, draft: &Draft) -> Result<SubmissionReceipt, SubmissionError> {
        let mut resolved = Resolved::default();
        let mut committed = Vec::with_capacity(Stage::ORDER.len());

        for stage in Stage::ORDER {
            if let Err(source) = self.run_stage(stage, draft, &mut resolved).await {
                return Err(SubmissionError {
                    stage,
                    committed,
                    source,
                });
            }
            tracing::debug!(stage = %stage, "submission stage complete");
            committed.push(stage);
        }

        let submission = resolved.submission.ok_or_else(|| SubmissionError {
            stage: Stage::Submission,
            committed: Stage::ORDER.to_vec(),
            source: SubmissionFailure::Persistence(anyhow::anyhow!(
                "submission stage produced no record"
            )),
        })?;

        Ok(SubmissionReceipt {
            submission,
            dishes: resolved.dishes,
            photos: resolved.photos,
            uploaded: resolved.uploaded,
        })
    }

    async fn run_stage(
        &self,
        stage: Stage,
        draft: &Draft,
        resolved: &mut Resolved,
    ) -> Result<(), SubmissionFailure> {
        match stage {
            Stage::AboutImage => {
                if let Some(image) = &draft.about.about_image {
                    let path = format!("about/{}-about", millis());
                    let url = self
                        .uploader
                        .upload(image, BucketKind::Images, Some(&path))
                        .await?;
                    resolved.about_image_url = Some(url);
                    resolved.uploaded += 1;
                }
            }
            Stage::MenuPdf => {
                if let Some(menu) = &draft.menu_pdf {
                    let path = format!("menus/{}-menu", millis());
                    let url = self
                        .uploader
                        .upload(menu, BucketKind::Pdfs, Some(&path))
                        .await?;
                    resolved.menu_pdf_url = Some(url);
                    resolved.uploaded += 1;
                }
            }
            Stage::PhotoUploads => {
                for (i, photo) in draft.photos.iter().enumerate() {
                    let path = format!("photos/{}-photo-{}", millis(), i);
                    let url = self
                        .uploader
                        .upload(photo, BucketKind::Images, Some(&path))
                        .await?;
                    resolved.photo_urls.push(url);
                    resolved.uploaded += 1;
                }
            }
            Stage::DishImages => {
                for (i, dish) in draft.popular_dishes.iter().enumerate() {
                    let Some(image) = &dish.image else {
                        continue;
                    };
                    let path = format!("dishes/{}-dish-{}", millis(), i);
                    let url = self
                        .uploader
                        .upload(image, BucketKind::Images, Some(&path))
                        .await?;
                    resolved.dish_image_urls.insert(i, url);
                    resolved.uploaded += 1;
                }
            }
            Stage::Submission => {
                let new = new_submission(
                    draft,
                    resolved.about_image_url.clone(),
                    resolved.menu_pdf_url.clone(),
                );
                let submission = self
                    .repo
                    .insert_submission(&new)
                    .await
                    .map_err(SubmissionFailure::Persistence)?;
                tracing::info!(submission_id = %submission.id, "submission record created");
                resolved.submission = Some(submission);
            }
            Stage::Dishes => {
                if draft.popular_dishes.is_empty() {
                    return Ok(());
                }
                let parent = parent_id(resolved)?;
                let rows: Vec<NewDish> = draft
                    .popular_dishes
                    .iter()
                    .enumerate()
                    .map(|(i, dish)| NewDish {
                        restaurant_submission_id: parent,
                        name: dish.name.clone(),
                        description: dish.description.clone(),
                        image_url: resolved.dish_image_urls.get(&i).cloned(),
                        display_order: display_order(i),
                    })
                    .collect();
                resolved.dishes = self
                    .repo
                    .insert_dishes(&rows)
                    .await
                    .map_err(SubmissionFailure::Persistence)?;
            }
            Stage::Photos => {
                if resolved.photo_urls.is_empty() {
                    return Ok(());
                }
                let parent = parent_id(resolved)?;
                let rows: Vec<NewPhoto> = resolved
                    .photo_urls
                    .iter()
                    .enumerate()
                    .map(|(i, url)| NewPhoto {
                        restaurant_submission_id: parent,
                        image_url: url.clone(),
                        display_order: display_order(i),
                    })
                    .collect();
                resolved.photos = self
                    .repo
                    .insert_photos(&rows)
                    .await
                    .map_err(SubmissionFailure::Persistence)?;
            }
        }
        Ok(())
    }
}

fn millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// Sequences are capped well below i32::MAX by the draft forms
fn display_order(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn parent_id(resolved: &Resolved) -> Result<uuid::Uuid, SubmissionFailure> {
    resolved
        .submission
        .as_ref()
        .map(|s| s.id)
        .ok_or_else(|| SubmissionFailure::Persistence(anyhow::anyhow!("parent submission missing")))
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Parent record payload from the draft scalars and the resolved addresses
pub fn new_submission(
    draft: &Draft,
    about_image_url: Option<String>,
    menu_pdf_url: Option<String>,
) -> NewSubmission {
    let info = &draft.business_info;
    let about = &draft.about;
    let delivery = &draft.delivery_hours;
    let social = &draft.social;

    NewSubmission {
        restaurant_name: info.name.clone(),
        address: info.address.clone(),
        email: info.email.clone(),
        phone: non_empty(&info.phone),
        website: non_empty(&info.website),
        founded_year: non_empty(&about.founded_year),
        story: about.story.clone(),
        owner_quote: non_empty(&about.owner_quote),
        about_image_url,
        menu_pdf_url,
        delivery_areas: delivery.delivery_areas.clone(),
        delivery_instructions: non_empty(&delivery.instructions),
        hours: delivery.hours.clone(),
        instagram: non_empty(&social.instagram),
        facebook: non_empty(&social.facebook),
        twitter: non_empty(&social.twitter),
        comments: non_empty(&social.comments),
    }
}
