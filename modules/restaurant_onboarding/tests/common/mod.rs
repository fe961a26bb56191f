//! Common test utilities: in-memory repository, content stores and draft fixtures
#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use restaurant_onboarding::contract::*;
use restaurant_onboarding::domain::draft::{
    About, BinaryAsset, BusinessInfo, DeliveryHours, DishDraft, Draft, Section, Social,
};
use restaurant_onboarding::domain::{
    BlobStore, Buckets, Notification, Notifier, Service, SubmissionRepository, Uploader,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use uuid::Uuid;

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

// ===== Repository =====

#[derive(Default)]
struct RepoState {
    submissions: Vec<Submission>,
    dishes: Vec<Dish>,
    photos: Vec<Photo>,
    calls: Vec<&'static str>,
}

/// In-memory repository recording every call, optionally failing one method
#[derive(Clone, Default)]
pub struct MockSubmissionRepo {
    state: Arc<RwLock<RepoState>>,
    fail_on: Option<&'static str>,
}

impl MockSubmissionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call to `method` returns an error (after being recorded)
    pub fn failing_on(method: &'static str) -> Self {
        Self {
            fail_on: Some(method),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.read().calls.clone()
    }

    /// Calls that write rows
    pub fn write_calls(&self) -> Vec<&'static str> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("insert") || *c == "update_status")
            .collect()
    }

    pub fn submissions(&self) -> Vec<Submission> {
        self.state.read().submissions.clone()
    }

    pub fn dishes(&self) -> Vec<Dish> {
        self.state.read().dishes.clone()
    }

    pub fn photos(&self) -> Vec<Photo> {
        self.state.read().photos.clone()
    }

    /// Insert a submission directly, bypassing the pipeline
    pub fn seed(
        &self,
        name: &str,
        email: &str,
        status: SubmissionStatus,
        age_minutes: i64,
    ) -> Submission {
        let created_at = Utc::now() - Duration::minutes(age_minutes);
        let submission = submission_row(Uuid::new_v4(), name, email, status, created_at);
        self.state.write().submissions.push(submission.clone());
        submission
    }

    /// Insert children directly, in the given order
    pub fn seed_children(&self, dishes: Vec<Dish>, photos: Vec<Photo>) {
        let mut state = self.state.write();
        state.dishes.extend(dishes);
        state.photos.extend(photos);
    }

    fn record(&self, method: &'static str) -> Result<()> {
        self.state.write().calls.push(method);
        if self.fail_on == Some(method) {
            return Err(anyhow!("injected failure in {method}"));
        }
        Ok(())
    }
}

pub fn submission_row(
    id: Uuid,
    name: &str,
    email: &str,
    status: SubmissionStatus,
    created_at: DateTime<Utc>,
) -> Submission {
    Submission {
        id,
        restaurant_name: name.to_string(),
        address: "1 Main St".to_string(),
        email: email.to_string(),
        phone: None,
        website: None,
        founded_year: Some("1998".to_string()),
        story: "Family run since day one".to_string(),
        owner_quote: None,
        about_image_url: None,
        menu_pdf_url: None,
        delivery_areas: "Downtown".to_string(),
        delivery_instructions: None,
        hours: "Mon-Sun 11-22".to_string(),
        instagram: None,
        facebook: None,
        twitter: None,
        comments: None,
        status,
        generated_site_url: None,
        created_at,
        updated_at: created_at,
    }
}

#[async_trait]
impl SubmissionRepository for MockSubmissionRepo {
    async fn insert_submission(&self, new: &NewSubmission) -> Result<Submission> {
        self.record("insert_submission")?;
        let now = Utc::now();
        let submission = Submission {
            id: Uuid::new_v4(),
            restaurant_name: new.restaurant_name.clone(),
            address: new.address.clone(),
            email: new.email.clone(),
            phone: new.phone.clone(),
            website: new.website.clone(),
            founded_year: new.founded_year.clone(),
            story: new.story.clone(),
            owner_quote: new.owner_quote.clone(),
            about_image_url: new.about_image_url.clone(),
            menu_pdf_url: new.menu_pdf_url.clone(),
            delivery_areas: new.delivery_areas.clone(),
            delivery_instructions: new.delivery_instructions.clone(),
            hours: new.hours.clone(),
            instagram: new.instagram.clone(),
            facebook: new.facebook.clone(),
            twitter: new.twitter.clone(),
            comments: new.comments.clone(),
            status: SubmissionStatus::Submitted,
            generated_site_url: None,
            created_at: now,
            updated_at: now,
        };
        self.state.write().submissions.push(submission.clone());
        Ok(submission)
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        self.record("list_submissions")?;
        // Insertion order on purpose: callers sort
        Ok(self.state.read().submissions.clone())
    }

    async fn find_submission(&self, id: Uuid) -> Result<Option<Submission>> {
        self.record("find_submission")?;
        Ok(self.state.read().submissions.iter().find(|s| s.id == id).cloned())
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        self.record("update_status")?;
        let mut state = self.state.write();
        Ok(state.submissions.iter_mut().find(|s| s.id == id).map(|s| {
            s.status = status;
            s.updated_at = Utc::now();
            s.clone()
        }))
    }

    async fn insert_dishes(&self, dishes: &[NewDish]) -> Result<Vec<Dish>> {
        self.record("insert_dishes")?;
        let now = Utc::now();
        let rows: Vec<Dish> = dishes
            .iter()
            .map(|d| Dish {
                id: Uuid::new_v4(),
                restaurant_submission_id: d.restaurant_submission_id,
                name: d.name.clone(),
                description: d.description.clone(),
                image_url: d.image_url.clone(),
                display_order: d.display_order,
                created_at: now,
            })
            .collect();
        self.state.write().dishes.extend(rows.clone());
        Ok(rows)
    }

    async fn list_dishes(&self, submission_id: Uuid) -> Result<Vec<Dish>> {
        self.record("list_dishes")?;
        Ok(self
            .state
            .read()
            .dishes
            .iter()
            .filter(|d| d.restaurant_submission_id == submission_id)
            .cloned()
            .collect())
    }

    async fn insert_photos(&self, photos: &[NewPhoto]) -> Result<Vec<Photo>> {
        self.record("insert_photos")?;
        let now = Utc::now();
        let rows: Vec<Photo> = photos
            .iter()
            .map(|p| Photo {
                id: Uuid::new_v4(),
                restaurant_submission_id: p.restaurant_submission_id,
                image_url: p.image_url.clone(),
                display_order: p.display_order,
                created_at: now,
            })
            .collect();
        self.state.write().photos.extend(rows.clone());
        Ok(rows)
    }

    async fn list_photos(&self, submission_id: Uuid) -> Result<Vec<Photo>> {
        self.record("list_photos")?;
        Ok(self
            .state
            .read()
            .photos
            .iter()
            .filter(|p| p.restaurant_submission_id == submission_id)
            .cloned()
            .collect())
    }
}

// ===== Content stores =====

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bucket: String,
    pub key: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// In-memory content store; optionally rejects the n-th write (1-based)
#[derive(Default)]
pub struct MockBlobStore {
    objects: RwLock<Vec<StoredObject>>,
    attempts: AtomicUsize,
    fail_on_nth: Option<usize>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_nth(n: usize) -> Self {
        Self {
            fail_on_nth: Some(n),
            ..Self::default()
        }
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.objects.read().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_nth == Some(attempt) {
            return Err(anyhow!("store unavailable"));
        }
        self.objects.write().push(StoredObject {
            bucket: bucket.to_string(),
            key: key.to_string(),
            content_type: content_type.to_string(),
            bytes,
        });
        Ok(())
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("https://cdn.test/{}/{}", bucket, key)
    }
}

/// Content store whose writes wait until the gate is opened
pub struct GatedBlobStore {
    gate: Semaphore,
    inner: MockBlobStore,
}

impl GatedBlobStore {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            inner: MockBlobStore::new(),
        }
    }

    pub fn open(&self) {
        self.gate.add_permits(Semaphore::MAX_PERMITS / 2);
    }

    pub fn objects(&self) -> Vec<StoredObject> {
        self.inner.objects()
    }
}

#[async_trait]
impl BlobStore for GatedBlobStore {
    async fn put(&self, bucket: &str, key: &str, bytes: Bytes, content_type: &str) -> Result<()> {
        let _permit = self.gate.acquire().await?;
        self.inner.put(bucket, key, bytes, content_type).await
    }

    fn public_url(&self, bucket: &str, key: &str) -> String {
        self.inner.public_url(bucket, key)
    }
}

// ===== Notifier =====

#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(Uuid, Notification)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Uuid, Notification)> {
        self.events.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.events.lock().last().map(|(_, n)| n.clone())
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, wizard_id: Uuid, notification: &Notification) -> Result<()> {
        self.events.lock().push((wizard_id, notification.clone()));
        Ok(())
    }
}

// ===== Wiring =====

pub fn uploader(store: Arc<dyn BlobStore>) -> Uploader {
    Uploader::new(store, Buckets::default())
}

pub fn service(
    repo: &MockSubmissionRepo,
    store: Arc<dyn BlobStore>,
    notifier: Arc<RecordingNotifier>,
) -> Arc<Service> {
    Arc::new(Service::new(
        Arc::new(repo.clone()),
        Arc::new(uploader(store)),
        notifier,
    ))
}

// ===== Draft fixtures =====

pub fn image(name: &str) -> BinaryAsset {
    BinaryAsset::new(name, "image/jpeg", Bytes::copy_from_slice(name.as_bytes()))
}

pub fn pdf() -> BinaryAsset {
    BinaryAsset::new("menu.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.7"))
}

pub fn business_info() -> BusinessInfo {
    BusinessInfo {
        name: "Tony's Trattoria".to_string(),
        address: "12 Harbor Road".to_string(),
        email: "tony@trattoria.test".to_string(),
        phone: String::new(),
        website: "https://trattoria.test".to_string(),
    }
}

pub fn about(with_image: bool) -> About {
    About {
        founded_year: "1998".to_string(),
        story: "Three generations of pasta".to_string(),
        owner_quote: String::new(),
        about_image: with_image.then(|| image("about.jpg")),
    }
}

pub fn dishes(count: usize) -> Vec<DishDraft> {
    (0..count)
        .map(|i| DishDraft {
            name: format!("Dish {i}"),
            description: format!("House special {i}"),
            image: None,
        })
        .collect()
}

pub fn photos(names: &[&str]) -> Vec<BinaryAsset> {
    names.iter().map(|n| image(n)).collect()
}

pub fn delivery_hours() -> DeliveryHours {
    DeliveryHours {
        delivery_areas: "Downtown, Harbor".to_string(),
        instructions: String::new(),
        hours: "Mon-Sun 11:00-22:00".to_string(),
    }
}

/// A draft that passes every gated step
pub fn complete_draft() -> Draft {
    Draft {
        business_info: business_info(),
        about: about(false),
        popular_dishes: dishes(3),
        menu_pdf: Some(pdf()),
        delivery_hours: delivery_hours(),
        photos: photos(&["a.jpg", "b.jpg", "c.jpg"]),
        social: Social::default(),
    }
}

/// Sections of `draft` in wizard order
pub fn sections(draft: &Draft) -> Vec<Section> {
    vec![
        Section::BusinessInfo(draft.business_info.clone()),
        Section::About(draft.about.clone()),
        Section::PopularDishes(draft.popular_dishes.clone()),
        Section::MenuPdf(draft.menu_pdf.clone()),
        Section::DeliveryHours(draft.delivery_hours.clone()),
        Section::Photos(draft.photos.clone()),
        Section::Social(draft.social.clone()),
    ]
}

/// Fill each step and advance until the wizard sits on the last step
pub async fn walk_to_last_step(service: &Service, id: Uuid, draft: &Draft) {
    for (step, section) in sections(draft).into_iter().enumerate() {
        service.update_wizard_section(id, section).unwrap();
        if step < 6 {
            service.wizard_next(id).await.unwrap();
        }
    }
}
