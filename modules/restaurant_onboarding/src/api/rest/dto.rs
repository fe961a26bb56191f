//! REST DTOs with serde derives for HTTP API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

// ===== Asset DTOs =====

/// A file sent with a section update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetUpload {
    /// Original file name
    #[schema(example = "storefront.jpg")]
    pub file_name: String,

    /// MIME type of the file
    #[schema(example = "image/jpeg")]
    pub content_type: String,

    /// Base64 file content; a `data:` URL prefix is accepted
    pub data: String,
}

/// Metadata of a file held in a wizard draft
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetInfo {
    pub file_name: String,
    pub content_type: String,
    /// Size in bytes
    pub size: usize,
}

// ===== Section DTOs =====

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BusinessInfoDto {
    #[schema(example = "Tony's Trattoria")]
    pub name: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AboutRequest {
    #[schema(example = "1998")]
    pub founded_year: String,
    pub story: String,
    pub owner_quote: String,
    pub about_image: Option<AssetUpload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DishUpload {
    pub name: String,
    pub description: String,
    pub image: Option<AssetUpload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PopularDishesRequest {
    /// At most 6 dishes
    pub dishes: Vec<DishUpload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct MenuPdfRequest {
    /// `null` clears the menu
    pub menu_pdf: Option<AssetUpload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DeliveryHoursDto {
    pub delivery_areas: String,
    pub instructions: String,
    pub hours: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct PhotosRequest {
    /// At most 10 photos
    pub photos: Vec<AssetUpload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SocialDto {
    pub instagram: String,
    pub facebook: String,
    pub twitter: String,
    pub comments: String,
}

// ===== Wizard DTOs =====

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AboutView {
    pub founded_year: String,
    pub story: String,
    pub owner_quote: String,
    pub about_image: Option<AssetInfo>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DishView {
    pub name: String,
    pub description: String,
    pub image: Option<AssetInfo>,
}

/// Draft contents with files reduced to their metadata
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftView {
    pub business_info: BusinessInfoDto,
    pub about: AboutView,
    pub popular_dishes: Vec<DishView>,
    pub menu_pdf: Option<AssetInfo>,
    pub delivery_hours: DeliveryHoursDto,
    pub photos: Vec<AssetInfo>,
    pub social: SocialDto,
}

/// Wizard session state
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WizardStateDto {
    pub id: Uuid,
    /// Zero-based step index, 0..=6
    pub current_step: usize,
    #[schema(example = "Business Info")]
    pub step_title: String,
    pub completed_steps: Vec<usize>,
    /// Whether the current step passes validation
    pub can_advance: bool,
    pub submitting: bool,
    pub draft: DraftView,
}

/// Message shown to the restaurant owner
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationDto {
    #[schema(example = "submitted")]
    pub kind: String,
    pub title: String,
    pub description: String,
    pub destructive: bool,
}

/// Result of `next`: the advanced state, or the submission outcome on the last step
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NextResponse {
    pub state: WizardStateDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<NotificationDto>,
}

// ===== Submission DTOs =====

/// Persisted submission
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDto {
    pub id: Uuid,
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
    #[schema(example = "submitted")]
    pub status: String,
    pub generated_site_url: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DishDto {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PhotoDto {
    pub id: Uuid,
    pub image_url: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionDetailDto {
    pub submission: SubmissionDto,
    pub dishes: Vec<DishDto>,
    pub photos: Vec<PhotoDto>,
}

/// Filtered submissions with per-status counts over the whole collection
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionDto>,
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
}

/// Query parameters for listing submissions
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ListSubmissionsQuery {
    /// Case-insensitive match on restaurant name or email
    pub search: Option<String>,
    /// One of `submitted`, `in-review`, `generated`, `live`, or `all`
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(example = "in-review")]
    pub status: String,
}
