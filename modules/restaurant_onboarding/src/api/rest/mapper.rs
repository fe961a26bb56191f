//! Mapper implementations for converting between DTOs and contract models
//!
//! Section payloads are decoded here. Files arrive as base64 and are checked
//! for media type and size before they reach the wizard; list caps for
//! dishes and photos are enforced at the same point.

use super::dto::*;
use crate::contract::{self, OnboardingError};
use crate::domain::draft::{
    About, BinaryAsset, BusinessInfo, DeliveryHours, DishDraft, Draft, Section, Social,
    MAX_DISHES, MAX_PHOTOS,
};
use crate::domain::session::WizardSnapshot;
use crate::domain::validation::step_title;
use crate::domain::Notification;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;

// ===== Asset decoding =====

/// Media type an asset slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Pdf,
}

/// Per-asset upload limits
#[derive(Debug, Clone, Copy)]
pub struct AssetLimits {
    pub max_bytes: usize,
}

impl AssetLimits {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Largest request body a section update can legitimately carry
    pub fn body_limit(&self) -> usize {
        // base64 inflates by 4/3; photos is the largest section
        self.max_bytes
            .saturating_mul(MAX_PHOTOS)
            .saturating_mul(4)
            / 3
            + 64 * 1024
    }

    pub fn decode(
        &self,
        upload: AssetUpload,
        kind: AssetKind,
    ) -> Result<BinaryAsset, OnboardingError> {
        let media_type: mime::Mime = upload
            .content_type
            .parse()
            .map_err(|_| invalid(format!("'{}' has an invalid content type", upload.file_name)))?;
        let accepted = match kind {
            AssetKind::Image => media_type.type_() == mime::IMAGE,
            AssetKind::Pdf => media_type.essence_str() == mime::APPLICATION_PDF.essence_str(),
        };
        if !accepted {
            return Err(invalid(format!(
                "'{}' must be {}, got {}",
                upload.file_name,
                match kind {
                    AssetKind::Image => "an image",
                    AssetKind::Pdf => "a PDF",
                },
                media_type.essence_str()
            )));
        }

        let encoded = strip_data_url(&upload.data);
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| invalid(format!("'{}' is not valid base64: {}", upload.file_name, e)))?;
        if bytes.is_empty() {
            return Err(invalid(format!("'{}' is empty", upload.file_name)));
        }
        if bytes.len() > self.max_bytes {
            return Err(invalid(format!(
                "'{}' is {} bytes, the limit is {}",
                upload.file_name,
                bytes.len(),
                self.max_bytes
            )));
        }

        Ok(BinaryAsset::new(upload.file_name, media_type.essence_str().to_string(), bytes))
    }

    fn decode_opt(
        &self,
        upload: Option<AssetUpload>,
        kind: AssetKind,
    ) -> Result<Option<BinaryAsset>, OnboardingError> {
        upload.map(|u| self.decode(u, kind)).transpose()
    }
}

fn strip_data_url(data: &str) -> &str {
    match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    }
}

fn invalid(message: impl Into<String>) -> OnboardingError {
    OnboardingError::Validation {
        message: message.into(),
    }
}

fn parse_body<T: DeserializeOwned>(
    section: &str,
    body: serde_json::Value,
) -> Result<T, OnboardingError> {
    serde_json::from_value(body)
        .map_err(|e| invalid(format!("invalid '{}' payload: {}", section, e)))
}

/// Decode the payload of `PUT /wizard/sessions/{id}/sections/{section}`
pub fn parse_section(
    section: &str,
    body: serde_json::Value,
    limits: &AssetLimits,
) -> Result<Section, OnboardingError> {
    match section {
        "business_info" => {
            let dto: BusinessInfoDto = parse_body(section, body)?;
            Ok(Section::BusinessInfo(dto.into()))
        }
        "about" => {
            let dto: AboutRequest = parse_body(section, body)?;
            Ok(Section::About(About {
                founded_year: dto.founded_year,
                story: dto.story,
                owner_quote: dto.owner_quote,
                about_image: limits.decode_opt(dto.about_image, AssetKind::Image)?,
            }))
        }
        "popular_dishes" => {
            let dto: PopularDishesRequest = parse_body(section, body)?;
            if dto.dishes.len() > MAX_DISHES {
                return Err(invalid(format!("at most {} dishes are accepted", MAX_DISHES)));
            }
            let dishes = dto
                .dishes
                .into_iter()
                .map(|d| {
                    Ok(DishDraft {
                        name: d.name,
                        description: d.description,
                        image: limits.decode_opt(d.image, AssetKind::Image)?,
                    })
                })
                .collect::<Result<Vec<_>, OnboardingError>>()?;
            Ok(Section::PopularDishes(dishes))
        }
        "menu_pdf" => {
            let dto: MenuPdfRequest = parse_body(section, body)?;
            Ok(Section::MenuPdf(limits.decode_opt(dto.menu_pdf, AssetKind::Pdf)?))
        }
        "delivery_hours" => {
            let dto: DeliveryHoursDto = parse_body(section, body)?;
            Ok(Section::DeliveryHours(dto.into()))
        }
        "photos" => {
            let dto: PhotosRequest = parse_body(section, body)?;
            if dto.photos.len() > MAX_PHOTOS {
                return Err(invalid(format!("at most {} photos are accepted", MAX_PHOTOS)));
            }
            let photos = dto
                .photos
                .into_iter()
                .map(|p| limits.decode(p, AssetKind::Image))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Section::Photos(photos))
        }
        "social" => {
            let dto: SocialDto = parse_body(section, body)?;
            Ok(Section::Social(dto.into()))
        }
        other => Err(invalid(format!("unknown section '{}'", other))),
    }
}

// ===== Draft section conversions =====

impl From<BusinessInfoDto> for BusinessInfo {
    fn from(dto: BusinessInfoDto) -> Self {
        Self {
            name: dto.name,
            address: dto.address,
            email: dto.email,
            phone: dto.phone,
            website: dto.website,
        }
    }
}

impl From<&BusinessInfo> for BusinessInfoDto {
    fn from(info: &BusinessInfo) -> Self {
        Self {
            name: info.name.clone(),
            address: info.address.clone(),
            email: info.email.clone(),
            phone: info.phone.clone(),
            website: info.website.clone(),
        }
    }
}

impl From<DeliveryHoursDto> for DeliveryHours {
    fn from(dto: DeliveryHoursDto) -> Self {
        Self {
            delivery_areas: dto.delivery_areas,
            instructions: dto.instructions,
            hours: dto.hours,
        }
    }
}

impl From<&DeliveryHours> for DeliveryHoursDto {
    fn from(hours: &DeliveryHours) -> Self {
        Self {
            delivery_areas: hours.delivery_areas.clone(),
            instructions: hours.instructions.clone(),
            hours: hours.hours.clone(),
        }
    }
}

impl From<SocialDto> for Social {
    fn from(dto: SocialDto) -> Self {
        Self {
            instagram: dto.instagram,
            facebook: dto.facebook,
            twitter: dto.twitter,
            comments: dto.comments,
        }
    }
}

impl From<&Social> for SocialDto {
    fn from(social: &Social) -> Self {
        Self {
            instagram: social.instagram.clone(),
            facebook: social.facebook.clone(),
            twitter: social.twitter.clone(),
            comments: social.comments.clone(),
        }
    }
}

// ===== Wizard state conversions =====

impl From<&BinaryAsset> for AssetInfo {
    fn from(asset: &BinaryAsset) -> Self {
        Self {
            file_name: asset.file_name.clone(),
            content_type: asset.content_type.clone(),
            size: asset.len(),
        }
    }
}

impl From<&Draft> for DraftView {
    fn from(draft: &Draft) -> Self {
        Self {
            business_info: (&draft.business_info).into(),
            about: AboutView {
                founded_year: draft.about.founded_year.clone(),
                story: draft.about.story.clone(),
                owner_quote: draft.about.owner_quote.clone(),
                about_image: draft.about.about_image.as_ref().map(Into::into),
            },
            popular_dishes: draft
                .popular_dishes
                .iter()
                .map(|d| DishView {
                    name: d.name.clone(),
                    description: d.description.clone(),
                    image: d.image.as_ref().map(Into::into),
                })
                .collect(),
            menu_pdf: draft.menu_pdf.as_ref().map(Into::into),
            delivery_hours: (&draft.delivery_hours).into(),
            photos: draft.photos.iter().map(Into::into).collect(),
            social: (&draft.social).into(),
        }
    }
}

impl From<WizardSnapshot> for WizardStateDto {
    fn from(snapshot: WizardSnapshot) -> Self {
        Self {
            id: snapshot.id,
            current_step: snapshot.current,
            step_title: step_title(snapshot.current).to_string(),
            completed_steps: snapshot.completed,
            can_advance: snapshot.can_advance,
            submitting: snapshot.submitting,
            draft: (&snapshot.draft).into(),
        }
    }
}

impl From<&Notification> for NotificationDto {
    fn from(notification: &Notification) -> Self {
        let kind = match notification {
            Notification::ValidationFailed { .. } => "validation_failed",
            Notification::Submitted { .. } => "submitted",
            Notification::SubmissionFailed => "submission_failed",
        };
        Self {
            kind: kind.to_string(),
            title: notification.title().to_string(),
            description: notification.description().to_string(),
            destructive: notification.is_destructive(),
        }
    }
}

// ===== Submission conversions =====

impl From<contract::Submission> for SubmissionDto {
    fn from(s: contract::Submission) -> Self {
        Self {
            id: s.id,
            restaurant_name: s.restaurant_name,
            address: s.address,
            email: s.email,
            phone: s.phone,
            website: s.website,
            founded_year: s.founded_year,
            story: s.story,
            owner_quote: s.owner_quote,
            about_image_url: s.about_image_url,
            menu_pdf_url: s.menu_pdf_url,
            delivery_areas: s.delivery_areas,
            delivery_instructions: s.delivery_instructions,
            hours: s.hours,
            instagram: s.instagram,
            facebook: s.facebook,
            twitter: s.twitter,
            comments: s.comments,
            status: s.status.to_string(),
            generated_site_url: s.generated_site_url,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

impl From<contract::Dish> for DishDto {
    fn from(dish: contract::Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            description: dish.description,
            image_url: dish.image_url,
            display_order: dish.display_order,
        }
    }
}

impl From<contract::Photo> for PhotoDto {
    fn from(photo: contract::Photo) -> Self {
        Self {
            id: photo.id,
            image_url: photo.image_url,
            display_order: photo.display_order,
        }
    }
}

impl From<contract::SubmissionDetail> for SubmissionDetailDto {
    fn from(detail: contract::SubmissionDetail) -> Self {
        Self {
            submission: detail.submission.into(),
            dishes: detail.dishes.into_iter().map(Into::into).collect(),
            photos: detail.photos.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<ListSubmissionsQuery> for contract::SubmissionFilter {
    type Error = OnboardingError;

    fn try_from(query: ListSubmissionsQuery) -> Result<Self, Self::Error> {
        let status = match query.status.as_deref() {
            None | Some("") | Some("all") => None,
            Some(s) => Some(
                s.parse::<contract::SubmissionStatus>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
        };
        Ok(Self {
            search: query.search.filter(|s| !s.is_empty()),
            status,
        })
    }
}
