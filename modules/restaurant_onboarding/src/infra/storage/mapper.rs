//! Entity to model mappers
//!
//! Conversions between SeaORM entities and contract models. Ids and
//! timestamps are assigned here on insert; the status column is parsed
//! strictly and an unknown value fails the row.

use super::entity;
use crate::contract::{
    Dish, NewDish, NewPhoto, NewSubmission, Photo, Submission, SubmissionStatus,
};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

// ===== Submission Conversions =====

impl TryFrom<entity::Model> for Submission {
    type Error = anyhow::Error;

    fn try_from(entity: entity::Model) -> Result<Self, Self::Error> {
        let status: SubmissionStatus = entity.status.parse()?;

        Ok(Self {
            id: entity.id,
            restaurant_name: entity.restaurant_name,
            address: entity.address,
            email: entity.email,
            phone: entity.phone,
            website: entity.website,
            founded_year: entity.founded_year,
            story: entity.story,
            owner_quote: entity.owner_quote,
            about_image_url: entity.about_image_url,
            menu_pdf_url: entity.menu_pdf_url,
            delivery_areas: entity.delivery_areas,
            delivery_instructions: entity.delivery_instructions,
            hours: entity.hours,
            instagram: entity.instagram,
            facebook: entity.facebook,
            twitter: entity.twitter,
            comments: entity.comments,
            status,
            generated_site_url: entity.generated_site_url,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }
}

/// Active model for a fresh submission row with status `submitted`
pub fn new_submission_row(model: &NewSubmission, now: DateTime<Utc>) -> entity::ActiveModel {
    entity::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_name: Set(model.restaurant_name.clone()),
        address: Set(model.address.clone()),
        email: Set(model.email.clone()),
        phone: Set(model.phone.clone()),
        website: Set(model.website.clone()),
        founded_year: Set(model.founded_year.clone()),
        story: Set(model.story.clone()),
        owner_quote: Set(model.owner_quote.clone()),
        about_image_url: Set(model.about_image_url.clone()),
        menu_pdf_url: Set(model.menu_pdf_url.clone()),
        delivery_areas: Set(model.delivery_areas.clone()),
        delivery_instructions: Set(model.delivery_instructions.clone()),
        hours: Set(model.hours.clone()),
        instagram: Set(model.instagram.clone()),
        facebook: Set(model.facebook.clone()),
        twitter: Set(model.twitter.clone()),
        comments: Set(model.comments.clone()),
        status: Set(SubmissionStatus::default().as_str().to_string()),
        generated_site_url: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
}

// ===== Dish Conversions =====

impl From<entity::dish::Model> for Dish {
    fn from(entity: entity::dish::Model) -> Self {
        Self {
            id: entity.id,
            restaurant_submission_id: entity.restaurant_submission_id,
            name: entity.name,
            description: entity.description,
            image_url: entity.image_url,
            display_order: entity.display_order,
            created_at: entity.created_at,
        }
    }
}

pub fn new_dish_row(model: &NewDish, now: DateTime<Utc>) -> entity::dish::ActiveModel {
    entity::dish::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_submission_id: Set(model.restaurant_submission_id),
        name: Set(model.name.clone()),
        description: Set(model.description.clone()),
        image_url: Set(model.image_url.clone()),
        display_order: Set(model.display_order),
        created_at: Set(now),
    }
}

// ===== Photo Conversions =====

impl From<entity::photo::Model> for Photo {
    fn from(entity: entity::photo::Model) -> Self {
        Self {
            id: entity.id,
            restaurant_submission_id: entity.restaurant_submission_id,
            image_url: entity.image_url,
            display_order: entity.display_order,
            created_at: entity.created_at,
        }
    }
}

pub fn new_photo_row(model: &NewPhoto, now: DateTime<Utc>) -> entity::photo::ActiveModel {
    entity::photo::ActiveModel {
        id: Set(Uuid::new_v4()),
        restaurant_submission_id: Set(model.restaurant_submission_id),
        image_url: Set(model.image_url.clone()),
        display_order: Set(model.display_order),
        created_at: Set(now),
    }
}
