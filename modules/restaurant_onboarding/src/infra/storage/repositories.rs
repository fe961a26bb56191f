//! SeaORM repository implementations

use crate::contract::{Dish, NewDish, NewPhoto, NewSubmission, Photo, Submission, SubmissionStatus};
use crate::domain::repository::SubmissionRepository;
use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, TransactionTrait,
};
use sea_orm::ActiveValue::Set;
use std::sync::Arc;
use uuid::Uuid;

use super::entity;
use super::mapper::{new_dish_row, new_photo_row, new_submission_row};

pub struct SeaOrmSubmissionRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSubmissionRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubmissionRepository for SeaOrmSubmissionRepository {
    async fn insert_submission(&self, submission: &NewSubmission) -> Result<Submission> {
        let active = new_submission_row(submission, chrono::Utc::now());
        let result = active.insert(&*self.db).await?;

        result.try_into()
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>> {
        let results = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        results
            .into_iter()
            .map(|e| e.try_into())
            .collect::<Result<Vec<_>>>()
    }

    async fn find_submission(&self, id: Uuid) -> Result<Option<Submission>> {
        let result = entity::Entity::find_by_id(id).one(&*self.db).await?;

        match result {
            Some(entity) => Ok(Some(entity.try_into()?)),
            None => Ok(None),
        }
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        let Some(existing) = entity::Entity::find_by_id(id).one(&*self.db).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        active.status = Set(status.as_str().to_string());
        active.updated_at = Set(chrono::Utc::now());
        let result = active.update(&*self.db).await?;

        Ok(Some(result.try_into()?))
    }

    // Child rows go in one transaction so a batch lands whole or not at all
    async fn insert_dishes(&self, dishes: &[NewDish]) -> Result<Vec<Dish>> {
        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;
        let mut inserted = Vec::with_capacity(dishes.len());
        for dish in dishes {
            inserted.push(new_dish_row(dish, now).insert(&txn).await?.into());
        }
        txn.commit().await?;

        Ok(inserted)
    }

    async fn list_dishes(&self, submission_id: Uuid) -> Result<Vec<Dish>> {
        let results = entity::dish::Entity::find()
            .filter(entity::dish::Column::RestaurantSubmissionId.eq(submission_id))
            .order_by_asc(entity::dish::Column::DisplayOrder)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }

    async fn insert_photos(&self, photos: &[NewPhoto]) -> Result<Vec<Photo>> {
        let now = chrono::Utc::now();
        let txn = self.db.begin().await?;
        let mut inserted = Vec::with_capacity(photos.len());
        for photo in photos {
            inserted.push(new_photo_row(photo, now).insert(&txn).await?.into());
        }
        txn.commit().await?;

        Ok(inserted)
    }

    async fn list_photos(&self, submission_id: Uuid) -> Result<Vec<Photo>> {
        let results = entity::photo::Entity::find()
            .filter(entity::photo::Column::RestaurantSubmissionId.eq(submission_id))
            .order_by_asc(entity::photo::Column::DisplayOrder)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(|e| e.into()).collect())
    }
}
