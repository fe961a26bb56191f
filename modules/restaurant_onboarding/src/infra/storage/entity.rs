//! SeaORM entities for database tables

use sea_orm::entity::prelude::*;

/// Restaurant submissions table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "restaurant_submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub restaurant_name: String,
    pub address: String,
    pub email: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub founded_year: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub story: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub owner_quote: Option<String>,
    pub about_image_url: Option<String>,
    pub menu_pdf_url: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub delivery_areas: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub delivery_instructions: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub hours: String,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub twitter: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,

    /// One of `submitted`, `in-review`, `generated`, `live`
    pub status: String,
    pub generated_site_url: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "dish::Entity")]
    Dishes,
    #[sea_orm(has_many = "photo::Entity")]
    Photos,
}

impl Related<dish::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dishes.def()
    }
}

impl Related<photo::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Popular dishes, children of a submission
pub mod dish {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "restaurant_dishes")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub restaurant_submission_id: Uuid,
        pub name: String,
        #[sea_orm(column_type = "Text")]
        pub description: String,
        pub image_url: Option<String>,
        pub display_order: i32,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::RestaurantSubmissionId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Submission,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Submission.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Restaurant photos, children of a submission
pub mod photo {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "restaurant_photos")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub restaurant_submission_id: Uuid,
        pub image_url: String,
        pub display_order: i32,
        pub created_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::Entity",
            from = "Column::RestaurantSubmissionId",
            to = "super::Column::Id",
            on_delete = "Cascade"
        )]
        Submission,
    }

    impl Related<super::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Submission.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
