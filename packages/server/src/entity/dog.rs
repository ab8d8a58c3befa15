use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dogs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub age: i32,
    /// One of: Small, Medium, Large, XLarge
    pub size: String,
    /// One of: Intake, Hold, Fostered, Adoptable, Adopted
    pub status: String,

    pub kid_friendly: bool,
    pub cat_friendly: bool,
    pub dog_friendly: bool,

    #[sea_orm(column_type = "Text")]
    pub notes: Option<String>,

    /// Set only after a completed upload.
    pub image_url: Option<String>,

    #[sea_orm(has_many)]
    pub documents: HasMany<super::dog_document::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
