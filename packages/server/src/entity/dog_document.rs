use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dog_documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub dog_id: i32,
    #[sea_orm(belongs_to, from = "dog_id", to = "id", on_delete = "Cascade")]
    pub dog: HasOne<super::dog::Entity>,

    pub title: String,
    /// URL returned by the upload provider.
    pub file_url: String,
    /// MIME content type.
    pub content_type: Option<String>,

    pub uploaded_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
