use async_trait::async_trait;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;

use super::{DogFilter, DogRepository};
use crate::entity::{dog, dog_document};
use crate::models::document::NewDocument;
use crate::models::dog::DogInput;
use crate::models::shared::escape_like;

/// `DogRepository` over a SeaORM connection pool. SeaORM renders the
/// dialect, so the same queries run on SQLite and PostgreSQL.
#[derive(Clone)]
pub struct SqlDogRepository {
    db: DatabaseConnection,
}

impl SqlDogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn apply_input(active: &mut dog::ActiveModel, input: DogInput, image_url: Option<String>) {
    active.name = Set(input.name);
    active.age = Set(input.age);
    active.size = Set(input.size.to_string());
    active.status = Set(input.status.to_string());
    active.kid_friendly = Set(input.kid_friendly);
    active.cat_friendly = Set(input.cat_friendly);
    active.dog_friendly = Set(input.dog_friendly);
    active.notes = Set(input.notes);
    active.image_url = Set(image_url);
}

#[async_trait]
impl DogRepository for SqlDogRepository {
    async fn list_dogs(&self, filter: &DogFilter) -> Result<Vec<dog::Model>, DbErr> {
        let mut select = dog::Entity::find();

        if let Some(ref q) = filter.q {
            // SQLite's LOWER() only folds ASCII, so fold the term the same way.
            let term = match self.db.get_database_backend() {
                DbBackend::Sqlite => escape_like(q).to_ascii_lowercase(),
                _ => escape_like(q).to_lowercase(),
            };
            let pattern = format!("%{term}%");
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(dog::Column::Name)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(dog::Column::Notes)))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }
        if let Some(ref status) = filter.status {
            select = select.filter(dog::Column::Status.eq(status.as_str()));
        }
        if let Some(ref size) = filter.size {
            select = select.filter(dog::Column::Size.eq(size.as_str()));
        }

        select
            .order_by_asc(dog::Column::Name)
            .order_by_asc(dog::Column::Id)
            .all(&self.db)
            .await
    }

    async fn find_dog(&self, id: i32) -> Result<Option<dog::Model>, DbErr> {
        dog::Entity::find_by_id(id).one(&self.db).await
    }

    async fn create_dog(
        &self,
        input: DogInput,
        image_url: Option<String>,
    ) -> Result<dog::Model, DbErr> {
        let mut active = dog::ActiveModel {
            ..Default::default()
        };
        apply_input(&mut active, input, image_url);
        active.insert(&self.db).await
    }

    async fn update_dog(
        &self,
        id: i32,
        input: DogInput,
        image_url: Option<String>,
    ) -> Result<Option<dog::Model>, DbErr> {
        let Some(existing) = dog::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: dog::ActiveModel = existing.into();
        apply_input(&mut active, input, image_url);
        let model = active.update(&self.db).await?;
        Ok(Some(model))
    }

    async fn delete_dog(&self, id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        // Explicit child delete: SQLite only honours ON DELETE CASCADE when
        // the foreign_keys pragma is on.
        dog_document::Entity::delete_many()
            .filter(dog_document::Column::DogId.eq(id))
            .exec(&txn)
            .await?;
        let result = dog::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn list_documents(&self, dog_id: i32) -> Result<Vec<dog_document::Model>, DbErr> {
        dog_document::Entity::find()
            .filter(dog_document::Column::DogId.eq(dog_id))
            .order_by_desc(dog_document::Column::UploadedAt)
            .order_by_desc(dog_document::Column::Id)
            .all(&self.db)
            .await
    }

    async fn find_document(&self, id: i32) -> Result<Option<dog_document::Model>, DbErr> {
        dog_document::Entity::find_by_id(id).one(&self.db).await
    }

    async fn create_document(&self, new: NewDocument) -> Result<dog_document::Model, DbErr> {
        let txn = self.db.begin().await?;

        if dog::Entity::find_by_id(new.dog_id).one(&txn).await?.is_none() {
            return Err(DbErr::RecordNotFound(format!(
                "dog {} does not exist",
                new.dog_id
            )));
        }

        let model = dog_document::ActiveModel {
            dog_id: Set(new.dog_id),
            title: Set(new.title),
            file_url: Set(new.file_url),
            content_type: Set(new.content_type),
            uploaded_at: Set(chrono::Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(model)
    }

    async fn delete_document(&self, id: i32) -> Result<bool, DbErr> {
        let result = dog_document::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_dogs(&self) -> Result<u64, DbErr> {
        dog::Entity::find().count(&self.db).await
    }

    async fn ping(&self) -> Result<(), DbErr> {
        self.db.ping().await
    }
}
