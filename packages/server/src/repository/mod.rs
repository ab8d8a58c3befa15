//! Typed data access for dogs and their documents.
//!
//! Handlers only see the [`DogRepository`] trait; the SQL dialect is the
//! implementation's concern.

mod sql;

pub use sql::SqlDogRepository;

use async_trait::async_trait;
use sea_orm::DbErr;

use crate::entity::{dog, dog_document};
use crate::models::document::NewDocument;
use crate::models::dog::DogInput;
use crate::models::shared::non_blank;

/// Filters of the dog list. `None` means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DogFilter {
    /// Case-insensitive substring of the name or notes.
    pub q: Option<String>,
    /// Exact stored status.
    pub status: Option<String>,
    /// Exact stored size.
    pub size: Option<String>,
}

impl DogFilter {
    /// Build a filter from raw query values, dropping blank ones.
    pub fn new(q: Option<&str>, status: Option<&str>, size: Option<&str>) -> Self {
        Self {
            q: non_blank(q),
            status: non_blank(status),
            size: non_blank(size),
        }
    }
}

#[async_trait]
pub trait DogRepository: Send + Sync {
    /// Dogs matching `filter`, ordered by name then id.
    async fn list_dogs(&self, filter: &DogFilter) -> Result<Vec<dog::Model>, DbErr>;

    async fn find_dog(&self, id: i32) -> Result<Option<dog::Model>, DbErr>;

    async fn create_dog(
        &self,
        input: DogInput,
        image_url: Option<String>,
    ) -> Result<dog::Model, DbErr>;

    /// Overwrite every column of an existing dog. `None` if it doesn't exist.
    async fn update_dog(
        &self,
        id: i32,
        input: DogInput,
        image_url: Option<String>,
    ) -> Result<Option<dog::Model>, DbErr>;

    /// Delete a dog together with its documents. Returns whether it existed.
    async fn delete_dog(&self, id: i32) -> Result<bool, DbErr>;

    /// Documents of a dog, newest upload first.
    async fn list_documents(&self, dog_id: i32) -> Result<Vec<dog_document::Model>, DbErr>;

    async fn find_document(&self, id: i32) -> Result<Option<dog_document::Model>, DbErr>;

    /// Fails with `DbErr::RecordNotFound` if the dog doesn't exist.
    async fn create_document(&self, new: NewDocument) -> Result<dog_document::Model, DbErr>;

    async fn delete_document(&self, id: i32) -> Result<bool, DbErr>;

    async fn count_dogs(&self) -> Result<u64, DbErr>;

    async fn ping(&self) -> Result<(), DbErr>;
}
