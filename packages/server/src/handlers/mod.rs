pub mod documents;
pub mod dogs;
pub mod health;
