pub mod dog;
pub mod dog_document;
