pub mod document;
pub mod dog;
pub mod health;
pub mod shared;
