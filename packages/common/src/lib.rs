pub mod dog;
pub mod media;

pub use dog::{DogSize, DogStatus};
