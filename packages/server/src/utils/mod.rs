pub mod filename;
pub mod upload;
