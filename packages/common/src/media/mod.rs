mod error;
mod hash;
mod traits;

pub mod cloudinary;
pub mod config;
pub mod filesystem;

use std::sync::Arc;

pub use error::MediaError;
pub use hash::ContentHash;
pub use traits::{MediaKind, MediaUploader, UploadRequest, UploadedMedia};

use cloudinary::CloudinaryUploader;
use config::{MediaConfig, MediaProvider};
use filesystem::LocalMediaStore;

/// Build the upload provider selected by `config.provider`.
///
/// `max_size` bounds a single stored file for providers that enforce it locally.
pub async fn build_uploader(
    config: &MediaConfig,
    max_size: u64,
) -> Result<Arc<dyn MediaUploader>, MediaError> {
    match config.provider {
        MediaProvider::Local => {
            let store = LocalMediaStore::new(
                config.local.root.clone(),
                config.local.public_base.clone(),
                max_size,
            )
            .await?;
            Ok(Arc::new(store))
        }
        MediaProvider::Cloudinary => {
            let credentials = config.cloudinary.credentials()?;
            Ok(Arc::new(CloudinaryUploader::new(
                credentials,
                config.cloudinary.api_base.clone(),
            )))
        }
    }
}
