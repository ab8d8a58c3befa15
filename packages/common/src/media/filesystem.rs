use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::error::MediaError;
use super::hash::ContentHash;
use super::traits::{MediaUploader, UploadRequest, UploadedMedia};

/// Local-disk upload provider for development.
///
/// Files are stored content-addressed under their folder:
/// `{root}/{folder}/{sha256 hex}.{ext}` and published as
/// `{public_base}/{folder}/{sha256 hex}.{ext}`. The application is expected
/// to serve `root` at `public_base`.
pub struct LocalMediaStore {
    root: PathBuf,
    public_base: String,
    max_size: u64,
}

impl LocalMediaStore {
    /// Create the store, making sure the root and temp directories exist.
    pub async fn new(
        root: PathBuf,
        public_base: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, MediaError> {
        fs::create_dir_all(&root).await?;
        fs::create_dir_all(root.join(".tmp")).await?;
        Ok(Self {
            root,
            public_base: public_base.into(),
            max_size,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.root
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }

    /// Relative storage key for a file, with `.` and `..` segments dropped
    /// from the folder.
    fn storage_key(folder: &str, hash: &ContentHash, extension: Option<&str>) -> String {
        let mut key: Vec<String> = folder
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .map(str::to_string)
            .collect();
        key.push(match extension {
            Some(ext) => format!("{hash}.{ext}"),
            None => hash.to_hex(),
        });
        key.join("/")
    }
}

#[async_trait]
impl MediaUploader for LocalMediaStore {
    async fn upload(&self, request: UploadRequest) -> Result<UploadedMedia, MediaError> {
        let size = request.data.len() as u64;
        if size > self.max_size {
            return Err(MediaError::SizeLimitExceeded {
                actual: size,
                limit: self.max_size,
            });
        }

        let hash = ContentHash::compute(&request.data);
        let key = Self::storage_key(&request.folder, &hash, request.extension().as_deref());
        let dest = self.root.join(&key);

        if !fs::try_exists(&dest).await? {
            let temp_path = self.temp_path();
            if let Err(e) = fs::write(&temp_path, &request.data).await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e.into());
            }

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).await?;
            }

            if let Err(e) = fs::rename(&temp_path, &dest).await {
                let _ = fs::remove_file(&temp_path).await;
                return Err(e.into());
            }
        }

        tracing::debug!(key = %key, size, "Stored file in local media store");

        Ok(UploadedMedia {
            url: format!("{}/{}", self.public_base.trim_end_matches('/'), key),
            content_type: request.content_type,
            size,
        })
    }

    fn provider(&self) -> &'static str {
        "local"
    }
}
