use async_trait::async_trait;

use super::error::MediaError;

/// What an upload is for. Providers may store the two kinds differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// A dog's profile picture.
    Image,
    /// A supporting document such as a vet record.
    Document,
}

/// A file ready to be handed to an upload provider.
#[derive(Clone, Debug)]
pub struct UploadRequest {
    pub kind: MediaKind,
    /// Provider-side folder, e.g. `dog_app/docs`.
    pub folder: String,
    /// Sanitized client filename.
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl UploadRequest {
    /// Lower-cased text after the last `.` of the filename.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.filename.rsplit_once('.')?;
        let ext: String = ext
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if ext.is_empty() { None } else { Some(ext) }
    }
}

/// Result of a completed upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Publicly retrievable URL of the stored file.
    pub url: String,
    pub content_type: Option<String>,
    pub size: u64,
}

/// External media hosting that stores files and returns a retrievable URL.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Store the file. An `Ok` result always carries a usable URL.
    async fn upload(&self, request: UploadRequest) -> Result<UploadedMedia, MediaError>;

    /// Short provider name for logs.
    fn provider(&self) -> &'static str;
}
