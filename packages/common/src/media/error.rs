use thiserror::Error;

/// Errors that can occur while handing a file to an upload provider.
///
/// Any of these means no URL was produced for the file.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("media IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered, but refused the upload.
    #[error("upload provider rejected the file ({status}): {message}")]
    Provider { status: u16, message: String },

    #[error("unexpected provider response: {0}")]
    InvalidResponse(String),

    #[error("file exceeds size limit ({actual} > {limit} bytes)")]
    SizeLimitExceeded { actual: u64, limit: u64 },

    #[error("media provider not configured: {0}")]
    NotConfigured(String),
}
