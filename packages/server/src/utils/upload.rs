use axum::body::Bytes;
use axum_typed_multipart::FieldData;
use shelter_common::media::{MediaKind, MediaUploader, UploadRequest};
use tracing::{info, warn};

use super::filename::{has_allowed_extension, sanitize_filename};

/// A file that reached the upload provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    pub url: String,
    /// Sanitized client filename.
    pub filename: String,
    pub content_type: Option<String>,
}

/// Outcome of handling an optional file field.
///
/// Only `Stored` carries a URL; every other variant leaves the record's
/// previous value untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// The form was submitted without choosing a file.
    None,
    Stored(StoredFile),
    /// Extension not in the allow-list. Nothing was uploaded.
    InvalidType,
    /// The provider failed. The error has been logged.
    Failed,
}

/// Flash text for a rejected extension, e.g.
/// `Invalid image type. Use png/jpg/jpeg/gif/webp.`
pub fn invalid_type_message(label: &str, allowed: &[String]) -> String {
    format!("Invalid {label} type. Use {}.", allowed.join("/"))
}

/// MIME type declared by the client, or guessed from the filename when the
/// client sent none (or only the generic octet-stream).
fn content_type_for(declared: Option<&str>, filename: &str) -> Option<String> {
    match declared.map(str::trim) {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => Some(ct.to_string()),
        _ => mime_guess::from_path(filename)
            .first_raw()
            .map(String::from)
            .or_else(|| declared.map(String::from)),
    }
}

/// Check a submitted file against `allowed` and hand it to the provider.
pub async fn store_attachment(
    media: &dyn MediaUploader,
    field: Option<FieldData<Bytes>>,
    kind: MediaKind,
    folder: &str,
    allowed: &[String],
) -> Attachment {
    let Some(field) = field else {
        return Attachment::None;
    };
    let Some(original) = field
        .metadata
        .file_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    else {
        return Attachment::None;
    };

    if !has_allowed_extension(original, allowed) {
        info!(filename = %original, "Rejected upload with disallowed extension");
        return Attachment::InvalidType;
    }

    let filename = sanitize_filename(original);
    let content_type = content_type_for(field.metadata.content_type.as_deref(), &filename);
    let request = UploadRequest {
        kind,
        folder: folder.to_string(),
        filename: filename.clone(),
        content_type: content_type.clone(),
        data: field.contents.to_vec(),
    };

    match media.upload(request).await {
        Ok(uploaded) => Attachment::Stored(StoredFile {
            url: uploaded.url,
            filename,
            content_type: uploaded.content_type.or(content_type),
        }),
        Err(e) => {
            warn!(
                provider = media.provider(),
                filename = %filename,
                error = %e,
                "Upload failed"
            );
            Attachment::Failed
        }
    }
}
