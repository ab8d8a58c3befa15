use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};

pub const TITLE_MAX_CHARS: usize = 200;

/// Multipart body of the document upload form on the dog detail page.
#[derive(TryFromMultipart)]
pub struct DocumentFormData {
    pub title: Option<String>,
    #[form_data(limit = "unlimited")]
    pub file: Option<FieldData<Bytes>>,
}

/// A document row ready to be written, pointing at a completed upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocument {
    pub dog_id: i32,
    pub title: String,
    pub file_url: String,
    pub content_type: Option<String>,
}

/// Title shown for an uploaded document: the trimmed form title, or the
/// stored filename when none was given. Capped at `TITLE_MAX_CHARS`.
pub fn document_title(title: Option<&str>, filename: &str) -> String {
    let title = title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(filename);
    title.chars().take(TITLE_MAX_CHARS).collect()
}
