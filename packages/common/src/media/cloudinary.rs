use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::config::CloudinaryCredentials;
use super::error::MediaError;
use super::traits::{MediaKind, MediaUploader, UploadRequest, UploadedMedia};

/// Signed uploads to the Cloudinary upload API.
pub struct CloudinaryUploader {
    client: reqwest::Client,
    credentials: CloudinaryCredentials,
    api_base: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    bytes: Option<u64>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(credentials: CloudinaryCredentials, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            api_base: api_base.into(),
        }
    }

    fn upload_url(&self, kind: MediaKind) -> String {
        // Documents may be PDFs, office files or plain text; let Cloudinary pick.
        let resource_type = match kind {
            MediaKind::Image => "image",
            MediaKind::Document => "auto",
        };
        format!(
            "{}/{}/{}/upload",
            self.api_base.trim_end_matches('/'),
            self.credentials.cloud_name,
            resource_type
        )
    }

    /// Parameters covered by the signature, sorted by key.
    fn signed_params(folder: &str, timestamp: i64) -> Vec<(&'static str, String)> {
        vec![
            ("folder", folder.to_string()),
            ("overwrite", "false".to_string()),
            ("timestamp", timestamp.to_string()),
            ("unique_filename", "false".to_string()),
            ("use_filename", "true".to_string()),
        ]
    }
}

/// `k=v` pairs joined with `&`, followed by the API secret.
fn string_to_sign(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{joined}{api_secret}")
}

fn sign(params: &[(&str, String)], api_secret: &str) -> String {
    hex::encode(Sha256::digest(string_to_sign(params, api_secret).as_bytes()))
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, request: UploadRequest) -> Result<UploadedMedia, MediaError> {
        let timestamp = chrono::Utc::now().timestamp();
        let params = Self::signed_params(&request.folder, timestamp);
        let signature = sign(&params, &self.credentials.api_secret);
        let size = request.data.len() as u64;

        let mut file_part = Part::bytes(request.data).file_name(request.filename.clone());
        if let Some(ref content_type) = request.content_type {
            file_part = file_part.mime_str(content_type)?;
        }

        let mut form = Form::new()
            .part("file", file_part)
            .text("api_key", self.credentials.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }

        let url = self.upload_url(request.kind);
        tracing::debug!(url = %url, filename = %request.filename, "Uploading to Cloudinary");

        let res = self.client.post(&url).multipart(form).send().await?;
        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(MediaError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| MediaError::InvalidResponse(format!("invalid JSON: {e}")))?;

        let secure_url = parsed
            .secure_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| MediaError::InvalidResponse("missing secure_url".into()))?;

        Ok(UploadedMedia {
            url: secure_url,
            content_type: request.content_type,
            size: parsed.bytes.unwrap_or(size),
        })
    }

    fn provider(&self) -> &'static str {
        "cloudinary"
    }
}
