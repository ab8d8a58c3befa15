use std::path::PathBuf;

use serde::Deserialize;

use super::error::MediaError;

/// Which upload provider stores images and documents.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaProvider {
    /// Files on local disk, served by the application itself.
    #[default]
    Local,
    Cloudinary,
}

/// App-level media configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    #[serde(default)]
    pub provider: MediaProvider,
    /// Folder for dog profile images. Default: "dog_app".
    #[serde(default = "default_image_folder")]
    pub image_folder: String,
    /// Folder for dog documents. Default: "dog_app/docs".
    #[serde(default = "default_document_folder")]
    pub document_folder: String,
    #[serde(default)]
    pub local: LocalMediaConfig,
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocalMediaConfig {
    /// Directory files are written to. Default: "./uploads".
    #[serde(default = "default_local_root")]
    pub root: PathBuf,
    /// URL path the directory is mounted at. Default: "/media".
    #[serde(default = "default_public_base")]
    pub public_base: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CloudinaryConfig {
    /// `cloudinary://<api_key>:<api_secret>@<cloud_name>`. Takes precedence
    /// over the separate fields below.
    pub url: Option<String>,
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Default: "https://api.cloudinary.com/v1_1".
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

/// Resolved Cloudinary account credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct CloudinaryCredentials {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl std::fmt::Debug for CloudinaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryCredentials")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

impl CloudinaryConfig {
    /// Resolve credentials from `url`, falling back to the separate fields.
    pub fn credentials(&self) -> Result<CloudinaryCredentials, MediaError> {
        if let Some(url) = self.url.as_deref().map(str::trim)
            && !url.is_empty()
        {
            return parse_cloudinary_url(url);
        }

        match (
            non_empty(self.cloud_name.as_deref()),
            non_empty(self.api_key.as_deref()),
            non_empty(self.api_secret.as_deref()),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(CloudinaryCredentials {
                cloud_name: cloud_name.to_string(),
                api_key: api_key.to_string(),
                api_secret: api_secret.to_string(),
            }),
            _ => Err(MediaError::NotConfigured(
                "set CLOUDINARY_URL or cloud name, API key and API secret".into(),
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_cloudinary_url(raw: &str) -> Result<CloudinaryCredentials, MediaError> {
    let url = reqwest::Url::parse(raw)
        .map_err(|e| MediaError::NotConfigured(format!("invalid CLOUDINARY_URL: {e}")))?;

    if url.scheme() != "cloudinary" {
        return Err(MediaError::NotConfigured(format!(
            "CLOUDINARY_URL must use the cloudinary:// scheme, got {}://",
            url.scheme()
        )));
    }

    let api_key = url.username();
    let api_secret = url.password().unwrap_or_default();
    let cloud_name = url.host_str().unwrap_or_default();
    if api_key.is_empty() || api_secret.is_empty() || cloud_name.is_empty() {
        return Err(MediaError::NotConfigured(
            "CLOUDINARY_URL must look like cloudinary://<key>:<secret>@<cloud>".into(),
        ));
    }

    Ok(CloudinaryCredentials {
        cloud_name: cloud_name.to_string(),
        api_key: api_key.to_string(),
        api_secret: api_secret.to_string(),
    })
}

fn default_image_folder() -> String {
    "dog_app".into()
}
fn default_document_folder() -> String {
    "dog_app/docs".into()
}
fn default_local_root() -> PathBuf {
    PathBuf::from("./uploads")
}
fn default_public_base() -> String {
    "/media".into()
}
fn default_api_base() -> String {
    "https://api.cloudinary.com/v1_1".into()
}

impl Default for LocalMediaConfig {
    fn default() -> Self {
        Self {
            root: default_local_root(),
            public_base: default_public_base(),
        }
    }
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            url: None,
            cloud_name: None,
            api_key: None,
            api_secret: None,
            api_base: default_api_base(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            provider: MediaProvider::default(),
            image_folder: default_image_folder(),
            document_folder: default_document_folder(),
            local: LocalMediaConfig::default(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}
