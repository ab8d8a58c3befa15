use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use shelter_common::media::config::{MediaConfig, MediaProvider};

/// Default session secret. Only suitable for local development.
pub const DEV_SECRET_KEY: &str = "dev-secret";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Which relational database the repository talks to.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// Embedded file database, the local development default.
    #[default]
    Sqlite,
    Postgres,
}

impl DatabaseBackend {
    /// Backend implied by a connection URL's scheme, if recognised.
    pub fn from_url(url: &str) -> Option<Self> {
        let (scheme, _) = url.split_once(':')?;
        match scheme.to_ascii_lowercase().as_str() {
            "sqlite" => Some(Self::Sqlite),
            "postgres" | "postgresql" => Some(Self::Postgres),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
    /// Insert a few example dogs when the table is empty.
    pub seed_demo_data: bool,
    /// Log every SQL statement at debug level.
    pub log_statements: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Signs the flash-message cookie.
    pub secret_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Largest accepted request body, in bytes.
    pub max_content_length: u64,
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,
    #[serde(default = "default_document_extensions")]
    pub document_extensions: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub uploads: UploadConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_content_length: 5 * 1024 * 1024,
            image_extensions: default_image_extensions(),
            document_extensions: default_document_extensions(),
        }
    }
}

fn default_image_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif", "webp"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_document_extensions() -> Vec<String> {
    [
        "pdf", "png", "jpg", "jpeg", "gif", "webp", "txt", "doc", "docx",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Read a conventional deployment variable, treating blank values as unset.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .set_default("database.backend", "sqlite")?
            .set_default("database.url", "sqlite://dogs.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("database.seed_demo_data", false)?
            .set_default("database.log_statements", false)?
            .set_default("session.secret_key", DEV_SECRET_KEY)?
            .set_default("uploads.max_content_length", 5 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., SHELTER__DATABASE__URL)
            .add_source(Environment::with_prefix("SHELTER").separator("__"))
            // Conventional deployment variables win over everything else
            .set_override_option("server.host", env_var("HOST"))?
            .set_override_option("server.port", env_var("PORT"))?
            .set_override_option("database.url", env_var("DATABASE_URL"))?
            .set_override_option("database.backend", env_var("DATABASE_BACKEND"))?
            .set_override_option("session.secret_key", env_var("SECRET_KEY"))?
            .set_override_option("uploads.max_content_length", env_var("MAX_CONTENT_LENGTH"))?
            .set_override_option("media.provider", env_var("MEDIA_PROVIDER"))?
            .set_override_option("media.image_folder", env_var("CLOUDINARY_IMAGE_FOLDER"))?
            .set_override_option("media.document_folder", env_var("CLOUDINARY_DOCS_FOLDER"))?
            .set_override_option("media.cloudinary.url", env_var("CLOUDINARY_URL"))?
            .set_override_option("media.cloudinary.cloud_name", env_var("CLOUDINARY_CLOUD_NAME"))?
            .set_override_option("media.cloudinary.api_key", env_var("CLOUDINARY_API_KEY"))?
            .set_override_option("media.cloudinary.api_secret", env_var("CLOUDINARY_API_SECRET"))?
            .build()?;

        let config: Self = s.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that would only fail later at request time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match DatabaseBackend::from_url(&self.database.url) {
            Some(backend) if backend == self.database.backend => {}
            Some(backend) => {
                return Err(ConfigError::Message(format!(
                    "database.backend is '{}' but database.url is a {} URL; \
                     set DATABASE_BACKEND to match",
                    self.database.backend.as_str(),
                    backend.as_str()
                )));
            }
            None => {
                return Err(ConfigError::Message(
                    "database.url must start with sqlite:, postgres: or postgresql:".into(),
                ));
            }
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".into(),
            ));
        }

        if self.uploads.max_content_length == 0 {
            return Err(ConfigError::Message(
                "uploads.max_content_length must be greater than zero".into(),
            ));
        }

        if self.uploads.image_extensions.is_empty() || self.uploads.document_extensions.is_empty()
        {
            return Err(ConfigError::Message(
                "upload extension allow-lists must not be empty".into(),
            ));
        }

        if self.media.provider == MediaProvider::Cloudinary
            && let Err(e) = self.media.cloudinary.credentials()
        {
            return Err(ConfigError::Message(e.to_string()));
        }

        Ok(())
    }

    /// Whether the session secret is still the development default.
    pub fn uses_dev_secret(&self) -> bool {
        self.session.secret_key == DEV_SECRET_KEY
    }
}
