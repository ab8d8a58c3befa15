use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

use shelter_common::media::config::{LocalMediaConfig, MediaConfig};
use shelter_common::media::filesystem::LocalMediaStore;
use shelter_common::media::{MediaError, MediaUploader, UploadRequest, UploadedMedia};
use shelter_server::config::{
    AppConfig, DatabaseBackend, DatabaseConfig, ServerConfig, SessionConfig, UploadConfig,
};
use shelter_server::entity::dog;
use shelter_server::repository::{DogFilter, DogRepository, SqlDogRepository};
use shelter_server::state::AppState;

/// Request body limit used by every test server.
pub const BODY_LIMIT: u64 = 16 * 1024;

/// An upload provider that is always down.
pub struct FailingUploader;

#[async_trait]
impl MediaUploader for FailingUploader {
    async fn upload(&self, _request: UploadRequest) -> Result<UploadedMedia, MediaError> {
        Err(MediaError::Provider {
            status: 503,
            message: "provider unavailable".into(),
        })
    }

    fn provider(&self) -> &'static str {
        "failing"
    }
}

/// A running test server backed by a temporary SQLite file and media directory.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub db: DatabaseConnection,
    pub dogs: Arc<dyn DogRepository>,
    _dir: TempDir,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    pub text: String,
    /// `Location` header of a redirect.
    pub location: Option<String>,
}

/// Values of the dog create/edit form.
pub struct DogFields<'a> {
    pub name: &'a str,
    pub age: &'a str,
    pub size: &'a str,
    pub status: &'a str,
    pub notes: &'a str,
}

impl Default for DogFields<'_> {
    fn default() -> Self {
        Self {
            name: "Rex",
            age: "3",
            size: "Large",
            status: "Intake",
            notes: "",
        }
    }
}

impl DogFields<'_> {
    pub fn form(&self) -> Form {
        Form::new()
            .text("name", self.name.to_string())
            .text("age", self.age.to_string())
            .text("size", self.size.to_string())
            .text("status", self.status.to_string())
            .text("kid_friendly", "1")
            .text("notes", self.notes.to_string())
    }
}

/// A file part as a browser would send it.
pub fn file_part(filename: &str, content_type: &str, bytes: Vec<u8>) -> Part {
    Part::bytes(bytes)
        .file_name(filename.to_string())
        .mime_str(content_type)
        .expect("Failed to set MIME type")
}

/// The part a browser sends for a file input left empty.
pub fn empty_file_part() -> Part {
    Part::bytes(Vec::new())
        .file_name(String::new())
        .mime_str("application/octet-stream")
        .expect("Failed to set MIME type")
}

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_media(None).await
    }

    /// Spawn a server whose upload provider always fails.
    pub async fn spawn_with_failing_media() -> Self {
        Self::spawn_with_media(Some(Arc::new(FailingUploader))).await
    }

    async fn spawn_with_media(media: Option<Arc<dyn MediaUploader>>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = dir.path().join("dogs.db");
        let media_root = dir.path().join("uploads");

        let app_config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                backend: DatabaseBackend::Sqlite,
                url: format!("sqlite://{}?mode=rwc", db_path.display()),
                max_connections: 4,
                seed_demo_data: false,
                log_statements: false,
            },
            session: SessionConfig {
                secret_key: "test-secret-for-integration-tests".to_string(),
            },
            uploads: UploadConfig {
                max_content_length: BODY_LIMIT,
                ..Default::default()
            },
            media: MediaConfig {
                local: LocalMediaConfig {
                    root: media_root.clone(),
                    public_base: "/media".to_string(),
                },
                ..Default::default()
            },
        };

        let db = shelter_server::database::init_db(&app_config.database)
            .await
            .expect("Failed to initialize test database");
        shelter_server::seed::ensure_indexes(&db)
            .await
            .expect("Failed to create indexes");

        let media = match media {
            Some(media) => media,
            None => Arc::new(
                LocalMediaStore::new(media_root, "/media", BODY_LIMIT)
                    .await
                    .expect("Failed to create media store"),
            ),
        };

        let dogs: Arc<dyn DogRepository> = Arc::new(SqlDogRepository::new(db.clone()));
        let state = AppState {
            cookie_key: shelter_server::flash::cookie_key(&app_config.session.secret_key),
            config: Arc::new(app_config),
            dogs: dogs.clone(),
            media,
        };

        let app = shelter_server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            addr,
            client,
            db,
            dogs,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn post_form(&self, path: &str, form: Form) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("Failed to send multipart request");

        TestResponse::from_response(res).await
    }

    pub async fn post_empty(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    /// GET the page a redirect points at.
    pub async fn follow(&self, res: &TestResponse) -> TestResponse {
        let location = res
            .location
            .as_deref()
            .unwrap_or_else(|| panic!("expected a redirect, got {}: {}", res.status, res.text));
        self.get(location).await
    }

    /// Submit the create form and return the stored row.
    pub async fn create_dog(&self, form: Form) -> dog::Model {
        let res = self.post_form("/create", form).await;
        assert_eq!(res.status, 303, "create failed: {}", res.text);
        assert_eq!(res.location.as_deref(), Some("/"));

        self.dogs
            .list_dogs(&DogFilter::default())
            .await
            .expect("DB query failed")
            .into_iter()
            .max_by_key(|d| d.id)
            .expect("Dog not found after creation")
    }

    pub async fn find_dog(&self, id: i32) -> Option<dog::Model> {
        self.dogs.find_dog(id).await.expect("DB query failed")
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let location = res
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let text = res.text().await.unwrap_or_default();
        Self {
            status,
            text,
            location,
        }
    }

    /// Number of dog rows rendered on a list page.
    pub fn dog_rows(&self) -> usize {
        self.text.matches("<tr data-dog-id=").count()
    }

    pub fn has_dog_named(&self, name: &str) -> bool {
        self.text.contains(&format!(r#"data-dog-name="{name}""#))
    }
}
