use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use shelter_common::media::MediaUploader;

use crate::config::AppConfig;
use crate::repository::DogRepository;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dogs: Arc<dyn DogRepository>,
    pub media: Arc<dyn MediaUploader>,
    /// Signs the flash cookie.
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}
