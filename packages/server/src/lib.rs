pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod seed;
pub mod state;
pub mod utils;
pub mod views;

use axum::extract::DefaultBodyLimit;
use shelter_common::media::config::MediaProvider;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let limit = usize::try_from(state.config.uploads.max_content_length).unwrap_or(usize::MAX);

    let mut router = routes::routes();

    // Serve locally stored media under its public base path. A base that is
    // a full URL points at some other server and is not mounted.
    let media = &state.config.media;
    let base = media.local.public_base.trim_end_matches('/');
    if media.provider == MediaProvider::Local && base.starts_with('/') && base.len() > 1 {
        router = router.nest_service(base, ServeDir::new(&media.local.root));
    }

    router
        .layer(DefaultBodyLimit::max(limit))
        .layer(RequestBodyLimitLayer::new(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
