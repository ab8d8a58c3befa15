use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::dogs::list_dogs))
        .route(
            "/create",
            get(handlers::dogs::new_dog_form).post(handlers::dogs::create_dog),
        )
        .route(
            "/edit/{id}",
            get(handlers::dogs::edit_dog_form).post(handlers::dogs::update_dog),
        )
        .route("/delete/{id}", get(handlers::dogs::delete_dog))
        .route("/dog/{id}", get(handlers::dogs::show_dog))
        .route(
            "/dog/{id}/upload_doc",
            post(handlers::documents::upload_document),
        )
        .route("/doc/{id}/delete", post(handlers::documents::delete_document))
        .route("/health", get(handlers::health::health))
}
