use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
};
use axum_typed_multipart::{TypedMultipart, TypedMultipartError};

use crate::error::AppError;

/// A `TypedMultipart<T>` wrapper that converts rejections into `AppError`,
/// so a malformed or oversized form gets the regular HTML error page.
pub struct AppMultipart<T>(pub T);

impl<S, T> FromRequest<S> for AppMultipart<T>
where
    TypedMultipart<T>: FromRequest<S, Rejection = TypedMultipartError>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let TypedMultipart(value) = TypedMultipart::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(AppMultipart(value))
    }
}

fn rejection_to_error(err: TypedMultipartError) -> AppError {
    let message = err.to_string();
    if err.into_response().status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(message)
    }
}
