use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use shelter_common::media::MediaKind;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::extractors::multipart::AppMultipart;
use crate::flash;
use crate::models::dog::{DogDraft, DogFormData, DogInput, DogListQuery, validate_dog_draft};
use crate::repository::DogFilter;
use crate::state::AppState;
use crate::utils::upload::{Attachment, invalid_type_message, store_attachment};
use crate::views;
use crate::views::dogs::FormMode;

const DOG_NOT_FOUND: &str = "Dog not found.";

/// Flash the message and go back to the list.
fn back_to_list(jar: SignedCookieJar, message: &str) -> Response {
    (flash::push(jar, message), Redirect::to("/")).into_response()
}

/// Validate a submitted form. On failure the form is rendered again with
/// the message and the values as typed.
fn validate_or_rerender(
    jar: SignedCookieJar,
    draft: &DogDraft,
    mode: FormMode<'_>,
) -> Result<(SignedCookieJar, DogInput), Response> {
    match validate_dog_draft(draft) {
        Ok(input) => Ok((jar, input)),
        Err(AppError::Validation(msg)) => {
            let (jar, flashes) = flash::take(jar);
            let page = views::dogs::form(mode, draft, Some(&msg), &flashes);
            Err((StatusCode::UNPROCESSABLE_ENTITY, jar, Html(page)).into_response())
        }
        Err(other) => Err(other.into_response()),
    }
}

#[instrument(skip(state, jar))]
pub async fn list_dogs(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(query): Query<DogListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = DogFilter::new(
        query.q.as_deref(),
        query.status.as_deref(),
        query.size.as_deref(),
    );
    let dogs = state.dogs.list_dogs(&filter).await?;

    let (jar, flashes) = flash::take(jar);
    Ok((jar, Html(views::dogs::index(&dogs, &filter, &flashes))))
}

pub async fn new_dog_form(jar: SignedCookieJar) -> impl IntoResponse {
    let (jar, flashes) = flash::take(jar);
    let page = views::dogs::form(FormMode::Create, &DogDraft::default(), None, &flashes);
    (jar, Html(page))
}

#[instrument(skip(state, jar, form))]
pub async fn create_dog(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    AppMultipart(form): AppMultipart<DogFormData>,
) -> Result<Response, AppError> {
    let draft = DogDraft::from(&form);
    let (mut jar, input) = match validate_or_rerender(jar, &draft, FormMode::Create) {
        Ok(valid) => valid,
        Err(response) => return Ok(response),
    };

    let uploads = &state.config.uploads;
    let outcome = store_attachment(
        state.media.as_ref(),
        form.image,
        MediaKind::Image,
        &state.config.media.image_folder,
        &uploads.image_extensions,
    )
    .await;

    let image_url = match outcome {
        Attachment::None => None,
        Attachment::Stored(file) => Some(file.url),
        Attachment::InvalidType => {
            jar = flash::push(jar, invalid_type_message("image", &uploads.image_extensions));
            None
        }
        Attachment::Failed => {
            jar = flash::push(jar, "Image upload failed.");
            None
        }
    };

    let dog = state.dogs.create_dog(input, image_url).await?;
    info!(dog_id = dog.id, name = %dog.name, "Dog created");

    Ok(back_to_list(jar, "Dog created."))
}

#[instrument(skip(state, jar), fields(id))]
pub async fn edit_dog_form(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let Some(dog) = state.dogs.find_dog(id).await? else {
        return Ok(back_to_list(jar, DOG_NOT_FOUND));
    };

    let (jar, flashes) = flash::take(jar);
    let mode = FormMode::Edit {
        id,
        image_url: dog.image_url.as_deref(),
    };
    let page = views::dogs::form(mode, &DogDraft::from(&dog), None, &flashes);
    Ok((jar, Html(page)).into_response())
}

#[instrument(skip(state, jar, form), fields(id))]
pub async fn update_dog(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
    AppMultipart(form): AppMultipart<DogFormData>,
) -> Result<Response, AppError> {
    let Some(existing) = state.dogs.find_dog(id).await? else {
        return Ok(back_to_list(jar, DOG_NOT_FOUND));
    };

    let draft = DogDraft::from(&form);
    let mode = FormMode::Edit {
        id,
        image_url: existing.image_url.as_deref(),
    };
    let (mut jar, input) = match validate_or_rerender(jar, &draft, mode) {
        Ok(valid) => valid,
        Err(response) => return Ok(response),
    };

    let uploads = &state.config.uploads;
    let outcome = store_attachment(
        state.media.as_ref(),
        form.image,
        MediaKind::Image,
        &state.config.media.image_folder,
        &uploads.image_extensions,
    )
    .await;

    let image_url = match outcome {
        Attachment::Stored(file) => Some(file.url),
        Attachment::None => existing.image_url,
        Attachment::InvalidType => {
            jar = flash::push(jar, invalid_type_message("image", &uploads.image_extensions));
            existing.image_url
        }
        Attachment::Failed => {
            jar = flash::push(jar, "Image upload failed; keeping previous image.");
            existing.image_url
        }
    };

    if state.dogs.update_dog(id, input, image_url).await?.is_none() {
        return Ok(back_to_list(jar, DOG_NOT_FOUND));
    }
    info!(dog_id = id, "Dog updated");

    Ok(back_to_list(jar, "Dog updated."))
}

#[instrument(skip(state, jar), fields(id))]
pub async fn delete_dog(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    if state.dogs.delete_dog(id).await? {
        info!(dog_id = id, "Dog deleted");
        Ok(back_to_list(jar, "Dog deleted."))
    } else {
        Ok(back_to_list(jar, DOG_NOT_FOUND))
    }
}

#[instrument(skip(state, jar), fields(id))]
pub async fn show_dog(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let Some(dog) = state.dogs.find_dog(id).await? else {
        return Ok(back_to_list(jar, DOG_NOT_FOUND));
    };
    let documents = state.dogs.list_documents(id).await?;

    let (jar, flashes) = flash::take(jar);
    let page = views::dogs::detail(
        &dog,
        &documents,
        &state.config.uploads.document_extensions,
        &flashes,
    );
    Ok((jar, Html(page)).into_response())
}
