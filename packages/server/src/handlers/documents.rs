use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use sea_orm::DbErr;
use shelter_common::media::MediaKind;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::extractors::multipart::AppMultipart;
use crate::flash;
use crate::models::document::{DocumentFormData, NewDocument, document_title};
use crate::state::AppState;
use crate::utils::upload::{Attachment, invalid_type_message, store_attachment};

fn redirect_with(jar: SignedCookieJar, message: &str, to: &str) -> Response {
    (flash::push(jar, message), Redirect::to(to)).into_response()
}

#[instrument(skip(state, jar, form), fields(id))]
pub async fn upload_document(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
    AppMultipart(form): AppMultipart<DocumentFormData>,
) -> Result<Response, AppError> {
    if state.dogs.find_dog(id).await?.is_none() {
        return Ok(redirect_with(jar, "Dog not found.", "/"));
    }
    let detail = format!("/dog/{id}");

    let uploads = &state.config.uploads;
    let outcome = store_attachment(
        state.media.as_ref(),
        form.file,
        MediaKind::Document,
        &state.config.media.document_folder,
        &uploads.document_extensions,
    )
    .await;

    let file = match outcome {
        Attachment::Stored(file) => file,
        Attachment::None => {
            return Ok(redirect_with(jar, "Please choose a file to upload.", &detail));
        }
        Attachment::InvalidType => {
            let message = invalid_type_message("document", &uploads.document_extensions);
            return Ok(redirect_with(jar, &message, &detail));
        }
        Attachment::Failed => {
            return Ok(redirect_with(jar, "Document upload failed.", &detail));
        }
    };

    let new = NewDocument {
        dog_id: id,
        title: document_title(form.title.as_deref(), &file.filename),
        file_url: file.url,
        content_type: file.content_type,
    };
    match state.dogs.create_document(new).await {
        Ok(doc) => {
            info!(dog_id = id, document_id = doc.id, "Document uploaded");
            Ok(redirect_with(jar, "Document uploaded.", &detail))
        }
        // The dog was deleted while the file was uploading.
        Err(DbErr::RecordNotFound(_)) => Ok(redirect_with(jar, "Dog not found.", "/")),
        Err(e) => Err(e.into()),
    }
}

#[instrument(skip(state, jar), fields(id))]
pub async fn delete_document(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let Some(doc) = state.dogs.find_document(id).await? else {
        return Ok(redirect_with(jar, "Document not found.", "/"));
    };

    state.dogs.delete_document(id).await?;
    info!(dog_id = doc.dog_id, document_id = id, "Document deleted");

    Ok(redirect_with(
        jar,
        "Document deleted.",
        &format!("/dog/{}", doc.dog_id),
    ))
}
