use axum::body::Bytes;
use axum_typed_multipart::{FieldData, TryFromMultipart};
use serde::Deserialize;
use shelter_common::{DogSize, DogStatus};

use crate::entity::dog;
use crate::error::AppError;

use super::shared::{checkbox, non_blank};

pub const NAME_MAX_CHARS: usize = 100;
pub const NOTES_MAX_CHARS: usize = 5000;
pub const AGE_MAX: i32 = 40;

/// Query string of the dog list page.
#[derive(Deserialize, Default, Debug)]
pub struct DogListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub size: Option<String>,
}

/// Raw multipart body of the create and edit forms.
///
/// Everything is optional text so that a half-filled form can be shown
/// back to the user instead of being rejected by the extractor.
#[derive(TryFromMultipart)]
pub struct DogFormData {
    pub name: Option<String>,
    pub age: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
    pub kid_friendly: Option<String>,
    pub cat_friendly: Option<String>,
    pub dog_friendly: Option<String>,
    pub notes: Option<String>,
    #[form_data(limit = "unlimited")]
    pub image: Option<FieldData<Bytes>>,
}

/// Form values as the user typed them, used to render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogDraft {
    pub name: String,
    pub age: String,
    pub size: String,
    pub status: String,
    pub kid_friendly: bool,
    pub cat_friendly: bool,
    pub dog_friendly: bool,
    pub notes: String,
}

/// Validated values for a full-row write of a dog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DogInput {
    pub name: String,
    pub age: i32,
    pub size: DogSize,
    pub status: DogStatus,
    pub kid_friendly: bool,
    pub cat_friendly: bool,
    pub dog_friendly: bool,
    pub notes: Option<String>,
}

impl Default for DogDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            size: DogSize::default().to_string(),
            status: DogStatus::default().to_string(),
            kid_friendly: false,
            cat_friendly: false,
            dog_friendly: false,
            notes: String::new(),
        }
    }
}

impl From<&DogFormData> for DogDraft {
    fn from(form: &DogFormData) -> Self {
        Self {
            name: form.name.clone().unwrap_or_default(),
            age: form.age.clone().unwrap_or_default(),
            size: form.size.clone().unwrap_or_default(),
            status: form.status.clone().unwrap_or_default(),
            kid_friendly: checkbox(form.kid_friendly.as_deref()),
            cat_friendly: checkbox(form.cat_friendly.as_deref()),
            dog_friendly: checkbox(form.dog_friendly.as_deref()),
            notes: form.notes.clone().unwrap_or_default(),
        }
    }
}

impl From<&dog::Model> for DogDraft {
    fn from(m: &dog::Model) -> Self {
        Self {
            name: m.name.clone(),
            age: m.age.to_string(),
            size: m.size.clone(),
            status: m.status.clone(),
            kid_friendly: m.kid_friendly,
            cat_friendly: m.cat_friendly,
            dog_friendly: m.dog_friendly,
            notes: m.notes.clone().unwrap_or_default(),
        }
    }
}

pub fn validate_dog_draft(draft: &DogDraft) -> Result<DogInput, AppError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(AppError::Validation(format!(
            "Name must be at most {NAME_MAX_CHARS} characters"
        )));
    }

    let age = match draft.age.trim() {
        "" => 0,
        raw => raw
            .parse::<i32>()
            .map_err(|_| AppError::Validation("Age must be a whole number".into()))?,
    };
    if !(0..=AGE_MAX).contains(&age) {
        return Err(AppError::Validation(format!("Age must be 0-{AGE_MAX}")));
    }

    let size = match draft.size.trim() {
        "" => DogSize::default(),
        raw => raw
            .parse::<DogSize>()
            .map_err(|e| AppError::Validation(e.to_string()))?,
    };
    let status = match draft.status.trim() {
        "" => DogStatus::default(),
        raw => raw
            .parse::<DogStatus>()
            .map_err(|e| AppError::Validation(e.to_string()))?,
    };

    let notes = non_blank(Some(draft.notes.as_str()));
    if let Some(ref notes) = notes
        && notes.chars().count() > NOTES_MAX_CHARS
    {
        return Err(AppError::Validation(format!(
            "Notes must be at most {NOTES_MAX_CHARS} characters"
        )));
    }

    Ok(DogInput {
        name: name.to_string(),
        age,
        size,
        status,
        kid_friendly: draft.kid_friendly,
        cat_friendly: draft.cat_friendly,
        dog_friendly: draft.dog_friendly,
        notes,
    })
}
