use shelter_common::{DogSize, DogStatus};

use super::{escape, layout};
use crate::entity::{dog, dog_document};
use crate::models::dog::DogDraft;
use crate::repository::DogFilter;

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// `<option>` list for a select, marking `selected` when it matches.
fn options<'a>(
    values: impl IntoIterator<Item = &'a str>,
    selected: Option<&str>,
    blank: Option<&str>,
) -> String {
    let mut html = String::new();
    if let Some(label) = blank {
        html.push_str(&format!(r#"<option value="">{}</option>"#, escape(label)));
    }
    for value in values {
        let attr = if selected == Some(value) { " selected" } else { "" };
        html.push_str(&format!(
            r#"<option value="{v}"{attr}>{v}</option>"#,
            v = escape(value)
        ));
    }
    html
}

fn size_names() -> impl Iterator<Item = &'static str> {
    DogSize::ALL.iter().map(DogSize::as_str)
}

fn status_names() -> impl Iterator<Item = &'static str> {
    DogStatus::ALL.iter().map(DogStatus::as_str)
}

fn checkbox(name: &str, label: &str, checked: bool) -> String {
    format!(
        r#"<label><input type="checkbox" name="{name}" value="1"{}> {label}</label>"#,
        if checked { " checked" } else { "" }
    )
}

fn render_row(dog: &dog::Model) -> String {
    let image = match dog.image_url.as_deref() {
        Some(url) => format!(
            r#"<img class="thumb" src="{}" alt="{}">"#,
            escape(url),
            escape(&dog.name)
        ),
        None => String::new(),
    };
    format!(
        r#"<tr data-dog-id="{id}" data-dog-name="{name}">
    <td>{image}</td>
    <td><a href="/dog/{id}">{name}</a></td>
    <td>{age}</td>
    <td>{size}</td>
    <td>{status}</td>
    <td>{kids}</td>
    <td>{cats}</td>
    <td>{dogs}</td>
    <td>{notes}</td>
    <td><a href="/edit/{id}">Edit</a> <a href="/delete/{id}" onclick="return confirm('Delete this dog?');">Delete</a></td>
</tr>"#,
        id = dog.id,
        name = escape(&dog.name),
        image = image,
        age = dog.age,
        size = escape(&dog.size),
        status = escape(&dog.status),
        kids = yes_no(dog.kid_friendly),
        cats = yes_no(dog.cat_friendly),
        dogs = yes_no(dog.dog_friendly),
        notes = escape(dog.notes.as_deref().unwrap_or_default()),
    )
}

/// Dog list with the search and filter form.
pub fn index(dogs: &[dog::Model], filter: &DogFilter, flashes: &[String]) -> String {
    let rows: String = dogs.iter().map(render_row).collect();
    let table = if dogs.is_empty() {
        r#"<p class="empty">No dogs match.</p>"#.to_string()
    } else {
        format!(
            r#"<table class="dogs">
<thead><tr><th></th><th>Name</th><th>Age</th><th>Size</th><th>Status</th><th>Kids</th><th>Cats</th><th>Dogs</th><th>Notes</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#
        )
    };

    let body = format!(
        r#"<form method="get" action="/" class="filters">
    <input type="search" name="q" placeholder="Search name or notes" value="{q}">
    <select name="status">{statuses}</select>
    <select name="size">{sizes}</select>
    <button type="submit">Filter</button>
    <a href="/">Reset</a>
</form>
{table}"#,
        q = escape(filter.q.as_deref().unwrap_or_default()),
        statuses = options(status_names(), filter.status.as_deref(), Some("Any status")),
        sizes = options(size_names(), filter.size.as_deref(), Some("Any size")),
    );

    layout("Shelter dogs", flashes, &body)
}

/// Whether the form creates a new dog or edits an existing one.
pub enum FormMode<'a> {
    Create,
    Edit {
        id: i32,
        image_url: Option<&'a str>,
    },
}

/// Create/edit form, re-populated from `draft`.
pub fn form(mode: FormMode<'_>, draft: &DogDraft, error: Option<&str>, flashes: &[String]) -> String {
    let (title, action, current_image) = match mode {
        FormMode::Create => ("Add a dog".to_string(), "/create".to_string(), None),
        FormMode::Edit { id, image_url } => {
            (format!("Edit {}", draft.name), format!("/edit/{id}"), image_url)
        }
    };

    let error = error
        .map(|e| format!(r#"<p class="error">{}</p>"#, escape(e)))
        .unwrap_or_default();
    let preview = current_image
        .map(|url| {
            format!(
                r#"<p>Current image:<br><img class="profile" src="{}" alt="Current image"></p>"#,
                escape(url)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"{error}
<form method="post" action="{action}" enctype="multipart/form-data" class="dog-form">
    <label>Name <input type="text" name="name" value="{name}" required maxlength="100"></label>
    <label>Age <input type="number" name="age" value="{age}" min="0" max="40"></label>
    <label>Size <select name="size">{sizes}</select></label>
    <label>Status <select name="status">{statuses}</select></label>
    {kids}
    {cats}
    {dogs}
    <label>Notes <textarea name="notes" rows="4" cols="60">{notes}</textarea></label>
    {preview}
    <label>Image <input type="file" name="image" accept="image/*"></label>
    <button type="submit">Save</button>
    <a href="/">Cancel</a>
</form>"#,
        action = escape(&action),
        name = escape(&draft.name),
        age = escape(&draft.age),
        sizes = options(size_names(), Some(draft.size.as_str()), None),
        statuses = options(status_names(), Some(draft.status.as_str()), None),
        kids = checkbox("kid_friendly", "Good with kids", draft.kid_friendly),
        cats = checkbox("cat_friendly", "Good with cats", draft.cat_friendly),
        dogs = checkbox("dog_friendly", "Good with dogs", draft.dog_friendly),
        notes = escape(&draft.notes),
    );

    layout(&title, flashes, &body)
}

fn render_document(doc: &dog_document::Model) -> String {
    format!(
        r#"<tr data-document-id="{id}">
    <td><a href="{url}">{title}</a></td>
    <td>{content_type}</td>
    <td>{uploaded}</td>
    <td><form method="post" action="/doc/{id}/delete" onsubmit="return confirm('Delete this document?');"><button type="submit">Delete</button></form></td>
</tr>"#,
        id = doc.id,
        url = escape(&doc.file_url),
        title = escape(&doc.title),
        content_type = escape(doc.content_type.as_deref().unwrap_or_default()),
        uploaded = doc.uploaded_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

/// Dog profile with its documents and the upload form.
pub fn detail(
    dog: &dog::Model,
    documents: &[dog_document::Model],
    accept: &[String],
    flashes: &[String],
) -> String {
    let image = dog
        .image_url
        .as_deref()
        .map(|url| {
            format!(
                r#"<img class="profile" src="{}" alt="{}">"#,
                escape(url),
                escape(&dog.name)
            )
        })
        .unwrap_or_default();

    let documents_html = if documents.is_empty() {
        "<p>No documents yet.</p>".to_string()
    } else {
        let rows: String = documents.iter().map(render_document).collect();
        format!(
            r#"<table class="documents">
<thead><tr><th>Title</th><th>Type</th><th>Uploaded</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#
        )
    };

    let accept: Vec<String> = accept.iter().map(|ext| format!(".{ext}")).collect();

    let body = format!(
        r#"<section class="dog" data-dog-id="{id}" data-dog-name="{name}">
    {image}
    <dl>
        <dt>Age</dt><dd>{age}</dd>
        <dt>Size</dt><dd>{size}</dd>
        <dt>Status</dt><dd>{status}</dd>
        <dt>Good with kids</dt><dd>{kids}</dd>
        <dt>Good with cats</dt><dd>{cats}</dd>
        <dt>Good with dogs</dt><dd>{dogs}</dd>
        <dt>Notes</dt><dd>{notes}</dd>
    </dl>
    <p><a href="/edit/{id}">Edit</a></p>
</section>
<section class="documents">
    <h2>Documents</h2>
    {documents_html}
    <form method="post" action="/dog/{id}/upload_doc" enctype="multipart/form-data">
        <label>Title <input type="text" name="title" maxlength="200"></label>
        <label>File <input type="file" name="file" accept="{accept}"></label>
        <button type="submit">Upload</button>
    </form>
</section>"#,
        id = dog.id,
        name = escape(&dog.name),
        image = image,
        age = dog.age,
        size = escape(&dog.size),
        status = escape(&dog.status),
        kids = yes_no(dog.kid_friendly),
        cats = yes_no(dog.cat_friendly),
        dogs = yes_no(dog.dog_friendly),
        notes = escape(dog.notes.as_deref().unwrap_or_default()),
        documents_html = documents_html,
        accept = escape(&accept.join(",")),
    );

    layout(&dog.name, flashes, &body)
}
