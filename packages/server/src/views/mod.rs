//! Server-rendered HTML pages.
//!
//! Pages are plain `format!` templates. Every value that came from a user
//! or the database goes through [`escape`] before it is interpolated.

pub mod dogs;

use axum::http::StatusCode;

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const STYLE: &str = r#"body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; padding: 0 1rem; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: .4rem; text-align: left; vertical-align: top; }
.flashes { list-style: none; padding: 0; }
.flashes li { background: #fff6d5; border: 1px solid #e8d48a; margin: .3rem 0; padding: .4rem .6rem; }
.error { color: #a40000; }
img.thumb { max-height: 4rem; }
img.profile { max-width: 20rem; }
label { display: block; margin: .4rem 0; }"#;

fn render_flashes(flashes: &[String]) -> String {
    if flashes.is_empty() {
        return String::new();
    }
    let items: String = flashes
        .iter()
        .map(|m| format!("<li>{}</li>", escape(m)))
        .collect();
    format!(r#"<ul class="flashes">{items}</ul>"#)
}

/// Wrap a page body with the shared head, navigation and flash list.
pub fn layout(title: &str, flashes: &[String], body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title} - Shelter Dogs</title>
    <style>{style}</style>
</head>
<body>
    <nav><a href="/">All dogs</a><a href="/create">Add a dog</a></nav>
    <h1>{title}</h1>
    {flashes}
    {body}
</body>
</html>"#,
        title = escape(title),
        style = STYLE,
        flashes = render_flashes(flashes),
        body = body,
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    layout(
        title,
        &[],
        &format!(
            r#"<p class="error">{}</p><p><a href="/">Back to the list</a></p>"#,
            escape(message)
        ),
    )
}
