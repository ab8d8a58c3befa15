use reqwest::multipart::Form;

use crate::common::{DogFields, TestApp, file_part};

const PDF_BYTES: &[u8] = b"%PDF-1.4\nfake-vaccination-record";

fn document_form(title: &str, filename: &str, content_type: &str) -> Form {
    Form::new()
        .text("title", title.to_string())
        .part("file", file_part(filename, content_type, PDF_BYTES.to_vec()))
}

#[tokio::test]
async fn upload_with_default_title() {
    let app = TestApp::spawn().await;
    let dog = app.create_dog(DogFields::default().form()).await;

    let res = app
        .post_form(
            &format!("/dog/{}/upload_doc", dog.id),
            document_form("", "vaccines 2024.pdf", "application/pdf"),
        )
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location, Some(format!("/dog/{}", dog.id)));

    let docs = app.dogs.list_documents(dog.id).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].title, "vaccines_2024.pdf");
    assert_eq!(docs[0].content_type.as_deref(), Some("application/pdf"));
    assert!(docs[0].file_url.starts_with("/media/dog_app/docs/"));

    let page = app.follow(&res).await;
    assert_eq!(page.status, 200);
    assert!(page.text.contains("Document uploaded."));
    assert!(page.text.contains("vaccines_2024.pdf"));

    let file = app.client.get(app.url(&docs[0].file_url)).send().await.unwrap();
    assert_eq!(file.status().as_u16(), 200);
    assert_eq!(file.bytes().await.unwrap().as_ref(), PDF_BYTES);
}

#[tokio::test]
async fn upload_uses_given_title() {
    let app = TestApp::spawn().await;
    let dog = app.create_dog(DogFields::default().form()).await;

    let res = app
        .post_form(
            &format!("/dog/{}/upload_doc", dog.id),
            document_form("  Rabies certificate ", "scan.pdf", "application/pdf"),
        )
        .await;
    assert_eq!(res.status, 303);

    let docs = app.dogs.list_documents(dog.id).await.unwrap();
    assert_eq!(docs[0].title, "Rabies certificate");
}

#[tokio::test]
async fn upload_without_file_is_rejected() {
    let app = TestApp::spawn().await;
    let dog = app.create_dog(DogFields::default().form()).await;

    let form = Form::new().text("title", "Nothing attached");
    let res = app
        .post_form(&format!("/dog/{}/upload_doc", dog.id), form)
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location, Some(format!("/dog/{}", dog.id)));

    let page = app.follow(&res).await;
    assert!(page.text.contains("Please choose a file to upload."));
    assert!(app.dogs.list_documents(dog.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn upload_with_disallowed_extension_is_rejected() {
    let app = TestApp::spawn().await;
    let dog = app.create_dog(DogFields::default().form()).await;

    let res = app
        .post_form(
            &format!("/dog/{}/upload_doc", dog.id),
            document_form("Installer", "setup.exe", "application/octet-stream"),
        )
        .await;
    assert_eq!(res.status, 303);

    let page = app.follow(&res).await;
    assert!(
        page.text
            .contains("Invalid document type. Use pdf/png/jpg/jpeg/gif/webp/txt/doc/docx.")
    );
    assert!(app.dogs.list_documents(dog.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn provider_failure_writes_no_row() {
    let app = TestApp::spawn_with_failing_media().await;
    let dog = app.create_dog(DogFields::default().form()).await;

    let res = app
        .post_form(
            &format!("/dog/{}/upload_doc", dog.id),
            document_form("Vet notes", "notes.txt", "text/plain"),
        )
        .await;
    assert_eq!(res.status, 303);

    let page = app.follow(&res).await;
    assert!(page.text.contains("Document upload failed."));
    assert!(app.dogs.list_documents(dog.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn upload_for_missing_dog_redirects_to_list() {
    let app = TestApp::spawn().await;

    let res = app
        .post_form(
            "/dog/404/upload_doc",
            document_form("Orphan", "orphan.pdf", "application/pdf"),
        )
        .await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location.as_deref(), Some("/"));

    let page = app.follow(&res).await;
    assert!(page.text.contains("Dog not found."));
}

#[tokio::test]
async fn delete_document_returns_to_dog() {
    let app = TestApp::spawn().await;
    let dog = app.create_dog(DogFields::default().form()).await;
    app.post_form(
        &format!("/dog/{}/upload_doc", dog.id),
        document_form("Intake form", "intake.pdf", "application/pdf"),
    )
    .await;
    let doc = app.dogs.list_documents(dog.id).await.unwrap().remove(0);

    let res = app.post_empty(&format!("/doc/{}/delete", doc.id)).await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location, Some(format!("/dog/{}", dog.id)));

    let page = app.follow(&res).await;
    assert!(page.text.contains("Document deleted."));
    assert!(page.text.contains("No documents yet."));
    assert!(app.dogs.find_document(doc.id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_unknown_document_flashes_not_found() {
    let app = TestApp::spawn().await;

    let res = app.post_empty("/doc/999/delete").await;
    assert_eq!(res.status, 303);
    assert_eq!(res.location.as_deref(), Some("/"));

    let page = app.follow(&res).await;
    assert!(page.text.contains("Document not found."));
}

#[tokio::test]
async fn deleting_dog_removes_its_documents() {
    let app = TestApp::spawn().await;
    let dog = app.create_dog(DogFields::default().form()).await;
    for name in ["a.pdf", "b.txt"] {
        let res = app
            .post_form(
                &format!("/dog/{}/upload_doc", dog.id),
                document_form("", name, "application/octet-stream"),
            )
            .await;
        assert_eq!(res.status, 303);
    }
    let docs = app.dogs.list_documents(dog.id).await.unwrap();
    assert_eq!(docs.len(), 2);

    let res = app.get(&format!("/delete/{}", dog.id)).await;
    assert_eq!(res.status, 303);

    assert!(app.dogs.list_documents(dog.id).await.unwrap().is_empty());
    for doc in docs {
        assert!(app.dogs.find_document(doc.id).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn detail_page_lists_documents() {
    let app = TestApp::spawn().await;
    let dog = app
        .create_dog(
            DogFields {
                name: "Buddy",
                notes: "Sweet and energetic.",
                ..Default::default()
            }
            .form(),
        )
        .await;
    app.post_form(
        &format!("/dog/{}/upload_doc", dog.id),
        document_form("Microchip", "chip.pdf", "application/pdf"),
    )
    .await;

    let res = app.get(&format!("/dog/{}", dog.id)).await;

    assert_eq!(res.status, 200);
    assert!(res.text.contains("Sweet and energetic."));
    assert!(res.text.contains("Microchip"));
    assert!(res.text.contains(r#"accept=".pdf,.png,.jpg,.jpeg,.gif,.webp,.txt,.doc,.docx""#));
}

#[tokio::test]
async fn detail_of_missing_dog_redirects() {
    let app = TestApp::spawn().await;

    let res = app.get("/dog/77").await;

    assert_eq!(res.status, 303);
    let page = app.follow(&res).await;
    assert!(page.text.contains("Dog not found."));
}
