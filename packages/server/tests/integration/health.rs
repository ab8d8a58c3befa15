use crate::common::TestApp;

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let res = app.get("/health").await;

    assert_eq!(res.status, 200);
    let body: serde_json::Value = serde_json::from_str(&res.text).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_degrades_when_database_is_gone() {
    let app = TestApp::spawn().await;
    app.db.clone().close().await.unwrap();

    let res = app.get("/health").await;

    assert_eq!(res.status, 503);
    let body: serde_json::Value = serde_json::from_str(&res.text).unwrap();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "error");
}
