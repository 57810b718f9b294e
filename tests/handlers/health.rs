//! Health endpoint tests

use crate::common::TestApp;

#[tokio::test]
async fn test_public_health_returns_200() {
    let app = TestApp::new().await;

    let response = app.client
        .get(&app.url("/api/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("application/json"));
}

#[tokio::test]
async fn test_public_health_returns_status_ok() {
    let app = TestApp::new().await;

    let response = app.client
        .get(&app.url("/api/health"))
        .send()
        .await
        .unwrap();

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_health_rejects_invalid_token() {
    let app = TestApp::new().await;

    let response = app.client
        .get(&app.url("/api/health"))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
}
