mod common;

use account_service::domain::user::models::EmailAddress;
use account_service::domain::user::ports::UserRepository;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("Ana", "ana@example.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    let id = body["data"]["id"].as_str().expect("id should be a string");

    let stored = app
        .repository
        .find_by_email(&EmailAddress::new("ana@example.com".to_string()).unwrap())
        .await
        .unwrap()
        .expect("user should be stored");
    assert_eq!(stored.id.to_string(), id);
    assert_eq!(stored.name.as_str(), "Ana");
    assert_ne!(stored.password_hash, "secret1");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    let first = app.register("Ana", "ana@example.com", "secret1").await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let response = app
        .register("Someone Else", "ana@example.com", "another1")
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Email already in use");
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_duplicate_email_ignores_case() {
    let app = TestApp::spawn().await;

    app.register("Ana", "ana@example.com", "secret1").await;
    let response = app.register("Ana", "ANA@Example.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(app.repository.len().await, 1);
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app.register("", "invalid-email", "pass").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "Validation failed");
    assert_eq!(
        body["data"]["errors"],
        json!([
            { "field": "email", "message": "Invalid email" },
            { "field": "name", "message": "Name is required" },
            { "field": "password", "message": "Password must be at least 6 characters" }
        ])
    );
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_and_login_report_one_email_message() {
    let app = TestApp::spawn().await;
    let expected = json!([{ "field": "email", "message": "Invalid email" }]);

    // Passes the request rule but not the domain email check.
    let response = app.register("Ana", "a..b@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["errors"], expected);

    let response = app.login("a..b@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["errors"], expected);

    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_blank_name() {
    let app = TestApp::spawn().await;

    let response = app.register("   ", "ana@example.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["errors"][0]["field"], "name");
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/users/register")
        .json(&json!({ "name": "Ana" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(app.repository.is_empty().await);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;

    let registered = app.register("Ana", "ana@example.com", "secret1").await;
    let registered: serde_json::Value = registered.json().await.unwrap();

    let response = app.login("ana@example.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["userId"], registered["data"]["id"]);
    assert_eq!(body["data"]["name"], "Ana");
    assert_eq!(body["data"]["email"], "ana@example.com");
    assert_eq!(body["data"]["message"], "Login successful");
    assert!(body["data"].get("password_hash").is_none());
    assert!(!body.to_string().contains("argon2"));
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::spawn().await;

    app.register("Ana", "ana@example.com", "secret1").await;

    let wrong_password = app.login("ana@example.com", "wrong").await;
    let unknown_email = app.login("nobody@example.com", "x").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password["data"]["message"],
        "Invalid email or password"
    );
}

#[tokio::test]
async fn test_login_validation_errors() {
    let app = TestApp::spawn().await;

    let response = app.login("", "").await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["errors"],
        json!([
            { "field": "email", "message": "Invalid email" },
            { "field": "password", "message": "Password is required" }
        ])
    );
}

#[tokio::test]
async fn test_register_and_login_scenario() {
    let app = TestApp::spawn().await;

    let response = app.register("Ana", "ana@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.register("Ana Two", "ana@example.com", "secret2").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app.login("Ana@Example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Ana");

    let response = app.login("ana@example.com", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.login("nobody@example.com", "x").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
