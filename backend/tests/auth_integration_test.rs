//! Integration tests for authentication endpoints

mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{unique_email, TestApp, TEST_EXPIRY_SECS};
use users_service_backend::repositories::{BlacklistRepository, UserRepository};

#[tokio::test]
#[ignore = "requires database"]
async fn test_registration() {
    let app = TestApp::new().await;
    let email = unique_email();

    let (status, body) = app.register(&email, "123456", "joe", "doe").await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Successfully registered.");

    let token = body["auth_token"].as_str().unwrap();
    assert_eq!(app.jwt.verify(token).unwrap(), email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_registration_with_already_registered_user() {
    let app = TestApp::new().await;
    let email = unique_email();

    let (status, _) = app.register(&email, "123456", "joe", "doe").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.register(&email, "other", "joe", "doe").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "User already exists. Please Log in.");

    let users = UserRepository::list_all(&app.pool).await.unwrap();
    assert_eq!(users.iter().filter(|u| u.email == email).count(), 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_duplicate_registration() {
    let app = TestApp::new().await;
    let email = unique_email();

    let (a, b) = tokio::join!(
        app.register(&email, "123456", "joe", "doe"),
        app.register(&email, "123456", "joe", "doe"),
    );

    let mut statuses = vec![a.0, b.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::ACCEPTED]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_registration_password_is_hashed() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;

    let record = UserRepository::find_by_email(&app.pool, &user.email)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(record.password_hash, user.password);
    assert_eq!(record.role_id, 1);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_registered_user_login() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, body) = app.login(&user.email, &user.password).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Successfully logged in.");
    let token = body["auth_token"].as_str().unwrap();
    assert_ne!(token, user.token);
    assert_eq!(app.jwt.verify(token).unwrap(), user.email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, body) = app.login(&user.email, "not-the-password").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Wrong password.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_non_registered_user_login() {
    let app = TestApp::new().await;

    let (status, body) = app.login(&unique_email(), "123456").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "User does not exist.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_user_status() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, body) = app.with_token("GET", "/auth/status", &user.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["email"], user.email.as_str());
    assert_eq!(body["data"]["admin"], false);
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_valid_logout() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;
    let (_, login) = app.login(&user.email, &user.password).await;
    let token = login["auth_token"].as_str().unwrap();

    let (status, body) = app.with_token("POST", "/auth/logout", token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Successfully logged out.");

    // The registration token is a different string and stays usable
    let (status, _) = app.with_token("GET", "/auth/status", &user.token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_concurrent_logout_of_same_token() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;
    let (_, login) = app.login(&user.email, &user.password).await;
    let token = login["auth_token"].as_str().unwrap();

    let (a, b) = tokio::join!(
        app.with_token("POST", "/auth/logout", token),
        app.with_token("POST", "/auth/logout", token),
    );

    let mut results = vec![a, b];
    results.sort_by_key(|(status, _)| *status);
    assert_eq!(results[0].0, StatusCode::OK);
    assert_eq!(results[0].1["message"], "Successfully logged out.");
    assert_eq!(results[1].0, StatusCode::UNAUTHORIZED);
    assert_eq!(results[1].1["message"], "Token blacklisted. Please log in again.");

    let (status, body) = app.with_token("GET", "/auth/status", token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token blacklisted. Please log in again.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_logout_with_expired_token() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;
    let issued = Utc::now() - Duration::seconds(TEST_EXPIRY_SECS + 1);
    let expired = app.jwt.mint_at(&user.email, issued).unwrap();

    let (status, body) = app.with_token("POST", "/auth/logout", &expired).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Signature expired. Please log in again.");

    let (status, body) = app.with_token("GET", "/auth/status", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Signature expired. Please log in again.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_valid_blacklisted_token_logout() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;
    let (_, login) = app.login(&user.email, &user.password).await;
    let token = login["auth_token"].as_str().unwrap();

    BlacklistRepository::insert(&app.pool, token).await.unwrap();

    let (status, body) = app.with_token("POST", "/auth/logout", token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Token blacklisted. Please log in again.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_valid_blacklisted_token_user() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;

    BlacklistRepository::insert(&app.pool, &user.token).await.unwrap();

    let (status, body) = app.with_token("GET", "/auth/status", &user.token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token blacklisted. Please log in again.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_expired_and_blacklisted_reports_blacklisted() {
    let app = TestApp::new().await;
    let user = app.create_test_user().await;
    let issued = Utc::now() - Duration::hours(1);
    let expired = app.jwt.mint_at(&user.email, issued).unwrap();

    BlacklistRepository::insert(&app.pool, &expired).await.unwrap();

    let (status, body) = app.with_token("GET", "/auth/status", &expired).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token blacklisted. Please log in again.");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_end_to_end_session() {
    let app = TestApp::new().await;
    let email = unique_email();

    let (status, body) = app.register(&email, "pw", "joe", "doe").await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["auth_token"].as_str().unwrap().to_string();

    let (status, body) = app.with_token("GET", "/auth/status", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], email.as_str());

    let before = BlacklistRepository::count(&app.pool).await.unwrap();

    let (status, _) = app.with_token("POST", "/auth/logout", &token).await;
    assert_eq!(status, StatusCode::OK);

    // Second logout is a failure, not a no-op
    let (status, body) = app.with_token("POST", "/auth/logout", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token blacklisted. Please log in again.");

    let (status, body) = app.with_token("GET", "/auth/status", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token blacklisted. Please log in again.");

    let after = BlacklistRepository::count(&app.pool).await.unwrap();
    assert!(after >= before + 1);
}
