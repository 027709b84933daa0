//! Authentication integration tests.
//!
//! Tests verify:
//! - Login with the seeded admin issues a working token
//! - Wrong passwords and unknown users get the same 401
//! - Missing tokens get 401, bad and expired tokens get 403
//! - Read endpoints stay public

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;

use clinic_cms::auth::{SessionTokens, SESSION_TTL};

use super::test_utils::{
    get, json_request, token_with_expiry, unix_now, TestApp, ADMIN_PASSWORD, ADMIN_USERNAME,
};

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/login",
            None,
            json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["email"], "admin@punarjani.com");
    assert!(body["user"].get("password").is_none());

    let token = body["token"].as_str().unwrap();
    let claims = app.state.tokens.verify(token).unwrap();
    assert_eq!(claims.username, "admin");
    assert_eq!(claims.exp - claims.iat, SESSION_TTL.as_secs());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
    let app = TestApp::new();

    let (wrong_status, wrong_body) = app
        .send(json_request(
            Method::POST,
            "/api/login",
            None,
            json!({ "username": ADMIN_USERNAME, "password": "not-the-password" }),
        ))
        .await;
    let (unknown_status, unknown_body) = app
        .send(json_request(
            Method::POST,
            "/api/login",
            None,
            json!({ "username": "nobody", "password": ADMIN_PASSWORD }),
        ))
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["error"], "invalid_credentials");
    assert_eq!(wrong_body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_with_malformed_body() {
    let app = TestApp::new();

    let (status, _) = app
        .send(json_request(
            Method::POST,
            "/api/login",
            None,
            json!({ "username": ADMIN_USERNAME }),
        ))
        .await;

    assert!(status.is_client_error());
}

// =============================================================================
// Token Checks
// =============================================================================

#[tokio::test]
async fn test_login_token_authorizes_writes() {
    let app = TestApp::new();
    let token = app.login().await;

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            Some(&token),
            json!({ "heading": "Welcome" }),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["heading"], "Welcome");
}

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            None,
            json!({ "heading": "Nope" }),
        ))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing_token");
    assert_eq!(body["message"], "Access denied");
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_missing_token() {
    let app = TestApp::new();
    let token = app.login().await;

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/faqs/1")
        .header(header::AUTHORIZATION, format!("Token {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _) = app.send(request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_403() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            "/api/services",
            Some("not.a.token"),
            json!({ "title": "X" }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_403() {
    let app = TestApp::new();
    let forged = SessionTokens::new("some-other-secret-entirely")
        .issue(&clinic_cms::Identity {
            id: 1,
            username: "admin".to_string(),
        })
        .unwrap();

    let (status, _) = app
        .send(json_request(
            Method::PUT,
            "/api/contact",
            Some(&forged),
            json!({ "phone": "000" }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_day_old_token_is_rejected() {
    let app = TestApp::new();
    let issued_at = unix_now() - SESSION_TTL.as_secs() - 60;
    let token = token_with_expiry(issued_at, issued_at + SESSION_TTL.as_secs());

    let (status, body) = app
        .send(json_request(
            Method::PUT,
            "/api/hero",
            Some(&token),
            json!({ "heading": "Too late" }),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "token_expired");

    // Nothing was written
    let (_, content) = app.send(get("/api/content")).await;
    assert_ne!(content["hero"]["heading"], "Too late");
}

#[tokio::test]
async fn test_reads_are_public() {
    let app = TestApp::new();

    for uri in [
        "/health",
        "/api/content",
        "/api/services",
        "/api/doctors",
        "/api/reviews",
        "/api/faqs",
    ] {
        let (status, _) = app.send(get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
    }
}
