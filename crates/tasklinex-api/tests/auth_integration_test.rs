//! Integration tests for the signup/login endpoints

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use sea_orm::DatabaseConnection;
use serde_json::json;
use tasklinex_api::{models::*, ApiServer, ApiServerConfig};
use tasklinex_auth::TokenSigner;
use tower::ServiceExt; // For `oneshot` method

const TEST_SECRET: &str = "test-secret";

/// Helper to create an in-memory database with migrations applied
async fn create_test_db() -> DatabaseConnection {
    let db = tasklinex_db::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    tasklinex_db::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Helper to create a test API server
fn create_test_server(db: DatabaseConnection) -> ApiServer {
    let config = ApiServerConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(), // Random port
        jwt_secret: TEST_SECRET.to_string(),
    };

    ApiServer::new(config, db)
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn signup_body(email: &str, password: &str) -> serde_json::Value {
    json!({
        "firstName": "A",
        "lastName": "B",
        "email": email,
        "password": password
    })
}

#[tokio::test]
async fn test_liveness_probe() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let probe: LivenessResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(probe.status, "ok");
}

#[tokio::test]
async fn test_signup_success() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let response = app
        .oneshot(post_json("/signup", &signup_body("a@x.com", "secret1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let confirmation: SignupResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(confirmation.message, "User created successfully");
}

#[tokio::test]
async fn test_signup_with_company_name() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let body = json!({
        "firstName": "A",
        "lastName": "B",
        "email": "corp@x.com",
        "password": "secret1",
        "companyName": "Acme Inc",
        "rememberMe": true
    });

    let response = app.oneshot(post_json("/signup", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let db = create_test_db().await;
    let server = create_test_server(db.clone());
    let app = server.build_router();

    let response1 = app
        .oneshot(post_json("/signup", &signup_body("dup@x.com", "secret1")))
        .await
        .unwrap();
    assert_eq!(response1.status(), StatusCode::OK);

    let app2 = create_test_server(db).build_router();
    let response2 = app2
        .oneshot(post_json("/signup", &signup_body("dup@x.com", "other-pass")))
        .await
        .unwrap();

    assert_eq!(response2.status(), StatusCode::CONFLICT);

    let body = axum::body::to_bytes(response2.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(error.code, Some("EMAIL_EXISTS".to_string()));
    assert_eq!(error.error, "Email already registered");
}

#[tokio::test]
async fn test_signup_invalid_email() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let response = app
        .oneshot(post_json(
            "/signup",
            &signup_body("not-an-email", "secret1"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(error.code, Some("INVALID_EMAIL".to_string()));
}

#[tokio::test]
async fn test_signup_blank_name() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let body = json!({
        "firstName": "",
        "lastName": "B",
        "email": "a@x.com",
        "password": "secret1"
    });

    let response = app.oneshot(post_json("/signup", &body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(error.code, Some("MISSING_FIRST_NAME".to_string()));
}

#[tokio::test]
async fn test_signup_empty_password() {
    let db = create_test_db().await;
    let app = create_test_server(db).build_router();

    let response = app
        .oneshot(post_json("/signup", &signup_body("a@x.com", "")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success_returns_bearer_token() {
    let db = create_test_db().await;
    let app = create_test_server(db.clone()).build_router();

    let response = app
        .oneshot(post_json("/signup", &signup_body("login@x.com", "secret1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app2 = create_test_server(db).build_router();
    let login_body = json!({
        "email": "login@x.com",
        "password": "secret1",
        "rememberMe": false
    });

    let response = app2.oneshot(post_json("/login", &login_body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let login: LoginResponse = serde_json::from_slice(&body).unwrap();

    assert_eq!(login.token_type, "bearer");
    assert!(login.access_token.starts_with("eyJ"));

    // Token decodes under the shared secret and carries the right claims
    let signer = TokenSigner::new(TEST_SECRET.as_bytes());
    let claims = signer.decode(&login.access_token).expect("Invalid token");

    assert_eq!(claims.sub, "login@x.com");
    assert!(claims.id.parse::<uuid::Uuid>().is_ok());
    assert_eq!(claims.exp - claims.iat, 30 * 60);
}

#[tokio::test]
async fn test_login_remember_me_long_window() {
    let db = create_test_db().await;
    let app = create_test_server(db.clone()).build_router();

    app.oneshot(post_json("/signup", &signup_body("long@x.com", "secret1")))
        .await
        .unwrap();

    let app2 = create_test_server(db).build_router();
    let login_body = json!({
        "email": "long@x.com",
        "password": "secret1",
        "rememberMe": true
    });

    let response = app2.oneshot(post_json("/login", &login_body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let login: LoginResponse = serde_json::from_slice(&body).unwrap();

    let signer = TokenSigner::new(TEST_SECRET.as_bytes());
    let claims = signer.decode(&login.access_token).expect("Invalid token");

    assert_eq!(claims.exp - claims.iat, 15 * 24 * 60 * 60);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let db = create_test_db().await;
    let app = create_test_server(db.clone()).build_router();

    app.oneshot(post_json("/signup", &signup_body("a@x.com", "secret1")))
        .await
        .unwrap();

    // Wrong password for a registered email
    let app2 = create_test_server(db.clone()).build_router();
    let wrong_password = app2
        .oneshot(post_json(
            "/login",
            &json!({"email": "a@x.com", "password": "wrong"}),
        ))
        .await
        .unwrap();

    // Unknown email
    let app3 = create_test_server(db).build_router();
    let unknown_email = app3
        .oneshot(post_json(
            "/login",
            &json!({"email": "nouser@x.com", "password": "x"}),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Same challenge header on both
    let challenge1 = wrong_password
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .cloned();
    let challenge2 = unknown_email
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .cloned();
    assert_eq!(
        challenge1,
        Some(header::HeaderValue::from_static("Bearer"))
    );
    assert_eq!(challenge1, challenge2);

    // Byte-for-byte identical bodies
    let body1 = axum::body::to_bytes(wrong_password.into_body(), usize::MAX)
        .await
        .unwrap();
    let body2 = axum::body::to_bytes(unknown_email.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body1, body2);

    let error: ErrorResponse = serde_json::from_slice(&body1).unwrap();
    assert_eq!(error.error, "Invalid credentials");
}

#[tokio::test]
async fn test_tampered_token_fails_signature_check() {
    let db = create_test_db().await;
    let app = create_test_server(db.clone()).build_router();

    app.oneshot(post_json("/signup", &signup_body("t@x.com", "secret1")))
        .await
        .unwrap();

    let app2 = create_test_server(db).build_router();
    let response = app2
        .oneshot(post_json(
            "/login",
            &json!({"email": "t@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let login: LoginResponse = serde_json::from_slice(&body).unwrap();

    let signer = TokenSigner::new(TEST_SECRET.as_bytes());
    assert!(signer.decode(&login.access_token).is_ok());

    // Corrupt one character of the signature segment
    let mut tampered = login.access_token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    assert!(signer.decode(&tampered).is_err());
}

#[tokio::test]
async fn test_end_to_end_flow() {
    let db = create_test_db().await;

    // 1. Signup succeeds
    let app = create_test_server(db.clone()).build_router();
    let response = app
        .oneshot(post_json("/signup", &signup_body("a@x.com", "secret1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 2. Second signup with the same email conflicts
    let app = create_test_server(db.clone()).build_router();
    let response = app
        .oneshot(post_json("/signup", &signup_body("a@x.com", "secret1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // 3. Login with the right password yields a token
    let app = create_test_server(db.clone()).build_router();
    let response = app
        .oneshot(post_json(
            "/login",
            &json!({"email": "a@x.com", "password": "secret1", "rememberMe": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 4. Wrong password and unknown email both get the generic 401
    let app = create_test_server(db.clone()).build_router();
    let response = app
        .oneshot(post_json(
            "/login",
            &json!({"email": "a@x.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = create_test_server(db).build_router();
    let response = app
        .oneshot(post_json(
            "/login",
            &json!({"email": "nouser@x.com", "password": "x"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
