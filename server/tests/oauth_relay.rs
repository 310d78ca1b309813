use std::collections::HashMap;
use std::path::PathBuf;

use axum::{
    body::Body,
    extract::{Path, Query},
    http::{header::SET_COOKIE, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use studio_booking_server::{create_router, AppState, ServerConfig};
use tokio::net::TcpListener;
use tower::ServiceExt;

async fn fake_oauth_url(
    Path(provider): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if provider == "apple" {
        return (StatusCode::BAD_GATEWAY, Json(json!({ "message": "provider down" }))).into_response();
    }
    let state = query.get("state").cloned().unwrap_or_default();
    Json(json!({
        "success": true,
        "data": format!("https://auth.example.com/{}?state={}", provider, state),
    }))
    .into_response()
}

async fn fake_oauth_callback(Json(body): Json<Value>) -> Response {
    match body["code"].as_str() {
        Some("good") => Json(json!({
            "success": true,
            "data": {
                "success": true,
                "accessToken": "access-123",
                "refreshToken": "refresh-456",
                "user": { "id": 7, "username": "lena", "email": "lena@example.com", "role": "CUSTOMER" },
                "state": body["state"],
            }
        }))
        .into_response(),
        Some("no-tokens") => Json(json!({
            "success": true,
            "data": { "success": false, "message": "Account pending" }
        }))
        .into_response(),
        Some("refresh-only") => Json(json!({
            "success": true,
            "data": { "success": true, "refreshToken": "refresh-789" }
        }))
        .into_response(),
        Some("rejected") => Json(json!({ "success": false, "error": "Invalid code" })).into_response(),
        Some("expired") => {
            (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token expired" }))).into_response()
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

async fn spawn_fake_backend() -> String {
    let app = Router::new()
        .route("/api/oauth/:provider/url", get(fake_oauth_url))
        .route("/api/oauth/:provider/callback", post(fake_oauth_callback));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(backend_url: &str, extra: &[(&str, &str)]) -> ServerConfig {
    let mut vars: HashMap<String, String> = extra
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    vars.insert("BACKEND_URL".to_string(), backend_url.to_string());
    ServerConfig::from_lookup(move |key| vars.get(key).cloned()).unwrap()
}

async fn app_with(config: ServerConfig) -> Router {
    create_router(AppState::new(config).unwrap())
}

async fn app() -> Router {
    let backend = spawn_fake_backend().await;
    app_with(config(&backend, &[])).await
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn oauth_url_is_passed_through_with_state() {
    let response = app().await.oneshot(get_request("/api/oauth/google/url?state=abc123")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], "https://auth.example.com/google?state=abc123");
}

#[tokio::test]
async fn oauth_url_failure_keeps_backend_status() {
    let response = app().await.oneshot(get_request("/api/oauth/apple/url")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(json_body(response).await, json!({ "error": "Failed to get OAuth URL" }));
}

#[tokio::test]
async fn unknown_provider_is_not_found() {
    let response = app().await.oneshot(get_request("/api/oauth/myspace/url")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app()
        .await
        .oneshot(post_json("/api/oauth/myspace/callback", json!({ "code": "good" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreachable_backend_is_internal_error() {
    let app = app_with(config("http://127.0.0.1:1", &[])).await;
    let response = app.oneshot(get_request("/api/oauth/google/url")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn callback_requires_code() {
    for body in [json!({}), json!({ "code": "" }), json!({ "code": "  ", "state": "link" })] {
        let response = app()
            .await
            .oneshot(post_json("/api/oauth/google/callback", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Authorization code is required" })
        );
    }
}

#[tokio::test]
async fn successful_callback_returns_data_and_sets_cookies() {
    let response = app()
        .await
        .oneshot(post_json(
            "/api/oauth/google/callback",
            json!({ "code": "good", "state": "link" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with("accessToken=access-123; Max-Age=86400"));
    assert!(cookies[1].starts_with("refreshToken=refresh-456; Max-Age=604800"));
    for cookie in &cookies {
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    let body = json_body(response).await;
    assert_eq!(body["accessToken"], "access-123");
    assert_eq!(body["user"]["username"], "lena");
    assert_eq!(body["state"], "link");
}

#[tokio::test]
async fn production_cookies_are_secure() {
    let backend = spawn_fake_backend().await;
    let app = app_with(config(&backend, &[("APP_ENV", "production")])).await;

    let response = app
        .oneshot(post_json("/api/oauth/google/callback", json!({ "code": "good" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .all(|v| v.to_str().unwrap().ends_with("; Secure")));
}

#[tokio::test]
async fn callback_without_tokens_sets_no_cookies() {
    let response = app()
        .await
        .oneshot(post_json("/api/oauth/instagram/callback", json!({ "code": "no-tokens" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(SET_COOKIE).is_none());
    assert_eq!(json_body(response).await["message"], "Account pending");
}

#[tokio::test]
async fn refresh_cookie_is_set_on_its_own() {
    let response = app()
        .await
        .oneshot(post_json("/api/oauth/google/callback", json!({ "code": "refresh-only" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies: Vec<&str> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("refreshToken=refresh-789; Max-Age=604800"));
}

#[tokio::test]
async fn callback_rejected_by_backend_is_bad_request() {
    let response = app()
        .await
        .oneshot(post_json("/api/oauth/facebook/callback", json!({ "code": "rejected" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": "Invalid code" }));
}

#[tokio::test]
async fn callback_backend_error_keeps_status_and_message() {
    let response = app()
        .await
        .oneshot(post_json("/api/oauth/google/callback", json!({ "code": "expired" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await, json!({ "error": "Token expired" }));

    let response = app()
        .await
        .oneshot(post_json("/api/oauth/google/callback", json!({ "code": "crash" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": "OAuth callback failed" }));
}

#[tokio::test]
async fn public_config_reflects_environment() {
    let app = app_with(config(
        "http://127.0.0.1:1",
        &[("UNDER_CONSTRUCTION", "true"), ("PUBLIC_API_URL", "https://api.lm-beauty.de/api")],
    ))
    .await;

    let response = app.oneshot(get_request("/api/config")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "underConstruction": true, "apiBaseUrl": "https://api.lm-beauty.de/api" })
    );
}

#[tokio::test]
async fn frontend_logs_are_accepted() {
    let app = app_with(config("http://127.0.0.1:1", &[])).await;

    let response = app
        .oneshot(post_json(
            "/api/logs",
            json!({ "level": "warn", "message": "slot fetch failed", "component": "useAvailability" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "success": true }));
}

#[tokio::test]
async fn client_routes_fall_back_to_index_html() {
    let dist: PathBuf = std::env::temp_dir().join(format!("studio-dist-{}", std::process::id()));
    std::fs::create_dir_all(&dist).unwrap();
    std::fs::write(dist.join("index.html"), "<html>booking</html>").unwrap();

    let dist_str = dist.to_string_lossy().to_string();
    let app = app_with(config("http://127.0.0.1:1", &[("FRONTEND_DIST", &dist_str)])).await;

    let response = app.oneshot(get_request("/auth/google/callback?code=x")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<html>booking</html>");

    std::fs::remove_dir_all(&dist).ok();
}
