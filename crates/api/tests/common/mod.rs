#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use clockpoint_core::attendance::SessionPolicy;
use clockpoint_db::models::site::{CreateSite, Site};
use clockpoint_db::store::MemoryAttendanceStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

use clockpoint_api::config::ServerConfig;
use clockpoint_api::router::build_app_router;
use clockpoint_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only CORS origin and the permissive
/// session policy.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_max_connections: 1,
        session_policy: SessionPolicy::default(),
    }
}

/// Build the full application router over `store`, with the same
/// middleware stack production uses.
pub fn build_test_app_with(store: Arc<MemoryAttendanceStore>, config: ServerConfig) -> Router {
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn build_test_app(store: Arc<MemoryAttendanceStore>) -> Router {
    build_test_app_with(store, test_config())
}

/// Insert a site and authorize `user_id` for it.
pub async fn seed_site(
    store: &MemoryAttendanceStore,
    user_id: i64,
    name: &str,
    lat: f64,
    lon: f64,
    radius: f64,
) -> Site {
    let site = store
        .create_site(&CreateSite {
            name: name.to_string(),
            latitude: lat,
            longitude: lon,
            radius,
            active: None,
        })
        .await
        .unwrap();
    store.authorize_user(user_id, site.id).await;
    site
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
