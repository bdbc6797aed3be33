//! Integration tests for `/api/auth`.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use clockpoint_db::store::MemoryAttendanceStore;
use common::{body_json, post_json};
use serde_json::json;

#[tokio::test]
async fn forgot_password_always_answers_the_same() {
    for email in ["known@example.com", "nobody@example.com", "not-an-email"] {
        let app = common::build_test_app(Arc::new(MemoryAttendanceStore::new()));
        let response = post_json(app, "/api/auth/forgot-password", json!({ "email": email })).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "If the email exists, a link will be sent."
        );
    }
}

#[tokio::test]
async fn forgot_password_does_not_touch_the_store() {
    let store = Arc::new(MemoryAttendanceStore::new());
    store.set_unavailable(true);

    let response = post_json(
        common::build_test_app(store),
        "/api/auth/forgot-password",
        json!({ "email": "someone@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn forgot_password_answers_200_without_an_email() {
    for body in [json!({}), json!({ "email": null })] {
        let app = common::build_test_app(Arc::new(MemoryAttendanceStore::new()));
        let response = post_json(app, "/api/auth/forgot-password", body.clone()).await;

        assert_eq!(response.status(), StatusCode::OK, "body {body}");
        assert_eq!(
            body_json(response).await["message"],
            "If the email exists, a link will be sent."
        );
    }
}
