mod common;

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use coursehub_auth::SecretString;
use coursehub_backend::handlers::auth::{self, dto::LoginRequest, dto::LoginResponse};

fn request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: SecretString::new(password.to_string()),
    }
}

#[tokio::test]
async fn handler_accepts_matching_credentials() {
    let state = common::state_with_users(&[("a@x.com", "correct")]).await;

    let Json(resp) = auth::login(Extension(state), Ok(Json(request("a@x.com", "correct"))))
        .await
        .expect("login");
    assert_eq!(resp, LoginResponse::success());
}

#[tokio::test]
async fn handler_rejects_mismatch_as_400() {
    let state = common::state_with_users(&[("a@x.com", "correct")]).await;

    let err = auth::login(Extension(state), Ok(Json(request("a@x.com", "nope"))))
        .await
        .expect_err("mismatch");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn connection_is_returned_after_each_request() {
    // The pool holds a single connection; a leak would hang the second call.
    let state = common::state_with_users(&[("a@x.com", "correct")]).await;

    for password in ["correct", "nope", "correct"] {
        let _ = auth::login(
            Extension(state.clone()),
            Ok(Json(request("a@x.com", password))),
        )
        .await;
    }
    let _ = auth::login(
        Extension(state.clone()),
        Ok(Json(request("missing@x.com", "correct"))),
    )
    .await;

    auth::login(Extension(state), Ok(Json(request("a@x.com", "correct"))))
        .await
        .expect("connection available again");
}

#[test]
fn request_debug_hides_password() {
    let shown = format!("{:?}", request("a@x.com", "hunter2"));
    assert!(shown.contains("a@x.com"));
    assert!(!shown.contains("hunter2"));
}
