//! Auth handler tests: signup and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::auth::{login, signup, LoginRequest, SignupRequest};
use crate::tests::common::create_test_state;

fn signup_request(email: &str, password: &str) -> SignupRequest {
    SignupRequest {
        name: Some("Alice".to_string()),
        email: Some(email.to_string()),
        password: Some(password.to_string()),
        role: Some("student".to_string()),
    }
}

#[tokio::test]
async fn signup_then_login() {
    let state = create_test_state().await;

    let (status, Json(created)) = signup(
        State(state.clone()),
        Json(signup_request("alice@uni.edu", "hunter2")),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.user.email, "alice@uni.edu");

    let Json(response) = login(
        State(state),
        Json(LoginRequest {
            email: Some("alice@uni.edu".to_string()),
            password: Some("hunter2".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(response.user.email, "alice@uni.edu");
    assert_eq!(response.user.role, "student");
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let state = create_test_state().await;

    signup(
        State(state.clone()),
        Json(signup_request("alice@uni.edu", "hunter2")),
    )
    .await
    .unwrap();

    let err = signup(
        State(state),
        Json(signup_request("alice@uni.edu", "other-password")),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let state = create_test_state().await;

    signup(
        State(state.clone()),
        Json(signup_request("alice@uni.edu", "hunter2")),
    )
    .await
    .unwrap();

    let err = login(
        State(state),
        Json(LoginRequest {
            email: Some("alice@uni.edu".to_string()),
            password: Some("hunter3".to_string()),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_email_is_unauthorized() {
    let state = create_test_state().await;

    let err = login(
        State(state),
        Json(LoginRequest {
            email: Some("nobody@uni.edu".to_string()),
            password: Some("hunter2".to_string()),
        }),
    )
    .await
    .unwrap_err();
    // Same status as a wrong password; the response must not reveal
    // whether the account exists.
    assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let state = create_test_state().await;

    let mut req = signup_request("alice@uni.edu", "hunter2");
    req.role = Some("dean".to_string());
    let err = signup(State(state), Json(req)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn role_defaults_to_student() {
    let state = create_test_state().await;

    let mut req = signup_request("alice@uni.edu", "hunter2");
    req.role = None;
    signup(State(state.clone()), Json(req)).await.unwrap();

    let Json(response) = login(
        State(state),
        Json(LoginRequest {
            email: Some("alice@uni.edu".to_string()),
            password: Some("hunter2".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(response.user.role, "student");
}
