//! Contact handler tests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::contact::{submit_message, ContactRequest};
use crate::tests::common::create_test_state;

#[tokio::test]
async fn submit_records_a_message() {
    let state = create_test_state().await;

    let (status, Json(body)) = submit_message(
        State(state),
        Json(ContactRequest {
            name: Some("Alice".to_string()),
            email: Some("alice@uni.edu".to_string()),
            message: Some("How do I join a group?".to_string()),
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body.message, "Message received");
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let state = create_test_state().await;

    let err = submit_message(
        State(state.clone()),
        Json(ContactRequest {
            name: Some("Alice".to_string()),
            email: Some("alice@uni.edu".to_string()),
            message: None,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = submit_message(
        State(state),
        Json(ContactRequest {
            name: None,
            email: Some("alice@uni.edu".to_string()),
            message: Some("hello".to_string()),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}
