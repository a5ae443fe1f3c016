//! Generative-text handler tests with a stubbed generator.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::ai::{summarize, title_generate, SummarizeRequest, TitleRequest};
use crate::tests::common::{create_test_state, FailingTextGenerator};

#[tokio::test]
async fn summarize_passes_text_through_the_prompt() {
    let state = create_test_state().await;

    let Json(response) = summarize(
        State(state),
        Json(SummarizeRequest {
            text: Some("dark matter halo profiles".to_string()),
        }),
    )
    .await
    .unwrap();
    assert!(response.summary.contains("dark matter halo profiles"));
}

#[tokio::test]
async fn summarize_requires_text() {
    let state = create_test_state().await;

    let err = summarize(State(state), Json(SummarizeRequest { text: None }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn title_generate_embeds_both_inputs() {
    let state = create_test_state().await;

    let Json(response) = title_generate(
        State(state),
        Json(TitleRequest {
            keywords: Some("gravity, lensing".to_string()),
            description: Some("a weak-lensing survey".to_string()),
        }),
    )
    .await
    .unwrap();
    assert!(response.text.contains("gravity, lensing"));
    assert!(response.text.contains("a weak-lensing survey"));
}

#[tokio::test]
async fn title_generate_requires_both_inputs() {
    let state = create_test_state().await;

    let err = title_generate(
        State(state),
        Json(TitleRequest {
            keywords: Some("gravity".to_string()),
            description: None,
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let mut state = create_test_state().await;
    state.text = Arc::new(FailingTextGenerator);

    let err = summarize(
        State(state),
        Json(SummarizeRequest {
            text: Some("anything".to_string()),
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    // The upstream detail is logged, not echoed.
    assert_eq!(err.to_string(), "upstream service failed");
}
