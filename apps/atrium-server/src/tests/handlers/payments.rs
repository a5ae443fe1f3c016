//! Payment handler tests with a stubbed gateway.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::handlers::payments::{create_order, OrderRequest};
use crate::tests::common::{create_test_state, FailingPaymentGateway};

#[tokio::test]
async fn order_echoes_the_amount() {
    let state = create_test_state().await;

    let Json(order) = create_order(State(state), Json(OrderRequest { amount: Some(50000) }))
        .await
        .unwrap();
    assert_eq!(order.amount, 50000);
    assert_eq!(order.currency, "INR");
    assert_eq!(order.status, "created");
}

#[tokio::test]
async fn amount_must_be_positive() {
    let state = create_test_state().await;

    let err = create_order(State(state.clone()), Json(OrderRequest { amount: Some(0) }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = create_order(State(state), Json(OrderRequest { amount: None }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn gateway_failure_maps_to_bad_gateway() {
    let mut state = create_test_state().await;
    state.payments = Arc::new(FailingPaymentGateway);

    let err = create_order(State(state), Json(OrderRequest { amount: Some(100) }))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
}
