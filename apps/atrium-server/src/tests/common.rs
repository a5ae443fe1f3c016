//! Common test helpers for handler tests.
//!
//! The store is a real in-memory SQLite database; only the external
//! services (generative text, payment gateway) are stubbed.

use std::sync::Arc;

use async_trait::async_trait;
use metrics_exporter_prometheus::PrometheusBuilder;

use atrium_ai::{AiError, TextGenerator};
use atrium_payments::{PaymentError, PaymentGateway, PaymentOrder};
use atrium_store_sqlite::SqliteStore;

use crate::state::AppState;

/// Stub generator that echoes the prompt back.
pub struct StubTextGenerator;

#[async_trait]
impl TextGenerator for StubTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        Ok(format!("generated: {}", prompt))
    }
}

/// Stub generator that always fails, for upstream-error paths.
pub struct FailingTextGenerator;

#[async_trait]
impl TextGenerator for FailingTextGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, AiError> {
        Err(AiError::Upstream("503 Service Unavailable".into()))
    }
}

/// Stub gateway that returns a created order for the requested amount.
pub struct StubPaymentGateway;

#[async_trait]
impl PaymentGateway for StubPaymentGateway {
    async fn create_order(&self, amount: i64) -> Result<PaymentOrder, PaymentError> {
        Ok(PaymentOrder {
            id: "order_test_1".into(),
            amount,
            currency: "INR".into(),
            receipt: "receipt_order_1".into(),
            status: "created".into(),
        })
    }
}

/// Stub gateway that always fails, for upstream-error paths.
pub struct FailingPaymentGateway;

#[async_trait]
impl PaymentGateway for FailingPaymentGateway {
    async fn create_order(&self, _amount: i64) -> Result<PaymentOrder, PaymentError> {
        Err(PaymentError::Gateway("401 Unauthorized".into()))
    }
}

/// Test helper: AppState over in-memory SQLite with stub upstreams.
pub async fn create_test_state() -> AppState {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    AppState {
        store,
        text: Arc::new(StubTextGenerator),
        payments: Arc::new(StubPaymentGateway),
        // A local recorder; installing the global one would collide
        // across tests.
        metrics: PrometheusBuilder::new().build_recorder().handle(),
    }
}
