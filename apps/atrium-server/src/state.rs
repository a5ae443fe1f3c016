//! Shared request state.
//!
//! Every external collaborator is injected here explicitly; there is
//! no module-level singleton anywhere in the server.

use std::sync::Arc;

use atrium_ai::TextGenerator;
use atrium_payments::PaymentGateway;
use atrium_storage::Store;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub text: Arc<dyn TextGenerator>,
    pub payments: Arc<dyn PaymentGateway>,
    pub metrics: PrometheusHandle,
}
