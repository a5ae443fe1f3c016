//! Payment-order client for atrium.
//!
//! Amount-in, order-out contract with the payment gateway. The server
//! depends on the [`PaymentGateway`] trait; the Razorpay client is the
//! production implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Payment service errors.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("gateway error: {0}")]
    Gateway(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// A created payment order, as returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub status: String,
}

/// Amount-in, order-out contract with the payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment order for the given amount (smallest currency
    /// unit).
    async fn create_order(&self, amount: i64) -> Result<PaymentOrder, PaymentError>;
}

/// Configuration for the Razorpay gateway.
#[derive(Clone, Debug)]
pub struct PaymentsConfig {
    pub key_id: String,
    pub key_secret: String,
}

impl PaymentsConfig {
    /// Load gateway credentials from environment variables. Both keys
    /// are required; the process should not start without them.
    pub fn from_env() -> Result<Self, PaymentError> {
        Ok(Self {
            key_id: std::env::var("RAZORPAY_KEY_ID")
                .map_err(|_| PaymentError::Config("RAZORPAY_KEY_ID not set".into()))?,
            key_secret: std::env::var("RAZORPAY_KEY_SECRET")
                .map_err(|_| PaymentError::Config("RAZORPAY_KEY_SECRET not set".into()))?,
        })
    }

    /// Create a test configuration (for development/testing).
    pub fn test() -> Self {
        Self {
            key_id: "rzp_test_key".into(),
            key_secret: "rzp_test_secret".into(),
        }
    }
}

const API_BASE: &str = "https://api.razorpay.com/v1";

/// Razorpay REST client.
pub struct RazorpayClient {
    http: reqwest::Client,
    config: PaymentsConfig,
}

impl RazorpayClient {
    pub fn new(config: PaymentsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, amount: i64) -> Result<PaymentOrder, PaymentError> {
        let body = json!({
            "amount": amount,
            "currency": "INR",
            "receipt": "receipt_order_1",
            "payment_capture": 1,
        });

        let response = self
            .http
            .post(format!("{}/orders", API_BASE))
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(PaymentError::Gateway(format!("{}: {}", status, detail)));
        }

        Ok(response.json().await?)
    }
}
