//! Server configuration from environment variables.
//!
//! ```bash
//! # Storage (defaults to ~/.atrium/store.db)
//! DATABASE_URL=sqlite:///var/lib/atrium/store.db
//!
//! # Generative-text service (required)
//! GOOGLE_API_KEY=AIza...
//! ATRIUM_AI_MODEL=gemini-1.5-flash
//!
//! # Payment gateway (required)
//! RAZORPAY_KEY_ID=rzp_live_...
//! RAZORPAY_KEY_SECRET=...
//! ```

use std::env;

use atrium_ai::AiConfig;
use atrium_payments::{PaymentError, PaymentsConfig};
use thiserror::Error;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub ai: AiConfig,
    pub payments: PaymentsConfig,
}

/// Configuration errors. Any of these halts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Payment gateway configuration: {0}")]
    Payments(#[from] PaymentError),
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("GOOGLE_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GOOGLE_API_KEY".to_string()))?;
        let model =
            env::var("ATRIUM_AI_MODEL").unwrap_or_else(|_| AiConfig::DEFAULT_MODEL.to_string());

        let payments = PaymentsConfig::from_env()?;

        Ok(Self {
            ai: AiConfig { api_key, model },
            payments,
        })
    }
}
