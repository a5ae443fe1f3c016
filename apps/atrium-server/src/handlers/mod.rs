//! Request handlers, one module per resource.

pub mod ai;
pub mod auth;
pub mod contact;
pub mod groups;
pub mod payments;

use serde::Serialize;

/// Generic `{ "message": ... }` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
