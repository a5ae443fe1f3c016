//! Contact-form message types. Write-only audit records.

use super::MessageId;

/// Message record.
#[derive(Clone, Debug)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: String,
}

/// Parameters for recording a contact message.
#[derive(Clone, Debug)]
pub struct CreateMessageParams {
    pub name: String,
    pub email: String,
    pub message: String,
    pub timestamp: String,
}
