use thiserror::Error;

use crate::domain::transfer::TransferError;

#[derive(Debug, Error)]
pub enum WebhookError {
  #[error("Notification is not a JSON object: {0}")]
  InvalidJson(#[source] serde_json::Error),

  #[error("Malformed invoice notification: {0}")]
  MalformedPayload(String),

  #[error("Invalid signature: {0}")]
  InvalidSignature(String),

  #[error(transparent)]
  Transfer(#[from] TransferError),
}
