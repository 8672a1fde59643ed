use super::errors::WebhookError;

/// Authenticates an inbound delivery before it is parsed.
pub trait SignatureVerifier: Send + Sync {
  fn verify(&self, body: &[u8], signature: Option<&str>) -> Result<(), WebhookError>;
}
