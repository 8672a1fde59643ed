use crate::domain::webhook::{SignatureVerifier, WebhookError};

/// Accepts every delivery without checking the `Digital-Signature` header.
///
/// The ledger signs notifications with ECDSA over the raw body; checking that
/// signature needs the ledger's public key, which this service does not fetch.
/// Deploy behind a network boundary that only the ledger can reach.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllSignatureVerifier;

impl SignatureVerifier for AcceptAllSignatureVerifier {
  fn verify(&self, _body: &[u8], signature: Option<&str>) -> Result<(), WebhookError> {
    if signature.is_none() {
      tracing::debug!("Notification arrived without a signature header");
    }
    Ok(())
  }
}
