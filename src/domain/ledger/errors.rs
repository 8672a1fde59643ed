use thiserror::Error;

/// Failures reported by the remote ledger or by the transport in front of it.
///
/// These are surfaced verbatim: nothing in the crate retries a failed call.
#[derive(Debug, Error)]
pub enum LedgerError {
  #[error("Ledger request failed: {0}")]
  Request(String),

  #[error("Ledger rejected the request ({status}): {message}")]
  Rejected { status: u16, message: String },

  #[error("Ledger resource not found: {0}")]
  NotFound(String),

  #[error("Unexpected ledger response: {0}")]
  Decode(String),
}

impl LedgerError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, LedgerError::NotFound(_))
  }
}
