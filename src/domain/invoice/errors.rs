use thiserror::Error;

use super::value_objects::ValueObjectError;
use crate::domain::ledger::LedgerError;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error(transparent)]
  Ledger(#[from] LedgerError),
}
