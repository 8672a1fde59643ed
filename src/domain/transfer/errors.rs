use thiserror::Error;

use crate::domain::ledger::LedgerError;

#[derive(Debug, Error)]
pub enum TransferError {
  #[error("Invalid net amount: {net} (gross {gross} - fee {fee})")]
  InvalidNetAmount { gross: i64, fee: i64, net: i64 },

  #[error("Transfer amount must be positive, got {0}")]
  InvalidAmount(i64),

  #[error("Ledger accepted the request but created no transfer")]
  NothingCreated,

  #[error(transparent)]
  Ledger(#[from] LedgerError),
}
