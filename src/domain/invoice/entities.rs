use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{TaxId, ValueObjectError};

/// Invoice issued against the ledger.
///
/// Requests built locally carry only amount, payee and penalty terms. The
/// identifier, status, fee and timestamps are assigned by the ledger and are
/// `None` until the create call returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: Option<String>,
  pub amount: i64,
  pub name: String,
  pub tax_id: String,
  /// Late-payment fine, percent
  pub fine: f64,
  /// Monthly interest, percent
  pub interest: f64,
  pub status: Option<String>,
  pub fee: Option<i64>,
  pub due: Option<DateTime<Utc>>,
  /// Seconds after `due` before the invoice expires
  pub expiration: Option<i64>,
  pub created: Option<DateTime<Utc>>,
}

impl Invoice {
  pub const DEFAULT_FINE_PERCENT: f64 = 2.5;
  pub const DEFAULT_INTEREST_PERCENT: f64 = 1.3;

  pub fn request(
    amount: i64,
    name: impl Into<String>,
    tax_id: TaxId,
  ) -> Result<Self, ValueObjectError> {
    if amount <= 0 {
      return Err(ValueObjectError::InvalidAmount(format!(
        "Invoice amount must be positive, got {}",
        amount
      )));
    }

    Ok(Self {
      id: None,
      amount,
      name: name.into(),
      tax_id: tax_id.into_inner(),
      fine: Self::DEFAULT_FINE_PERCENT,
      interest: Self::DEFAULT_INTEREST_PERCENT,
      status: None,
      fee: None,
      due: None,
      expiration: None,
      created: None,
    })
  }

  pub fn is_created(&self) -> bool {
    self.id.is_some()
  }
}
