use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::TransferError;
use super::value_objects::IdempotencyKey;

/// Account every net payout is sent to. Fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationAccount {
  pub bank_code: String,
  pub branch_code: String,
  pub account_number: String,
  pub name: String,
  pub tax_id: String,
  pub account_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
  pub id: Option<String>,
  pub amount: i64,
  pub destination: DestinationAccount,
  pub description: String,
  pub external_id: IdempotencyKey,
  pub status: Option<String>,
  pub fee: Option<i64>,
  pub created: Option<DateTime<Utc>>,
}

impl Transfer {
  pub fn new(
    amount: i64,
    destination: DestinationAccount,
    description: impl Into<String>,
    external_id: IdempotencyKey,
  ) -> Result<Self, TransferError> {
    if amount <= 0 {
      return Err(TransferError::InvalidAmount(amount));
    }

    Ok(Self {
      id: None,
      amount,
      destination,
      description: description.into(),
      external_id,
      status: None,
      fee: None,
      created: None,
    })
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn destination() -> DestinationAccount {
    DestinationAccount {
      bank_code: "20018183".to_string(),
      branch_code: "0001".to_string(),
      account_number: "6341320293482496".to_string(),
      name: "Stark Bank S.A.".to_string(),
      tax_id: "20.018.183/0001-80".to_string(),
      account_type: "payment".to_string(),
    }
  }

  #[test]
  fn test_transfer_new() {
    let transfer = Transfer::new(
      900,
      destination(),
      "Invoice 5",
      IdempotencyKey::from_raw("inv-5"),
    )
    .unwrap();

    assert_eq!(transfer.amount, 900);
    assert_eq!(transfer.destination, destination());
    assert!(transfer.id.is_none());
    assert!(transfer.status.is_none());
  }

  #[test]
  fn test_transfer_rejects_non_positive_amount() {
    for amount in [0, -1] {
      let result = Transfer::new(
        amount,
        destination(),
        "Invoice 5",
        IdempotencyKey::from_raw("inv-5"),
      );
      assert!(matches!(result, Err(TransferError::InvalidAmount(a)) if a == amount));
    }
  }
}
