use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the idempotency key of an outbound transfer is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdempotencyStrategy {
  /// `inv-{invoice}-{unix seconds}`: unique per issuance attempt. Redeliveries
  /// landing in different seconds produce different keys.
  #[default]
  PerAttempt,
  /// `inv-{invoice}`: one transfer per invoice, ever.
  PerInvoice,
}

/// Caller-supplied token the ledger uses to deduplicate transfer creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
  pub fn for_credit(
    strategy: IdempotencyStrategy,
    invoice_id: &str,
    issued_at: DateTime<Utc>,
  ) -> Self {
    match strategy {
      IdempotencyStrategy::PerAttempt => {
        Self(format!("inv-{}-{}", invoice_id, issued_at.timestamp()))
      }
      IdempotencyStrategy::PerInvoice => Self(format!("inv-{}", invoice_id)),
    }
  }

  pub fn from_raw(value: impl Into<String>) -> Self {
    Self(value.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for IdempotencyKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_per_attempt_key_uses_second_resolution() {
    let at = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
    let key = IdempotencyKey::for_credit(IdempotencyStrategy::PerAttempt, "5", at);
    assert_eq!(key.as_str(), "inv-5-1700000000");

    let same_second = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    assert_eq!(
      key,
      IdempotencyKey::for_credit(IdempotencyStrategy::PerAttempt, "5", same_second)
    );

    let next_second = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
    assert_ne!(
      key,
      IdempotencyKey::for_credit(IdempotencyStrategy::PerAttempt, "5", next_second)
    );
  }

  #[test]
  fn test_per_invoice_key_ignores_time() {
    let first = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let later = Utc.timestamp_opt(1_700_086_400, 0).unwrap();
    let a = IdempotencyKey::for_credit(IdempotencyStrategy::PerInvoice, "5", first);
    let b = IdempotencyKey::for_credit(IdempotencyStrategy::PerInvoice, "5", later);
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "inv-5");
  }

  #[test]
  fn test_strategy_deserializes_snake_case() {
    let strategy: IdempotencyStrategy = serde_json::from_str("\"per_invoice\"").unwrap();
    assert_eq!(strategy, IdempotencyStrategy::PerInvoice);
    assert_eq!(IdempotencyStrategy::default(), IdempotencyStrategy::PerAttempt);
  }
}
