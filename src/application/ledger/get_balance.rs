use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::domain::ledger::{BalanceGateway, LedgerError, format_minor_units};

#[derive(Debug, Serialize)]
pub struct FormattedBalance {
  pub amount: String,
  pub currency: String,
  pub updated: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
  pub amount: i64,
  pub currency: String,
  pub updated: Option<DateTime<Utc>>,
  pub formatted: FormattedBalance,
}

/// Reads the workspace balance from the ledger.
pub struct GetBalanceUseCase {
  gateway: Arc<dyn BalanceGateway>,
}

impl GetBalanceUseCase {
  pub fn new(gateway: Arc<dyn BalanceGateway>) -> Self {
    Self { gateway }
  }

  pub async fn execute(&self) -> Result<BalanceResponse, LedgerError> {
    let balance = self.gateway.get_balance().await?;

    Ok(BalanceResponse {
      amount: balance.amount,
      currency: balance.currency.clone(),
      updated: balance.updated,
      formatted: FormattedBalance {
        amount: format_minor_units(balance.amount),
        currency: balance.currency,
        updated: balance
          .updated
          .map(|updated| updated.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
      },
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ledger::Balance;
  use async_trait::async_trait;
  use chrono::TimeZone;

  struct FixedBalance(Option<Balance>);

  #[async_trait]
  impl BalanceGateway for FixedBalance {
    async fn get_balance(&self) -> Result<Balance, LedgerError> {
      self
        .0
        .clone()
        .ok_or_else(|| LedgerError::Request("timed out".to_string()))
    }
  }

  #[tokio::test]
  async fn test_get_balance_formats_amount() {
    let use_case = GetBalanceUseCase::new(Arc::new(FixedBalance(Some(Balance {
      amount: 1_234_567,
      currency: "BRL".to_string(),
      updated: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
    }))));

    let response = use_case.execute().await.unwrap();

    assert_eq!(response.amount, 1_234_567);
    assert_eq!(response.formatted.amount, "12345.67");
    assert_eq!(response.formatted.currency, "BRL");
    assert_eq!(
      response.formatted.updated.as_deref(),
      Some("2024-03-01 12:30:00 UTC")
    );
  }

  #[tokio::test]
  async fn test_get_balance_propagates_ledger_error() {
    let use_case = GetBalanceUseCase::new(Arc::new(FixedBalance(None)));

    let result = use_case.execute().await;

    assert!(matches!(result, Err(LedgerError::Request(_))));
  }
}
