use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::entities::Transfer;
use crate::domain::ledger::{LedgerError, Page, collect_pages};

/// Transfer side of the ledger.
#[async_trait]
pub trait TransferGateway: Send + Sync {
  async fn create(&self, transfers: Vec<Transfer>) -> Result<Vec<Transfer>, LedgerError>;
  async fn get_by_id(&self, id: &str) -> Result<Transfer, LedgerError>;
  async fn list_page(
    &self,
    cursor: Option<String>,
    limit: usize,
  ) -> Result<Page<Transfer>, LedgerError>;

  async fn list(&self, limit: usize) -> Result<Vec<Transfer>, LedgerError> {
    collect_pages(limit, |cursor, remaining| self.list_page(cursor, remaining)).await
  }
}

/// Source of the issuance timestamp baked into idempotency keys.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}
