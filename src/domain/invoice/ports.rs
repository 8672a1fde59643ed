use async_trait::async_trait;

use super::entities::Invoice;
use crate::domain::ledger::{LedgerError, Page, collect_pages};

/// Invoice side of the ledger.
#[async_trait]
pub trait InvoiceGateway: Send + Sync {
  async fn create(&self, invoices: Vec<Invoice>) -> Result<Vec<Invoice>, LedgerError>;
  async fn get_by_id(&self, id: &str) -> Result<Invoice, LedgerError>;
  async fn list_page(
    &self,
    cursor: Option<String>,
    limit: usize,
  ) -> Result<Page<Invoice>, LedgerError>;

  /// Drains pages from the start until `limit` invoices are collected or the ledger runs out.
  async fn list(&self, limit: usize) -> Result<Vec<Invoice>, LedgerError> {
    collect_pages(limit, |cursor, remaining| self.list_page(cursor, remaining)).await
  }
}
