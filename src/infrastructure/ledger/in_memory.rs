use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::invoice::{Invoice, InvoiceGateway};
use crate::domain::ledger::{Balance, BalanceGateway, LedgerError, Page};
use crate::domain::transfer::{Transfer, TransferGateway};

const CURRENCY: &str = "BRL";
const DEFAULT_DUE_DAYS: i64 = 2;
const DEFAULT_EXPIRATION_SECONDS: i64 = 59 * 24 * 60 * 60;

#[derive(Default)]
struct LedgerState {
  invoices: Vec<Invoice>,
  transfers: Vec<Transfer>,
  balance: i64,
  next_id: u64,
}

impl LedgerState {
  fn next_id(&mut self) -> String {
    self.next_id += 1;
    self.next_id.to_string()
  }
}

/// A process-local ledger for development runs and tests.
///
/// Transfers are deduplicated on their external id: creating a transfer whose
/// key was already used returns the stored transfer instead of paying again.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
  state: Arc<RwLock<LedgerState>>,
}

impl InMemoryLedger {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_balance(amount: i64) -> Self {
    Self {
      state: Arc::new(RwLock::new(LedgerState {
        balance: amount,
        ..Default::default()
      })),
    }
  }

  /// Settles an invoice: marks it credited and adds the net amount to the balance.
  pub async fn credit_invoice(&self, id: &str, fee: i64) -> Result<Invoice, LedgerError> {
    let mut state = self.state.write().await;
    let invoice = state
      .invoices
      .iter_mut()
      .find(|invoice| invoice.id.as_deref() == Some(id))
      .ok_or_else(|| LedgerError::NotFound(format!("invoice/{}", id)))?;

    invoice.status = Some("credited".to_string());
    invoice.fee = Some(fee);
    let credited = invoice.clone();
    state.balance += credited.amount - fee;

    Ok(credited)
  }

  pub async fn transfers(&self) -> Vec<Transfer> {
    self.state.read().await.transfers.clone()
  }

  pub async fn invoices(&self) -> Vec<Invoice> {
    self.state.read().await.invoices.clone()
  }
}

fn page_of<T: Clone>(items: &[T], cursor: Option<String>, limit: usize) -> Result<Page<T>, LedgerError> {
  let offset = match cursor {
    Some(cursor) => cursor.parse::<usize>().map_err(|_| LedgerError::Rejected {
      status: 400,
      message: format!("invalid cursor {:?}", cursor),
    })?,
    None => 0,
  };

  let end = offset.saturating_add(limit).min(items.len());
  let start = offset.min(end);
  let cursor = (end < items.len()).then(|| end.to_string());

  Ok(Page::new(items[start..end].to_vec(), cursor))
}

#[async_trait]
impl InvoiceGateway for InMemoryLedger {
  async fn create(&self, invoices: Vec<Invoice>) -> Result<Vec<Invoice>, LedgerError> {
    let mut state = self.state.write().await;
    let now = Utc::now();

    let created: Vec<Invoice> = invoices
      .into_iter()
      .map(|mut invoice| {
        invoice.id = Some(state.next_id());
        invoice.status = Some("created".to_string());
        invoice.fee = Some(0);
        invoice.due = invoice.due.or(Some(now + Duration::days(DEFAULT_DUE_DAYS)));
        invoice.expiration = invoice.expiration.or(Some(DEFAULT_EXPIRATION_SECONDS));
        invoice.created = Some(now);
        invoice
      })
      .collect();

    state.invoices.extend(created.iter().cloned());
    Ok(created)
  }

  async fn get_by_id(&self, id: &str) -> Result<Invoice, LedgerError> {
    let state = self.state.read().await;
    state
      .invoices
      .iter()
      .find(|invoice| invoice.id.as_deref() == Some(id))
      .cloned()
      .ok_or_else(|| LedgerError::NotFound(format!("invoice/{}", id)))
  }

  async fn list_page(
    &self,
    cursor: Option<String>,
    limit: usize,
  ) -> Result<Page<Invoice>, LedgerError> {
    let state = self.state.read().await;
    page_of(&state.invoices, cursor, limit)
  }
}

#[async_trait]
impl TransferGateway for InMemoryLedger {
  async fn create(&self, transfers: Vec<Transfer>) -> Result<Vec<Transfer>, LedgerError> {
    let mut state = self.state.write().await;
    let now = Utc::now();
    let mut created = Vec::with_capacity(transfers.len());

    for mut transfer in transfers {
      if let Some(existing) = state
        .transfers
        .iter()
        .find(|t| t.external_id == transfer.external_id)
      {
        tracing::debug!(
          external_id = %existing.external_id.as_str(),
          "Transfer already exists for external id"
        );
        created.push(existing.clone());
        continue;
      }

      transfer.id = Some(state.next_id());
      transfer.status = Some("created".to_string());
      transfer.fee = Some(0);
      transfer.created = Some(now);
      state.balance -= transfer.amount;
      state.transfers.push(transfer.clone());
      created.push(transfer);
    }

    Ok(created)
  }

  async fn get_by_id(&self, id: &str) -> Result<Transfer, LedgerError> {
    let state = self.state.read().await;
    state
      .transfers
      .iter()
      .find(|transfer| transfer.id.as_deref() == Some(id))
      .cloned()
      .ok_or_else(|| LedgerError::NotFound(format!("transfer/{}", id)))
  }

  async fn list_page(
    &self,
    cursor: Option<String>,
    limit: usize,
  ) -> Result<Page<Transfer>, LedgerError> {
    let state = self.state.read().await;
    page_of(&state.transfers, cursor, limit)
  }
}

#[async_trait]
impl BalanceGateway for InMemoryLedger {
  async fn get_balance(&self) -> Result<Balance, LedgerError> {
    let state = self.state.read().await;
    Ok(Balance {
      amount: state.balance,
      currency: CURRENCY.to_string(),
      updated: Some(Utc::now()),
    })
  }
}
