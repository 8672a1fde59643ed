use rand::Rng;
use rand::seq::SliceRandom;
use std::ops::RangeInclusive;
use std::sync::Arc;

use super::entities::Invoice;
use super::errors::InvoiceError;
use super::ports::InvoiceGateway;
use super::value_objects::{TaxId, ValueObjectError};
use crate::domain::ledger::format_minor_units;

/// Display names invoices are addressed to.
pub const PAYEE_ROSTER: [&str; 12] = [
  "João Silva",
  "Maria Santos",
  "Pedro Oliveira",
  "Ana Costa",
  "Carlos Souza",
  "Juliana Lima",
  "Fernando Alves",
  "Patricia Rocha",
  "Roberto Martins",
  "Camila Ferreira",
  "Lucas Pereira",
  "Fernanda Gomes",
];

/// Builds randomized invoice requests. Pure function of the random source.
pub struct InvoiceBatchGenerator;

impl InvoiceBatchGenerator {
  pub const BATCH_SIZE: RangeInclusive<usize> = 8..=12;
  /// 100.00 to 999.99 in minor units
  pub const AMOUNT: RangeInclusive<i64> = 10_000..=99_999;

  pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<Invoice>, ValueObjectError> {
    let count = rng.gen_range(Self::BATCH_SIZE);
    (0..count).map(|_| Self::generate_invoice(rng)).collect()
  }

  pub fn generate_invoice<R: Rng + ?Sized>(rng: &mut R) -> Result<Invoice, ValueObjectError> {
    let amount = rng.gen_range(Self::AMOUNT);
    let name = PAYEE_ROSTER
      .choose(rng)
      .copied()
      .unwrap_or(PAYEE_ROSTER[0]);
    let tax_id = TaxId::generate(rng);

    Invoice::request(amount, name, tax_id)
  }
}

pub struct InvoiceService {
  gateway: Arc<dyn InvoiceGateway>,
}

impl InvoiceService {
  pub fn new(gateway: Arc<dyn InvoiceGateway>) -> Self {
    Self { gateway }
  }

  /// Generates a fresh batch and submits it to the ledger in a single create call.
  ///
  /// Returns the invoices as the ledger echoed them back (id, status, fee and
  /// timestamps filled in). Gateway failures are propagated unchanged.
  pub async fn generate_random_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let batch = InvoiceBatchGenerator::generate_batch(&mut rand::thread_rng())?;
    self.submit(batch).await
  }

  pub async fn submit(&self, batch: Vec<Invoice>) -> Result<Vec<Invoice>, InvoiceError> {
    tracing::info!("Submitting {} invoices to the ledger", batch.len());
    for invoice in &batch {
      tracing::debug!(
        name = %invoice.name,
        tax_id = %invoice.tax_id,
        amount = %format_minor_units(invoice.amount),
        "Invoice request"
      );
    }

    let created = self.gateway.create(batch).await.map_err(|e| {
      tracing::error!("Failed to create invoices: {}", e);
      e
    })?;

    for invoice in &created {
      tracing::info!(
        id = invoice.id.as_deref().unwrap_or_default(),
        amount = %format_minor_units(invoice.amount),
        name = %invoice.name,
        "Invoice created"
      );
    }
    tracing::info!("{} invoices created", created.len());

    Ok(created)
  }

  pub async fn get_by_id(&self, id: &str) -> Result<Invoice, InvoiceError> {
    Ok(self.gateway.get_by_id(id).await?)
  }

  pub async fn list(&self, limit: usize) -> Result<Vec<Invoice>, InvoiceError> {
    Ok(self.gateway.list(limit).await?)
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use crate::domain::ledger::{LedgerError, Page};
  use async_trait::async_trait;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use std::sync::Mutex;

  /// Records every create call and assigns sequential ids. `stored` backs
  /// lookups and is served two at a time behind offset cursors.
  #[derive(Default)]
  pub(crate) struct RecordingInvoiceGateway {
    pub batches: Mutex<Vec<Vec<Invoice>>>,
    pub cursors: Mutex<Vec<Option<String>>>,
    pub stored: Vec<Invoice>,
    pub fail: bool,
  }

  impl RecordingInvoiceGateway {
    pub fn failing() -> Self {
      Self {
        fail: true,
        ..Default::default()
      }
    }

    pub fn with_stored(stored: Vec<Invoice>) -> Self {
      Self {
        stored,
        ..Default::default()
      }
    }

    pub fn calls(&self) -> usize {
      self.batches.lock().unwrap().len()
    }
  }

  #[async_trait]
  impl InvoiceGateway for RecordingInvoiceGateway {
    async fn create(&self, invoices: Vec<Invoice>) -> Result<Vec<Invoice>, LedgerError> {
      self.batches.lock().unwrap().push(invoices.clone());
      if self.fail {
        return Err(LedgerError::Rejected {
          status: 400,
          message: "invalid tax id".to_string(),
        });
      }
      Ok(
        invoices
          .into_iter()
          .enumerate()
          .map(|(i, mut invoice)| {
            invoice.id = Some(format!("{}", 1000 + i));
            invoice.status = Some("created".to_string());
            invoice.fee = Some(0);
            invoice
          })
          .collect(),
      )
    }

    async fn get_by_id(&self, id: &str) -> Result<Invoice, LedgerError> {
      self
        .stored
        .iter()
        .find(|invoice| invoice.id.as_deref() == Some(id))
        .cloned()
        .ok_or_else(|| LedgerError::NotFound(id.to_string()))
    }

    async fn list_page(
      &self,
      cursor: Option<String>,
      limit: usize,
    ) -> Result<Page<Invoice>, LedgerError> {
      self.cursors.lock().unwrap().push(cursor.clone());
      let start = cursor.map(|c| c.parse::<usize>().unwrap()).unwrap_or(0);
      let end = (start + limit.min(2)).min(self.stored.len());
      let next = (end < self.stored.len()).then(|| end.to_string());
      Ok(Page::new(self.stored[start..end].to_vec(), next))
    }
  }

  fn stored_invoice(id: &str, amount: i64) -> Invoice {
    let mut invoice =
      Invoice::request(amount, "Ana Costa", TaxId::new("52998224725").unwrap()).unwrap();
    invoice.id = Some(id.to_string());
    invoice.status = Some("created".to_string());
    invoice
  }

  #[test]
  fn test_generate_batch_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
      let batch = InvoiceBatchGenerator::generate_batch(&mut rng).unwrap();
      assert!(InvoiceBatchGenerator::BATCH_SIZE.contains(&batch.len()));
      for invoice in batch {
        assert!(InvoiceBatchGenerator::AMOUNT.contains(&invoice.amount));
        assert!(PAYEE_ROSTER.contains(&invoice.name.as_str()));
        assert!(TaxId::is_valid(&invoice.tax_id));
        assert!(invoice.id.is_none());
        assert!(invoice.status.is_none());
        assert!(invoice.fee.is_none());
        assert_eq!(invoice.fine, Invoice::DEFAULT_FINE_PERCENT);
        assert_eq!(invoice.interest, Invoice::DEFAULT_INTEREST_PERCENT);
      }
    }
  }

  #[test]
  fn test_generate_batch_covers_size_range() {
    let mut rng = StdRng::seed_from_u64(1);
    let sizes: std::collections::BTreeSet<usize> = (0..500)
      .map(|_| InvoiceBatchGenerator::generate_batch(&mut rng).unwrap().len())
      .collect();
    assert_eq!(sizes.into_iter().collect::<Vec<_>>(), vec![8, 9, 10, 11, 12]);
  }

  #[tokio::test]
  async fn test_generate_random_invoices_submits_one_batch() {
    let gateway = Arc::new(RecordingInvoiceGateway::default());
    let service = InvoiceService::new(gateway.clone());

    let created = service.generate_random_invoices().await.unwrap();

    assert_eq!(gateway.calls(), 1);
    assert!(InvoiceBatchGenerator::BATCH_SIZE.contains(&created.len()));
    assert!(created.iter().all(|i| i.is_created()));
    assert_eq!(created.len(), gateway.batches.lock().unwrap()[0].len());
  }

  #[tokio::test]
  async fn test_generate_random_invoices_propagates_gateway_error() {
    let gateway = Arc::new(RecordingInvoiceGateway::failing());
    let service = InvoiceService::new(gateway.clone());

    let result = service.generate_random_invoices().await;

    assert!(matches!(
      result,
      Err(InvoiceError::Ledger(LedgerError::Rejected { status: 400, .. }))
    ));
  }

  #[test]
  fn test_request_error_converts_to_validation() {
    let tax_id = TaxId::new("52998224725").unwrap();
    let error: InvoiceError = Invoice::request(0, "Ana Costa", tax_id).unwrap_err().into();

    assert!(matches!(
      error,
      InvoiceError::Validation(ValueObjectError::InvalidAmount(_))
    ));
  }

  #[tokio::test]
  async fn test_get_by_id() {
    let gateway = Arc::new(RecordingInvoiceGateway::with_stored(vec![
      stored_invoice("1", 10_000),
      stored_invoice("2", 20_000),
    ]));
    let service = InvoiceService::new(gateway);

    let invoice = service.get_by_id("2").await.unwrap();
    assert_eq!(invoice.amount, 20_000);

    let result = service.get_by_id("404").await;
    assert!(matches!(
      result,
      Err(InvoiceError::Ledger(LedgerError::NotFound(ref id))) if id == "404"
    ));
  }

  #[tokio::test]
  async fn test_list_spans_pages() {
    let stored = (1..=5).map(|i| stored_invoice(&i.to_string(), i * 1_000)).collect();
    let gateway = Arc::new(RecordingInvoiceGateway::with_stored(stored));
    let service = InvoiceService::new(gateway.clone());

    let invoices = service.list(4).await.unwrap();

    let ids: Vec<_> = invoices.iter().filter_map(|i| i.id.as_deref()).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4"]);
    assert_eq!(
      *gateway.cursors.lock().unwrap(),
      vec![None, Some("2".to_string())]
    );

    let invoices = service.list(50).await.unwrap();
    assert_eq!(invoices.len(), 5);
  }
}
