//! JSON shapes exchanged with the ledger REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::invoice::Invoice;
use crate::domain::ledger::{Balance, Page};
use crate::domain::transfer::{DestinationAccount, IdempotencyKey, Transfer};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InvoiceRequest<'a> {
  pub amount: i64,
  pub name: &'a str,
  pub tax_id: &'a str,
  pub fine: f64,
  pub interest: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub due: Option<DateTime<Utc>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub expiration: Option<i64>,
}

impl<'a> From<&'a Invoice> for InvoiceRequest<'a> {
  fn from(invoice: &'a Invoice) -> Self {
    Self {
      amount: invoice.amount,
      name: &invoice.name,
      tax_id: &invoice.tax_id,
      fine: invoice.fine,
      interest: invoice.interest,
      due: invoice.due,
      expiration: invoice.expiration,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InvoiceRecord {
  pub id: String,
  pub amount: i64,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub tax_id: String,
  #[serde(default)]
  pub fine: f64,
  #[serde(default)]
  pub interest: f64,
  pub status: Option<String>,
  pub fee: Option<i64>,
  pub due: Option<DateTime<Utc>>,
  pub expiration: Option<i64>,
  pub created: Option<DateTime<Utc>>,
}

impl From<InvoiceRecord> for Invoice {
  fn from(record: InvoiceRecord) -> Self {
    Invoice {
      id: Some(record.id),
      amount: record.amount,
      name: record.name,
      tax_id: record.tax_id,
      fine: record.fine,
      interest: record.interest,
      status: record.status,
      fee: record.fee,
      due: record.due,
      expiration: record.expiration,
      created: record.created,
    }
  }
}

#[derive(Debug, Serialize)]
pub(super) struct InvoicesRequest<'a> {
  pub invoices: Vec<InvoiceRequest<'a>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct InvoicesResponse {
  #[serde(default)]
  pub cursor: Option<String>,
  #[serde(default)]
  pub invoices: Vec<InvoiceRecord>,
}

impl From<InvoicesResponse> for Page<Invoice> {
  fn from(response: InvoicesResponse) -> Self {
    Page::new(
      response.invoices.into_iter().map(Invoice::from).collect(),
      next_cursor(response.cursor),
    )
  }
}

#[derive(Debug, Deserialize)]
pub(super) struct InvoiceResponse {
  pub invoice: InvoiceRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransferRequest<'a> {
  pub amount: i64,
  pub bank_code: &'a str,
  pub branch_code: &'a str,
  pub account_number: &'a str,
  pub name: &'a str,
  pub tax_id: &'a str,
  pub account_type: &'a str,
  pub external_id: &'a str,
  pub description: &'a str,
}

impl<'a> From<&'a Transfer> for TransferRequest<'a> {
  fn from(transfer: &'a Transfer) -> Self {
    let destination = &transfer.destination;
    Self {
      amount: transfer.amount,
      bank_code: &destination.bank_code,
      branch_code: &destination.branch_code,
      account_number: &destination.account_number,
      name: &destination.name,
      tax_id: &destination.tax_id,
      account_type: &destination.account_type,
      external_id: transfer.external_id.as_str(),
      description: &transfer.description,
    }
  }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TransferRecord {
  pub id: String,
  pub amount: i64,
  #[serde(default)]
  pub bank_code: String,
  #[serde(default)]
  pub branch_code: String,
  #[serde(default)]
  pub account_number: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub tax_id: String,
  #[serde(default)]
  pub account_type: String,
  #[serde(default)]
  pub external_id: String,
  #[serde(default)]
  pub description: String,
  pub status: Option<String>,
  pub fee: Option<i64>,
  pub created: Option<DateTime<Utc>>,
}

impl From<TransferRecord> for Transfer {
  fn from(record: TransferRecord) -> Self {
    Transfer {
      id: Some(record.id),
      amount: record.amount,
      destination: DestinationAccount {
        bank_code: record.bank_code,
        branch_code: record.branch_code,
        account_number: record.account_number,
        name: record.name,
        tax_id: record.tax_id,
        account_type: record.account_type,
      },
      description: record.description,
      external_id: IdempotencyKey::from_raw(record.external_id),
      status: record.status,
      fee: record.fee,
      created: record.created,
    }
  }
}

#[derive(Debug, Serialize)]
pub(super) struct TransfersRequest<'a> {
  pub transfers: Vec<TransferRequest<'a>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TransfersResponse {
  #[serde(default)]
  pub cursor: Option<String>,
  #[serde(default)]
  pub transfers: Vec<TransferRecord>,
}

impl From<TransfersResponse> for Page<Transfer> {
  fn from(response: TransfersResponse) -> Self {
    Page::new(
      response.transfers.into_iter().map(Transfer::from).collect(),
      next_cursor(response.cursor),
    )
  }
}

#[derive(Debug, Deserialize)]
pub(super) struct TransferResponse {
  pub transfer: TransferRecord,
}

#[derive(Debug, Deserialize)]
pub(super) struct BalanceRecord {
  pub amount: i64,
  pub currency: String,
  pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct BalancesResponse {
  #[serde(default)]
  pub balances: Vec<BalanceRecord>,
}

impl From<BalanceRecord> for Balance {
  fn from(record: BalanceRecord) -> Self {
    Balance {
      amount: record.amount,
      currency: record.currency,
      updated: record.updated,
    }
  }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
  errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
  #[serde(default)]
  code: String,
  #[serde(default)]
  message: String,
}

/// Flattens a ledger error body into one line, falling back to the raw text.
pub(super) fn error_message(body: &str) -> String {
  match serde_json::from_str::<ErrorBody>(body) {
    Ok(parsed) if !parsed.errors.is_empty() => parsed
      .errors
      .iter()
      .map(|e| format!("{}: {}", e.code, e.message))
      .collect::<Vec<_>>()
      .join("; "),
    _ => body.trim().to_string(),
  }
}

// The ledger signals the last page with a missing or empty cursor
fn next_cursor(cursor: Option<String>) -> Option<String> {
  cursor.filter(|c| !c.is_empty())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::TaxId;
  use crate::domain::transfer::entities::tests::destination;

  #[test]
  fn test_invoice_request_uses_camel_case() {
    let invoice =
      Invoice::request(12345, "Ada Lovelace", TaxId::new("52998224725").unwrap()).unwrap();

    let json = serde_json::to_value(InvoicesRequest {
      invoices: vec![InvoiceRequest::from(&invoice)],
    })
    .unwrap();

    let sent = &json["invoices"][0];
    assert_eq!(sent["amount"], 12345);
    assert_eq!(sent["taxId"], "52998224725");
    assert_eq!(sent["fine"], 2.5);
    assert_eq!(sent["interest"], 1.3);
    assert!(sent.get("due").is_none());
    assert!(sent.get("id").is_none());
  }

  #[test]
  fn test_transfer_request_flattens_destination() {
    let transfer = Transfer::new(
      900,
      destination(),
      "Transfer for invoice 5",
      IdempotencyKey::from_raw("inv-5-1700000000"),
    )
    .unwrap();

    let json = serde_json::to_value(TransferRequest::from(&transfer)).unwrap();

    assert_eq!(json["amount"], 900);
    assert_eq!(json["bankCode"], "20018183");
    assert_eq!(json["branchCode"], "0001");
    assert_eq!(json["accountNumber"], "6341320293482496");
    assert_eq!(json["taxId"], "20.018.183/0001-80");
    assert_eq!(json["accountType"], "payment");
    assert_eq!(json["externalId"], "inv-5-1700000000");
  }

  #[test]
  fn test_invoice_page_from_response() {
    let response: InvoicesResponse = serde_json::from_str(
      r#"{
        "cursor": "",
        "invoices": [{
          "id": "5155165527080960",
          "amount": 400000,
          "name": "Arya Stark",
          "taxId": "012.345.678-90",
          "fine": 2.5,
          "interest": 1.3,
          "status": "created",
          "fee": 0,
          "due": "2024-05-01T12:00:00+00:00",
          "expiration": 5097600,
          "created": "2024-04-29T12:00:00.123456+00:00"
        }]
      }"#,
    )
    .unwrap();

    let page = Page::<Invoice>::from(response);

    assert!(!page.has_more());
    assert_eq!(page.items.len(), 1);
    let invoice = &page.items[0];
    assert_eq!(invoice.id.as_deref(), Some("5155165527080960"));
    assert_eq!(invoice.status.as_deref(), Some("created"));
    assert_eq!(invoice.expiration, Some(5_097_600));
    assert!(invoice.created.is_some());
  }

  #[test]
  fn test_transfer_page_keeps_cursor() {
    let response: TransfersResponse = serde_json::from_str(
      r#"{"cursor":"abc","transfers":[{"id":"1","amount":900,"externalId":"inv-5-1","status":"processing"}]}"#,
    )
    .unwrap();

    let page = Page::<Transfer>::from(response);

    assert_eq!(page.cursor.as_deref(), Some("abc"));
    assert_eq!(page.items[0].external_id.as_str(), "inv-5-1");
  }

  #[test]
  fn test_error_message() {
    assert_eq!(
      error_message(r#"{"errors":[{"code":"invalidAmount","message":"Amount must be positive"}]}"#),
      "invalidAmount: Amount must be positive"
    );
    assert_eq!(error_message(" upstream timeout \n"), "upstream timeout");
  }
}
