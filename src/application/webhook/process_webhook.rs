use serde::Serialize;
use std::sync::Arc;

use crate::domain::transfer::{IssueOutcome, SkipReason, TransferIssuer};
use crate::domain::webhook::{Classification, EventClassifier, SignatureVerifier, WebhookError};

#[derive(Debug)]
pub struct ProcessWebhookCommand {
  pub body: Vec<u8>,
  pub signature: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookStatus {
  TransferIssued,
  Skipped,
  Ignored,
}

#[derive(Debug, Serialize)]
pub struct ProcessWebhookResponse {
  pub status: WebhookStatus,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub invoice_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub transfer_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub external_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub amount: Option<i64>,
}

impl ProcessWebhookResponse {
  fn without_transfer(status: WebhookStatus, message: String, invoice_id: Option<String>) -> Self {
    Self {
      status,
      message,
      invoice_id,
      transfer_id: None,
      external_id: None,
      amount: None,
    }
  }
}

/// Verifies, classifies and settles one inbound ledger notification.
pub struct ProcessWebhookUseCase {
  verifier: Arc<dyn SignatureVerifier>,
  issuer: Arc<TransferIssuer>,
}

impl ProcessWebhookUseCase {
  pub fn new(verifier: Arc<dyn SignatureVerifier>, issuer: Arc<TransferIssuer>) -> Self {
    Self { verifier, issuer }
  }

  pub async fn execute(
    &self,
    command: ProcessWebhookCommand,
  ) -> Result<ProcessWebhookResponse, WebhookError> {
    self
      .verifier
      .verify(&command.body, command.signature.as_deref())?;

    let event = match EventClassifier::classify(&command.body)? {
      Classification::Event(event) => event,
      Classification::Ignored { subscription } => {
        tracing::debug!("Ignoring notification for subscription {:?}", subscription);
        return Ok(ProcessWebhookResponse::without_transfer(
          WebhookStatus::Ignored,
          format!("Subscription {:?} is not handled", subscription),
          None,
        ));
      }
    };

    match self.issuer.issue(&event).await? {
      IssueOutcome::Issued(transfer) => Ok(ProcessWebhookResponse {
        status: WebhookStatus::TransferIssued,
        message: "Transfer created".to_string(),
        invoice_id: Some(event.invoice_id),
        transfer_id: transfer.id,
        external_id: Some(transfer.external_id.into_inner()),
        amount: Some(transfer.amount),
      }),
      IssueOutcome::Skipped(reason) => {
        let message = match reason {
          SkipReason::NotInvoiceSubscription(subscription) => {
            format!("Subscription {:?} is not handled", subscription)
          }
          SkipReason::NotCredited(event_type) => {
            format!("Invoice event {:?} does not trigger a transfer", event_type)
          }
        };
        Ok(ProcessWebhookResponse::without_transfer(
          WebhookStatus::Skipped,
          message,
          Some(event.invoice_id),
        ))
      }
    }
  }
}
