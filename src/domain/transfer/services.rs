use std::sync::Arc;

use super::entities::{DestinationAccount, Transfer};
use super::errors::TransferError;
use super::ports::{Clock, TransferGateway};
use super::value_objects::{IdempotencyKey, IdempotencyStrategy};
use crate::domain::ledger::format_minor_units;
use crate::domain::webhook::entities::{CREDITED_EVENT, INVOICE_SUBSCRIPTION, WebhookEvent};

/// Result of offering an event to the issuer.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueOutcome {
  Issued(Transfer),
  Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
  NotInvoiceSubscription(String),
  /// Any invoice lifecycle step other than `credited`, including `paid`
  NotCredited(String),
}

/// Turns invoice credit events into net payouts to the fixed destination account.
pub struct TransferIssuer {
  gateway: Arc<dyn TransferGateway>,
  destination: DestinationAccount,
  strategy: IdempotencyStrategy,
  clock: Arc<dyn Clock>,
}

impl TransferIssuer {
  pub fn new(
    gateway: Arc<dyn TransferGateway>,
    destination: DestinationAccount,
    strategy: IdempotencyStrategy,
    clock: Arc<dyn Clock>,
  ) -> Self {
    Self {
      gateway,
      destination,
      strategy,
      clock,
    }
  }

  pub fn destination(&self) -> &DestinationAccount {
    &self.destination
  }

  /// Issues exactly one transfer for a `credited` invoice event and skips everything else.
  ///
  /// `paid` precedes `credited` for the same invoice; acting on both would pay twice.
  pub async fn issue(&self, event: &WebhookEvent) -> Result<IssueOutcome, TransferError> {
    if event.subscription != INVOICE_SUBSCRIPTION {
      tracing::debug!("Skipping event for subscription {}", event.subscription);
      return Ok(IssueOutcome::Skipped(SkipReason::NotInvoiceSubscription(
        event.subscription.clone(),
      )));
    }

    if event.event_type != CREDITED_EVENT {
      tracing::info!(
        invoice_id = %event.invoice_id,
        event_type = %event.event_type,
        "Invoice not credited yet, waiting for credited event"
      );
      return Ok(IssueOutcome::Skipped(SkipReason::NotCredited(
        event.event_type.clone(),
      )));
    }

    tracing::info!(
      invoice_id = %event.invoice_id,
      amount = %format_minor_units(event.amount),
      fee = %format_minor_units(event.fee),
      "Invoice credited"
    );

    self
      .create_from_invoice_credit(&event.invoice_id, event.amount, event.fee)
      .await
      .map(IssueOutcome::Issued)
  }

  pub async fn create_from_invoice_credit(
    &self,
    invoice_id: &str,
    gross: i64,
    fee: i64,
  ) -> Result<Transfer, TransferError> {
    let net = gross.saturating_sub(fee);
    if fee < 0 || net <= 0 {
      return Err(TransferError::InvalidNetAmount { gross, fee, net });
    }

    let external_id = IdempotencyKey::for_credit(self.strategy, invoice_id, self.clock.now());

    tracing::info!(
      invoice_id,
      net = %format_minor_units(net),
      gross = %format_minor_units(gross),
      fee = %format_minor_units(fee),
      external_id = %external_id,
      "Issuing transfer"
    );

    let transfer = Transfer::new(
      net,
      self.destination.clone(),
      format!("Transfer for invoice {}", invoice_id),
      external_id,
    )?;

    let created = self.gateway.create(vec![transfer]).await.map_err(|e| {
      tracing::error!(invoice_id, "Failed to create transfer: {}", e);
      e
    })?;

    let transfer = created
      .into_iter()
      .next()
      .ok_or(TransferError::NothingCreated)?;

    tracing::info!(
      id = transfer.id.as_deref().unwrap_or_default(),
      amount = %format_minor_units(transfer.amount),
      status = transfer.status.as_deref().unwrap_or_default(),
      recipient = %transfer.destination.name,
      invoice_id,
      "Transfer created"
    );

    Ok(transfer)
  }

  pub async fn get_by_id(&self, id: &str) -> Result<Transfer, TransferError> {
    Ok(self.gateway.get_by_id(id).await?)
  }

  pub async fn list(&self, limit: usize) -> Result<Vec<Transfer>, TransferError> {
    Ok(self.gateway.list(limit).await?)
  }
}
