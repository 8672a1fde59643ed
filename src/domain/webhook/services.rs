use super::entities::{Classification, INVOICE_SUBSCRIPTION, WebhookEvent};
use super::errors::WebhookError;
use super::payload::NotificationPayload;

/// Normalizes raw ledger notifications into typed events.
pub struct EventClassifier;

impl EventClassifier {
  pub fn classify(raw: &[u8]) -> Result<Classification, WebhookError> {
    let payload: NotificationPayload =
      serde_json::from_slice(raw).map_err(WebhookError::InvalidJson)?;

    match &payload {
      NotificationPayload::Envelope(_) => tracing::debug!("Notification wrapped in event envelope"),
      NotificationPayload::Bare(_) => tracing::debug!("Bare notification"),
    }

    Self::classify_payload(payload)
  }

  /// Extraction order: subscription, log record, event type, invoice record,
  /// invoice fields. Only an `invoice` subscription is parsed past the first step.
  pub fn classify_payload(payload: NotificationPayload) -> Result<Classification, WebhookError> {
    let body = payload.into_body();

    if body.subscription != INVOICE_SUBSCRIPTION {
      tracing::info!(
        subscription = %body.subscription,
        "Ignoring notification for non-invoice subscription"
      );
      return Ok(Classification::Ignored {
        subscription: body.subscription,
      });
    }

    let log = body.log.ok_or_else(|| {
      WebhookError::MalformedPayload("missing or invalid 'log' record".to_string())
    })?;

    let invoice = log.invoice.ok_or_else(|| {
      WebhookError::MalformedPayload("missing or invalid 'invoice' record in log".to_string())
    })?;

    let event = WebhookEvent {
      subscription: body.subscription,
      event_type: log.event_type,
      invoice_id: invoice.id,
      amount: invoice.amount,
      fee: invoice.fee,
      status: invoice.status,
    };

    tracing::info!(
      invoice_id = %event.invoice_id,
      event_type = %event.event_type,
      status = %event.status,
      amount = event.amount,
      fee = event.fee,
      "Invoice notification classified"
    );

    Ok(Classification::Event(event))
  }
}
