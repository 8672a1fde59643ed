use serde::Serialize;

pub const INVOICE_SUBSCRIPTION: &str = "invoice";
pub const CREDITED_EVENT: &str = "credited";

/// Inbound ledger notification reduced to the fields settlement needs.
/// Amounts are minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookEvent {
  pub subscription: String,
  pub event_type: String,
  pub invoice_id: String,
  pub amount: i64,
  pub fee: i64,
  pub status: String,
}

impl WebhookEvent {
  pub fn is_invoice_credit(&self) -> bool {
    self.subscription == INVOICE_SUBSCRIPTION && self.event_type == CREDITED_EVENT
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
  Event(WebhookEvent),
  /// Subscription other than `invoice`. Frequent and not an error.
  Ignored { subscription: String },
}
