use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::application::webhook::{ProcessWebhookCommand, ProcessWebhookUseCase};

pub const SIGNATURE_HEADER: &str = "Digital-Signature";

/// Handler for ledger notifications
///
/// POST /webhook
/// Body: raw notification JSON, enveloped or bare
/// Response: ProcessWebhookResponse (JSON) with status 200
///
/// Failures return non-2xx so the ledger redelivers the event.
pub async fn webhook_handler(
  req: HttpRequest,
  body: web::Bytes,
  use_case: web::Data<Arc<ProcessWebhookUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let signature = req
    .headers()
    .get(SIGNATURE_HEADER)
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string());

  if signature.is_none() {
    tracing::warn!("Webhook received without {} header", SIGNATURE_HEADER);
  }

  tracing::debug!(bytes = body.len(), "Webhook received");

  let command = ProcessWebhookCommand {
    body: body.to_vec(),
    signature,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(response))
}
