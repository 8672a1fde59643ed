use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::application::ledger::GetBalanceUseCase;

/// Handler for the workspace balance
///
/// GET /balance
/// Response: BalanceResponse (JSON) with status 200, 502 if the ledger call fails
pub async fn balance_handler(
  use_case: web::Data<Arc<GetBalanceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute().await?;

  tracing::info!(
    amount = %response.formatted.amount,
    currency = %response.currency,
    "Balance fetched"
  );

  Ok(HttpResponse::Ok().json(response))
}
