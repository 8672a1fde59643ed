use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::ledger::LedgerError;
use crate::domain::transfer::TransferError;
use crate::domain::webhook::WebhookError;

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Body could not be read as a notification (400 Bad Request)
  MalformedPayload(String),

  /// Delivery failed authentication (401 Unauthorized)
  InvalidSignature(String),

  /// Fee consumed the whole credit (422 Unprocessable Entity)
  InvalidNetAmount { gross: i64, fee: i64, net: i64 },

  /// Ledger call failed; non-2xx so the sender redelivers (502 Bad Gateway)
  Ledger(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::MalformedPayload(msg) => write!(f, "Malformed payload: {}", msg),
      ApiError::InvalidSignature(msg) => write!(f, "Invalid signature: {}", msg),
      ApiError::InvalidNetAmount { gross, fee, net } => write!(
        f,
        "Invalid net amount: {} (gross {} - fee {})",
        net, gross, fee
      ),
      ApiError::Ledger(msg) => write!(f, "Ledger error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
      ApiError::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
      ApiError::InvalidNetAmount { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Ledger(_) => StatusCode::BAD_GATEWAY,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message, details) = match self {
      ApiError::MalformedPayload(msg) => ("malformed_payload", msg.clone(), None),
      ApiError::InvalidSignature(msg) => ("invalid_signature", msg.clone(), None),
      ApiError::InvalidNetAmount { gross, fee, net } => (
        "invalid_net_amount",
        "Fee leaves nothing to transfer".to_string(),
        Some(serde_json::json!({ "gross": gross, "fee": fee, "net": net })),
      ),
      ApiError::Ledger(msg) => {
        tracing::error!("Ledger error: {}", msg);
        ("ledger_error", msg.clone(), None)
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
      details,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

impl From<LedgerError> for ApiError {
  fn from(error: LedgerError) -> Self {
    ApiError::Ledger(error.to_string())
  }
}

impl From<TransferError> for ApiError {
  fn from(error: TransferError) -> Self {
    match error {
      TransferError::InvalidNetAmount { gross, fee, net } => {
        ApiError::InvalidNetAmount { gross, fee, net }
      }
      TransferError::InvalidAmount(amount) => ApiError::InvalidNetAmount {
        gross: amount,
        fee: 0,
        net: amount,
      },
      TransferError::NothingCreated => ApiError::Ledger(error.to_string()),
      TransferError::Ledger(e) => ApiError::from(e),
    }
  }
}

impl From<WebhookError> for ApiError {
  fn from(error: WebhookError) -> Self {
    match error {
      WebhookError::InvalidJson(_) | WebhookError::MalformedPayload(_) => {
        ApiError::MalformedPayload(error.to_string())
      }
      WebhookError::InvalidSignature(msg) => ApiError::InvalidSignature(msg),
      WebhookError::Transfer(e) => ApiError::from(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::to_bytes;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::MalformedPayload("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::InvalidSignature("test".to_string()).status_code(),
      StatusCode::UNAUTHORIZED
    );
    assert_eq!(
      ApiError::InvalidNetAmount {
        gross: 100,
        fee: 100,
        net: 0
      }
      .status_code(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
      ApiError::Ledger("test".to_string()).status_code(),
      StatusCode::BAD_GATEWAY
    );
  }

  #[test]
  fn test_webhook_error_conversion() {
    let api_error: ApiError = WebhookError::MalformedPayload("missing log".to_string()).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let api_error: ApiError = WebhookError::InvalidJson(json_error).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);

    let api_error: ApiError = WebhookError::Transfer(TransferError::Ledger(
      LedgerError::Request("timeout".to_string()),
    ))
    .into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_GATEWAY);

    let api_error: ApiError = WebhookError::Transfer(TransferError::NothingCreated).into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_GATEWAY);
  }

  #[test]
  fn test_domain_errors_map_to_client_or_gateway_status() {
    let json_error = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
    let errors: Vec<ApiError> = vec![
      WebhookError::InvalidJson(json_error).into(),
      WebhookError::MalformedPayload("no invoice".to_string()).into(),
      WebhookError::InvalidSignature("bad".to_string()).into(),
      TransferError::InvalidAmount(0).into(),
      TransferError::InvalidNetAmount {
        gross: 10,
        fee: -1,
        net: 11,
      }
      .into(),
      TransferError::NothingCreated.into(),
      LedgerError::NotFound("transfer/1".to_string()).into(),
      LedgerError::Rejected {
        status: 400,
        message: "invalidAmount".to_string(),
      }
      .into(),
      LedgerError::Decode("eof".to_string()).into(),
    ];

    for error in errors {
      let status = error.status_code();
      assert!(
        status.is_client_error() || status == StatusCode::BAD_GATEWAY,
        "{} mapped to {}",
        error,
        status
      );
    }
  }

  #[actix_web::test]
  async fn test_invalid_net_amount_body() {
    let api_error: ApiError = TransferError::InvalidNetAmount {
      gross: 100,
      fee: 150,
      net: -50,
    }
    .into();

    let response = api_error.error_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = to_bytes(response.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "invalid_net_amount");
    assert_eq!(json["details"]["net"], -50);
  }
}
