use chrono::{DateTime, Utc};
use serde::Serialize;

/// Liveness report
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
  pub status: String,
  pub service: String,
  pub version: String,
  /// Seconds since the process started
  pub uptime: u64,
  pub timestamp: DateTime<Utc>,
}

/// Standard error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,

  /// Optional detailed error information
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_response_omits_empty_details() {
    let response = ErrorResponse {
      error: "ledger_error".to_string(),
      message: "timeout".to_string(),
      details: None,
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["error"], "ledger_error");
    assert!(json.get("details").is_none());
  }

  #[test]
  fn test_health_response_timestamp_is_rfc3339() {
    let response = HealthResponse {
      status: "healthy".to_string(),
      service: "settler".to_string(),
      version: "0.1.0".to_string(),
      uptime: 3,
      timestamp: DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["timestamp"], "2024-03-01T12:00:00Z");
    assert_eq!(json["uptime"], 3);
  }
}
