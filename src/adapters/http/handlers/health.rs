use actix_web::{HttpResponse, web};
use chrono::Utc;
use std::time::Instant;

use crate::adapters::http::dtos::HealthResponse;

/// Process start time, shared with the health endpoint.
#[derive(Debug, Clone, Copy)]
pub struct ServiceClock {
  started_at: Instant,
}

impl ServiceClock {
  pub fn start() -> Self {
    Self {
      started_at: Instant::now(),
    }
  }

  pub fn uptime_seconds(&self) -> u64 {
    self.started_at.elapsed().as_secs()
  }
}

/// GET /health
pub async fn health_handler(clock: web::Data<ServiceClock>) -> HttpResponse {
  HttpResponse::Ok().json(HealthResponse {
    status: "healthy".to_string(),
    service: env!("CARGO_PKG_NAME").to_string(),
    version: env!("CARGO_PKG_VERSION").to_string(),
    uptime: clock.uptime_seconds(),
    timestamp: Utc::now(),
  })
}
