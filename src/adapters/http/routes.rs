use actix_web::web;
use std::sync::Arc;

use crate::application::ledger::GetBalanceUseCase;
use crate::application::webhook::ProcessWebhookUseCase;

use super::handlers::{ServiceClock, balance_handler, health_handler, webhook_handler};

/// Everything the HTTP routes need from the wiring in `main`.
#[derive(Clone)]
pub struct RouteDependencies {
  pub process_webhook: Arc<ProcessWebhookUseCase>,
  pub get_balance: Arc<GetBalanceUseCase>,
  pub clock: ServiceClock,
}

/// Configure service routes
///
/// # Routes
///
/// - POST /webhook - Ledger notification intake
/// - GET /health - Liveness report
/// - GET /balance - Current ledger balance
///
/// Other methods on these paths answer 405.
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// # use settler::adapters::http::routes::{RouteDependencies, configure_routes};
///
/// # fn example(deps: RouteDependencies) {
/// let app = App::new().configure(|cfg| configure_routes(cfg, deps));
/// # }
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig, deps: RouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.process_webhook))
    .app_data(web::Data::new(deps.get_balance))
    .app_data(web::Data::new(deps.clock))
    .service(web::resource("/webhook").route(web::post().to(webhook_handler)))
    .service(web::resource("/health").route(web::get().to(health_handler)))
    .service(web::resource("/balance").route(web::get().to(balance_handler)));
}
