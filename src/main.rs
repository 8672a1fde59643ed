use actix_web::{App, HttpServer, middleware::Logger};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use settler::{
  adapters::http::{RequestIdMiddleware, RouteDependencies, configure_routes, handlers::ServiceClock},
  application::invoice::InvoiceScheduler,
  application::ledger::GetBalanceUseCase,
  application::webhook::ProcessWebhookUseCase,
  domain::invoice::{InvoiceGateway, InvoiceService},
  domain::ledger::BalanceGateway,
  domain::transfer::{SystemClock, TransferGateway, TransferIssuer},
  infrastructure::{
    config::{Config, LedgerConfig, LedgerMode},
    ledger::{HttpLedgerGateway, InMemoryLedger},
    security::AcceptAllSignatureVerifier,
  },
};

/// The three ledger ports, backed by one client.
struct LedgerPorts {
  invoices: Arc<dyn InvoiceGateway>,
  transfers: Arc<dyn TransferGateway>,
  balance: Arc<dyn BalanceGateway>,
}

fn ledger_ports(config: &LedgerConfig) -> anyhow::Result<LedgerPorts> {
  match config.mode {
    LedgerMode::Http => {
      let gateway =
        Arc::new(HttpLedgerGateway::new(config).context("Failed to build ledger HTTP client")?);
      Ok(LedgerPorts {
        invoices: gateway.clone(),
        transfers: gateway.clone(),
        balance: gateway,
      })
    }
    LedgerMode::InMemory => {
      tracing::warn!("Using in-memory ledger, nothing reaches the bank");
      let ledger = Arc::new(InMemoryLedger::new());
      Ok(LedgerPorts {
        invoices: ledger.clone(),
        transfers: ledger.clone(),
        balance: ledger,
      })
    }
  }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "settler=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting settler");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!(
    ledger_mode = ?config.ledger.mode,
    idempotency = ?config.transfer.idempotency,
    "Configuration loaded successfully"
  );

  let ports = ledger_ports(&config.ledger)?;

  // Domain services
  let invoice_service = Arc::new(InvoiceService::new(ports.invoices));
  let issuer = Arc::new(TransferIssuer::new(
    ports.transfers,
    config.destination.clone().into(),
    config.transfer.idempotency,
    Arc::new(SystemClock),
  ));

  // Use cases
  let process_webhook = Arc::new(ProcessWebhookUseCase::new(
    Arc::new(AcceptAllSignatureVerifier),
    issuer,
  ));
  let get_balance = Arc::new(GetBalanceUseCase::new(ports.balance));

  let scheduler = InvoiceScheduler::new(invoice_service).start();

  let deps = RouteDependencies {
    process_webhook,
    get_balance,
    clock: ServiceClock::start(),
  };

  let bind_address = (config.server.host.clone(), config.server.port);
  tracing::info!(
    "Starting HTTP server on {}:{}",
    config.server.host,
    config.server.port
  );

  // Ctrl-C and SIGTERM make the server drain and return
  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .configure(|cfg| configure_routes(cfg, deps))
  })
  .client_request_timeout(Duration::from_secs(15))
  .keep_alive(Duration::from_secs(60))
  .shutdown_timeout(15)
  .bind(bind_address)
  .context("Failed to bind HTTP server")?
  .run()
  .await
  .context("HTTP server failed")?;

  tracing::info!("HTTP server stopped, stopping invoice scheduler");
  scheduler.stop();
  let reason = scheduler
    .wait()
    .await
    .context("Invoice scheduler task failed")?;
  tracing::info!(?reason, "Shutdown complete");

  Ok(())
}
