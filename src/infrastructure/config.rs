use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;
use validator::Validate;

use crate::domain::transfer::{DestinationAccount, IdempotencyStrategy};

fn default_ledger_timeout() -> u64 {
  15
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub ledger: LedgerConfig,
  pub destination: DestinationConfig,
  #[serde(default)]
  pub transfer: TransferConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

/// Which ledger backend the service talks to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerMode {
  #[default]
  Http,
  /// Process-local ledger for development and demos
  InMemory,
}

/// Ledger connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
  #[serde(default)]
  pub mode: LedgerMode,
  pub base_url: String,
  pub project_id: String,
  pub environment: String,
  /// Bearer credential for the ledger API, when it expects one
  #[serde(default)]
  pub api_token: Option<String>,
  #[serde(default = "default_ledger_timeout")]
  pub timeout_seconds: u64,
}

impl LedgerConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_seconds)
  }
}

/// Account receiving every net transfer
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DestinationConfig {
  #[validate(length(min = 1, max = 20, message = "Bank code is required"))]
  pub bank_code: String,

  #[validate(length(min = 1, max = 10, message = "Branch code is required"))]
  pub branch_code: String,

  #[validate(length(min = 1, max = 30, message = "Account number is required"))]
  pub account_number: String,

  #[validate(length(min = 1, max = 255, message = "Account holder name is required"))]
  pub name: String,

  #[validate(length(min = 11, max = 18, message = "Tax ID must be a CPF or CNPJ"))]
  pub tax_id: String,

  #[validate(length(min = 1, message = "Account type is required"))]
  pub account_type: String,
}

impl From<DestinationConfig> for DestinationAccount {
  fn from(config: DestinationConfig) -> Self {
    DestinationAccount {
      bank_code: config.bank_code,
      branch_code: config.branch_code,
      account_number: config.account_number,
      name: config.name,
      tax_id: config.tax_id,
      account_type: config.account_type,
    }
  }
}

/// Transfer issuing configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferConfig {
  #[serde(default)]
  pub idempotency: IdempotencyStrategy,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Configuration is loaded in the following order (later sources override earlier ones):
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with SETTLER_ prefix
  ///
  /// # Environment Variables
  ///
  /// Environment variables use the SETTLER_ prefix and are separated by double underscores:
  /// - `SETTLER_SERVER__PORT=8080`
  /// - `SETTLER_LEDGER__MODE=in_memory`
  /// - `SETTLER_LEDGER__PROJECT_ID=5656565656565656`
  /// - `SETTLER_LEDGER__API_TOKEN=...`
  /// - `SETTLER_DESTINATION__ACCOUNT_NUMBER=6341320293482496`
  /// - `SETTLER_TRANSFER__IDEMPOTENCY=per_invoice`
  ///
  /// # Errors
  ///
  /// Returns a `ConfigError` if default.toml is missing, a value has the wrong
  /// type, or the destination account fails validation.
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      // SETTLER_LEDGER__BASE_URL=https://...
      .add_source(
        Environment::with_prefix("SETTLER")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    let config: Config = config.try_deserialize()?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    self
      .destination
      .validate()
      .map_err(|e| ConfigError::Message(format!("invalid destination account: {}", e)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const CONFIG: &str = r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [ledger]
            base_url = "https://sandbox.api.starkbank.com/v2"
            project_id = "5656565656565656"
            environment = "sandbox"

            [destination]
            bank_code = "20018183"
            branch_code = "0001"
            account_number = "6341320293482496"
            name = "Stark Bank S.A."
            tax_id = "20.018.183/0001-80"
            account_type = "payment"
        "#;

  #[test]
  fn test_config_structure() {
    let config: Config = toml::from_str(CONFIG).expect("Failed to parse config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.ledger.mode, LedgerMode::Http); // default
    assert_eq!(config.ledger.timeout_seconds, 15); // default
    assert_eq!(config.ledger.timeout(), Duration::from_secs(15));
    assert_eq!(config.ledger.api_token, None);
    assert_eq!(config.transfer.idempotency, IdempotencyStrategy::PerAttempt); // default
    assert!(config.validate().is_ok());

    let destination: DestinationAccount = config.destination.into();
    assert_eq!(destination.bank_code, "20018183");
    assert_eq!(destination.account_type, "payment");
  }

  #[test]
  fn test_config_overrides() {
    let toml = format!(
      "{}\n[transfer]\nidempotency = \"per_invoice\"\n",
      CONFIG.replace(
        "environment = \"sandbox\"",
        "environment = \"sandbox\"\nmode = \"in_memory\"\ntimeout_seconds = 5"
      )
    );

    let config: Config = toml::from_str(&toml).expect("Failed to parse config");

    assert_eq!(config.ledger.mode, LedgerMode::InMemory);
    assert_eq!(config.ledger.timeout_seconds, 5);
    assert_eq!(config.transfer.idempotency, IdempotencyStrategy::PerInvoice);
  }

  #[test]
  fn test_empty_destination_is_rejected() {
    let toml = CONFIG.replace("account_number = \"6341320293482496\"", "account_number = \"\"");
    let config: Config = toml::from_str(&toml).expect("Failed to parse config");

    assert!(config.validate().is_err());
  }
}
