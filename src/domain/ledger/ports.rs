use async_trait::async_trait;

use super::entities::Balance;
use super::errors::LedgerError;

#[async_trait]
pub trait BalanceGateway: Send + Sync {
  async fn get_balance(&self) -> Result<Balance, LedgerError>;
}
