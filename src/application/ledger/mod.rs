pub mod get_balance;

pub use get_balance::{BalanceResponse, FormattedBalance, GetBalanceUseCase};
