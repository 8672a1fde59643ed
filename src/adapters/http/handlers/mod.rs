pub mod balance;
pub mod health;
pub mod webhook;

pub use balance::balance_handler;
pub use health::{ServiceClock, health_handler};
pub use webhook::{SIGNATURE_HEADER, webhook_handler};
