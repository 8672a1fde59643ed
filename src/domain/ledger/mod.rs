pub mod entities;
pub mod errors;
pub mod ports;
pub mod value_objects;

pub use entities::{Balance, Page, collect_pages};
pub use errors::LedgerError;
pub use ports::BalanceGateway;
pub use value_objects::format_minor_units;
