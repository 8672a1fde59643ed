pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{DestinationAccount, Transfer};
pub use errors::TransferError;
pub use ports::{Clock, SystemClock, TransferGateway};
pub use services::{IssueOutcome, SkipReason, TransferIssuer};
pub use value_objects::{IdempotencyKey, IdempotencyStrategy};
