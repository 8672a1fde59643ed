pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::Invoice;
pub use errors::InvoiceError;
pub use ports::InvoiceGateway;
pub use services::{InvoiceBatchGenerator, InvoiceService};
pub use value_objects::{TaxId, ValueObjectError};
