pub mod invoice;
pub mod ledger;
pub mod transfer;
pub mod webhook;
