//! Application layer
//!
//! Use cases and long-running jobs that orchestrate the domain services:
//! the invoice scheduler, webhook processing and balance lookups.

pub mod invoice;
pub mod ledger;
pub mod webhook;
