pub mod invoice_scheduler;

pub use invoice_scheduler::{
  INVOICE_INTERVAL, InvoiceScheduler, SCHEDULE_DURATION, SchedulerHandle, SchedulerState,
  StopReason,
};
