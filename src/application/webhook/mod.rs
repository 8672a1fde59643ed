pub mod process_webhook;

pub use process_webhook::{
  ProcessWebhookCommand, ProcessWebhookResponse, ProcessWebhookUseCase, WebhookStatus,
};
