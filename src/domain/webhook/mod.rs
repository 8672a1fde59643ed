pub mod entities;
pub mod errors;
pub mod payload;
pub mod ports;
pub mod services;

pub use entities::{Classification, WebhookEvent};
pub use errors::WebhookError;
pub use payload::NotificationPayload;
pub use ports::SignatureVerifier;
pub use services::EventClassifier;
