//! Tolerant typed view of ledger notifications.
//!
//! The ledger wraps the event in an `event` object; test senders post the event
//! bare. Scalar fields of the wrong JSON type read as empty or zero, nested
//! records of the wrong type read as absent, so only the classifier decides
//! what is malformed.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Envelope-or-bare notification.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationPayload {
  Envelope(EventBody),
  Bare(EventBody),
}

impl NotificationPayload {
  pub fn body(&self) -> &EventBody {
    match self {
      NotificationPayload::Envelope(body) | NotificationPayload::Bare(body) => body,
    }
  }

  pub fn into_body(self) -> EventBody {
    match self {
      NotificationPayload::Envelope(body) | NotificationPayload::Bare(body) => body,
    }
  }
}

impl<'de> Deserialize<'de> for NotificationPayload {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let mut root = Map::<String, Value>::deserialize(deserializer)?;

    match root.remove("event") {
      Some(Value::Object(inner)) => EventBody::deserialize(Value::Object(inner))
        .map(NotificationPayload::Envelope)
        .map_err(D::Error::custom),
      other => {
        if let Some(value) = other {
          root.insert("event".to_string(), value);
        }
        EventBody::deserialize(Value::Object(root))
          .map(NotificationPayload::Bare)
          .map_err(D::Error::custom)
      }
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventBody {
  #[serde(default, deserialize_with = "lenient_string")]
  pub subscription: String,
  #[serde(default, deserialize_with = "lenient_object")]
  pub log: Option<LogRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LogRecord {
  #[serde(rename = "type", default, deserialize_with = "lenient_string")]
  pub event_type: String,
  #[serde(default, deserialize_with = "lenient_object")]
  pub invoice: Option<InvoiceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InvoiceRecord {
  #[serde(default, deserialize_with = "lenient_string")]
  pub id: String,
  #[serde(default, deserialize_with = "lenient_string")]
  pub status: String,
  #[serde(default, deserialize_with = "lenient_minor_units")]
  pub amount: i64,
  #[serde(default, deserialize_with = "lenient_minor_units")]
  pub fee: i64,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::String(s) => s,
    _ => String::new(),
  })
}

// Fractional values truncate toward zero
fn lenient_minor_units<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::Number(n) => n
      .as_i64()
      .or_else(|| n.as_f64().map(|f| f as i64))
      .unwrap_or_default(),
    _ => 0,
  })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
  D: Deserializer<'de>,
  T: DeserializeOwned,
{
  match Value::deserialize(deserializer)? {
    value @ Value::Object(_) => T::deserialize(value).map(Some).map_err(D::Error::custom),
    _ => Ok(None),
  }
}
