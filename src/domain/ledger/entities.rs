use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;

use super::errors::LedgerError;

/// One page of a cursor-paginated listing.
///
/// `cursor` is the explicit "more pages" boundary: `None` means the listing is exhausted.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub cursor: Option<String>,
}

impl<T> Page<T> {
  pub fn new(items: Vec<T>, cursor: Option<String>) -> Self {
    Self { items, cursor }
  }

  pub fn last(items: Vec<T>) -> Self {
    Self {
      items,
      cursor: None,
    }
  }

  pub fn has_more(&self) -> bool {
    self.cursor.is_some()
  }
}

/// Walks a paginated listing from the first page, stopping at `limit` items,
/// at the last page, or at the first error.
pub async fn collect_pages<T, F, Fut>(limit: usize, mut fetch: F) -> Result<Vec<T>, LedgerError>
where
  F: FnMut(Option<String>, usize) -> Fut,
  Fut: Future<Output = Result<Page<T>, LedgerError>>,
{
  let mut items = Vec::new();
  let mut cursor = None;

  while items.len() < limit {
    let remaining = limit - items.len();
    let Page {
      items: batch,
      cursor: next,
    } = fetch(cursor.take(), remaining).await?;

    let exhausted = next.is_none() || batch.is_empty();
    items.extend(batch.into_iter().take(remaining));
    if exhausted {
      break;
    }
    cursor = next;
  }

  Ok(items)
}

/// Account balance as reported by the ledger, in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
  pub amount: i64,
  pub currency: String,
  pub updated: Option<DateTime<Utc>>,
}
