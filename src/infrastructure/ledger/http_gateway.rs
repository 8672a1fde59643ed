use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::wire;
use crate::domain::invoice::{Invoice, InvoiceGateway};
use crate::domain::ledger::{Balance, BalanceGateway, LedgerError, Page};
use crate::domain::transfer::{Transfer, TransferGateway};
use crate::infrastructure::config::LedgerConfig;

/// Largest page the ledger serves per request.
const MAX_PAGE_SIZE: usize = 100;

/// Ledger client over the bank's REST API.
///
/// Every call is a single attempt; transport and API failures are returned
/// as [`LedgerError`] for the caller to report.
pub struct HttpLedgerGateway {
  client: reqwest::Client,
  base_url: Url,
  project_id: String,
  api_token: Option<String>,
}

impl HttpLedgerGateway {
  pub fn new(config: &LedgerConfig) -> Result<Self, LedgerError> {
    let base_url = Url::parse(&config.base_url)
      .map_err(|e| LedgerError::Request(format!("invalid ledger base url: {}", e)))?;
    if base_url.cannot_be_a_base() {
      return Err(LedgerError::Request(format!(
        "invalid ledger base url: {}",
        config.base_url
      )));
    }

    let client = reqwest::Client::builder()
      .timeout(config.timeout())
      .user_agent(concat!("settler/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| LedgerError::Request(e.to_string()))?;

    tracing::info!(
      base_url = %config.base_url,
      environment = %config.environment,
      "Ledger HTTP client configured"
    );

    Ok(Self {
      client,
      base_url,
      project_id: config.project_id.clone(),
      api_token: config.api_token.clone(),
    })
  }

  /// Appends each segment percent-encoded, so ids cannot alter the path or query.
  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
    let mut request = self
      .client
      .request(method, self.url(segments))
      .header("Access-Id", format!("project/{}", self.project_id))
      .header("Access-Time", Utc::now().timestamp().to_string());

    if let Some(token) = &self.api_token {
      request = request.bearer_auth(token);
    }

    request
  }

  async fn send<T: DeserializeOwned>(
    &self,
    request: RequestBuilder,
    resource: &str,
  ) -> Result<T, LedgerError> {
    let response = request
      .send()
      .await
      .map_err(|e| LedgerError::Request(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
      return Err(LedgerError::NotFound(resource.to_string()));
    }
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      tracing::warn!(%status, resource, "Ledger rejected request");
      return Err(LedgerError::Rejected {
        status: status.as_u16(),
        message: wire::error_message(&body),
      });
    }

    response
      .json::<T>()
      .await
      .map_err(|e| LedgerError::Decode(e.to_string()))
  }

  fn page_query(cursor: Option<String>, limit: usize) -> Vec<(&'static str, String)> {
    let mut query = vec![("limit", limit.clamp(1, MAX_PAGE_SIZE).to_string())];
    if let Some(cursor) = cursor {
      query.push(("cursor", cursor));
    }
    query
  }
}

#[async_trait]
impl InvoiceGateway for HttpLedgerGateway {
  async fn create(&self, invoices: Vec<Invoice>) -> Result<Vec<Invoice>, LedgerError> {
    let body = wire::InvoicesRequest {
      invoices: invoices.iter().map(wire::InvoiceRequest::from).collect(),
    };
    let response: wire::InvoicesResponse = self
      .send(self.request(Method::POST, &["invoice"]).json(&body), "invoice")
      .await?;

    Ok(response.invoices.into_iter().map(Invoice::from).collect())
  }

  async fn get_by_id(&self, id: &str) -> Result<Invoice, LedgerError> {
    let resource = format!("invoice/{}", id);
    let response: wire::InvoiceResponse = self
      .send(self.request(Method::GET, &["invoice", id]), &resource)
      .await?;

    Ok(response.invoice.into())
  }

  async fn list_page(
    &self,
    cursor: Option<String>,
    limit: usize,
  ) -> Result<Page<Invoice>, LedgerError> {
    let request = self
      .request(Method::GET, &["invoice"])
      .query(&Self::page_query(cursor, limit));
    let response: wire::InvoicesResponse = self.send(request, "invoice").await?;

    Ok(response.into())
  }
}

#[async_trait]
impl TransferGateway for HttpLedgerGateway {
  async fn create(&self, transfers: Vec<Transfer>) -> Result<Vec<Transfer>, LedgerError> {
    let body = wire::TransfersRequest {
      transfers: transfers.iter().map(wire::TransferRequest::from).collect(),
    };
    let response: wire::TransfersResponse = self
      .send(self.request(Method::POST, &["transfer"]).json(&body), "transfer")
      .await?;

    Ok(response.transfers.into_iter().map(Transfer::from).collect())
  }

  async fn get_by_id(&self, id: &str) -> Result<Transfer, LedgerError> {
    let resource = format!("transfer/{}", id);
    let response: wire::TransferResponse = self
      .send(self.request(Method::GET, &["transfer", id]), &resource)
      .await?;

    Ok(response.transfer.into())
  }

  async fn list_page(
    &self,
    cursor: Option<String>,
    limit: usize,
  ) -> Result<Page<Transfer>, LedgerError> {
    let request = self
      .request(Method::GET, &["transfer"])
      .query(&Self::page_query(cursor, limit));
    let response: wire::TransfersResponse = self.send(request, "transfer").await?;

    Ok(response.into())
  }
}

#[async_trait]
impl BalanceGateway for HttpLedgerGateway {
  async fn get_balance(&self) -> Result<Balance, LedgerError> {
    let response: wire::BalancesResponse = self
      .send(self.request(Method::GET, &["balance"]), "balance")
      .await?;

    response
      .balances
      .into_iter()
      .next()
      .map(Balance::from)
      .ok_or_else(|| LedgerError::Decode("balance response had no entries".to_string()))
  }
}
