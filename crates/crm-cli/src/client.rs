//! Async HTTP client wrapping the CRM JSON API.

use anyhow::{Context, Result, anyhow};
use crm_core::contact::Contact;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use uuid::Uuid;

/// Body of a non-2xx API response.
#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

/// Async HTTP client for the CRM JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:   Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into() })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  /// Turn a non-2xx response into an error carrying the server's message.
  async fn failure(what: &str, resp: reqwest::Response) -> anyhow::Error {
    let status = resp.status();
    match resp.json::<ErrorBody>().await {
      Ok(body) => anyhow!("{what} → {status}: {}", body.error),
      Err(_) => anyhow!("{what} → {status}"),
    }
  }

  /// `GET /api/contacts`
  pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
    let resp = self
      .client
      .get(self.url("/contacts"))
      .send()
      .await
      .context("GET /contacts failed")?;

    if !resp.status().is_success() {
      return Err(Self::failure("GET /contacts", resp).await);
    }
    resp.json().await.context("deserialising contacts")
  }

  /// `GET /api/contacts/{id}`. `None` on 404.
  pub async fn get_contact(&self, id: Uuid) -> Result<Option<Contact>> {
    let resp = self
      .client
      .get(self.url(&format!("/contacts/{id}")))
      .send()
      .await
      .context("GET /contacts/:id failed")?;

    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    if !resp.status().is_success() {
      return Err(Self::failure("GET /contacts/:id", resp).await);
    }
    resp.json().await.map(Some).context("deserialising contact")
  }
}
