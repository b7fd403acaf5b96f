pub mod error;

pub use error::{NotionError, Result};

use std::time::Duration;

use serde_json::Value;

pub const BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent on every request. Data sources only exist from this version on.
pub const NOTION_VERSION: &str = "2025-09-03";

/// Per-request timeout for lookups.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Read-only client for the handful of Notion endpoints needed to name things.
///
/// Every method returns the raw JSON record; interpreting it is up to the caller.
#[derive(Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl NotionClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(BASE_URL, token)
    }

    pub fn with_base_url(base_url: &str, token: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Same connection pool, different integration token.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: token.into(),
        }
    }

    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a page object.
    pub async fn get_page(&self, page_id: &str) -> Result<Value> {
        self.get(&format!("pages/{page_id}")).await
    }

    /// Fetch a database object. Data sources share the same record shape and
    /// are looked up through this endpoint too.
    pub async fn get_database(&self, database_id: &str) -> Result<Value> {
        self.get(&format!("databases/{database_id}")).await
    }

    /// Fetch a user object.
    pub async fn get_user(&self, user_id: &str) -> Result<Value> {
        self.get(&format!("users/{user_id}")).await
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "Notion API request");

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
