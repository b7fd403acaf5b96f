// Trait seam between the formatters and the Notion API.
//
// NotionLookup fetches raw records. It reports failure explicitly; the
// resolver decides what fallback text replaces a failed lookup.
// MockLookup in testing.rs implements it without any network.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use notion_client::NotionClient;

#[async_trait]
pub trait NotionLookup: Send + Sync {
    /// Fetch a page record.
    async fn page(&self, id: &str) -> Result<Value>;

    /// Fetch a database or data source record.
    async fn database(&self, id: &str) -> Result<Value>;

    /// Fetch a user record.
    async fn user(&self, id: &str) -> Result<Value>;
}

#[async_trait]
impl NotionLookup for NotionClient {
    async fn page(&self, id: &str) -> Result<Value> {
        Ok(self.get_page(id).await?)
    }

    async fn database(&self, id: &str) -> Result<Value> {
        Ok(self.get_database(id).await?)
    }

    async fn user(&self, id: &str) -> Result<Value> {
        Ok(self.get_user(id).await?)
    }
}
