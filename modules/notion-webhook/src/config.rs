use std::env;

use anyhow::Context;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Web server
    pub web_host: String,
    pub web_port: u16,

    // Notion API
    pub notion_api_base_url: String,
    /// Used when a request doesn't carry its own `notion_token`.
    pub notion_token: String,

    // Delivery
    pub chat_webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables. Nothing is required;
    /// an unparsable `WEB_PORT` is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("WEB_PORT must be a number")?,
            notion_api_base_url: env::var("NOTION_API_BASE_URL")
                .unwrap_or_else(|_| notion_client::BASE_URL.to_string()),
            notion_token: env::var("NOTION_TOKEN").unwrap_or_default(),
            chat_webhook_url: optional_env("CHAT_WEBHOOK_URL"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web_host, self.web_port)
    }

    /// Log the effective configuration without secrets.
    pub fn log_redacted(&self) {
        tracing::info!(
            bind = %self.bind_addr(),
            notion_api = %self.notion_api_base_url,
            default_token = !self.notion_token.is_empty(),
            chat_webhook = self.chat_webhook_url.is_some(),
            "Loaded configuration"
        );
    }
}

fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
