use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use notion_client::NotionClient;
use notion_webhook::{
    delivery::{ChatWebhookSink, LogSink, MessageSink},
    server::{router, AppState, WEBHOOK_PATH},
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("notion_webhook=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    config.log_redacted();

    let notion = NotionClient::with_base_url(&config.notion_api_base_url, "")?;

    // Chat endpoint if configured, otherwise log only
    let sink: Arc<dyn MessageSink> = match &config.chat_webhook_url {
        Some(url) => {
            info!("Chat delivery enabled");
            Arc::new(ChatWebhookSink::new(url.clone())?)
        }
        None => {
            info!("No CHAT_WEBHOOK_URL set, messages will only be logged");
            Arc::new(LogSink)
        }
    };

    let state = Arc::new(AppState {
        notion,
        default_notion_token: config.notion_token.clone(),
        sink,
    });

    let addr = config.bind_addr();
    info!("Notion webhook listening on {addr}{WEBHOOK_PATH}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
