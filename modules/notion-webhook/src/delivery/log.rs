use async_trait::async_trait;
use tracing::info;

use super::sink::{MessageSink, OutboundMessage};

/// Sink used when no chat endpoint is configured: messages only reach the log.
pub struct LogSink;

#[async_trait]
impl MessageSink for LogSink {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<()> {
        info!(
            topic = %message.topic,
            event_type = message.event_type.as_deref().unwrap_or("-"),
            content = %message.content,
            "Message not delivered (no chat endpoint configured)"
        );
        Ok(())
    }
}
