use async_trait::async_trait;
use serde::Serialize;

/// A formatted chat message ready to post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub topic: String,
    pub content: String,
    /// Complete event type (`page.created`), absent for the verification message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
}

/// Pluggable delivery backend for formatted messages.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Post a message into its topic.
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<()>;
}
