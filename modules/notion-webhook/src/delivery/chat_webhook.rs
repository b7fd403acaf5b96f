use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::sink::{MessageSink, OutboundMessage};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts messages as JSON to a chat platform's incoming-message endpoint.
pub struct ChatWebhookSink {
    webhook_url: String,
    http: reqwest::Client,
}

impl ChatWebhookSink {
    pub fn new(webhook_url: String) -> anyhow::Result<Self> {
        Self::with_timeout(webhook_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(webhook_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { webhook_url, http })
    }
}

#[async_trait]
impl MessageSink for ChatWebhookSink {
    async fn send(&self, message: &OutboundMessage) -> anyhow::Result<()> {
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(message)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Chat endpoint returned non-success");
            anyhow::bail!("Chat endpoint returned {status}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message() -> OutboundMessage {
        OutboundMessage {
            topic: "Notion".to_string(),
            content: "**Alice** created page **Plan**".to_string(),
            event_type: Some("page.created".to_string()),
        }
    }

    #[tokio::test]
    async fn posts_message_as_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/messages"))
            .and(body_json(json!({
                "topic": "Notion",
                "content": "**Alice** created page **Plan**",
                "event_type": "page.created",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let sink = ChatWebhookSink::new(format!("{}/messages", server.uri())).unwrap();
        sink.send(&message()).await.unwrap();
    }

    #[tokio::test]
    async fn non_success_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let sink = ChatWebhookSink::new(format!("{}/messages", server.uri())).unwrap();
        let err = sink.send(&message()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn hung_endpoint_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let sink = ChatWebhookSink::with_timeout(
            format!("{}/messages", server.uri()),
            Duration::from_millis(200),
        )
        .unwrap();
        let err = sink.send(&message()).await.unwrap_err();
        let err = err.downcast::<reqwest::Error>().unwrap();
        assert!(err.is_timeout());
    }
}
