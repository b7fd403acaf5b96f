//! Single-shot handling of one webhook payload.
//!
//! verification handshake -> type check -> decode -> filter -> format -> route -> deliver

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::delivery::{MessageSink, OutboundMessage};
use crate::error::WebhookError;
use crate::event::{EventType, NotionEvent};
use crate::filter::EventFilter;
use crate::format::REGISTRY;
use crate::resolver::Resolver;
use crate::topic::{route, DEFAULT_TOPIC};
use crate::traits::NotionLookup;

/// Caller-supplied settings for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub user_specified_topic: Option<String>,
    pub map_pages_to_topics: bool,
    pub filter: EventFilter,
}

/// What happened to a payload that was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Verification handshake; the token was posted to the default topic.
    Verification(OutboundMessage),
    /// Event formatted and handed to the sink.
    Delivered(OutboundMessage),
    /// Event recognised but dropped by the integration's event filter.
    Filtered(EventType),
}

/// Message posted for the verification handshake.
pub fn verification_message(token: &str) -> String {
    format!(
        "This is a webhook configuration test message from Notion.\n\
         \n\
         Your verification token is: `{token}`\n\
         \n\
         Please copy this token and paste it into your Notion webhook configuration to complete the setup."
    )
}

/// Handle one decoded payload.
///
/// Fails only for a missing/unknown `type` or an undecodable event. Lookup and
/// delivery failures are logged and never abort the request.
pub async fn dispatch(
    payload: &Value,
    options: &RequestOptions,
    lookup: Option<&dyn NotionLookup>,
    sink: &dyn MessageSink,
) -> Result<DispatchOutcome, WebhookError> {
    if let Some(token) = payload
        .get("verification_token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
    {
        info!("Received Notion verification handshake");
        let message = OutboundMessage {
            topic: DEFAULT_TOPIC.to_string(),
            content: verification_message(token),
            event_type: None,
        };
        deliver(sink, &message).await;
        return Ok(DispatchOutcome::Verification(message));
    }

    let tag = match payload.get("type") {
        None | Some(Value::Null) => return Err(WebhookError::MissingField("type")),
        Some(Value::String(tag)) => tag.as_str(),
        Some(other) => {
            return Err(WebhookError::InvalidPayload(format!(
                "'type' must be a string, got {other}"
            )))
        }
    };

    let entry = REGISTRY
        .get(tag)
        .ok_or_else(|| WebhookError::UnsupportedEventType(tag.to_string()))?;

    let event = NotionEvent::deserialize(payload)?;

    if !options.filter.allows(tag) {
        info!(event_type = tag, "Event excluded by filter, not delivering");
        return Ok(DispatchOutcome::Filtered(entry.event_type));
    }

    let resolver = Resolver::new(lookup);
    let formatted = entry.formatter.format(&event, &resolver).await;

    let topic = route(
        &formatted.topic_hint,
        options.user_specified_topic.as_deref(),
        options.map_pages_to_topics,
    );

    info!(
        event_type = tag,
        event_id = event.id.as_deref().unwrap_or("-"),
        attempt = event.attempt_number.unwrap_or(1),
        lookups = resolver.is_online(),
        topic = %topic,
        "Formatted Notion event"
    );

    let message = OutboundMessage {
        topic,
        content: formatted.body,
        event_type: Some(entry.event_type.as_str().to_string()),
    };
    deliver(sink, &message).await;

    Ok(DispatchOutcome::Delivered(message))
}

async fn deliver(sink: &dyn MessageSink, message: &OutboundMessage) {
    if let Err(e) = sink.send(message).await {
        warn!(
            error = %e,
            topic = %message.topic,
            event_type = message.event_type.as_deref().unwrap_or("-"),
            "Failed to deliver message"
        );
    }
}
