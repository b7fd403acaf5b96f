// Test doubles for the two trait boundaries:
// - MockLookup (NotionLookup): HashMap-based id -> record, records every call
// - RecordingSink (MessageSink): keeps delivered messages in memory
//
// Plus payload builders for the common event shapes.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use crate::delivery::{MessageSink, OutboundMessage};
use crate::traits::NotionLookup;

// ---------------------------------------------------------------------------
// MockLookup
// ---------------------------------------------------------------------------

/// HashMap-based lookup. Returns `Err` for unregistered ids.
/// Builder pattern: `.on_page()`, `.on_database()`, `.on_user()`.
#[derive(Default)]
pub struct MockLookup {
    pages: HashMap<String, Value>,
    databases: HashMap<String, Value>,
    users: HashMap<String, Value>,
    calls: Mutex<Vec<String>>,
}

impl MockLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(mut self, id: &str, record: Value) -> Self {
        self.pages.insert(id.to_string(), record);
        self
    }

    pub fn on_database(mut self, id: &str, record: Value) -> Self {
        self.databases.insert(id.to_string(), record);
        self
    }

    pub fn on_user(mut self, id: &str, record: Value) -> Self {
        self.users.insert(id.to_string(), record);
        self
    }

    /// Calls in the order they were made, as `"page:{id}"`, `"database:{id}"`, `"user:{id}"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, kind: &str, table: &HashMap<String, Value>, id: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(format!("{kind}:{id}"));
        table
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockLookup: no {kind} registered for {id}"))
    }
}

#[async_trait]
impl NotionLookup for MockLookup {
    async fn page(&self, id: &str) -> Result<Value> {
        self.record("page", &self.pages, id)
    }

    async fn database(&self, id: &str) -> Result<Value> {
        self.record("database", &self.databases, id)
    }

    async fn user(&self, id: &str) -> Result<Value> {
        self.record("user", &self.users, id)
    }
}

// ---------------------------------------------------------------------------
// RecordingSink
// ---------------------------------------------------------------------------

/// Keeps every delivered message. `failing()` builds one that rejects sends
/// after recording them.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<OutboundMessage>>,
    fail: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<OutboundMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(&self, message: &OutboundMessage) -> Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            anyhow::bail!("RecordingSink: configured to fail");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Payload and record builders
// ---------------------------------------------------------------------------

/// Minimal entity event with a single person author.
pub fn entity_event(event_type: &str, entity_id: &str, author_id: &str) -> Value {
    json!({
        "type": event_type,
        "authors": [{ "id": author_id, "type": "person" }],
        "entity": { "id": entity_id, "type": event_type.split('.').next().unwrap_or_default() },
        "data": {}
    })
}

/// Comment event attached to `page_id` with the given parent type.
pub fn comment_event(event_type: &str, page_id: &str, parent_type: &str, author_id: &str) -> Value {
    json!({
        "type": event_type,
        "authors": [{ "id": author_id, "type": "person" }],
        "entity": { "id": "comment-1", "type": "comment" },
        "data": {
            "page_id": page_id,
            "parent": { "id": "parent-1", "type": parent_type }
        }
    })
}

/// Page record whose title lives in a `title`-typed property named `property`.
pub fn page_record(property: &str, title: &str) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(
        property.to_string(),
        json!({ "id": "title", "type": "title", "title": [{ "plain_text": title }] }),
    );
    json!({ "object": "page", "properties": properties })
}

/// Database or data source record with a single title span.
pub fn database_record(title: &str) -> Value {
    json!({ "object": "database", "title": [{ "plain_text": title }] })
}

/// Person record with a display name.
pub fn user_record(name: &str) -> Value {
    json!({ "object": "user", "type": "person", "name": name })
}
