//! Notion webhook payload types.
//!
//! Payloads arrive as JSON. Only the fields that feed formatting are typed;
//! the rest of the envelope is kept loose so new Notion fields never break decoding.

use serde::Deserialize;

/// Every event type the integration knows how to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    PageCreated,
    PageContentUpdated,
    PagePropertiesUpdated,
    PageMoved,
    PageDeleted,
    PageUndeleted,
    PageLocked,
    PageUnlocked,
    DatabaseCreated,
    DatabaseContentUpdated,
    DatabaseMoved,
    DatabaseDeleted,
    DatabaseUndeleted,
    DatabaseSchemaUpdated,
    DataSourceCreated,
    DataSourceContentUpdated,
    DataSourceMoved,
    DataSourceDeleted,
    DataSourceUndeleted,
    DataSourceSchemaUpdated,
    CommentCreated,
    CommentUpdated,
    CommentDeleted,
}

impl EventType {
    pub const ALL: [EventType; 23] = [
        Self::PageCreated,
        Self::PageContentUpdated,
        Self::PagePropertiesUpdated,
        Self::PageMoved,
        Self::PageDeleted,
        Self::PageUndeleted,
        Self::PageLocked,
        Self::PageUnlocked,
        Self::DatabaseCreated,
        Self::DatabaseContentUpdated,
        Self::DatabaseMoved,
        Self::DatabaseDeleted,
        Self::DatabaseUndeleted,
        Self::DatabaseSchemaUpdated,
        Self::DataSourceCreated,
        Self::DataSourceContentUpdated,
        Self::DataSourceMoved,
        Self::DataSourceDeleted,
        Self::DataSourceUndeleted,
        Self::DataSourceSchemaUpdated,
        Self::CommentCreated,
        Self::CommentUpdated,
        Self::CommentDeleted,
    ];

    /// The dot-separated tag Notion sends in `type`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PageCreated => "page.created",
            Self::PageContentUpdated => "page.content_updated",
            Self::PagePropertiesUpdated => "page.properties_updated",
            Self::PageMoved => "page.moved",
            Self::PageDeleted => "page.deleted",
            Self::PageUndeleted => "page.undeleted",
            Self::PageLocked => "page.locked",
            Self::PageUnlocked => "page.unlocked",
            Self::DatabaseCreated => "database.created",
            Self::DatabaseContentUpdated => "database.content_updated",
            Self::DatabaseMoved => "database.moved",
            Self::DatabaseDeleted => "database.deleted",
            Self::DatabaseUndeleted => "database.undeleted",
            Self::DatabaseSchemaUpdated => "database.schema_updated",
            Self::DataSourceCreated => "data_source.created",
            Self::DataSourceContentUpdated => "data_source.content_updated",
            Self::DataSourceMoved => "data_source.moved",
            Self::DataSourceDeleted => "data_source.deleted",
            Self::DataSourceUndeleted => "data_source.undeleted",
            Self::DataSourceSchemaUpdated => "data_source.schema_updated",
            Self::CommentCreated => "comment.created",
            Self::CommentUpdated => "comment.updated",
            Self::CommentDeleted => "comment.deleted",
        }
    }

    /// The entity an event is about, or `None` for comment events.
    pub const fn entity_kind(&self) -> Option<EntityKind> {
        match self {
            Self::PageCreated
            | Self::PageContentUpdated
            | Self::PagePropertiesUpdated
            | Self::PageMoved
            | Self::PageDeleted
            | Self::PageUndeleted
            | Self::PageLocked
            | Self::PageUnlocked => Some(EntityKind::Page),
            Self::DatabaseCreated
            | Self::DatabaseContentUpdated
            | Self::DatabaseMoved
            | Self::DatabaseDeleted
            | Self::DatabaseUndeleted
            | Self::DatabaseSchemaUpdated => Some(EntityKind::Database),
            Self::DataSourceCreated
            | Self::DataSourceContentUpdated
            | Self::DataSourceMoved
            | Self::DataSourceDeleted
            | Self::DataSourceUndeleted
            | Self::DataSourceSchemaUpdated => Some(EntityKind::DataSource),
            Self::CommentCreated | Self::CommentUpdated | Self::CommentDeleted => None,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kinds of Notion objects that carry a title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Page,
    Database,
    DataSource,
}

impl EntityKind {
    /// Lower-case noun used in active-voice messages.
    pub const fn noun(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Database => "database",
            Self::DataSource => "data source",
        }
    }

    /// Sentence-start noun used in passive-voice messages.
    pub const fn capitalized_noun(&self) -> &'static str {
        match self {
            Self::Page => "Page",
            Self::Database => "Database",
            Self::DataSource => "Data source",
        }
    }

    pub const fn topic_prefix(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Database => "db",
            Self::DataSource => "ds",
        }
    }

    /// Topic used when the payload carries no entity id.
    pub const fn generic_topic(&self) -> &'static str {
        match self {
            Self::Page => "Notion Page",
            Self::Database => "Notion Database",
            Self::DataSource => "Notion Data Source",
        }
    }

    /// Fallback when a fetched record has no usable title.
    pub const fn untitled(&self) -> &'static str {
        match self {
            Self::Page => "Untitled Page",
            Self::Database | Self::DataSource => "Untitled Database",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.noun())
    }
}

/// A decoded (non-verification) webhook event.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    /// Notion's delivery id, only used for logging.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub attempt_number: Option<u32>,
    #[serde(default)]
    pub entity: Option<EntityRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: Vec<AuthorRef>,
    #[serde(default)]
    pub data: Option<EventData>,
}

impl NotionEvent {
    /// The entity id, treating an empty string like a missing one.
    pub fn entity_id(&self) -> Option<&str> {
        self.entity
            .as_ref()
            .and_then(|e| e.id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// `data.page_id` for comment events.
    pub fn comment_page_id(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.page_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// `data.parent.type`, e.g. `"page"` or `"block"`.
    pub fn parent_type(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.parent.as_ref())
            .and_then(|p| p.kind.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AuthorRef>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<AuthorRef>>::deserialize(deserializer)?.unwrap_or_default())
}
