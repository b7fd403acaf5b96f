//! Event formatters and the registry that maps event tags to them.
//!
//! Entity events (pages, databases, data sources) share one template shape:
//! an active sentence when the author is known, a passive one otherwise.
//! Comment events point at the page the comment lives on.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::event::{EntityKind, EventType, NotionEvent};
use crate::resolver::Resolver;

/// Topic hint for comment events that don't say which page they belong to.
pub const GENERIC_UPDATE_TOPIC: &str = "Notion Update";

/// A formatter's output: suggested topic and rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub topic_hint: String,
    pub body: String,
}

impl FormattedMessage {
    fn new(topic_hint: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            topic_hint: topic_hint.into(),
            body: body.into(),
        }
    }
}

/// Wording for one page/database/data source event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityTemplate {
    pub kind: EntityKind,
    /// `**{author}** {verb} {noun} **{title}**`
    pub verb: &'static str,
    /// Trailing words after the title in the active sentence.
    pub suffix: Option<&'static str>,
    /// Passive sentence opens with "New {noun}" rather than "{Noun}".
    pub announces_new: bool,
    /// `{subject} **{title}** {passive}`
    pub passive: &'static str,
}

impl EntityTemplate {
    const fn new(kind: EntityKind, verb: &'static str, suffix: Option<&'static str>, passive: &'static str) -> Self {
        Self {
            kind,
            verb,
            suffix,
            announces_new: false,
            passive,
        }
    }

    const fn created(kind: EntityKind) -> Self {
        Self {
            kind,
            verb: "created",
            suffix: None,
            announces_new: true,
            passive: "was created",
        }
    }

    fn passive_subject(&self) -> Cow<'static, str> {
        if self.announces_new {
            Cow::Owned(format!("New {}", self.kind.noun()))
        } else {
            Cow::Borrowed(self.kind.capitalized_noun())
        }
    }

    async fn format(&self, event: &NotionEvent, resolver: &Resolver<'_>) -> FormattedMessage {
        let kind = self.kind;
        let Some(id) = event.entity_id() else {
            return FormattedMessage::new(
                kind.generic_topic(),
                format!("{} {}", self.passive_subject(), self.passive),
            );
        };

        let title = resolver.title(kind, id).await;
        let author = resolver.author(&event.authors).await;

        let body = if author.is_empty() {
            format!("{} **{title}** {}", self.passive_subject(), self.passive)
        } else {
            let mut body = format!("**{author}** {} {} **{title}**", self.verb, kind.noun());
            if let Some(suffix) = self.suffix {
                body.push(' ');
                body.push_str(suffix);
            }
            body
        };

        FormattedMessage::new(format!("{}: {title}", kind.topic_prefix()), body)
    }
}

/// Wording for one comment event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentTemplate {
    /// `**{author}** {action} on **{title}**`
    pub action: &'static str,
    /// `{passive_on} **{title}**`
    pub passive_on: &'static str,
    /// Body when neither author nor page is known.
    pub passive_bare: &'static str,
    /// Distinguish comments on blocks from comments on the page itself.
    pub block_aware: bool,
}

impl CommentTemplate {
    async fn format(&self, event: &NotionEvent, resolver: &Resolver<'_>) -> FormattedMessage {
        let author = resolver.author(&event.authors).await;

        let Some(page_id) = event.comment_page_id() else {
            let body = if author.is_empty() {
                self.passive_bare.to_string()
            } else {
                format!("**{author}** {}", self.action)
            };
            return FormattedMessage::new(GENERIC_UPDATE_TOPIC, body);
        };

        let title = resolver.title(EntityKind::Page, page_id).await;
        let target = if self.block_aware && event.parent_type() == Some("block") {
            format!("a block in **{title}**")
        } else {
            format!("**{title}**")
        };

        let body = if author.is_empty() {
            format!("{} {target}", self.passive_on)
        } else {
            format!("**{author}** {} on {target}", self.action)
        };

        FormattedMessage::new(format!("{}: {title}", EntityKind::Page.topic_prefix()), body)
    }
}

/// One formatter per event type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    Entity(EntityTemplate),
    Comment(CommentTemplate),
}

impl Formatter {
    pub const fn for_event(event_type: EventType) -> Self {
        use EntityKind::{DataSource, Database, Page};
        use EventType::*;

        match event_type {
            PageCreated => Self::Entity(EntityTemplate::created(Page)),
            PageContentUpdated => Self::Entity(EntityTemplate::new(Page, "updated", Some("content"), "content was updated")),
            PagePropertiesUpdated => Self::Entity(EntityTemplate::new(Page, "updated", Some("properties"), "properties were updated")),
            PageMoved => Self::Entity(EntityTemplate::new(Page, "moved", None, "was moved")),
            PageDeleted => Self::Entity(EntityTemplate::new(Page, "moved", Some("to trash"), "was moved to trash")),
            PageUndeleted => Self::Entity(EntityTemplate::new(Page, "restored", Some("from trash"), "was restored from trash")),
            PageLocked => Self::Entity(EntityTemplate::new(Page, "locked", None, "was locked")),
            PageUnlocked => Self::Entity(EntityTemplate::new(Page, "unlocked", None, "was unlocked")),

            DatabaseCreated => Self::Entity(EntityTemplate::created(Database)),
            DatabaseContentUpdated => Self::Entity(EntityTemplate::new(Database, "updated", Some("content"), "content was updated")),
            DatabaseMoved => Self::Entity(EntityTemplate::new(Database, "moved", None, "was moved")),
            DatabaseDeleted => Self::Entity(EntityTemplate::new(Database, "moved", Some("to trash"), "was moved to trash")),
            DatabaseUndeleted => Self::Entity(EntityTemplate::new(Database, "restored", Some("from trash"), "was restored from trash")),
            DatabaseSchemaUpdated => Self::Entity(EntityTemplate::new(Database, "updated", Some("schema"), "schema was updated")),

            DataSourceCreated => Self::Entity(EntityTemplate::created(DataSource)),
            DataSourceContentUpdated => Self::Entity(EntityTemplate::new(DataSource, "updated", Some("content"), "content was updated")),
            DataSourceMoved => Self::Entity(EntityTemplate::new(DataSource, "moved", None, "was moved")),
            DataSourceDeleted => Self::Entity(EntityTemplate::new(DataSource, "moved", Some("to trash"), "was moved to trash")),
            DataSourceUndeleted => Self::Entity(EntityTemplate::new(DataSource, "restored", Some("from trash"), "was restored from trash")),
            DataSourceSchemaUpdated => Self::Entity(EntityTemplate::new(DataSource, "updated", Some("schema"), "schema was updated")),

            CommentCreated => Self::Comment(CommentTemplate {
                action: "added a comment",
                passive_on: "New comment on",
                passive_bare: "New comment was added",
                block_aware: true,
            }),
            CommentUpdated => Self::Comment(CommentTemplate {
                action: "updated a comment",
                passive_on: "Comment updated on",
                passive_bare: "Comment was updated",
                block_aware: false,
            }),
            CommentDeleted => Self::Comment(CommentTemplate {
                action: "deleted a comment",
                passive_on: "Comment deleted on",
                passive_bare: "Comment was deleted",
                block_aware: false,
            }),
        }
    }

    /// Render an event. Lookups run one after another and never fail the call.
    pub async fn format(&self, event: &NotionEvent, resolver: &Resolver<'_>) -> FormattedMessage {
        match self {
            Self::Entity(template) => template.format(event, resolver).await,
            Self::Comment(template) => template.format(event, resolver).await,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub event_type: EventType,
    pub formatter: Formatter,
}

/// Read-only map from event tag to formatter, built once on first use.
pub struct FormatterRegistry {
    entries: HashMap<&'static str, RegistryEntry>,
}

pub static REGISTRY: LazyLock<FormatterRegistry> = LazyLock::new(FormatterRegistry::build);

impl FormatterRegistry {
    fn build() -> Self {
        let entries = EventType::ALL
            .iter()
            .map(|&event_type| {
                (
                    event_type.as_str(),
                    RegistryEntry {
                        event_type,
                        formatter: Formatter::for_event(event_type),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn get(&self, tag: &str) -> Option<&RegistryEntry> {
        self.entries.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{comment_event, entity_event, MockLookup};
    use serde_json::{json, Value};

    fn decode(payload: Value) -> NotionEvent {
        serde_json::from_value(payload).unwrap()
    }

    async fn render(payload: Value) -> FormattedMessage {
        let event = decode(payload);
        let entry = REGISTRY.get(&event.event_type).unwrap();
        entry.formatter.format(&event, &Resolver::offline()).await
    }

    fn without_authors(mut payload: Value) -> Value {
        payload["authors"] = json!([]);
        payload
    }

    #[test]
    fn registry_has_one_entry_per_event_type() {
        assert_eq!(REGISTRY.len(), EventType::ALL.len());
        for ty in EventType::ALL {
            let entry = REGISTRY.get(ty.as_str()).unwrap();
            assert_eq!(entry.event_type, ty);
        }
        assert!(!REGISTRY.contains("foo.bar"));
        assert!(!REGISTRY.contains("page"));
    }

    #[tokio::test]
    async fn active_bodies_for_entity_events() {
        let cases = [
            ("page.created", "**user: u1** created page **e1**", "page: e1"),
            ("page.content_updated", "**user: u1** updated page **e1** content", "page: e1"),
            ("page.properties_updated", "**user: u1** updated page **e1** properties", "page: e1"),
            ("page.moved", "**user: u1** moved page **e1**", "page: e1"),
            ("page.deleted", "**user: u1** moved page **e1** to trash", "page: e1"),
            ("page.undeleted", "**user: u1** restored page **e1** from trash", "page: e1"),
            ("page.locked", "**user: u1** locked page **e1**", "page: e1"),
            ("page.unlocked", "**user: u1** unlocked page **e1**", "page: e1"),
            ("database.created", "**user: u1** created database **e1**", "db: e1"),
            ("database.content_updated", "**user: u1** updated database **e1** content", "db: e1"),
            ("database.moved", "**user: u1** moved database **e1**", "db: e1"),
            ("database.deleted", "**user: u1** moved database **e1** to trash", "db: e1"),
            ("database.undeleted", "**user: u1** restored database **e1** from trash", "db: e1"),
            ("database.schema_updated", "**user: u1** updated database **e1** schema", "db: e1"),
            ("data_source.created", "**user: u1** created data source **e1**", "ds: e1"),
            ("data_source.content_updated", "**user: u1** updated data source **e1** content", "ds: e1"),
            ("data_source.moved", "**user: u1** moved data source **e1**", "ds: e1"),
            ("data_source.deleted", "**user: u1** moved data source **e1** to trash", "ds: e1"),
            ("data_source.undeleted", "**user: u1** restored data source **e1** from trash", "ds: e1"),
            ("data_source.schema_updated", "**user: u1** updated data source **e1** schema", "ds: e1"),
        ];

        for (ty, body, topic) in cases {
            let out = render(entity_event(ty, "e1", "u1")).await;
            assert_eq!(out.body, body, "{ty}");
            assert_eq!(out.topic_hint, topic, "{ty}");
        }
    }

    #[tokio::test]
    async fn passive_bodies_without_author() {
        let cases = [
            ("page.created", "New page **e1** was created"),
            ("page.content_updated", "Page **e1** content was updated"),
            ("page.properties_updated", "Page **e1** properties were updated"),
            ("page.deleted", "Page **e1** was moved to trash"),
            ("page.locked", "Page **e1** was locked"),
            ("database.created", "New database **e1** was created"),
            ("database.schema_updated", "Database **e1** schema was updated"),
            ("data_source.undeleted", "Data source **e1** was restored from trash"),
            ("data_source.created", "New data source **e1** was created"),
        ];

        for (ty, body) in cases {
            let out = render(without_authors(entity_event(ty, "e1", "u1"))).await;
            assert_eq!(out.body, body, "{ty}");
        }
    }

    #[tokio::test]
    async fn missing_entity_id_uses_generic_pair() {
        let cases = [
            ("page.created", "Notion Page", "New page was created"),
            ("page.content_updated", "Notion Page", "Page content was updated"),
            ("page.properties_updated", "Notion Page", "Page properties were updated"),
            ("database.undeleted", "Notion Database", "Database was restored from trash"),
            ("data_source.schema_updated", "Notion Data Source", "Data source schema was updated"),
            ("data_source.created", "Notion Data Source", "New data source was created"),
        ];

        for (ty, topic, body) in cases {
            let out = render(entity_event(ty, "", "u1")).await;
            assert_eq!(out, FormattedMessage::new(topic, body), "{ty}");

            let out = render(json!({ "type": ty })).await;
            assert_eq!(out, FormattedMessage::new(topic, body), "{ty} without entity");
        }
    }

    #[tokio::test]
    async fn comment_bodies() {
        let out = render(comment_event("comment.created", "p1", "page", "u1")).await;
        assert_eq!(out.body, "**user: u1** added a comment on **p1**");
        assert_eq!(out.topic_hint, "page: p1");

        let out = render(comment_event("comment.created", "p1", "block", "u1")).await;
        assert_eq!(out.body, "**user: u1** added a comment on a block in **p1**");

        let out = render(without_authors(comment_event("comment.created", "p1", "block", "u1"))).await;
        assert_eq!(out.body, "New comment on a block in **p1**");

        // Only creation distinguishes block comments.
        let out = render(comment_event("comment.updated", "p1", "block", "u1")).await;
        assert_eq!(out.body, "**user: u1** updated a comment on **p1**");

        let out = render(without_authors(comment_event("comment.deleted", "p1", "page", "u1"))).await;
        assert_eq!(out.body, "Comment deleted on **p1**");
    }

    #[tokio::test]
    async fn comment_without_page_is_generic() {
        let cases = [
            ("comment.created", "**user: u1** added a comment", "New comment was added"),
            ("comment.updated", "**user: u1** updated a comment", "Comment was updated"),
            ("comment.deleted", "**user: u1** deleted a comment", "Comment was deleted"),
        ];

        for (ty, active, passive) in cases {
            let mut payload = comment_event(ty, "p1", "page", "u1");
            payload["data"] = json!({});
            let out = render(payload.clone()).await;
            assert_eq!(out, FormattedMessage::new(GENERIC_UPDATE_TOPIC, active));

            let out = render(without_authors(payload)).await;
            assert_eq!(out, FormattedMessage::new(GENERIC_UPDATE_TOPIC, passive));
        }
    }

    #[tokio::test]
    async fn comment_without_page_skips_title_lookup() {
        let lookup = MockLookup::new();
        let mut payload = comment_event("comment.created", "p1", "page", "u1");
        payload["data"] = Value::Null;
        let event = decode(payload);

        Formatter::for_event(EventType::CommentCreated)
            .format(&event, &Resolver::new(Some(&lookup)))
            .await;

        assert_eq!(lookup.calls(), vec!["user:u1".to_string()]);
    }

    #[tokio::test]
    async fn entity_lookups_run_title_then_author() {
        let lookup = MockLookup::new();
        let event = decode(entity_event("database.moved", "db-1", "u1"));

        Formatter::for_event(EventType::DatabaseMoved)
            .format(&event, &Resolver::new(Some(&lookup)))
            .await;

        assert_eq!(
            lookup.calls(),
            vec!["database:db-1".to_string(), "user:u1".to_string()]
        );
    }

    #[tokio::test]
    async fn every_formatter_yields_non_empty_output() {
        for ty in EventType::ALL {
            for payload in [
                json!({ "type": ty.as_str() }),
                entity_event(ty.as_str(), "e1", "u1"),
                comment_event(ty.as_str(), "p1", "block", ""),
            ] {
                let out = render(payload).await;
                assert!(!out.body.is_empty(), "{ty}");
                assert!(!out.topic_hint.is_empty(), "{ty}");
            }
        }
    }
}
