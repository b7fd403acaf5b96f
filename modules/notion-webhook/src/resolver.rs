//! Best-effort naming of entities and authors.
//!
//! Every lookup failure is absorbed here and replaced with deterministic
//! fallback text, so formatters never see an error.

use serde_json::Value;
use tracing::warn;

use crate::event::{AuthorRef, EntityKind};
use crate::traits::NotionLookup;

/// Property names tried first when looking for a page title.
const COMMON_TITLE_PROPERTIES: [&str; 4] = ["title", "Title", "Name", "name"];

/// Name used when an author entry has no id.
pub const ANONYMOUS_USER: &str = "Notion User";

/// Resolves ids to display text. Without a lookup capability every id
/// resolves to itself (or `user: {id}` for people).
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    lookup: Option<&'a dyn NotionLookup>,
}

impl<'a> Resolver<'a> {
    pub fn new(lookup: Option<&'a dyn NotionLookup>) -> Self {
        Self { lookup }
    }

    /// A resolver with no credential: titles are ids, users are `user: {id}`.
    pub fn offline() -> Self {
        Self { lookup: None }
    }

    pub fn is_online(&self) -> bool {
        self.lookup.is_some()
    }

    /// Title of a page, database or data source. Callers must not pass an empty id.
    pub async fn title(&self, kind: EntityKind, id: &str) -> String {
        let Some(lookup) = self.lookup else {
            return id.to_string();
        };

        let record = match kind {
            EntityKind::Page => lookup.page(id).await,
            EntityKind::Database | EntityKind::DataSource => lookup.database(id).await,
        };

        match record {
            Ok(record) => match kind {
                EntityKind::Page => extract_page_title(&record),
                EntityKind::Database | EntityKind::DataSource => extract_database_title(&record),
            },
            Err(e) => {
                warn!(%kind, id, error = %e, "Title lookup failed, falling back to id");
                id.to_string()
            }
        }
    }

    /// Display string for the event's authors. Empty when there are none.
    pub async fn author(&self, authors: &[AuthorRef]) -> String {
        let Some(first) = authors.first() else {
            return String::new();
        };

        let name = self.user_name(&first.id).await;
        with_coauthors(name, authors.len() - 1)
    }

    /// Display name for a single user id.
    pub async fn user_name(&self, id: &str) -> String {
        if id.is_empty() {
            return ANONYMOUS_USER.to_string();
        }
        let Some(lookup) = self.lookup else {
            return user_fallback(id);
        };

        match lookup.user(id).await {
            Ok(record) => user_display_name(&record).unwrap_or_else(|| user_fallback(id)),
            Err(e) => {
                warn!(user_id = id, error = %e, "User lookup failed, falling back to id");
                user_fallback(id)
            }
        }
    }
}

fn user_fallback(id: &str) -> String {
    format!("user: {id}")
}

/// Append ` (+N other)` / ` (+N others)` when more authors follow the first.
pub fn with_coauthors(name: String, others: usize) -> String {
    match others {
        0 => name,
        1 => format!("{name} (+1 other)"),
        n => format!("{name} (+{n} others)"),
    }
}

/// Title of a page record, or `"Untitled Page"`.
///
/// Pages keep their title in whichever property has type `title`. The usual
/// names are tried first, then every property in document order.
pub fn extract_page_title(record: &Value) -> String {
    let Some(properties) = record.get("properties").and_then(Value::as_object) else {
        return EntityKind::Page.untitled().to_string();
    };

    COMMON_TITLE_PROPERTIES
        .iter()
        .filter_map(|name| properties.get(*name))
        .chain(properties.values())
        .find_map(title_property_text)
        .unwrap_or_else(|| EntityKind::Page.untitled().to_string())
}

fn title_property_text(property: &Value) -> Option<String> {
    if property.get("type")?.as_str()? != "title" {
        return None;
    }
    let text = property
        .get("title")?
        .as_array()?
        .first()?
        .get("plain_text")?
        .as_str()?;
    (!text.is_empty()).then(|| text.to_string())
}

/// Title of a database or data source record, or `"Untitled Database"`.
pub fn extract_database_title(record: &Value) -> String {
    record
        .get("title")
        .and_then(Value::as_array)
        .and_then(|spans| {
            spans
                .iter()
                .filter_map(|span| span.get("plain_text")?.as_str())
                .find(|text| !text.is_empty())
        })
        .map(str::to_string)
        .unwrap_or_else(|| EntityKind::Database.untitled().to_string())
}

/// `name` if set, otherwise a name derived from a person's email local part.
pub fn user_display_name(record: &Value) -> Option<String> {
    if let Some(name) = record
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
    {
        return Some(name.to_string());
    }

    if record.get("type").and_then(Value::as_str) != Some("person") {
        return None;
    }

    let email = record.get("person")?.get("email")?.as_str()?;
    let local_part = email.split('@').next().unwrap_or_default();
    let name = title_case(&local_part.replace('.', " "));
    (!name.is_empty()).then_some(name)
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
