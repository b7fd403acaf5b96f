/// Topic every message lands in unless pages are mapped to their own topics.
pub const DEFAULT_TOPIC: &str = "Notion";

/// Pick the final topic.
///
/// A non-empty user-specified topic always wins. Otherwise everything goes to
/// [`DEFAULT_TOPIC`] unless `map_pages_to_topics` is set, in which case the
/// formatter's hint is used as-is.
pub fn route(topic_hint: &str, user_topic: Option<&str>, map_pages_to_topics: bool) -> String {
    match user_topic.filter(|t| !t.is_empty()) {
        Some(topic) => topic.to_string(),
        None if !map_pages_to_topics => DEFAULT_TOPIC.to_string(),
        None => topic_hint.to_string(),
    }
}
