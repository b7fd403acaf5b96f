//! Per-integration event filtering (`only_events` / `exclude_events`).

use regex::Regex;
use tracing::warn;

/// Patterns are matched against the complete event type. `*` matches any run
/// of characters, `?` a single character.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    only: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl EventFilter {
    /// Build from comma-separated query values.
    pub fn from_query(only: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            only: parse_patterns(only),
            exclude: parse_patterns(exclude),
        }
    }

    pub fn allows(&self, event_type: &str) -> bool {
        if !self.only.is_empty() && !self.only.iter().any(|re| re.is_match(event_type)) {
            return false;
        }
        !self.exclude.iter().any(|re| re.is_match(event_type))
    }
}

fn parse_patterns(raw: Option<&str>) -> Vec<Regex> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|pattern| match wildcard_regex(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern, error = %e, "Ignoring unusable event pattern");
                None
            }
        })
        .collect()
}

/// Anchored regex for a `*` / `?` wildcard pattern; everything else is literal.
fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let body = regex::escape(pattern)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    Regex::new(&format!("^(?:{body})$"))
}
