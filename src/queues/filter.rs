//! Queue name filtering

use regex::{Regex, RegexBuilder};

use super::types::{display_name, QueueUrl};

/// A compiled, case-insensitive name pattern
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: String,
    regex: Regex,
}

impl NameFilter {
    /// Compile a pattern. The error carries the regex engine's explanation.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Compile an optional pattern; empty or absent means no filtering
    pub fn from_option(pattern: Option<&str>) -> Result<Option<Self>, regex::Error> {
        match pattern {
            Some(p) if !p.is_empty() => Self::new(p).map(Some),
            _ => Ok(None),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Search (not full match) against the queue's display name
    pub fn matches(&self, queue_url: &str) -> bool {
        self.regex.is_match(display_name(queue_url))
    }

    pub fn apply(&self, queue_urls: Vec<QueueUrl>) -> Vec<QueueUrl> {
        queue_urls
            .into_iter()
            .filter(|url| self.matches(url))
            .collect()
    }
}

/// Keep the queues whose display name matches `filter`; no filter keeps all
pub fn filter_queues(queue_urls: Vec<QueueUrl>, filter: Option<&NameFilter>) -> Vec<QueueUrl> {
    match filter {
        Some(f) => f.apply(queue_urls),
        None => queue_urls,
    }
}
