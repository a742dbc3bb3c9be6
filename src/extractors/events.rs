// src/extractors/events.rs
use std::collections::HashSet;

use crate::inference::EntitySpan;

/// Entity categories kept as events: organizations and locations are
/// usually the "who" and "where" of a news event.
// TODO: dslim/bert-base-NER never emits EVENT; drop it or add a model that does
pub const EVENT_CATEGORIES: &[&str] = &["EVENT", "MISC", "ORG", "LOC"];
pub const DEFAULT_MAX_EVENTS: usize = 15;

/// Deduplicated entity texts in first-seen order.
pub type EventList = Vec<String>;

#[derive(Debug, Clone)]
pub struct EventListBuilder {
    max_count: usize,
}

impl EventListBuilder {
    pub fn new(max_count: usize) -> Self {
        Self { max_count }
    }

    /// Filter by category, drop repeated texts, keep the first `max_count`.
    pub fn build<'a, I>(&self, spans: I) -> EventList
    where
        I: IntoIterator<Item = &'a EntitySpan>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut events = EventList::new();

        for span in spans {
            if events.len() >= self.max_count {
                break;
            }
            if !EVENT_CATEGORIES.contains(&span.category.as_str()) {
                continue;
            }
            if seen.insert(span.text.as_str()) {
                events.push(span.text.clone());
            }
        }

        tracing::debug!("Built event list with {} entries", events.len());
        events
    }
}

impl Default for EventListBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_EVENTS)
    }
}
