//! Event visibility and query filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::range::VisibleRange;
use crate::event::{EventPriority, TimelineEvent};

/// Events whose start date lies inside `range` (both bounds inclusive).
///
/// Only the start date is considered: an event that began before the window
/// and is still running inside it is not visible.
pub fn filter_visible<'a>(events: &'a [TimelineEvent], range: &VisibleRange) -> Vec<&'a TimelineEvent> {
    events
        .iter()
        .filter(|event| range.contains(event.start_date))
        .collect()
}

/// Query over events. Every populated criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Inclusive lower bound on the start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the start date.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub priorities: Vec<EventPriority>,
    /// Matches when the event carries any of these tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Case-insensitive substring of title, description, location or a tag.
    #[serde(default)]
    pub search: Option<String>,
    /// Matches when the event source starts with any of these prefixes.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the start dates of `range`.
    pub fn within(mut self, range: &VisibleRange) -> Self {
        self.start_date = Some(range.start());
        self.end_date = Some(range.end());
        self
    }

    pub fn with_priority(mut self, priority: EventPriority) -> Self {
        self.priorities.push(priority);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_source(mut self, prefix: impl Into<String>) -> Self {
        self.sources.push(prefix.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, event: &TimelineEvent) -> bool {
        if self.start_date.is_some_and(|start| event.start_date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| event.start_date > end) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&event.priority) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|tag| event.has_tag(tag)) {
            return false;
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            let hit = event.title.to_lowercase().contains(&needle)
                || event.description.to_lowercase().contains(&needle)
                || event
                    .location
                    .as_deref()
                    .is_some_and(|loc| loc.to_lowercase().contains(&needle))
                || event.tags.iter().any(|tag| tag.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        if !self.sources.is_empty() {
            let source = event.source.as_deref().unwrap_or_default();
            if !self.sources.iter().any(|prefix| source.starts_with(prefix.as_str())) {
                return false;
            }
        }
        true
    }

    pub fn apply(&self, events: Vec<TimelineEvent>) -> Vec<TimelineEvent> {
        events.into_iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: NaiveDate) -> TimelineEvent {
        TimelineEvent::new(id, format!("Event {id}"), "desc", start, EventPriority::P1)
    }

    #[test]
    fn visible_bounds_are_inclusive() {
        let range = VisibleRange::new(date(2000, 1, 1), date(2000, 12, 31)).unwrap();
        let events = vec![
            event("before", date(1999, 12, 31)),
            event("start", date(2000, 1, 1)),
            event("mid", date(2000, 6, 1)),
            event("end", date(2000, 12, 31)),
            event("after", date(2001, 1, 1)),
        ];
        let ids: Vec<_> = filter_visible(&events, &range).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["start", "mid", "end"]);
    }

    #[test]
    fn visibility_ignores_end_date() {
        let range = VisibleRange::new(date(2000, 1, 1), date(2000, 12, 31)).unwrap();
        let spanning = event("war", date(1999, 6, 1))
            .try_with_end_date(date(2000, 6, 1))
            .unwrap();
        assert!(filter_visible(&[spanning], &range).is_empty());
    }

    #[test]
    fn search_covers_title_description_location_and_tags() {
        let e = event("a", date(1969, 7, 20))
            .with_location("Sea of Tranquility")
            .with_tags(["Space Exploration"]);
        assert!(EventFilter::new().with_search("event A").matches(&e));
        assert!(EventFilter::new().with_search("DESC").matches(&e));
        assert!(EventFilter::new().with_search("tranquility").matches(&e));
        assert!(EventFilter::new().with_search("exploration").matches(&e));
        assert!(!EventFilter::new().with_search("mars").matches(&e));
    }

    #[test]
    fn tags_match_any() {
        let e = event("a", date(1969, 7, 20)).with_tags(["science", "space"]);
        assert!(EventFilter::new().with_tag("space").with_tag("war").matches(&e));
        assert!(!EventFilter::new().with_tag("war").matches(&e));
    }

    #[test]
    fn priority_and_source_criteria() {
        let e = event("a", date(1969, 7, 20)).with_source("mysql://localhost:3306/timeline_events");
        assert!(EventFilter::new().with_priority(EventPriority::P1).matches(&e));
        assert!(!EventFilter::new().with_priority(EventPriority::P0).matches(&e));
        assert!(EventFilter::new().with_source("mysql://").matches(&e));
        assert!(!EventFilter::new().with_source("rest://").matches(&e));
        assert!(!EventFilter::new().with_source("local").matches(&event("b", date(1969, 1, 1))));
    }

    #[test]
    fn within_range_matches_visible_filter() {
        let range = VisibleRange::new(date(2000, 1, 1), date(2000, 12, 31)).unwrap();
        let events = vec![event("a", date(2000, 1, 1)), event("b", date(2001, 1, 1))];
        let filtered = EventFilter::new().within(&range).apply(events);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "a");
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = EventFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(&event("a", date(1, 1, 1))));
        assert!(!filter.with_search("x").is_empty());
    }
}
