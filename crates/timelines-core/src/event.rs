//! Timeline event records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Visual rank of an event, `P0` highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventPriority {
    P0,
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
    P7,
    P8,
    P9,
}

impl EventPriority {
    pub const ALL: [EventPriority; 10] = [
        Self::P0,
        Self::P1,
        Self::P2,
        Self::P3,
        Self::P4,
        Self::P5,
        Self::P6,
        Self::P7,
        Self::P8,
        Self::P9,
    ];

    /// 0 for `P0` through 9 for `P9`.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P0 => "P0",
            Self::P1 => "P1",
            Self::P2 => "P2",
            Self::P3 => "P3",
            Self::P4 => "P4",
            Self::P5 => "P5",
            Self::P6 => "P6",
            Self::P7 => "P7",
            Self::P8 => "P8",
            Self::P9 => "P9",
        }
    }
}

impl Default for EventPriority {
    fn default() -> Self {
        Self::P5
    }
}

impl fmt::Display for EventPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == upper)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "priority".to_string(),
                message: format!("expected P0..P9, got '{s}'"),
            })
    }
}

/// Calendar system the event date was recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeType {
    #[default]
    Gregorian,
    Lunar,
    Islamic,
}

/// A single historical event.
///
/// Events are created by a data source at fetch time and never mutated by
/// the navigation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub title: String,
    pub description: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub priority: EventPriority,
    #[serde(default)]
    pub time_type: TimeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_events: Vec<String>,
    #[serde(default)]
    pub conflict_flag: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl TimelineEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        priority: EventPriority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            start_date,
            end_date: None,
            priority,
            time_type: TimeType::default(),
            group: None,
            tags: Vec::new(),
            related_events: Vec::new(),
            conflict_flag: false,
            version: None,
            location: None,
            url: None,
            image_url: None,
            source: None,
        }
    }

    /// [`TimelineEvent::new`] with an optional end date.
    ///
    /// # Errors
    /// Returns an error if `end_date` precedes `start_date`.
    pub fn try_new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        priority: EventPriority,
    ) -> Result<Self, ValidationError> {
        let event = Self::new(id, title, description, start_date, priority);
        match end_date {
            Some(end) => event.try_with_end_date(end),
            None => Ok(event),
        }
    }

    /// Set the end date.
    ///
    /// # Errors
    /// Returns an error if `end_date` precedes the start date.
    pub fn try_with_end_date(mut self, end_date: NaiveDate) -> Result<Self, ValidationError> {
        if end_date < self.start_date {
            return Err(ValidationError::InvalidDateRange {
                start: self.start_date,
                end: end_date,
            });
        }
        self.end_date = Some(end_date);
        Ok(self)
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_related(mut self, id: impl Into<String>) -> Self {
        self.related_events.push(id.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Inclusive span in days; single-day events (no end date) span 1.
    pub fn duration_days(&self) -> i64 {
        self.end_date
            .map(|end| (end - self.start_date).num_days() + 1)
            .unwrap_or(1)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_date_before_start_is_rejected() {
        let event = TimelineEvent::new("e1", "t", "d", date(2008, 8, 8), EventPriority::P1);
        let err = event.try_with_end_date(date(2008, 8, 7)).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateRange { .. }));
    }

    #[test]
    fn try_new_validates_optional_end() {
        let games = TimelineEvent::try_new(
            "CN-2008-001",
            "Beijing Olympics",
            "",
            date(2008, 8, 8),
            Some(date(2008, 8, 24)),
            EventPriority::P1,
        )
        .unwrap();
        assert_eq!(games.end_date, Some(date(2008, 8, 24)));

        let open = TimelineEvent::try_new("e", "t", "d", date(2008, 8, 8), None, EventPriority::P1).unwrap();
        assert!(open.end_date.is_none());

        let err = TimelineEvent::try_new("e", "t", "d", date(2008, 8, 8), Some(date(2008, 8, 1)), EventPriority::P1)
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidDateRange {
                start: date(2008, 8, 8),
                end: date(2008, 8, 1),
            }
        );
    }

    #[test]
    fn duration_is_inclusive() {
        let event = TimelineEvent::new("e1", "t", "d", date(2008, 8, 8), EventPriority::P1)
            .try_with_end_date(date(2008, 8, 24))
            .unwrap();
        assert_eq!(event.duration_days(), 17);

        let single = TimelineEvent::new("e2", "t", "d", date(2001, 9, 11), EventPriority::P0);
        assert_eq!(single.duration_days(), 1);
    }

    #[test]
    fn priority_parses_and_ranks() {
        assert_eq!("p3".parse::<EventPriority>().unwrap(), EventPriority::P3);
        assert!("P10".parse::<EventPriority>().is_err());
        assert!(EventPriority::P0 < EventPriority::P9);
        assert_eq!(EventPriority::P7.rank(), 7);
    }

    #[test]
    fn serializes_camel_case_and_skips_empty() {
        let event = TimelineEvent::new("e1", "Moon landing", "Apollo 11", date(1969, 7, 20), EventPriority::P0)
            .with_tags(["science"]);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["startDate"], "1969-07-20");
        assert_eq!(json["priority"], "P0");
        assert_eq!(json["timeType"], "gregorian");
        assert!(json.get("endDate").is_none());
        assert!(json.get("relatedEvents").is_none());

        let parsed: TimelineEvent = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, event);
    }
}
