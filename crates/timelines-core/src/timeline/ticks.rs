//! Ruler tick markers.
//!
//! Ticks are produced lazily by [`TickIter`]; [`generate_ticks`] collects
//! them. The center marker is computed on its own from the center date, not
//! picked out of the tick list, because the tick sequence does not always
//! land exactly on the center date.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::range::{floor_to, VisibleRange};
use crate::scale::Scale;

/// A single mark on the ruler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickMarker {
    pub date: NaiveDate,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
    pub is_primary: bool,
    pub is_secondary: bool,
}

impl TickMarker {
    /// Build the marker for `date` at `scale`. Flags depend only on the date.
    pub fn for_date(date: NaiveDate, scale: Scale) -> Self {
        let year = date.year();
        let (label, sub_label, is_primary, is_secondary) = match scale {
            Scale::Day => (
                date.format("%b %-d, %Y").to_string(),
                Some(date.format("%A").to_string()),
                date.day() == 1,
                matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            ),
            Scale::Month => (
                date.format("%B %Y").to_string(),
                None,
                date.month() == 1,
                date.month() % 3 == 0,
            ),
            Scale::Year => (
                date.format("%Y").to_string(),
                None,
                year.rem_euclid(10) == 0,
                year.rem_euclid(5) == 0,
            ),
            Scale::Decade => {
                let decade = floor_to(year, 10);
                (
                    format!("{decade}s"),
                    None,
                    decade.rem_euclid(100) == 0,
                    decade.rem_euclid(50) == 0,
                )
            }
            Scale::Century => {
                let century = floor_to(year, 100);
                (
                    format!("{century}s"),
                    None,
                    century.rem_euclid(1000) == 0,
                    century.rem_euclid(500) == 0,
                )
            }
            Scale::Millennium | Scale::Era | Scale::Prehistoric => {
                (date.format("%Y").to_string(), None, false, false)
            }
        };
        Self {
            date,
            label,
            sub_label,
            is_primary,
            is_secondary,
        }
    }

    /// Visual weight of this tick relative to the center marker.
    pub fn emphasis(&self, center: &CenterMarker) -> TickEmphasis {
        if center.is_current(self) {
            TickEmphasis::Current
        } else if self.is_primary {
            TickEmphasis::Primary
        } else if self.is_secondary {
            TickEmphasis::Secondary
        } else {
            TickEmphasis::Normal
        }
    }
}

/// Rendering weight of a tick, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickEmphasis {
    Normal,
    Secondary,
    Primary,
    Current,
}

/// Label for the center date, independent of the tick sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CenterMarker {
    pub date: NaiveDate,
    pub scale: Scale,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_label: Option<String>,
}

impl CenterMarker {
    pub fn new(date: NaiveDate, scale: Scale) -> Self {
        let (label, sub_label) = match scale {
            Scale::Day => (
                date.format("%B %-d, %Y").to_string(),
                Some(date.format("%A").to_string()),
            ),
            Scale::Month => (date.format("%B %Y").to_string(), None),
            Scale::Decade => (format!("{}s", floor_to(date.year(), 10)), None),
            Scale::Century => (format!("{}s", floor_to(date.year(), 100)), None),
            Scale::Year | Scale::Millennium | Scale::Era | Scale::Prehistoric => {
                (date.format("%Y").to_string(), None)
            }
        };
        Self {
            date,
            scale,
            label,
            sub_label,
        }
    }

    /// Whether `tick` falls in the same day / month / year / decade /
    /// century as the center date.
    pub fn is_current(&self, tick: &TickMarker) -> bool {
        bucket(self.date, self.scale) == bucket(tick.date, self.scale)
    }
}

/// Convenience function for [`CenterMarker::new`].
pub fn center_marker(center: NaiveDate, scale: Scale) -> CenterMarker {
    CenterMarker::new(center, scale)
}

fn bucket(date: NaiveDate, scale: Scale) -> (i32, u32, u32) {
    match scale {
        Scale::Day => (date.year(), date.month(), date.day()),
        Scale::Month => (date.year(), date.month(), 0),
        Scale::Decade => (floor_to(date.year(), 10), 0, 0),
        Scale::Century => (floor_to(date.year(), 100), 0, 0),
        Scale::Year | Scale::Millennium | Scale::Era | Scale::Prehistoric => (date.year(), 0, 0),
    }
}

/// Lazy, finite iterator over the ticks of a range.
#[derive(Debug, Clone)]
pub struct TickIter {
    scale: Scale,
    origin: Origin,
    end: NaiveDate,
    index: u32,
    exhausted: bool,
}

#[derive(Debug, Clone, Copy)]
enum Origin {
    /// Step by calendar units from this date.
    Date(NaiveDate),
    /// Jan 1 of `first + step * index`.
    Aligned { first: i32, step: i32 },
}

impl TickIter {
    pub fn new(range: &VisibleRange, scale: Scale) -> Self {
        let start = range.start();
        let origin = match scale {
            Scale::Decade => Origin::Aligned {
                first: floor_to(start.year(), 10),
                step: 10,
            },
            Scale::Century => Origin::Aligned {
                first: floor_to(start.year(), 100),
                step: 100,
            },
            _ => Origin::Date(start),
        };
        Self {
            scale,
            origin,
            end: range.end(),
            index: 0,
            exhausted: false,
        }
    }

    /// Date of the `index`-th step. `Err(())` means the step lies before
    /// the representable range and should be skipped.
    fn date_at(&self, index: u32) -> Result<Option<NaiveDate>, ()> {
        match self.origin {
            Origin::Date(origin) => Ok(match self.scale {
                Scale::Day => origin.checked_add_days(Days::new(u64::from(index))),
                Scale::Month => origin.checked_add_months(Months::new(index)),
                _ => index
                    .checked_mul(12)
                    .and_then(|months| origin.checked_add_months(Months::new(months))),
            }),
            Origin::Aligned { first, step } => {
                let Some(year) = i32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_mul(step))
                    .and_then(|offset| first.checked_add(offset))
                else {
                    return Ok(None);
                };
                if year < NaiveDate::MIN.year() {
                    return Err(());
                }
                Ok(NaiveDate::from_ymd_opt(year, 1, 1))
            }
        }
    }
}

impl Iterator for TickIter {
    type Item = TickMarker;

    fn next(&mut self) -> Option<TickMarker> {
        while !self.exhausted {
            let index = self.index;
            match index.checked_add(1) {
                Some(next) => self.index = next,
                None => self.exhausted = true,
            }
            match self.date_at(index) {
                Err(()) => continue,
                Ok(Some(date)) if date <= self.end => {
                    return Some(TickMarker::for_date(date, self.scale));
                }
                Ok(_) => self.exhausted = true,
            }
        }
        None
    }
}

/// All ticks for `range` at `scale`, ordered by date.
///
/// Steps are one day, month, year, decade or century; scales coarser than
/// century step yearly across the full range with no emphasis flags.
/// Decade and century ticks sit on Jan 1 of each aligned decade/century,
/// starting from the one containing `range.start()`.
pub fn generate_ticks(range: &VisibleRange, scale: Scale) -> Vec<TickMarker> {
    TickIter::new(range, scale).collect()
}

/// Ticks, center marker and scale for one view, as a ruler renders them.
#[derive(Debug, Clone, Serialize)]
pub struct Ruler {
    pub scale: Scale,
    pub range: VisibleRange,
    pub center: CenterMarker,
    pub ticks: Vec<TickMarker>,
}

impl Ruler {
    pub fn build(center: NaiveDate, scale: Scale) -> Self {
        Self::for_range(VisibleRange::compute(center, scale), center, scale)
    }

    pub fn for_range(range: VisibleRange, center: NaiveDate, scale: Scale) -> Self {
        Self {
            scale,
            range,
            center: CenterMarker::new(center, scale),
            ticks: generate_ticks(&range, scale),
        }
    }

    pub fn emphasis(&self, index: usize) -> Option<TickEmphasis> {
        self.ticks.get(index).map(|tick| tick.emphasis(&self.center))
    }

    /// Horizontal position of tick `index` in `0.0..=1.0`.
    pub fn position(&self, index: usize) -> Option<f64> {
        match self.ticks.len() {
            0 => None,
            _ if index >= self.ticks.len() => None,
            1 => Some(0.5),
            len => Some(index as f64 / (len - 1) as f64),
        }
    }

    /// First, middle (only with more than two ticks) and last labels.
    pub fn summary_labels(&self) -> Option<(&str, Option<&str>, &str)> {
        let first = self.ticks.first()?;
        let last = self.ticks.last()?;
        let middle = (self.ticks.len() > 2).then(|| self.ticks[self.ticks.len() / 2].label.as_str());
        Some((first.label.as_str(), middle, last.label.as_str()))
    }
}
