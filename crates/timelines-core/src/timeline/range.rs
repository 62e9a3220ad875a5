//! Visible date window for a center date and scale.
//!
//! All arithmetic is calendar-aware (month and year rollover, month-end
//! clamping). Dates that would leave chrono's representable range saturate
//! at [`NaiveDate::MIN`] / [`NaiveDate::MAX`], so computing a window never
//! fails.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::scale::Scale;

/// Inclusive date window. Invariant: `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl VisibleRange {
    /// Build a range from explicit bounds.
    ///
    /// # Errors
    /// Returns an error if `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// The window shown for `center` at `scale`.
    ///
    /// | scale   | start                    | end                        |
    /// |---------|--------------------------|----------------------------|
    /// | day     | center - 10 days         | center + 10 days           |
    /// | month   | 1st of month - 6 months  | last day of month + 5      |
    /// | year    | Jan 1, year - 5          | Dec 31, year + 5           |
    /// | decade  | Jan 1, decade - 20       | Dec 31, decade + 30        |
    /// | century | Jan 1, century - 100     | Dec 31, century + 200      |
    /// | other   | same as year             | same as year               |
    ///
    /// The decade and century windows are intentionally asymmetric.
    pub fn compute(center: NaiveDate, scale: Scale) -> Self {
        let year = center.year();
        let (start, end) = match scale {
            Scale::Day => (
                center.checked_sub_days(Days::new(10)).unwrap_or(NaiveDate::MIN),
                center.checked_add_days(Days::new(10)).unwrap_or(NaiveDate::MAX),
            ),
            Scale::Month => {
                let first = first_of_month(center);
                let start = first
                    .checked_sub_months(Months::new(6))
                    .unwrap_or(NaiveDate::MIN);
                let end = first
                    .checked_add_months(Months::new(6))
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(NaiveDate::MAX);
                (start, end)
            }
            Scale::Decade => {
                let decade = floor_to(year, 10);
                (jan_first(decade.saturating_sub(20)), dec_last(decade.saturating_add(30)))
            }
            Scale::Century => {
                let century = floor_to(year, 100);
                (jan_first(century.saturating_sub(100)), dec_last(century.saturating_add(200)))
            }
            Scale::Year | Scale::Millennium | Scale::Era | Scale::Prehistoric => {
                (jan_first(year.saturating_sub(5)), dec_last(year.saturating_add(5)))
            }
        };
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days from start to end (0 for a single-day range).
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Convenience function for [`VisibleRange::compute`].
pub fn compute_visible_range(center: NaiveDate, scale: Scale) -> VisibleRange {
    VisibleRange::compute(center, scale)
}

/// Round `year` down to a multiple of `step` (floor division, so -5 -> -10).
pub(crate) fn floor_to(year: i32, step: i32) -> i32 {
    year.div_euclid(step) * step
}

pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub(crate) fn jan_first(year: i32) -> NaiveDate {
    clamped_ymd(year, 1, 1)
}

pub(crate) fn dec_last(year: i32) -> NaiveDate {
    clamped_ymd(year, 12, 31)
}

fn clamped_ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if year < NaiveDate::MIN.year() {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_window_is_ten_days_each_side() {
        let range = VisibleRange::compute(date(2024, 6, 15), Scale::Day);
        assert_eq!(range.start(), date(2024, 6, 5));
        assert_eq!(range.end(), date(2024, 6, 25));
    }

    #[test]
    fn day_window_rolls_over_month_and_year() {
        let range = VisibleRange::compute(date(2024, 1, 3), Scale::Day);
        assert_eq!(range.start(), date(2023, 12, 24));
        assert_eq!(range.end(), date(2024, 1, 13));
    }

    #[test]
    fn month_window_ends_on_last_day_of_terminal_month() {
        let range = VisibleRange::compute(date(2024, 6, 15), Scale::Month);
        assert_eq!(range.start(), date(2023, 12, 1));
        assert_eq!(range.end(), date(2024, 11, 30));
    }

    #[test]
    fn month_window_handles_leap_february() {
        let range = VisibleRange::compute(date(2023, 9, 30), Scale::Month);
        assert_eq!(range.start(), date(2023, 3, 1));
        assert_eq!(range.end(), date(2024, 2, 29));
    }

    #[test]
    fn year_window() {
        let range = VisibleRange::compute(date(2000, 1, 1), Scale::Year);
        assert_eq!(range.start(), date(1995, 1, 1));
        assert_eq!(range.end(), date(2005, 12, 31));
    }

    #[test]
    fn decade_window_is_asymmetric() {
        let range = VisibleRange::compute(date(1987, 4, 2), Scale::Decade);
        assert_eq!(range.start(), date(1960, 1, 1));
        assert_eq!(range.end(), date(2010, 12, 31));
    }

    #[test]
    fn century_window_is_asymmetric() {
        let range = VisibleRange::compute(date(1969, 7, 20), Scale::Century);
        assert_eq!(range.start(), date(1800, 1, 1));
        assert_eq!(range.end(), date(2100, 12, 31));
    }

    #[test]
    fn coarse_scales_fall_back_to_year_window() {
        let center = date(1500, 3, 3);
        let year = VisibleRange::compute(center, Scale::Year);
        for scale in [Scale::Millennium, Scale::Era, Scale::Prehistoric] {
            assert_eq!(VisibleRange::compute(center, scale), year);
        }
    }

    #[test]
    fn negative_years_floor_downward() {
        assert_eq!(floor_to(-5, 10), -10);
        assert_eq!(floor_to(-150, 100), -200);
        let range = VisibleRange::compute(date(-5, 6, 1), Scale::Decade);
        assert_eq!(range.start(), date(-30, 1, 1));
        assert_eq!(range.end(), date(20, 12, 31));
    }

    #[test]
    fn extremes_saturate_instead_of_failing() {
        let low = VisibleRange::compute(NaiveDate::MIN, Scale::Century);
        assert_eq!(low.start(), NaiveDate::MIN);
        assert!(low.contains(NaiveDate::MIN));

        let high = VisibleRange::compute(NaiveDate::MAX, Scale::Day);
        assert_eq!(high.end(), NaiveDate::MAX);
        assert!(high.contains(NaiveDate::MAX));
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(VisibleRange::new(date(2020, 1, 2), date(2020, 1, 1)).is_err());
        let single = VisibleRange::new(date(2020, 1, 1), date(2020, 1, 1)).unwrap();
        assert_eq!(single.span_days(), 0);
    }

    #[test]
    fn contains_is_inclusive() {
        let range = VisibleRange::new(date(2020, 1, 1), date(2020, 1, 31)).unwrap();
        assert!(range.contains(date(2020, 1, 1)));
        assert!(range.contains(date(2020, 1, 31)));
        assert!(!range.contains(date(2020, 2, 1)));
    }
}
