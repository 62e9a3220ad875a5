//! Property tests for the date-scale engine.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use timelines_core::{
    filter_visible, generate_ticks, EventPriority, Scale, TimelineEvent, VisibleRange,
};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1100i32..8000, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn arb_scale() -> impl Strategy<Value = Scale> {
    prop::sample::select(Scale::ALL.to_vec())
}

proptest! {
    #[test]
    fn range_contains_center(center in arb_date(), scale in arb_scale()) {
        let range = VisibleRange::compute(center, scale);
        prop_assert!(range.start() <= center && center <= range.end());
    }

    #[test]
    fn range_is_idempotent(center in arb_date(), scale in arb_scale()) {
        prop_assert_eq!(VisibleRange::compute(center, scale), VisibleRange::compute(center, scale));
    }

    #[test]
    fn coarser_scales_are_wider(center in arb_date()) {
        let width = |scale| VisibleRange::compute(center, scale).span_days();
        prop_assert!(width(Scale::Day) <= width(Scale::Month));
        prop_assert!(width(Scale::Month) <= width(Scale::Year));
        prop_assert!(width(Scale::Year) <= width(Scale::Decade));
        prop_assert!(width(Scale::Decade) <= width(Scale::Century));
    }

    #[test]
    fn ticks_increase_and_stay_near_range(center in arb_date(), scale in arb_scale()) {
        let range = VisibleRange::compute(center, scale);
        let ticks = generate_ticks(&range, scale);
        prop_assert!(!ticks.is_empty());
        prop_assert!(ticks.windows(2).all(|w| w[0].date < w[1].date));
        prop_assert!(ticks.iter().all(|t| t.date <= range.end()));
    }

    #[test]
    fn year_tick_flags_follow_the_year(center in arb_date()) {
        let range = VisibleRange::compute(center, Scale::Year);
        for tick in generate_ticks(&range, Scale::Year) {
            let year = tick.date.year();
            prop_assert_eq!(tick.is_primary, year % 10 == 0);
            prop_assert_eq!(tick.is_secondary, year % 5 == 0);
            prop_assert_eq!(tick.label, year.to_string());
        }
    }

    #[test]
    fn visibility_matches_range_bounds(center in arb_date(), scale in arb_scale(), offset in -40_000i64..40_000) {
        let range = VisibleRange::compute(center, scale);
        let Some(start) = center.checked_add_signed(chrono::Duration::days(offset)) else {
            return Ok(());
        };
        let events = vec![TimelineEvent::new("e", "Event", "", start, EventPriority::P5)];
        let visible = filter_visible(&events, &range);
        prop_assert_eq!(visible.len() == 1, range.start() <= start && start <= range.end());
    }
}

#[test]
fn zoom_walks_every_scale_in_order() {
    let mut scale = Scale::Prehistoric;
    let mut seen = vec![scale];
    while !scale.is_finest() {
        scale = scale.zoom_in();
        seen.push(scale);
    }
    seen.reverse();
    assert_eq!(seen, Scale::ALL.to_vec());
}

#[test]
fn boundary_events_are_visible() {
    let range = VisibleRange::compute(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), Scale::Year);
    let events = vec![
        TimelineEvent::new("first", "First", "", range.start(), EventPriority::P1),
        TimelineEvent::new("last", "Last", "", range.end(), EventPriority::P1),
        TimelineEvent::new("after", "After", "", range.end().succ_opt().unwrap(), EventPriority::P1),
    ];
    let ids: Vec<_> = filter_visible(&events, &range).iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "last"]);
}
