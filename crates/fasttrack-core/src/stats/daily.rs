//! Per-day fasting totals.
//!
//! A fast is a span between two instants; a chart bucket is a local calendar
//! day. The two don't line up -- a 16:8 fast routinely crosses midnight -- so
//! each span is clipped to the requested window and then walked day by day,
//! attributing to every day exactly the hours of overlap.
//!
//! All bucketing happens on local naive time: the window is defined by local
//! wall-clock days, and doing the arithmetic after a single Utc -> Local
//! conversion per endpoint keeps the day-walk free of timezone transitions.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::round2;
use crate::history::HistoryEntry;

/// One chart bucket: a day label ("MM/DD") and the hours fasted that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotal {
    pub label: String,
    pub hours: f64,
}

/// Hours fasted per local calendar day, for the last `days` days ending
/// today (inclusive).
///
/// Completed entries and, when present, the active span `(start, now)` all
/// contribute; spans outside the window contribute nothing. `days == 0`
/// yields an empty series. Buckets are non-negative and capped at 24 -- a
/// day holds no more, even if recorded fasts overlap.
pub fn daily_totals(
    history: &[HistoryEntry],
    active: Option<(DateTime<Utc>, DateTime<Utc>)>,
    days: u32,
    now: DateTime<Utc>,
) -> Vec<DayTotal> {
    if days == 0 {
        return Vec::new();
    }
    let today = to_local(now).date();
    let (Some(first_day), Some(after_today)) = (
        today.checked_sub_days(Days::new(u64::from(days) - 1)),
        today.checked_add_days(Days::new(1)),
    ) else {
        return Vec::new();
    };
    let window_start = first_day.and_time(NaiveTime::MIN);
    let window_end = after_today.and_time(NaiveTime::MIN);

    let mut buckets = vec![0.0f64; days as usize];
    let spans = history
        .iter()
        .map(|e| (e.start, e.end))
        .chain(active);
    for (start, end) in spans {
        add_span(
            &mut buckets,
            first_day,
            window_start.max(to_local(start)),
            window_end.min(to_local(end)),
        );
    }

    buckets
        .iter()
        .enumerate()
        .map(|(i, &hours)| DayTotal {
            label: (first_day + chrono::Duration::days(i as i64))
                .format("%m/%d")
                .to_string(),
            hours: round2(hours.min(24.0)),
        })
        .collect()
}

/// Walk a clipped span day by day, accumulating overlap hours per bucket.
fn add_span(buckets: &mut [f64], first_day: NaiveDate, start: NaiveDateTime, end: NaiveDateTime) {
    let mut cur = start;
    while cur < end {
        let Some(next_day) = cur.date().checked_add_days(Days::new(1)) else {
            break;
        };
        let segment_end = end.min(next_day.and_time(NaiveTime::MIN));
        let day_index = (cur.date() - first_day).num_days();
        if day_index >= 0 {
            if let Some(bucket) = buckets.get_mut(day_index as usize) {
                *bucket += (segment_end - cur).num_milliseconds().max(0) as f64 / 3_600_000.0;
            }
        }
        cur = segment_end;
    }
}

fn to_local(t: DateTime<Utc>) -> NaiveDateTime {
    t.with_timezone(&Local).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    /// Build a Utc instant from local wall-clock fields, so bucketing is
    /// deterministic regardless of the machine's timezone.
    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Local
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc)
    }

    fn entry(start: DateTime<Utc>, end: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry::close(start, end, 16.0, end)
    }

    #[test]
    fn span_splits_at_midnight() {
        // 22:00 on the 14th to 02:00 on the 15th: 2h + 2h.
        let e = entry(local(2026, 7, 14, 22, 0), local(2026, 7, 15, 2, 0));
        let totals = daily_totals(&[e], None, 3, local(2026, 7, 15, 12, 0));

        assert_eq!(totals.len(), 3);
        assert_eq!(totals[0].label, "07/13");
        assert_eq!(totals[1].label, "07/14");
        assert_eq!(totals[2].label, "07/15");
        assert_eq!(totals[0].hours, 0.0);
        assert_eq!(totals[1].hours, 2.0);
        assert_eq!(totals[2].hours, 2.0);
    }

    #[test]
    fn span_straddling_window_start_is_clipped() {
        // Ends 04:00 on the first window day; the 20:00-midnight part
        // falls outside and must not count.
        let e = entry(local(2026, 7, 12, 20, 0), local(2026, 7, 13, 4, 0));
        let totals = daily_totals(&[e], None, 3, local(2026, 7, 15, 12, 0));
        assert_eq!(totals[0].hours, 4.0);
        assert_eq!(totals[1].hours, 0.0);
        assert_eq!(totals[2].hours, 0.0);
    }

    #[test]
    fn span_entirely_outside_window_contributes_nothing() {
        let e = entry(local(2026, 7, 1, 8, 0), local(2026, 7, 1, 20, 0));
        let totals = daily_totals(&[e], None, 3, local(2026, 7, 15, 12, 0));
        assert!(totals.iter().all(|t| t.hours == 0.0));
    }

    #[test]
    fn active_fast_contributes_up_to_now() {
        let now = local(2026, 7, 15, 12, 0);
        let active = Some((local(2026, 7, 15, 1, 0), now));
        let totals = daily_totals(&[], active, 2, now);
        assert_eq!(totals[0].hours, 0.0);
        assert_eq!(totals[1].hours, 11.0);
    }

    #[test]
    fn completed_and_active_spans_both_count() {
        let now = local(2026, 7, 15, 10, 0);
        let e = entry(local(2026, 7, 14, 6, 0), local(2026, 7, 14, 18, 0));
        let active = Some((local(2026, 7, 15, 8, 0), now));
        let totals = daily_totals(&[e], active, 2, now);
        assert_eq!(totals[0].hours, 12.0);
        assert_eq!(totals[1].hours, 2.0);
    }

    #[test]
    fn zero_days_is_an_empty_series() {
        let e = entry(local(2026, 7, 14, 6, 0), local(2026, 7, 14, 18, 0));
        assert!(daily_totals(&[e], None, 0, local(2026, 7, 15, 12, 0)).is_empty());
    }

    #[test]
    fn multi_day_span_fills_whole_days() {
        // 36h fast: 18:00 on the 13th to 06:00 on the 15th.
        let e = entry(local(2026, 7, 13, 18, 0), local(2026, 7, 15, 6, 0));
        let totals = daily_totals(&[e], None, 4, local(2026, 7, 15, 12, 0));
        assert_eq!(totals[0].hours, 0.0); // 07/12
        assert_eq!(totals[1].hours, 6.0); // 07/13
        assert_eq!(totals[2].hours, 24.0); // 07/14, a full day
        assert_eq!(totals[3].hours, 6.0); // 07/15
    }

    proptest! {
        #[test]
        fn buckets_stay_within_a_day(
            start_off_min in -200_000i64..200_000,
            len_min in 0i64..20_000,
            days in 0u32..40,
        ) {
            let now = Utc::now();
            let start = now + chrono::Duration::minutes(start_off_min);
            let end = start + chrono::Duration::minutes(len_min);
            let totals = daily_totals(&[entry(start, end)], None, days, now);

            prop_assert_eq!(totals.len(), days as usize);
            for t in &totals {
                prop_assert!(t.hours >= 0.0, "negative bucket: {}", t.hours);
                prop_assert!(t.hours <= 24.0, "bucket over a day: {}", t.hours);
            }
        }
    }
}
