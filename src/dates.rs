use crate::config::RangeKind;
use chrono::{DateTime, Datelike, Duration, FixedOffset, Timelike, Utc};

/// Fixed Eastern offset (UTC-5) used for report time ranges. This is an EST
/// approximation with no daylight-saving adjustment; the reporting service
/// expects Eastern wall-clock timestamps in this format.
const EASTERN_OFFSET_SECS: i32 = -5 * 3600;

const RANGE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Start/end timestamps formatted the way the reporting service expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Compute the requested window relative to `now`, in fixed Eastern time.
pub fn compute_range(kind: RangeKind, now: DateTime<Utc>) -> DateRange {
    let offset = FixedOffset::east_opt(EASTERN_OFFSET_SECS).unwrap();
    let today = now.with_timezone(&offset);

    let start = match kind {
        RangeKind::Today => day_start(today),
        RangeKind::ThisWeek => {
            day_start(today - Duration::days(today.weekday().num_days_from_monday() as i64))
        }
        RangeKind::LastWeek => day_start(today - Duration::days(7)),
    };
    let end = day_end(today);

    DateRange {
        start: start.format(RANGE_FORMAT).to_string(),
        end: end.format(RANGE_FORMAT).to_string(),
    }
}

/// Compute the requested window relative to the current instant.
pub fn current_range(kind: RangeKind) -> DateRange {
    compute_range(kind, Utc::now())
}

fn day_start(d: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    d.with_hour(0)
        .and_then(|d| d.with_minute(0))
        .and_then(|d| d.with_second(0))
        .and_then(|d| d.with_nanosecond(0))
        .unwrap()
}

fn day_end(d: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    d.with_hour(23)
        .and_then(|d| d.with_minute(59))
        .and_then(|d| d.with_second(59))
        .and_then(|d| d.with_nanosecond(999_000_000))
        .unwrap()
}
