//! Ordering by `create_time` and session duration.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;

/// Anything carrying a raw `create_time` string.
pub trait Timestamped {
    fn create_time(&self) -> &str;
}

/// Ordinal comparison where an empty time sorts after every non-empty one.
pub fn compare_create_time(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// Stable sort by `create_time`; ties keep row order.
pub fn sort_by_create_time<T: Timestamped>(items: &mut [T]) {
    items.sort_by(|a, b| compare_create_time(a.create_time(), b.create_time()));
}

// Naive forms are read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Parse a `create_time` cell, returning `None` for anything unrecognised.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Whole minutes between the earliest and latest parseable time.
///
/// Rounds half up. Fewer than two valid times give 0.
pub fn duration_minutes<'a, I>(times: I) -> u64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut parsed: Vec<DateTime<Utc>> = times.into_iter().filter_map(parse_timestamp).collect();
    if parsed.len() < 2 {
        return 0;
    }
    parsed.sort();

    let (first, last) = (parsed[0], parsed[parsed.len() - 1]);
    let millis = (last - first).num_milliseconds().max(0) as u64;
    (millis + 30_000) / 60_000
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item(&'static str, usize);

    impl Timestamped for Item {
        fn create_time(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_empty_times_sort_last_and_stable() {
        let mut items = vec![
            Item("", 0),
            Item("t2", 1),
            Item("", 2),
            Item("t1", 3),
            Item("t2", 4),
        ];
        sort_by_create_time(&mut items);
        let order: Vec<usize> = items.iter().map(|i| i.1).collect();
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn test_compare_is_ordinal() {
        assert_eq!(compare_create_time("B", "a"), Ordering::Less);
        assert_eq!(compare_create_time("", ""), Ordering::Equal);
        assert_eq!(compare_create_time("", "z"), Ordering::Greater);
    }

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 10, 0).unwrap();
        assert_eq!(parse_timestamp("2024-01-01T00:10:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T08:10:00+08:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 00:10:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T00:10"), Some(expected));
        assert_eq!(parse_timestamp("2024/01/01 00:10:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-01-01 00:10:00.000 "), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-01"),
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("t1"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("2024-13-40 99:00:00"), None);
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(
            duration_minutes(["2024-01-01T00:00:00Z", "2024-01-01T00:10:00Z"]),
            10
        );
        assert_eq!(duration_minutes(["2024-01-01T00:00:00Z"]), 0);
        assert_eq!(duration_minutes(Vec::<&str>::new()), 0);
        // unparseable values are skipped, not errors
        assert_eq!(
            duration_minutes(["2024-01-01T00:05:00Z", "garbage", "2024-01-01T00:00:00Z"]),
            5
        );
    }

    #[test]
    fn test_duration_rounds_half_up() {
        assert_eq!(
            duration_minutes(["2024-01-01T00:00:00Z", "2024-01-01T00:01:30Z"]),
            2
        );
        assert_eq!(
            duration_minutes(["2024-01-01T00:00:00Z", "2024-01-01T00:01:29.999Z"]),
            1
        );
    }
}
