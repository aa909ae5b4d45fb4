//! Record normalizer: one raw row into a typed record or a skip reason.
//!
//! Content and date are identity data: missing or invalid values reject the
//! row. Engagement counters are enrichment data: anything unparsable
//! coerces to zero.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::ingest::columns::{
    column_value, first_value, AnalyticsColumns, ColumnResolution, PostColumns,
};
use crate::ingest::models::{DailyMetricRecord, ImportRecord, PostRecord, PostStatus};
use crate::ingest::parser::RawRow;

/// Why a row was rejected. Rendered into the import report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing content")]
    MissingContent,

    #[error("missing date")]
    MissingDate,

    #[error("invalid date \"{0}\"")]
    InvalidDate(String),
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d, %Y", "%B %d, %Y"];

pub fn normalize_row(
    row: &RawRow,
    resolution: &ColumnResolution,
) -> Result<ImportRecord, SkipReason> {
    match resolution {
        ColumnResolution::Posts(cols) => normalize_post(row, cols).map(ImportRecord::Post),
        ColumnResolution::Analytics(cols) => {
            normalize_daily_metric(row, cols).map(ImportRecord::DailyMetric)
        }
    }
}

pub fn normalize_post(row: &RawRow, cols: &PostColumns) -> Result<PostRecord, SkipReason> {
    let content = first_value(row, &cols.content);
    if content.is_empty() {
        return Err(SkipReason::MissingContent);
    }

    // Malformed export timestamps downgrade the post to a draft.
    let posted_at = parse_timestamp(first_value(row, &cols.posted_at));

    Ok(PostRecord {
        content: content.to_string(),
        posted_at,
        impressions: coerce_count(column_value(row, cols.impressions.as_ref())),
        likes: coerce_count(column_value(row, cols.likes.as_ref())),
        replies: coerce_count(column_value(row, cols.replies.as_ref())),
        retweets: coerce_count(first_value(row, &cols.retweets)),
        status: if posted_at.is_some() {
            PostStatus::Posted
        } else {
            PostStatus::Draft
        },
        word_count: word_count(content),
    })
}

pub fn normalize_daily_metric(
    row: &RawRow,
    cols: &AnalyticsColumns,
) -> Result<DailyMetricRecord, SkipReason> {
    let raw_date = column_value(row, Some(&cols.date)).trim();
    if raw_date.is_empty() {
        return Err(SkipReason::MissingDate);
    }
    let date =
        parse_timestamp(raw_date).ok_or_else(|| SkipReason::InvalidDate(raw_date.to_string()))?;

    Ok(DailyMetricRecord {
        date,
        posts_count: coerce_count(first_value(row, &cols.posts_count)),
        followers: coerce_count(column_value(row, cols.followers.as_ref())),
        impressions: coerce_count(column_value(row, cols.impressions.as_ref())),
        engagements: coerce_count(column_value(row, cols.engagements.as_ref())),
    })
}

/// Base-10 prefix integer parse.
///
/// Leading whitespace and one sign are accepted; digits are consumed up to
/// the first non-digit. No digits yields `None`. The magnitude saturates at
/// `i32::MAX`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for b in rest.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX));
    }

    seen_digit.then_some(if negative { -value } else { value })
}

/// Record counter: [`parse_int_prefix`] floored at zero.
pub fn coerce_count(raw: &str) -> i32 {
    parse_int_prefix(raw).map_or(0, |v| v.max(0) as i32)
}

/// Parses common export timestamp shapes. Zone-less values are read as UTC;
/// date-only values resolve to midnight UTC. Impossible calendar dates fail.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

pub fn word_count(content: &str) -> i32 {
    content.split_whitespace().count().min(i32::MAX as usize) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::columns::{resolve_analytics_columns, resolve_post_columns};
    use chrono::TimeZone;

    fn post_columns() -> PostColumns {
        resolve_post_columns(&[
            "content".to_string(),
            "posted_at".to_string(),
            "impressions".to_string(),
            "likes".to_string(),
            "replies".to_string(),
            "retweets".to_string(),
        ])
        .unwrap()
    }

    fn analytics_columns() -> AnalyticsColumns {
        resolve_analytics_columns(&[
            "date".to_string(),
            "followers".to_string(),
            "impressions".to_string(),
            "engagements".to_string(),
            "posts_count".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_full_post_row() {
        let row = RawRow::from_pairs([
            ("content", "hello world"),
            ("posted_at", "2024-01-01T00:00:00Z"),
            ("impressions", "100"),
            ("likes", "10"),
            ("replies", "2"),
            ("retweets", "1"),
        ]);
        let post = normalize_post(&row, &post_columns()).unwrap();
        assert_eq!(post.content, "hello world");
        assert_eq!(post.status, PostStatus::Posted);
        assert_eq!(post.word_count, 2);
        assert_eq!(
            post.posted_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(
            (post.impressions, post.likes, post.replies, post.retweets),
            (100, 10, 2, 1)
        );
    }

    #[test]
    fn test_empty_content_is_skipped() {
        let row = RawRow::from_pairs([("content", "   "), ("likes", "5")]);
        let err = normalize_post(&row, &post_columns()).unwrap_err();
        assert_eq!(err, SkipReason::MissingContent);
        assert_eq!(err.to_string(), "missing content");
    }

    #[test]
    fn test_content_is_trimmed() {
        let row = RawRow::from_pairs([("content", "  spaced  out \n")]);
        let post = normalize_post(&row, &post_columns()).unwrap();
        assert_eq!(post.content, "spaced  out");
        assert_eq!(post.word_count, 2);
    }

    #[test]
    fn test_unparsable_posted_at_imports_as_draft() {
        let row = RawRow::from_pairs([("content", "still imported"), ("posted_at", "yesterday")]);
        let post = normalize_post(&row, &post_columns()).unwrap();
        assert_eq!(post.posted_at, None);
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn test_missing_metrics_default_to_zero() {
        let cols = resolve_post_columns(&["text".to_string()]).unwrap();
        let row = RawRow::from_pairs([("text", "only text")]);
        let post = normalize_post(&row, &cols).unwrap();
        assert_eq!(
            (post.impressions, post.likes, post.replies, post.retweets),
            (0, 0, 0, 0)
        );
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn test_text_value_backs_up_empty_content() {
        let cols = resolve_post_columns(&["content".to_string(), "text".to_string()]).unwrap();
        let row = RawRow::from_pairs([("content", ""), ("text", "from text")]);
        assert_eq!(normalize_post(&row, &cols).unwrap().content, "from text");
    }

    #[test]
    fn test_analytics_row() {
        let row = RawRow::from_pairs([
            ("date", "2024-03-05"),
            ("followers", "1200"),
            ("impressions", "5000"),
            ("engagements", "abc"),
            ("posts_count", "3"),
        ]);
        let day = normalize_daily_metric(&row, &analytics_columns()).unwrap();
        assert_eq!(day.date, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
        assert_eq!(day.followers, 1200);
        assert_eq!(day.impressions, 5000);
        assert_eq!(day.engagements, 0);
        assert_eq!(day.posts_count, 3);
    }

    #[test]
    fn test_analytics_missing_date() {
        let row = RawRow::from_pairs([("date", " "), ("followers", "1")]);
        let err = normalize_daily_metric(&row, &analytics_columns()).unwrap_err();
        assert_eq!(err, SkipReason::MissingDate);
    }

    #[test]
    fn test_analytics_invalid_date_quotes_raw_value() {
        let row = RawRow::from_pairs([("date", "not-a-date")]);
        let err = normalize_daily_metric(&row, &analytics_columns()).unwrap_err();
        assert_eq!(err.to_string(), "invalid date \"not-a-date\"");
    }

    #[test]
    fn test_analytics_impossible_calendar_date() {
        let row = RawRow::from_pairs([("date", "2024-02-30")]);
        assert!(matches!(
            normalize_daily_metric(&row, &analytics_columns()),
            Err(SkipReason::InvalidDate(_))
        ));
    }

    #[test]
    fn test_coerce_count() {
        assert_eq!(coerce_count("42"), 42);
        assert_eq!(coerce_count("abc"), 0);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("-5"), 0);
        assert_eq!(coerce_count("3.7"), 3);
        assert_eq!(coerce_count("  12abc"), 12);
        assert_eq!(coerce_count("+8"), 8);
        assert_eq!(coerce_count("1,000"), 1);
        assert_eq!(coerce_count("99999999999"), i32::MAX);
    }

    #[test]
    fn test_parse_int_prefix_keeps_sign() {
        assert_eq!(parse_int_prefix("-50"), Some(-50));
        assert_eq!(parse_int_prefix(" -3.9"), Some(-3));
        assert_eq!(parse_int_prefix("7 likes"), Some(7));
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("n/a"), None);
        assert_eq!(parse_int_prefix("-99999999999"), Some(-i64::from(i32::MAX)));
    }

    #[test]
    fn test_date_and_reposts_values_back_up_posts_columns() {
        let cols = resolve_post_columns(&[
            "text".to_string(),
            "date".to_string(),
            "reposts".to_string(),
        ])
        .unwrap();
        let row = RawRow::from_pairs([
            ("text", "shipped it"),
            ("date", "2024-05-02"),
            ("reposts", "7"),
        ]);
        let post = normalize_post(&row, &cols).unwrap();
        assert_eq!(
            post.posted_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(post.status, PostStatus::Posted);
        assert_eq!(post.retweets, 7);
    }

    #[test]
    fn test_empty_posted_at_and_retweets_fall_back() {
        let cols = resolve_post_columns(&[
            "content".to_string(),
            "posted_at".to_string(),
            "date".to_string(),
            "retweets".to_string(),
            "reposts".to_string(),
        ])
        .unwrap();
        let row = RawRow::from_pairs([
            ("content", "fallback values"),
            ("posted_at", ""),
            ("date", "2024-05-02T08:00:00Z"),
            ("retweets", " "),
            ("reposts", "4"),
        ]);
        let post = normalize_post(&row, &cols).unwrap();
        assert_eq!(
            post.posted_at,
            Some(Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap())
        );
        assert_eq!(post.retweets, 4);
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-06-01T12:30:00Z"), Some(noon));
        assert_eq!(parse_timestamp("2024-06-01T14:30:00+02:00"), Some(noon));
        assert_eq!(parse_timestamp("2024-06-01 12:30:00"), Some(noon));
        assert_eq!(parse_timestamp("2024-06-01T12:30"), Some(noon));
        assert_eq!(parse_timestamp("06/01/2024 12:30"), Some(noon));
        assert_eq!(parse_timestamp("Sat, 01 Jun 2024 12:30:00 +0000"), Some(noon));
        assert_eq!(
            parse_timestamp("Jun 01, 2024"),
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("garbage"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
