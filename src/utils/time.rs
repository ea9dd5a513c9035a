// src/utils/time.rs

//! Posting-timestamp normalization.
//!
//! Sources report times in wildly different shapes: RFC 3339, RFC 2822
//! (RSS), naive date-times without an offset, bare dates, and relative
//! text such as "2 days ago". Everything is normalized to UTC here.
//! Naive values are assumed to be in the current timezone.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a raw posted-at string into an absolute UTC instant.
///
/// `now` anchors relative forms ("today", "3 days ago"). Returns `None`
/// when the text is unparsable; callers must treat that as "oldest
/// possible", never as "now".
pub fn parse_posted_at(raw: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return local_to_utc(naive);
        }
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return local_to_utc(date.and_hms_opt(0, 0, 0)?);
        }
    }

    parse_relative(text, now)
}

/// Resolve relative posted-at text against `now`.
fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let low = text.to_lowercase();

    if low.contains("just now") || low.contains("today") {
        return Some(now);
    }
    if low.contains("yesterday") {
        return Some(now - chrono::Duration::days(1));
    }

    let hours = regex::Regex::new(r"(\d+)\s*hours?").ok()?;
    if let Some(caps) = hours.captures(&low) {
        let n: i64 = caps.get(1)?.as_str().parse().ok()?;
        return Some(now - chrono::Duration::hours(n));
    }

    let days = regex::Regex::new(r"(\d+)\s*days?").ok()?;
    if let Some(caps) = days.captures(&low) {
        let n: i64 = caps.get(1)?.as_str().parse().ok()?;
        return Some(now - chrono::Duration::days(n));
    }

    None
}

fn local_to_utc(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(dt, _) => Some(dt.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        let parsed = parse_posted_at("2026-08-05T09:30:00+02:00", fixed_now()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 5, 7, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc2822_pubdate() {
        let parsed = parse_posted_at("Wed, 05 Aug 2026 10:00:00 +0000", fixed_now()).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2026, 8, 5, 10, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_datetime_assumes_current_timezone() {
        // Exact instant depends on the host timezone; must parse either way.
        assert!(parse_posted_at("2026-08-05T09:30:00", fixed_now()).is_some());
        assert!(parse_posted_at("2026-08-05 09:30:00", fixed_now()).is_some());
    }

    #[test]
    fn test_parse_bare_dates() {
        assert!(parse_posted_at("2026-08-05", fixed_now()).is_some());
        assert!(parse_posted_at("05/08/2026", fixed_now()).is_some());
    }

    #[test]
    fn test_parse_relative_text() {
        let now = fixed_now();
        assert_eq!(parse_posted_at("today", now), Some(now));
        assert_eq!(parse_posted_at("Posted just now", now), Some(now));
        assert_eq!(
            parse_posted_at("3 hours ago", now),
            Some(now - chrono::Duration::hours(3))
        );
        assert_eq!(
            parse_posted_at("2 days ago", now),
            Some(now - chrono::Duration::days(2))
        );
        assert_eq!(
            parse_posted_at("yesterday", now),
            Some(now - chrono::Duration::days(1))
        );
    }

    #[test]
    fn test_unparsable_returns_none() {
        assert_eq!(parse_posted_at("not-a-date", fixed_now()), None);
        assert_eq!(parse_posted_at("", fixed_now()), None);
        assert_eq!(parse_posted_at("   ", fixed_now()), None);
    }
}
