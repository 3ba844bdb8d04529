//! Relative upload text ("3 days ago") to an approximate instant.
//!
//! Only English phrasing is understood. Anything else gives `None`; an
//! unreadable date never costs a listing row.

use time::{Duration, OffsetDateTime};

#[derive(Debug, Clone, Copy)]
pub struct TimeAgoParser {
    now: OffsetDateTime,
}

impl TimeAgoParser {
    pub fn new() -> Self {
        Self::at(OffsetDateTime::now_utc())
    }

    /// Parser anchored at a fixed instant.
    #[allow(dead_code)]
    pub fn at(now: OffsetDateTime) -> Self {
        Self { now }
    }

    pub fn parse(&self, text: &str) -> Option<OffsetDateTime> {
        let text = text.trim().to_ascii_lowercase();
        let text = text
            .strip_prefix("streamed ")
            .or_else(|| text.strip_prefix("premiered "))
            .unwrap_or(&text);
        let rest = text.strip_suffix(" ago")?;

        let mut parts = rest.split_whitespace();
        let amount: i64 = match parts.next()? {
            "a" | "an" => 1,
            n => n.parse::<u32>().ok()?.into(),
        };
        let unit = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let unit_secs: i64 = match unit.trim_end_matches('s') {
            "second" => 1,
            "minute" => 60,
            "hour" => 3_600,
            "day" => 86_400,
            "week" => 7 * 86_400,
            "month" => 30 * 86_400,
            "year" => 365 * 86_400,
            _ => return None,
        };
        let span = Duration::seconds(amount.checked_mul(unit_secs)?);
        self.now.checked_sub(span)
    }
}

impl Default for TimeAgoParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn parser() -> TimeAgoParser {
        TimeAgoParser::at(datetime!(2024-06-15 12:00 UTC))
    }

    #[test]
    fn test_parse_units() {
        let p = parser();
        assert_eq!(p.parse("3 days ago"), Some(datetime!(2024-06-12 12:00 UTC)));
        assert_eq!(p.parse("1 hour ago"), Some(datetime!(2024-06-15 11:00 UTC)));
        assert_eq!(p.parse("2 weeks ago"), Some(datetime!(2024-06-01 12:00 UTC)));
        assert_eq!(p.parse("1 year ago"), Some(datetime!(2023-06-16 12:00 UTC)));
    }

    #[test]
    fn test_parse_prefixed() {
        let p = parser();
        assert_eq!(
            p.parse("Streamed 30 minutes ago"),
            Some(datetime!(2024-06-15 11:30 UTC))
        );
        assert_eq!(p.parse("an hour ago"), Some(datetime!(2024-06-15 11:00 UTC)));
    }

    #[test]
    fn test_parse_unknown() {
        let p = parser();
        assert_eq!(p.parse("vor 3 Tagen"), None);
        assert_eq!(p.parse("3 fortnights ago"), None);
        assert_eq!(p.parse(""), None);
    }
}
