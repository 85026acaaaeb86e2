//! Duration strings.
//!
//! Tracks carry their length as `MM:SS` or `HH:MM:SS` text. Every aggregate
//! (album, playlist and queue totals, duration sorts) goes through
//! [`parse_duration`], which maps anything malformed to zero seconds.

use tracing::debug;

/// Parse `MM:SS` or `HH:MM:SS` into whole seconds.
///
/// Parts are trimmed and empty parts are ignored. Any other shape, a
/// non-numeric part or a negative value yields `None`.
pub fn try_parse_duration(s: &str) -> Option<u64> {
    let parts: Vec<u64> = s
        .split(':')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<u64>().ok())
        .collect::<Option<_>>()?;

    match parts.as_slice() {
        [m, s] => m.checked_mul(60)?.checked_add(*s),
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s),
        _ => None,
    }
}

/// Parse a duration string, treating failures as 0 seconds.
pub fn parse_duration(s: &str) -> u64 {
    match try_parse_duration(s) {
        Some(secs) => secs,
        None => {
            debug!("couldn't parse duration {s:?}, treating as 0s");
            0
        }
    }
}

/// Format seconds as `"{h} hr {m} min {s} sec"`, dropping the hour part when zero.
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours} hr {minutes} min {seconds} sec")
    } else {
        format!("{minutes} min {seconds} sec")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes_and_hours_forms() {
        assert_eq!(parse_duration("05:30"), 330);
        assert_eq!(parse_duration("01:02:03"), 3723);
        assert_eq!(parse_duration(" 4 : 05 "), 245);
    }

    #[test]
    fn malformed_durations_are_zero() {
        assert_eq!(parse_duration("notaduration"), 0);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("42"), 0);
        assert_eq!(parse_duration("1:2:3:4"), 0);
        assert_eq!(parse_duration("-1:30"), 0);
        assert_eq!(parse_duration("3:xx"), 0);
        assert_eq!(try_parse_duration("abc"), None);
    }

    #[test]
    fn empty_parts_are_ignored() {
        assert_eq!(parse_duration("3:00:"), 180);
    }

    #[test]
    fn formats_with_and_without_hours() {
        assert_eq!(format_duration(330), "5 min 30 sec");
        assert_eq!(format_duration(3723), "1 hr 2 min 3 sec");
        assert_eq!(format_duration(0), "0 min 0 sec");
        assert_eq!(format_duration(3600), "1 hr 0 min 0 sec");
    }
}
