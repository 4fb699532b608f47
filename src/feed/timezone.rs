//! VTIMEZONE synthesis from IANA zone data.
//!
//! The icalendar crate has no typed VTIMEZONE component, so the block is
//! rendered here as text and spliced into the calendar during the final
//! line pass. Observances are found by scanning one year of chrono-tz
//! offsets for transitions; zones with a fixed offset get a single
//! STANDARD block anchored at the epoch.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

/// A single UTC-offset change within the scanned year.
struct Transition {
    at_utc: NaiveDateTime,
    /// Offset in effect before the change, seconds east of UTC
    from_secs: i32,
    /// Offset in effect after the change, seconds east of UTC
    to_secs: i32,
}

/// Render a complete VTIMEZONE block (CRLF line endings) for `tz`,
/// with observances taken from `year`.
pub(crate) fn vtimezone_block(tz: Tz, tzid: &str, year: i32) -> String {
    let mut lines: Vec<String> = vec!["BEGIN:VTIMEZONE".to_string(), format!("TZID:{tzid}")];

    let transitions = scan_transitions(tz, year);
    if transitions.is_empty() {
        // Fixed-offset zone: one STANDARD observance anchored at the epoch
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1)
            .unwrap_or_default()
            .and_hms_opt(0, 0, 0)
            .unwrap_or_default();
        let secs = offset_seconds(tz, jan1);
        lines.push("BEGIN:STANDARD".to_string());
        lines.push("DTSTART:19700101T000000".to_string());
        lines.push(format!("TZOFFSETFROM:{}", format_utc_offset(secs)));
        lines.push(format!("TZOFFSETTO:{}", format_utc_offset(secs)));
        lines.push(format!("TZNAME:{}", tz.offset_from_utc_datetime(&jan1)));
        lines.push("END:STANDARD".to_string());
    } else {
        for t in &transitions {
            // DST is the observance whose offset is further east than the one
            // it replaces
            let kind = if t.to_secs > t.from_secs {
                "DAYLIGHT"
            } else {
                "STANDARD"
            };
            // Observance DTSTART is local time in the pre-change offset
            let local_start = t.at_utc + Duration::seconds(i64::from(t.from_secs));
            lines.push(format!("BEGIN:{kind}"));
            lines.push(format!("DTSTART:{}", local_start.format("%Y%m%dT%H%M%S")));
            lines.push(format!("TZOFFSETFROM:{}", format_utc_offset(t.from_secs)));
            lines.push(format!("TZOFFSETTO:{}", format_utc_offset(t.to_secs)));
            lines.push(format!("TZNAME:{}", tz.offset_from_utc_datetime(&t.at_utc)));
            lines.push(format!("END:{kind}"));
        }
    }

    lines.push("END:VTIMEZONE".to_string());
    let mut block = String::new();
    for line in lines {
        block.push_str(&line);
        block.push_str("\r\n");
    }
    block
}

/// Walk the year in one-hour steps and record every offset change.
/// Real-world transitions land on whole UTC hours, so hour granularity
/// pins them exactly.
fn scan_transitions(tz: Tz, year: i32) -> Vec<Transition> {
    let Some(jan1) = NaiveDate::from_ymd_opt(year, 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
    else {
        return Vec::new();
    };

    let mut transitions = Vec::new();
    let mut cursor = jan1;
    let mut prev_secs = offset_seconds(tz, cursor);

    while cursor.year() == year {
        let next = cursor + Duration::hours(1);
        let secs = offset_seconds(tz, next);
        if secs != prev_secs {
            transitions.push(Transition {
                at_utc: next,
                from_secs: prev_secs,
                to_secs: secs,
            });
            prev_secs = secs;
        }
        cursor = next;
    }

    transitions
}

fn offset_seconds(tz: Tz, at_utc: NaiveDateTime) -> i32 {
    tz.offset_from_utc_datetime(&at_utc).fix().local_minus_utc()
}

/// Seconds east of UTC as the iCal ±HHMM form, e.g. -18000 → "-0500".
fn format_utc_offset(secs: i32) -> String {
    let sign = if secs < 0 { '-' } else { '+' };
    let abs = secs.unsigned_abs();
    format!("{}{:02}{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_york_has_both_observances() {
        let tz: Tz = "America/New_York".parse().unwrap();
        let block = vtimezone_block(tz, "America/New_York", 2026);

        assert!(block.starts_with("BEGIN:VTIMEZONE\r\nTZID:America/New_York"));
        assert!(block.contains("BEGIN:DAYLIGHT"), "missing DAYLIGHT:\n{block}");
        assert!(block.contains("BEGIN:STANDARD"), "missing STANDARD:\n{block}");
        assert!(block.contains("TZOFFSETTO:-0400"));
        assert!(block.contains("TZOFFSETTO:-0500"));
        // 2026 spring-forward: 2026-03-08 07:00 UTC, local 02:00 EST
        assert!(
            block.contains("DTSTART:20260308T020000"),
            "wrong daylight DTSTART:\n{block}"
        );
        assert!(block.ends_with("END:VTIMEZONE\r\n"));
    }

    #[test]
    fn test_fixed_offset_zone_has_single_standard_block() {
        let tz: Tz = "UTC".parse().unwrap();
        let block = vtimezone_block(tz, "UTC", 2026);

        assert_eq!(block.matches("BEGIN:STANDARD").count(), 1);
        assert!(!block.contains("BEGIN:DAYLIGHT"));
        assert!(block.contains("TZOFFSETFROM:+0000"));
        assert!(block.contains("TZOFFSETTO:+0000"));
        assert!(block.contains("DTSTART:19700101T000000"));
    }

    #[test]
    fn test_offset_formatting() {
        assert_eq!(format_utc_offset(-18000), "-0500");
        assert_eq!(format_utc_offset(0), "+0000");
        assert_eq!(format_utc_offset(19800), "+0530");
    }
}
