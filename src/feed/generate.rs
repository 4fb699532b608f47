//! Feed rendering.
//!
//! Events are built with the icalendar crate, then a line-oriented pass
//! pins the PRODID and splices the synthesized VTIMEZONE block in front of
//! the first VEVENT.

use chrono::{Datelike, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};
use log::debug;

use super::entry::{FeedOptions, ScheduleEntry};
use super::timezone::vtimezone_block;
use crate::constants::{DEFAULT_GAME_DURATION_MINUTES, PRODID, UID_DOMAIN};
use crate::error::{SchedError, SchedResult};

/// Build a complete `text/calendar` body for the given entries.
///
/// Entries with a declined status or a date outside `options.date_range` are
/// excluded. A malformed date/time on any entry (even an excluded one) fails
/// the whole call; a partial feed is never returned.
pub fn build_feed(entries: &[ScheduleEntry], options: &FeedOptions) -> SchedResult<String> {
    let tz: Tz = options
        .timezone
        .parse()
        .map_err(|_| SchedError::InvalidTimezone(options.timezone.clone()))?;

    let mut visible: Vec<(&ScheduleEntry, NaiveDateTime)> = Vec::new();
    for entry in entries {
        // Parse before filtering so bad rows always surface
        let start = entry.start_datetime()?;
        if !entry.status.feed_visible() {
            continue;
        }
        if !options.date_range.contains(start.date()) {
            continue;
        }
        visible.push((entry, start));
    }
    debug!(
        "feed '{}': {} of {} entries after filtering",
        options.calendar_name,
        visible.len(),
        entries.len()
    );

    let mut cal = Calendar::new();
    cal.name(&options.calendar_name);
    cal.timezone(options.timezone.as_str());
    for (entry, start) in &visible {
        cal.push(build_vevent(entry, *start, tz, options));
    }
    let cal = cal.done();

    let year = options
        .date_range
        .from
        .map_or_else(|| Utc::now().year(), |d| d.year());
    let vtimezone = vtimezone_block(tz, &options.timezone, year);

    Ok(finalize_feed(&cal.to_string(), &vtimezone))
}

fn build_vevent(
    entry: &ScheduleEntry,
    start: NaiveDateTime,
    tz: Tz,
    options: &FeedOptions,
) -> icalendar::Event {
    let end = start + Duration::minutes(DEFAULT_GAME_DURATION_MINUTES);

    let mut event = icalendar::Event::new();
    event.uid(&format!(
        "game-{}-assignment-{}@{}",
        entry.game_id, entry.assignment_id, UID_DOMAIN
    ));
    event.summary(&summary_line(entry, options));

    // DTSTAMP must be UTC; derive it from the event start so regenerating an
    // unchanged feed is byte-identical
    let stamp = tz
        .from_local_datetime(&start)
        .earliest()
        .map_or_else(|| start.and_utc(), |dt| dt.with_timezone(&Utc));
    event.add_property("DTSTAMP", stamp.format("%Y%m%dT%H%M%SZ").to_string());

    add_local_datetime(&mut event, "DTSTART", start, &options.timezone);
    add_local_datetime(&mut event, "DTEND", end, &options.timezone);

    // The icalendar crate applies RFC 5545 TEXT escaping on render, so
    // summary/location/description take the raw values
    event.location(&entry.location_line());
    event.add_property("STATUS", entry.status.as_ics_status());
    event.add_property("CATEGORIES", category_tags(entry).join(","));
    event.description(&description_body(entry, options));

    event.done()
}

/// `"<position> - <home> vs <away>"`, with the referee name folded in for the
/// games-feed-with-assignments variant.
fn summary_line(entry: &ScheduleEntry, options: &FeedOptions) -> String {
    let matchup = format!("{} vs {}", entry.home_team_name, entry.away_team_name);
    match entry.referee_name.as_deref() {
        Some(referee) if options.include_assignments => {
            format!("{} ({referee}) - {matchup}", entry.position_name)
        }
        _ => format!("{} - {matchup}", entry.position_name),
    }
}

/// Uppercase tags derived from role, level and game type, e.g.
/// `REFEREE,YOUTH,REGULAR`. Commas here are iCal value separators.
fn category_tags(entry: &ScheduleEntry) -> Vec<String> {
    let mut tags = vec!["REFEREE".to_string()];
    for raw in [&entry.level, &entry.game_type] {
        let tag = raw.trim().to_uppercase();
        if !tag.is_empty() {
            tags.push(tag);
        }
    }
    tags
}

fn description_body(entry: &ScheduleEntry, options: &FeedOptions) -> String {
    let mut lines = vec![
        format!("League: {}", entry.league_name),
        format!("Level: {} {}", entry.level, entry.game_type),
        format!("Position: {}", entry.position_name),
    ];
    if options.include_assignments
        && let Some(referee) = entry.referee_name.as_deref()
    {
        lines.push(format!("Referee: {referee}"));
    }
    if let Some(wage) = entry.wage {
        lines.push(format!("Fee: ${wage:.2}"));
    }
    if let Some(notes) = entry.notes.as_deref()
        && !notes.is_empty()
    {
        lines.push(format!("Notes: {notes}"));
    }
    lines.join("\n")
}

/// Add a datetime property in `;TZID=<zone>:` local-time form
fn add_local_datetime(event: &mut icalendar::Event, name: &str, at: NaiveDateTime, tzid: &str) {
    let mut prop = Property::new(name, at.format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", tzid);
    event.append_property(prop);
}

/// Line pass over the icalendar crate's output:
/// - Replace its PRODID with ours
/// - Drop CALSCALE:GREGORIAN (it's the default)
/// - Splice the VTIMEZONE block before the first VEVENT (or before
///   END:VCALENDAR when the feed has no events)
/// - Restore literal value-separator commas on CATEGORIES lines
fn finalize_feed(ics: &str, vtimezone: &str) -> String {
    let mut result = String::with_capacity(ics.len() + vtimezone.len());
    let mut spliced = false;

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(&format!("PRODID:{PRODID}\r\n"));
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        if !spliced && (line == "BEGIN:VEVENT" || line == "END:VCALENDAR") {
            result.push_str(vtimezone);
            spliced = true;
        }
        if line.starts_with("CATEGORIES") {
            result.push_str(&line.replace("\\,", ","));
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }

    result
}
