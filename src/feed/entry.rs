//! Feed input types.
//!
//! `ScheduleEntry` is one assignment-to-game pairing as it arrives from the
//! database layer: dates and times are the raw column strings, already joined
//! with team/location/league names. The feed builder parses and renders them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIMEZONE;
use crate::date_range::DateRange;
use crate::error::{SchedError, SchedResult};

/// One assignment-to-game pairing (one VEVENT in the feed).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub game_id: String,
    pub assignment_id: String,

    /// Calendar date, "YYYY-MM-DD", in the feed's declared timezone
    pub game_date: String,
    /// Local wall-clock time, "HH:MM" or "HH:MM:SS"
    pub game_time: String,

    pub level: String,
    pub game_type: String,
    pub position_name: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub league_name: String,
    #[serde(default)]
    pub referee_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub wage: Option<f64>,

    pub status: AssignmentStatus,
}

impl ScheduleEntry {
    /// Parse date + time into the event's local start.
    /// Any parse failure aborts the whole feed, never a partial document.
    pub fn start_datetime(&self) -> SchedResult<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.game_date, "%Y-%m-%d").map_err(|_| {
            SchedError::InvalidDateTime {
                value: self.game_date.clone(),
                game_id: self.game_id.clone(),
            }
        })?;
        let time = NaiveTime::parse_from_str(&self.game_time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&self.game_time, "%H:%M"))
            .map_err(|_| SchedError::InvalidDateTime {
                value: self.game_time.clone(),
                game_id: self.game_id.clone(),
            })?;
        Ok(date.and_time(time))
    }

    /// `"<name>, <address>"`, one part alone, or empty. Never "null".
    pub fn location_line(&self) -> String {
        match (
            self.location_name.as_deref(),
            self.location_address.as_deref(),
        ) {
            (Some(name), Some(addr)) => format!("{name}, {addr}"),
            (Some(name), None) => name.to_string(),
            (None, Some(addr)) => addr.to_string(),
            (None, None) => String::new(),
        }
    }
}

/// Assignment lifecycle status, as stored by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Accepted,
    Completed,
    Declined,
}

impl AssignmentStatus {
    /// iCal STATUS value for this assignment status.
    pub fn as_ics_status(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "TENTATIVE",
            AssignmentStatus::Accepted | AssignmentStatus::Completed => "CONFIRMED",
            AssignmentStatus::Declined => "CANCELLED",
        }
    }

    /// Declined assignments never appear in a feed.
    pub fn feed_visible(self) -> bool {
        self != AssignmentStatus::Declined
    }
}

/// Formatting options for one feed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedOptions {
    pub calendar_name: String,
    /// IANA zone id, e.g. "America/New_York"
    pub timezone: String,
    #[serde(default)]
    pub date_range: DateRange,
    /// Games feed only: show the assigned referee in each SUMMARY
    #[serde(default)]
    pub include_assignments: bool,
}

impl Default for FeedOptions {
    fn default() -> Self {
        FeedOptions {
            calendar_name: "League Schedule".to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            date_range: DateRange::default(),
            include_assignments: false,
        }
    }
}
