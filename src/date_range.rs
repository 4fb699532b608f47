//! Date range for filtering feed entries.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FEED_FUTURE_DAYS, DEFAULT_FEED_PAST_DAYS};
use crate::error::{SchedError, SchedResult};

/// Date range for filtering feed entries.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Default for DateRange {
    /// Rolling window: past `DEFAULT_FEED_PAST_DAYS` to +`DEFAULT_FEED_FUTURE_DAYS`
    fn default() -> Self {
        let today = Utc::now().date_naive();
        DateRange {
            from: Some(today - Duration::days(DEFAULT_FEED_PAST_DAYS)),
            to: Some(today + Duration::days(DEFAULT_FEED_FUTURE_DAYS)),
        }
    }
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        DateRange { from, to }
    }

    /// Parse query-string dates into a DateRange.
    /// Missing values fall back to the rolling default window.
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> SchedResult<Self> {
        let defaults = DateRange::default();

        let from = match from {
            Some(s) => Some(parse_date(s)?),
            None => defaults.from,
        };
        let to = match to {
            Some(s) => Some(parse_date(s)?),
            None => defaults.to,
        };

        Ok(DateRange { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from
            && date < from
        {
            return false;
        }
        if let Some(to) = self.to
            && date > to
        {
            return false;
        }
        true
    }
}

/// Parse YYYY-MM-DD
fn parse_date(s: &str) -> SchedResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| SchedError::InvalidDate(s.to_string()))
}
