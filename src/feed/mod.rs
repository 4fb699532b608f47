//! Calendar feed generation.
//!
//! Turns already-fetched assignment/game rows into an RFC 5545 `text/calendar`
//! body. The caller owns the HTTP concerns (MIME type, attachment filename).

mod entry;
mod generate;
mod timezone;

pub use entry::{AssignmentStatus, FeedOptions, ScheduleEntry};
pub use generate::build_feed;
