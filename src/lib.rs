//! Scheduling core for a sports-league administration backend.
//!
//! This crate provides the two stateless components the web layer calls into:
//! - `feed` — RFC 5545 (.ics) feed generation for referee assignments and games
//! - `tournament` — round robin / single elimination / Swiss / group-stage
//!   schedule generation from a team list
//!
//! Both are pure library functions: inputs are already-fetched in-memory rows,
//! outputs are a `text/calendar` body or a schedule value the caller persists.

pub mod constants;
pub mod date_range;
pub mod error;
pub mod feed;
pub mod tournament;

// Re-export the public surface at crate root for convenience
pub use date_range::DateRange;
pub use error::{SchedError, SchedResult};
pub use feed::{AssignmentStatus, FeedOptions, ScheduleEntry, build_feed};
pub use tournament::{
    GeneratedGame, GeneratedSchedule, MaterializeOutcome, ScheduleSummary, SeedingMethod, Team,
    TournamentConfig, TournamentType, creatable_games, generate,
};
