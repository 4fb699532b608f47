//! Error types for schedule and feed generation.

use thiserror::Error;

/// Errors that can occur while building feeds or tournament schedules.
#[derive(Error, Debug)]
pub enum SchedError {
    #[error("Invalid timezone id: {0}")]
    InvalidTimezone(String),

    #[error("Unparsable date/time '{value}' for game {game_id}")]
    InvalidDateTime { value: String, game_id: String },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid tournament configuration: {0}")]
    InvalidConfig(String),

    #[error("{format} requires at least {min} teams, got {got}")]
    TooFewTeams {
        format: &'static str,
        min: usize,
        got: usize,
    },

    #[error("Team count {got} exceeds the supported maximum of {max}")]
    TooManyTeams { got: usize, max: usize },
}

/// Result type alias for scheduling operations.
pub type SchedResult<T> = Result<T, SchedError>;
