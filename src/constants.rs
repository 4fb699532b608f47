//! Shared constants for feed and schedule generation.

/// Domain suffix for VEVENT UIDs. UIDs must be stable across feed
/// regenerations so calendar clients can de-duplicate.
pub const UID_DOMAIN: &str = "leaguesched.app";

/// PRODID emitted on every generated calendar.
pub const PRODID: &str = "-//leaguesched//Sports League Scheduling//EN";

/// Zone used when a feed request does not specify one.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Default event length when no explicit end time is supplied.
pub const DEFAULT_GAME_DURATION_MINUTES: i64 = 120;

/// Rolling feed window: how far back the default date range reaches.
pub const DEFAULT_FEED_PAST_DAYS: i64 = 30;

/// Rolling feed window: how far forward the default date range reaches.
pub const DEFAULT_FEED_FUTURE_DAYS: i64 = 365;

/// Hard cap on tournament field size. Guards against combinatorial round
/// counts from pathological inputs.
pub const MAX_TEAMS: usize = 256;

/// Group size used when a group-stage config does not specify one.
pub const DEFAULT_GROUP_SIZE: u32 = 4;

/// Qualifiers per group used when a group-stage config does not specify one.
pub const DEFAULT_ADVANCE_PER_GROUP: u32 = 2;
