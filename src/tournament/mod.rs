//! Tournament schedule generation.
//!
//! `generate` turns an ordered team list plus a `TournamentConfig` into a
//! complete game schedule. Four formats are supported: round robin, single
//! elimination, Swiss system, and group stage with playoffs. The output is a
//! request-scoped value; the caller maps it onto persisted game rows (league
//! id, pay rates, referee slots are caller concerns).
//!
//! Unresolved participants are encoded as sentinel ids (`bye-<n>`,
//! `winner-<a>-<b>`, `group-<g>-seed-<k>`); `creatable_games` filters them
//! out before persistence.

mod elimination;
mod groups;
mod materialize;
mod round_robin;
mod slots;
mod swiss;

use chrono::{NaiveDate, NaiveTime};
use log::debug;
use rand::{rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADVANCE_PER_GROUP, DEFAULT_GROUP_SIZE, MAX_TEAMS};
use crate::error::{SchedError, SchedResult};

pub use materialize::{MaterializeOutcome, creatable_games};

/// Sentinel id prefix for a missing opponent.
pub const BYE_PREFIX: &str = "bye-";
/// Sentinel id prefix for the unresolved winner of an earlier game.
pub const WINNER_PREFIX: &str = "winner-";
/// Sentinel id prefix for an unresolved group-stage qualifier.
pub const QUALIFIER_PREFIX: &str = "group-";

/// True for ids that stand in for an unresolved participant. Games holding
/// one are bracket structure, never schedulable rows.
pub fn is_sentinel_id(id: &str) -> bool {
    id.starts_with(BYE_PREFIX) || id.starts_with(WINNER_PREFIX) || id.starts_with(QUALIFIER_PREFIX)
}

/// A team as fetched by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    /// League rank, used by `SeedingMethod::Rank` (1 is best)
    #[serde(default)]
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TournamentType {
    RoundRobin,
    SingleElimination,
    SwissSystem,
    GroupStagePlayoffs,
}

impl TournamentType {
    fn label(self) -> &'static str {
        match self {
            TournamentType::RoundRobin => "round robin",
            TournamentType::SingleElimination => "single elimination",
            TournamentType::SwissSystem => "swiss system",
            TournamentType::GroupStagePlayoffs => "group stage + playoffs",
        }
    }

    fn min_teams(self) -> usize {
        match self {
            TournamentType::RoundRobin | TournamentType::SingleElimination => 2,
            TournamentType::SwissSystem | TournamentType::GroupStagePlayoffs => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeedingMethod {
    Random,
    #[default]
    Rank,
    Manual,
}

/// Configuration for one schedule-generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentConfig {
    #[serde(alias = "tournament_type")]
    pub tournament_type: TournamentType,
    pub venue: String,
    pub start_date: NaiveDate,
    /// Ordered "HH:MM" slots, walked in order within each day
    pub time_slots: Vec<String>,
    /// Eligible weekdays, 0 = Sunday through 6 = Saturday
    pub days_of_week: Vec<u8>,
    pub games_per_day: u32,
    #[serde(default)]
    pub seeding_method: SeedingMethod,
    /// Swiss only; defaults to ceil(log2 n) + 1
    #[serde(default)]
    pub rounds: Option<u32>,
    /// Group stage only
    #[serde(default)]
    pub group_size: Option<u32>,
    /// Group stage only
    #[serde(default)]
    pub advance_per_group: Option<u32>,
}

impl TournamentConfig {
    /// Fail fast on configurations that would loop unboundedly or produce
    /// nonsense schedules. The generator assumes a validated input.
    pub fn validate(&self, team_count: usize) -> SchedResult<()> {
        let min = self.tournament_type.min_teams();
        if team_count < min {
            return Err(SchedError::TooFewTeams {
                format: self.tournament_type.label(),
                min,
                got: team_count,
            });
        }
        if team_count > MAX_TEAMS {
            return Err(SchedError::TooManyTeams {
                got: team_count,
                max: MAX_TEAMS,
            });
        }
        if self.games_per_day == 0 {
            return Err(SchedError::InvalidConfig(
                "gamesPerDay must be positive".to_string(),
            ));
        }
        if self.time_slots.is_empty() {
            return Err(SchedError::InvalidConfig(
                "at least one time slot is required".to_string(),
            ));
        }
        for slot in &self.time_slots {
            if parse_slot(slot).is_none() {
                return Err(SchedError::InvalidConfig(format!(
                    "unparsable time slot '{slot}'. Expected HH:MM"
                )));
            }
        }
        if self.days_of_week.is_empty() {
            return Err(SchedError::InvalidConfig(
                "at least one day of week is required".to_string(),
            ));
        }
        if let Some(&bad) = self.days_of_week.iter().find(|&&d| d > 6) {
            return Err(SchedError::InvalidConfig(format!(
                "day of week {bad} is out of range 0-6"
            )));
        }
        if let Some(rounds) = self.rounds
            && rounds == 0
        {
            return Err(SchedError::InvalidConfig(
                "rounds must be positive".to_string(),
            ));
        }
        if self.tournament_type == TournamentType::GroupStagePlayoffs {
            let group_size = self.group_size.unwrap_or(DEFAULT_GROUP_SIZE);
            let advance = self.advance_per_group.unwrap_or(DEFAULT_ADVANCE_PER_GROUP);
            if group_size < 2 {
                return Err(SchedError::InvalidConfig(
                    "groupSize must be at least 2".to_string(),
                ));
            }
            if advance == 0 || advance > group_size {
                return Err(SchedError::InvalidConfig(
                    "advancePerGroup must be between 1 and groupSize".to_string(),
                ));
            }
        }
        Ok(())
    }
}

pub(crate) fn parse_slot(slot: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(slot, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(slot, "%H:%M:%S"))
        .ok()
}

/// One game of the generated schedule. Ephemeral: the caller persists the
/// creatable subset and discards the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedGame {
    pub home_team_id: String,
    pub away_team_id: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub game_date: NaiveDate,
    pub game_time: NaiveTime,
    pub location: String,
    pub round: u32,
    pub tournament_type: TournamentType,
}

impl GeneratedGame {
    /// True when either participant is a bye or an unresolved placeholder.
    pub fn is_placeholder(&self) -> bool {
        is_sentinel_id(&self.home_team_id) || is_sentinel_id(&self.away_team_id)
    }

    /// True when this is a bye game specifically.
    pub fn is_bye(&self) -> bool {
        self.home_team_id.starts_with(BYE_PREFIX) || self.away_team_id.starts_with(BYE_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    pub team_count: usize,
    pub game_count: usize,
    pub bye_count: usize,
    pub placeholder_count: usize,
    pub first_game_date: Option<NaiveDate>,
    pub last_game_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSchedule {
    pub games: Vec<GeneratedGame>,
    pub total_rounds: u32,
    pub summary: ScheduleSummary,
}

/// A pairing participant: a real team or a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entrant {
    pub id: String,
    pub name: String,
}

impl Entrant {
    pub fn bye(n: usize) -> Self {
        Entrant {
            id: format!("{BYE_PREFIX}{n}"),
            name: "BYE".to_string(),
        }
    }

    pub fn is_bye(&self) -> bool {
        self.id.starts_with(BYE_PREFIX)
    }

    pub fn is_sentinel(&self) -> bool {
        is_sentinel_id(&self.id)
    }

    /// The unresolved winner of a game between `home` and `away`.
    pub fn winner_of(home: &Entrant, away: &Entrant) -> Self {
        Entrant {
            id: format!("{WINNER_PREFIX}{}-{}", home.id, away.id),
            name: format!("Winner of {} vs {}", home.name, away.name),
        }
    }

    pub fn qualifier(group: usize, place: usize) -> Self {
        Entrant {
            id: format!("{QUALIFIER_PREFIX}{group}-seed-{place}"),
            name: format!("Group {group} #{place}"),
        }
    }
}

/// One home/away pairing within a round.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Pairing {
    pub home: Entrant,
    pub away: Entrant,
}

impl Pairing {
    /// Keep the real team on the home side of bye pairings.
    pub fn new(home: Entrant, away: Entrant) -> Self {
        if home.is_bye() && !away.is_bye() {
            Pairing {
                home: away,
                away: home,
            }
        } else {
            Pairing { home, away }
        }
    }
}

/// Generate a complete schedule for `teams` under `config`.
///
/// Deterministic for any seeding method other than `Random`: identical
/// inputs produce identical output, games in the same order.
pub fn generate(teams: &[Team], config: &TournamentConfig) -> SchedResult<GeneratedSchedule> {
    config.validate(teams.len())?;

    let seeded = seed_teams(teams, config.seeding_method);
    let rounds = match config.tournament_type {
        TournamentType::RoundRobin => round_robin::build_rounds(&seeded),
        TournamentType::SingleElimination => elimination::build_bracket(&seeded),
        TournamentType::SwissSystem => swiss::build_rounds(&seeded, config.rounds),
        TournamentType::GroupStagePlayoffs => groups::build_rounds(
            &seeded,
            config.group_size.unwrap_or(DEFAULT_GROUP_SIZE) as usize,
            config.advance_per_group.unwrap_or(DEFAULT_ADVANCE_PER_GROUP) as usize,
        ),
    };
    let total_rounds = rounds.len() as u32;
    debug!(
        "{}: {} teams, {} rounds",
        config.tournament_type.label(),
        teams.len(),
        total_rounds
    );

    let games = slots::schedule(&rounds, config)?;
    let summary = summarize(teams.len(), &games);

    Ok(GeneratedSchedule {
        games,
        total_rounds,
        summary,
    })
}

fn summarize(team_count: usize, games: &[GeneratedGame]) -> ScheduleSummary {
    let real_dates: Vec<NaiveDate> = games
        .iter()
        .filter(|g| !g.is_placeholder())
        .map(|g| g.game_date)
        .collect();

    ScheduleSummary {
        team_count,
        game_count: games.len(),
        bye_count: games.iter().filter(|g| g.is_bye()).count(),
        placeholder_count: games
            .iter()
            .filter(|g| g.is_placeholder() && !g.is_bye())
            .count(),
        first_game_date: real_dates.iter().min().copied(),
        last_game_date: real_dates.iter().max().copied(),
    }
}

/// Order teams according to the seeding method. Rank seeding sorts by league
/// rank (1 first, unranked last) with the caller's order as tie-break;
/// Manual preserves the caller's order; Random shuffles.
fn seed_teams(teams: &[Team], method: SeedingMethod) -> Vec<Entrant> {
    let mut entrants: Vec<Entrant> = teams
        .iter()
        .map(|t| Entrant {
            id: t.id.clone(),
            name: t.name.clone(),
        })
        .collect();

    match method {
        SeedingMethod::Manual => entrants,
        SeedingMethod::Random => {
            entrants.shuffle(&mut rng());
            entrants
        }
        SeedingMethod::Rank => {
            let mut indexed: Vec<(u32, usize, Entrant)> = teams
                .iter()
                .zip(entrants)
                .enumerate()
                .map(|(i, (team, entrant))| (team.rank.unwrap_or(u32::MAX), i, entrant))
                .collect();
            indexed.sort_by_key(|(rank, index, _)| (*rank, *index));
            indexed.into_iter().map(|(_, _, e)| e).collect()
        }
    }
}

#[cfg(test)]
pub(crate) fn test_teams(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team {
            id: format!("t{i}"),
            name: format!("Team {i}"),
            rank: Some(i as u32),
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn test_config(tournament_type: TournamentType) -> TournamentConfig {
    TournamentConfig {
        tournament_type,
        venue: "Central Park".to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 9, 5).unwrap(),
        time_slots: vec!["10:00".to_string(), "12:00".to_string()],
        days_of_week: vec![0, 6],
        games_per_day: 4,
        seeding_method: SeedingMethod::Rank,
        rounds: None,
        group_size: None,
        advance_per_group: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_rejects_bad_configs() {
        let teams = test_teams(8);

        let mut config = test_config(TournamentType::RoundRobin);
        config.games_per_day = 0;
        assert!(matches!(
            generate(&teams, &config),
            Err(SchedError::InvalidConfig(_))
        ));

        let mut config = test_config(TournamentType::RoundRobin);
        config.time_slots = vec![];
        assert!(generate(&teams, &config).is_err());

        let mut config = test_config(TournamentType::RoundRobin);
        config.time_slots = vec!["25:99".to_string()];
        assert!(generate(&teams, &config).is_err());

        let mut config = test_config(TournamentType::RoundRobin);
        config.days_of_week = vec![7];
        assert!(generate(&teams, &config).is_err());

        let mut config = test_config(TournamentType::GroupStagePlayoffs);
        config.group_size = Some(1);
        assert!(generate(&teams, &config).is_err());

        let mut config = test_config(TournamentType::GroupStagePlayoffs);
        config.group_size = Some(4);
        config.advance_per_group = Some(5);
        assert!(generate(&teams, &config).is_err());
    }

    #[test]
    fn test_validation_enforces_format_minimums() {
        let config = test_config(TournamentType::SwissSystem);
        let result = generate(&test_teams(3), &config);
        assert!(matches!(
            result,
            Err(SchedError::TooFewTeams { min: 4, got: 3, .. })
        ));

        let config = test_config(TournamentType::RoundRobin);
        assert!(generate(&test_teams(1), &config).is_err());
        assert!(generate(&test_teams(2), &config).is_ok());
    }

    #[test]
    fn test_rank_seeding_orders_by_rank_then_input_order() {
        let teams = vec![
            Team {
                id: "a".to_string(),
                name: "A".to_string(),
                rank: Some(3),
            },
            Team {
                id: "b".to_string(),
                name: "B".to_string(),
                rank: None,
            },
            Team {
                id: "c".to_string(),
                name: "C".to_string(),
                rank: Some(1),
            },
            Team {
                id: "d".to_string(),
                name: "D".to_string(),
                rank: Some(3),
            },
        ];
        let seeded = seed_teams(&teams, SeedingMethod::Rank);
        let ids: Vec<&str> = seeded.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_generation_is_deterministic_for_rank_seeding() {
        let teams = test_teams(6);
        let config = test_config(TournamentType::RoundRobin);
        let first = generate(&teams, &config).unwrap();
        let second = generate(&teams, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_deserializes_from_camel_case_json() {
        let json = r#"{
            "tournamentType": "GROUP_STAGE_PLAYOFFS",
            "venue": "Riverside",
            "startDate": "2026-10-03",
            "timeSlots": ["09:00", "11:00"],
            "daysOfWeek": [6],
            "gamesPerDay": 6,
            "seedingMethod": "MANUAL",
            "groupSize": 4,
            "advancePerGroup": 2
        }"#;
        let config: TournamentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tournament_type, TournamentType::GroupStagePlayoffs);
        assert_eq!(config.seeding_method, SeedingMethod::Manual);
        assert_eq!(config.group_size, Some(4));
        assert_eq!(
            config.start_date,
            NaiveDate::from_ymd_opt(2026, 10, 3).unwrap()
        );
    }

    #[test]
    fn test_round_robin_counts_through_the_public_api() {
        let config = test_config(TournamentType::RoundRobin);

        let even = generate(&test_teams(6), &config).unwrap();
        assert_eq!(even.total_rounds, 5);
        assert_eq!(even.games.len(), 15);
        assert_eq!(even.summary.bye_count, 0);
        assert_eq!(even.summary.team_count, 6);

        let odd = generate(&test_teams(5), &config).unwrap();
        assert_eq!(odd.total_rounds, 5);
        assert_eq!(odd.summary.bye_count, 5);
        assert_eq!(odd.summary.game_count, 15);
    }

    #[test]
    fn test_single_elimination_counts_through_the_public_api() {
        let config = test_config(TournamentType::SingleElimination);

        let full = generate(&test_teams(8), &config).unwrap();
        assert_eq!(full.total_rounds, 3);
        assert_eq!(full.games.len(), 7);
        assert_eq!(full.summary.bye_count, 0);
        assert_eq!(full.summary.placeholder_count, 3);

        let padded = generate(&test_teams(6), &config).unwrap();
        assert_eq!(
            padded
                .games
                .iter()
                .filter(|g| g.round == 1 && g.is_bye())
                .count(),
            2
        );
    }

    #[test]
    fn test_swiss_defaults_through_the_public_api() {
        let config = test_config(TournamentType::SwissSystem);
        let schedule = generate(&test_teams(8), &config).unwrap();
        assert_eq!(schedule.total_rounds, 4);
        assert!(
            schedule
                .games
                .iter()
                .all(|g| g.home_team_id != g.away_team_id)
        );
    }

    #[test]
    fn test_group_stage_counts_through_the_public_api() {
        let mut config = test_config(TournamentType::GroupStagePlayoffs);
        config.group_size = Some(4);
        config.advance_per_group = Some(2);

        let schedule = generate(&test_teams(12), &config).unwrap();
        // 3 group rounds plus a bracket of 8 (3 rounds) over the 6 qualifiers
        assert_eq!(schedule.total_rounds, 6);
        let real: Vec<_> = schedule
            .games
            .iter()
            .filter(|g| !g.is_placeholder())
            .collect();
        assert_eq!(real.len(), 18, "three groups of four, round robin each");
        assert!(schedule.games.iter().filter(|g| g.round > 3).count() > 0);
        assert!(
            schedule
                .games
                .iter()
                .filter(|g| g.round > 3)
                .all(GeneratedGame::is_placeholder)
        );
    }

    #[test]
    fn test_games_carry_venue_and_type() {
        let config = test_config(TournamentType::RoundRobin);
        let schedule = generate(&test_teams(4), &config).unwrap();
        for game in &schedule.games {
            assert_eq!(game.location, "Central Park");
            assert_eq!(game.tournament_type, TournamentType::RoundRobin);
        }
    }

    #[test]
    fn test_sentinel_id_detection() {
        assert!(is_sentinel_id("bye-1"));
        assert!(is_sentinel_id("winner-t1-t8"));
        assert!(is_sentinel_id("group-2-seed-1"));
        assert!(!is_sentinel_id("t42"));
    }
}
