//! Date and time-slot assignment.
//!
//! Real games walk the configured grid: eligible weekdays from the start
//! date, `games_per_day` games per day, slots taken in order (cycling when
//! a day holds more games than slots). Byes and placeholders are stamped
//! with their round and the first slot but never consume day capacity.

use chrono::{Datelike, NaiveDate, NaiveTime};

use super::{GeneratedGame, Pairing, TournamentConfig, parse_slot};
use crate::error::{SchedError, SchedResult};

pub(crate) fn schedule(
    rounds: &[Vec<Pairing>],
    config: &TournamentConfig,
) -> SchedResult<Vec<GeneratedGame>> {
    // Slots were validated up front; re-parse defensively all the same
    let times: Vec<NaiveTime> = config
        .time_slots
        .iter()
        .map(|s| {
            parse_slot(s)
                .ok_or_else(|| SchedError::InvalidConfig(format!("unparsable time slot '{s}'")))
        })
        .collect::<SchedResult<_>>()?;

    let mut walker = SlotWalker::new(config, &times)?;
    let mut games = Vec::new();

    for (index, round) in rounds.iter().enumerate() {
        let round_number = index as u32 + 1;
        for pairing in round {
            let (date, time) = if pairing.home.is_sentinel() || pairing.away.is_sentinel() {
                // Never schedulable: stamp, don't consume capacity
                (walker.current_date(), times[0])
            } else {
                walker.next()?
            };
            games.push(GeneratedGame {
                home_team_id: pairing.home.id.clone(),
                away_team_id: pairing.away.id.clone(),
                home_team_name: pairing.home.name.clone(),
                away_team_name: pairing.away.name.clone(),
                game_date: date,
                game_time: time,
                location: config.venue.clone(),
                round: round_number,
                tournament_type: config.tournament_type,
            });
        }
    }
    Ok(games)
}

struct SlotWalker<'a> {
    date: NaiveDate,
    games_today: u32,
    games_per_day: u32,
    times: &'a [NaiveTime],
    days_of_week: &'a [u8],
}

impl<'a> SlotWalker<'a> {
    fn new(config: &'a TournamentConfig, times: &'a [NaiveTime]) -> SchedResult<Self> {
        let mut walker = SlotWalker {
            date: config.start_date,
            games_today: 0,
            games_per_day: config.games_per_day,
            times,
            days_of_week: &config.days_of_week,
        };
        walker.date = walker.first_eligible(config.start_date)?;
        Ok(walker)
    }

    fn current_date(&self) -> NaiveDate {
        self.date
    }

    fn next(&mut self) -> SchedResult<(NaiveDate, NaiveTime)> {
        if self.games_today == self.games_per_day {
            self.date = self.first_eligible(next_day(self.date)?)?;
            self.games_today = 0;
        }
        let time = self.times[self.games_today as usize % self.times.len()];
        self.games_today += 1;
        Ok((self.date, time))
    }

    fn first_eligible(&self, mut date: NaiveDate) -> SchedResult<NaiveDate> {
        // days_of_week is validated non-empty, so this terminates within a week
        while !self
            .days_of_week
            .contains(&(date.weekday().num_days_from_sunday() as u8))
        {
            date = next_day(date)?;
        }
        Ok(date)
    }
}

fn next_day(date: NaiveDate) -> SchedResult<NaiveDate> {
    date.succ_opt()
        .ok_or_else(|| SchedError::InvalidConfig("schedule runs past the calendar".to_string()))
}
