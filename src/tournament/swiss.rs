//! Swiss-system pairing.
//!
//! The whole schedule is generated up front, before any results exist, so
//! standings reduce to seed order; what varies the pairings between rounds
//! is the repeat-avoidance set. Pairing is greedy: best unpaired team takes
//! the best unpaired opponent it has not met. When no fresh opponent is
//! left a repeat is allowed rather than failing the round.

use std::collections::HashSet;

use super::{Entrant, Pairing};

/// Default round count: ceil(log2 n) + 1
fn default_rounds(n: usize) -> u32 {
    let ceil_log2 = usize::BITS - (n - 1).leading_zeros();
    ceil_log2 + 1
}

pub(crate) fn build_rounds(seeded: &[Entrant], rounds: Option<u32>) -> Vec<Vec<Pairing>> {
    let n = seeded.len();
    let round_count = rounds.unwrap_or_else(|| default_rounds(n));

    let wins = vec![0u32; n];
    let mut bye_counts = vec![0u32; n];
    let mut played: HashSet<(usize, usize)> = HashSet::new();
    let mut result = Vec::with_capacity(round_count as usize);

    for round in 0..round_count {
        // Standings order: wins descending, original seed as tie-break
        let mut standings: Vec<usize> = (0..n).collect();
        standings.sort_by_key(|&i| (std::cmp::Reverse(wins[i]), i));

        let mut unpaired: Vec<usize> = standings;
        let mut pairings = Vec::with_capacity(n / 2);

        // Odd field: decide up front who sits out, rotating the bye to the
        // lowest-placed team with the fewest byes so far
        let mut sitter = None;
        if unpaired.len() % 2 == 1
            && let Some(&pick) = unpaired.iter().rev().min_by_key(|&&i| bye_counts[i])
        {
            unpaired.retain(|&i| i != pick);
            bye_counts[pick] += 1;
            sitter = Some(pick);
        }

        while unpaired.len() >= 2 {
            let a = unpaired.remove(0);
            // Prefer the best-placed opponent not yet met; fall back to a
            // repeat when none exists
            let pick = unpaired
                .iter()
                .position(|&b| !played.contains(&pair_key(a, b)))
                .unwrap_or(0);
            let b = unpaired.remove(pick);
            played.insert(pair_key(a, b));

            // Alternate colors round by round so the top seed is not
            // always at home
            let (home, away) = if round % 2 == 1 { (b, a) } else { (a, b) };
            pairings.push(Pairing::new(
                seeded[home].clone(),
                seeded[away].clone(),
            ));
        }
        if let Some(rest) = sitter {
            pairings.push(Pairing::new(
                seeded[rest].clone(),
                Entrant::bye(round as usize + 1),
            ));
        }
        result.push(pairings);
    }
    result
}

fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tournament::test_teams;

    fn entrants(n: usize) -> Vec<Entrant> {
        test_teams(n)
            .into_iter()
            .map(|t| Entrant {
                id: t.id,
                name: t.name,
            })
            .collect()
    }

    #[test]
    fn test_default_round_counts() {
        assert_eq!(default_rounds(4), 3);
        assert_eq!(default_rounds(8), 4);
        assert_eq!(default_rounds(9), 5);
        assert_eq!(default_rounds(16), 5);
    }

    #[test]
    fn test_eight_teams_default_to_four_rounds() {
        let rounds = build_rounds(&entrants(8), None);
        assert_eq!(rounds.len(), 4);
        for round in &rounds {
            assert_eq!(round.len(), 4);
        }
    }

    #[test]
    fn test_no_team_meets_itself() {
        for n in [4, 5, 8, 9, 12] {
            let rounds = build_rounds(&entrants(n), None);
            for pairing in rounds.iter().flatten() {
                assert_ne!(pairing.home.id, pairing.away.id);
            }
        }
    }

    #[test]
    fn test_repeats_avoided_while_alternatives_exist() {
        // 8 teams over 4 rounds: a fresh opponent always exists, so every
        // pairing must be distinct
        let rounds = build_rounds(&entrants(8), None);
        let mut seen = HashSet::new();
        for pairing in rounds.iter().flatten() {
            let mut key = [pairing.home.id.clone(), pairing.away.id.clone()];
            key.sort();
            assert!(seen.insert(key), "repeat pairing with alternatives left");
        }
    }

    #[test]
    fn test_exhaustion_degrades_to_a_repeat_not_an_error() {
        // 4 teams over 5 rounds cannot avoid repeats (only 3 distinct
        // opponents each); the generator must still fill every round
        let rounds = build_rounds(&entrants(4), Some(5));
        assert_eq!(rounds.len(), 5);
        for round in &rounds {
            assert_eq!(round.len(), 2);
        }
    }

    #[test]
    fn test_bye_rotates_through_the_field() {
        // 5 teams over the default 4 rounds: four different teams must sit
        // out, never the same one twice while others have had no bye
        let rounds = build_rounds(&entrants(5), None);
        let recipients: Vec<String> = rounds
            .iter()
            .map(|round| {
                round
                    .iter()
                    .find(|p| p.away.is_bye())
                    .expect("odd field has a bye each round")
                    .home
                    .id
                    .clone()
            })
            .collect();
        let unique: HashSet<&String> = recipients.iter().collect();
        assert_eq!(unique.len(), recipients.len(), "{recipients:?}");
    }

    #[test]
    fn test_odd_field_gives_exactly_one_bye_per_round() {
        let rounds = build_rounds(&entrants(5), None);
        for round in &rounds {
            assert_eq!(round.len(), 3);
            assert_eq!(round.iter().filter(|p| p.away.is_bye()).count(), 1);
            // Nobody is left unpaired
            let participants: usize = round
                .iter()
                .flat_map(|p| [&p.home, &p.away])
                .filter(|e| !e.is_bye())
                .count();
            assert_eq!(participants, 5);
        }
    }
}
