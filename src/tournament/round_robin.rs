//! Round-robin pairing via the circle method.

use super::{Entrant, Pairing};

/// Every team plays every other exactly once. Even fields get `n - 1`
/// rounds; odd fields get `n` rounds with one bye per round.
pub(crate) fn build_rounds(entrants: &[Entrant]) -> Vec<Vec<Pairing>> {
    // The circle method works on an even field; a vacant slot stands in for
    // the missing opponent
    let mut rotation: Vec<Option<Entrant>> = entrants.iter().cloned().map(Some).collect();
    if rotation.len() % 2 == 1 {
        rotation.push(None);
    }
    let size = rotation.len();
    let round_count = size - 1;

    let mut rounds = Vec::with_capacity(round_count);
    for round in 0..round_count {
        let mut pairings = Vec::with_capacity(size / 2);
        for i in 0..size / 2 {
            let a = resolve(&rotation[i], round);
            let b = resolve(&rotation[size - 1 - i], round);
            // Alternate the pivot's home side so the fixed team is not
            // always at home
            let (home, away) = if i == 0 && round % 2 == 1 {
                (b, a)
            } else {
                (a, b)
            };
            pairings.push(Pairing::new(home, away));
        }
        rounds.push(pairings);

        // Hold slot 0 fixed, rotate the rest one step
        if let Some(last) = rotation.pop() {
            rotation.insert(1, last);
        }
    }
    rounds
}

fn resolve(slot: &Option<Entrant>, round: usize) -> Entrant {
    match slot {
        Some(entrant) => entrant.clone(),
        None => Entrant::bye(round + 1),
    }
}
