//! Single-elimination bracket generation.
//!
//! The bracket is padded to the next power of two with byes, paired in the
//! standard 1-vs-lowest order. Only round 1 contains real matchups; later
//! rounds are placeholder games referencing unresolved winners, except that
//! a team whose round-1 opponent is a bye advances by name.

use super::{Entrant, Pairing};

pub(crate) fn build_bracket(seeded: &[Entrant]) -> Vec<Vec<Pairing>> {
    let bracket_size = seeded.len().next_power_of_two();

    // Standard seeding: slot order 1, N, N/2+1, ... so seed 1 meets the
    // lowest seed and the top two can only meet in the final
    let mut slots: Vec<Entrant> = Vec::with_capacity(bracket_size);
    let mut bye_counter = 0;
    for position in seed_order(bracket_size) {
        match seeded.get(position) {
            Some(entrant) => slots.push(entrant.clone()),
            None => {
                bye_counter += 1;
                slots.push(Entrant::bye(bye_counter));
            }
        }
    }

    let mut rounds = Vec::new();
    let mut current: Vec<Pairing> = slots
        .chunks(2)
        .map(|pair| Pairing::new(pair[0].clone(), pair[1].clone()))
        .collect();

    while current.len() > 1 {
        let next: Vec<Pairing> = current
            .chunks(2)
            .map(|feeders| Pairing::new(advancer(&feeders[0]), advancer(&feeders[1])))
            .collect();
        rounds.push(current);
        current = next;
    }
    rounds.push(current);
    rounds
}

/// The participant a finished game sends forward: the real team when the
/// opponent is a bye, otherwise an unresolved-winner sentinel.
fn advancer(pairing: &Pairing) -> Entrant {
    if pairing.away.is_bye() {
        pairing.home.clone()
    } else if pairing.home.is_bye() {
        pairing.away.clone()
    } else {
        Entrant::winner_of(&pairing.home, &pairing.away)
    }
}

/// Bracket slot order for `size` entrants (size is a power of two):
/// doubling the field inserts each new seed against its mirror.
fn seed_order(size: usize) -> Vec<usize> {
    let mut order = vec![0];
    let mut len = 1;
    while len < size {
        len *= 2;
        let mut next = Vec::with_capacity(len);
        for &seed in &order {
            next.push(seed);
            next.push(len - 1 - seed);
        }
        order = next;
    }
    order
}
