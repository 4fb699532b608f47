//! Group stage with a playoff bracket.
//!
//! Teams are partitioned in seed order into groups, each group plays a
//! round robin (group rounds run concurrently), and the qualifiers feed a
//! single-elimination bracket. Every playoff participant is a qualifier
//! sentinel until group play resolves.

use super::{Entrant, Pairing, elimination, round_robin};

pub(crate) fn build_rounds(
    seeded: &[Entrant],
    group_size: usize,
    advance_per_group: usize,
) -> Vec<Vec<Pairing>> {
    let groups = partition(seeded, group_size);

    // Group play: round r of the stage is round r of every group that has one
    let per_group: Vec<Vec<Vec<Pairing>>> = groups
        .iter()
        .map(|group| round_robin::build_rounds(group))
        .collect();
    let stage_rounds = per_group.iter().map(Vec::len).max().unwrap_or(0);

    let mut rounds: Vec<Vec<Pairing>> = Vec::with_capacity(stage_rounds);
    for r in 0..stage_rounds {
        let mut combined = Vec::new();
        for group_rounds in &per_group {
            if let Some(round) = group_rounds.get(r) {
                combined.extend(round.iter().cloned());
            }
        }
        rounds.push(combined);
    }

    // Playoffs: qualifiers ordered place-major so group winners are the
    // top bracket seeds
    let mut qualifiers = Vec::with_capacity(groups.len() * advance_per_group);
    for place in 1..=advance_per_group {
        for group in 1..=groups.len() {
            qualifiers.push(Entrant::qualifier(group, place));
        }
    }
    rounds.extend(elimination::build_bracket(&qualifiers));
    rounds
}

/// Split into `⌊n / group_size⌋` groups; the last group absorbs the
/// remainder.
fn partition(seeded: &[Entrant], group_size: usize) -> Vec<Vec<Entrant>> {
    let count = (seeded.len() / group_size).max(1);
    let mut groups: Vec<Vec<Entrant>> = Vec::with_capacity(count);
    for g in 0..count {
        let start = g * group_size;
        let end = if g == count - 1 {
            seeded.len()
        } else {
            start + group_size
        };
        groups.push(seeded[start..end].to_vec());
    }
    groups
}
