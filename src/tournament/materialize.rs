//! Splitting a generated schedule into persistable games.
//!
//! Bye and placeholder games describe bracket structure; they must never
//! reach the database. The caller persists `created` and reports `skipped`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::GeneratedGame;

/// Outcome of filtering a generated schedule for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeOutcome {
    /// Games safe to persist, in schedule order
    pub created: Vec<GeneratedGame>,
    /// Sentinel games that were dropped
    pub skipped: usize,
}

/// Drop every game that references a sentinel participant.
pub fn creatable_games(games: &[GeneratedGame]) -> MaterializeOutcome {
    let mut created = Vec::with_capacity(games.len());
    let mut skipped = 0;
    for game in games {
        if game.is_placeholder() {
            skipped += 1;
        } else {
            created.push(game.clone());
        }
    }
    debug!("materialize: {} created, {skipped} skipped", created.len());
    MaterializeOutcome { created, skipped }
}
