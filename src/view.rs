//! Fog-of-war filtering.
//!
//! Derives the player-restricted view of a game state: only hexes within
//! the field-of-view radius of one of the player's entities are retained
//! (hidden hexes are omitted entirely, not masked), and only that player's
//! own resource total is exposed.

use std::collections::BTreeMap;

use crate::board::{Coords, GameState, Hex, FIELD_OF_VIEW};

/// Returns the part of `state` the given player may observe.
///
/// The result is itself a `GameState`; filtering an already-filtered view
/// for the same player yields the same view.
pub fn player_view(state: &GameState, player: usize) -> GameState {
    let eyes: Vec<Coords> = state
        .hexes
        .iter()
        .filter(|(_, hex)| hex.entity.as_ref().is_some_and(|e| e.player == player))
        .map(|(&coords, _)| coords)
        .collect();

    let hexes: BTreeMap<Coords, Hex> = state
        .hexes
        .iter()
        .filter(|(&coords, _)| eyes.iter().any(|&eye| eye.distance(coords) <= FIELD_OF_VIEW))
        .map(|(&coords, hex)| (coords, hex.clone()))
        .collect();

    // A view carries only the owner's total; re-filtering a view must read
    // that single slot rather than index by player.
    let own = if state.player_resources.len() == 1 {
        state.player_resources[0]
    } else {
        state.player_resources.get(player).copied().unwrap_or(0)
    };

    let mut view = state.clone();
    view.hexes = hexes;
    view.player_resources = vec![own];
    view
}
