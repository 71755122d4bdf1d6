//! End-game evaluation.
//!
//! Runs once per turn after all rounds resolve (and once at game
//! construction). Two end conditions: stagnation, when no flower has been
//! delivered for longer than the timeout, and depletion, when no flowers are
//! left on fields or in bees' hands. Winners are the players tied for the
//! maximum resource total.

use crate::board::{GameState, STAGNATION_TIMEOUT};

/// Checks the end conditions and, if the game is over, marks it and fills
/// in the winners list in ascending player order.
pub fn evaluate_endgame(state: &mut GameState) {
    if state.game_over {
        return;
    }

    let stagnated = state.turn - state.last_resource_change > STAGNATION_TIMEOUT;
    let depleted = state.remaining_flowers() == 0;
    if !stagnated && !depleted {
        return;
    }

    state.game_over = true;

    let best = state.player_resources.iter().copied().max().unwrap_or(0);
    state.winners = state
        .player_resources
        .iter()
        .enumerate()
        .filter(|&(_, &total)| total == best)
        .map(|(player, _)| player)
        .collect();
}
