//! Turn round scheduling.
//!
//! A turn takes one ordered list of orders per player. The i-th orders of
//! every player form round i; each round is shuffled uniformly before being
//! applied, which is the only intentional nondeterminism in resolution. A
//! unit acts at most once per turn, tracked by entity id.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{EntityId, GameError, GameState, Order, OrderStatus};

use super::apply::apply_order;
use super::endgame::evaluate_endgame;

/// Resolves one full turn of per-player order batches.
///
/// Returns the flat, time-ordered sequence of processed orders with their
/// final statuses, whatever those are. Fails only structurally: the game
/// must not already be over.
pub fn process_orders(
    state: &mut GameState,
    orders: Vec<Vec<Order>>,
    rng: &mut impl Rng,
) -> Result<Vec<Order>, GameError> {
    if state.game_over {
        return Err(GameError::GameOver);
    }

    // Stamp owning players from batch position; the transport layer is not
    // trusted to fill these in.
    let mut queues: Vec<_> = orders
        .into_iter()
        .enumerate()
        .map(|(player, mut batch)| {
            for order in &mut batch {
                order.player = player;
            }
            batch.into_iter()
        })
        .collect();

    let rounds = queues.iter().map(ExactSizeIterator::len).max().unwrap_or(0);

    let mut acted: BTreeSet<EntityId> = BTreeSet::new();
    let mut stunned: BTreeSet<EntityId> = BTreeSet::new();
    let mut processed = Vec::new();

    for _ in 0..rounds {
        let mut round: Vec<Order> = queues.iter_mut().filter_map(Iterator::next).collect();
        round.shuffle(rng);

        for mut order in round {
            match state.entity_at(order.coords).map(|e| e.id) {
                None => order.status = OrderStatus::InvalidUnit,
                Some(id) if acted.contains(&id) => order.status = OrderStatus::UnitAlreadyActed,
                Some(id) if stunned.contains(&id) => order.status = OrderStatus::UnitStunned,
                Some(id) => {
                    apply_order(state, &mut order, &mut stunned, rng);
                    // The unit's action is consumed even if the order failed
                    // validation.
                    acted.insert(id);
                }
            }
            processed.push(order);
        }
    }

    state.turn += 1;
    evaluate_endgame(state);

    Ok(processed)
}
