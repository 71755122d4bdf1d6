//! Per-order validation and application.
//!
//! Each order kind shares three validation primitives: the unit ownership
//! check, the target-blocked check, and the payment check. A failed check
//! sets the order's status and aborts that order without touching the rest
//! of the round. Orders that pass every check end with status `Ok`.

use std::collections::BTreeSet;

use rand::Rng;

use crate::board::{
    EntityId, EntityKind, GameState, Order, OrderKind, OrderStatus, Terrain, BEE_COST, HIVE_COST,
    WALL_COST,
};

/// A wall under attack breaks on a 1-in-6 roll.
const WALL_BREAK_SIDES: u32 = 6;
/// A bee under attack is stunned for the rest of the turn half the time.
const STUN_CHANCE: f64 = 0.5;

/// Applies one order to the state, recording its outcome in the status
/// field. Newly stunned targets are added to `stunned`.
pub(crate) fn apply_order(
    state: &mut GameState,
    order: &mut Order,
    stunned: &mut BTreeSet<EntityId>,
    rng: &mut impl Rng,
) {
    match order.kind {
        OrderKind::Move => apply_move(state, order),
        OrderKind::Attack => apply_attack(state, order, stunned, rng),
        OrderKind::BuildWall => apply_build_wall(state, order),
        OrderKind::BuildHive => apply_build_hive(state, order),
        OrderKind::Forage => apply_forage(state, order),
        OrderKind::Spawn => apply_spawn(state, order),
    }
}

/// Unit ownership check: the entity at the order's coordinate must exist,
/// match the expected kind, and belong to the ordering player.
fn check_unit(state: &GameState, order: &mut Order) -> Option<EntityId> {
    match state.entity_at(order.coords) {
        Some(unit) if unit.kind == order.unit_kind() && unit.player == order.player => {
            Some(unit.id)
        }
        _ => {
            order.status = OrderStatus::InvalidUnit;
            None
        }
    }
}

/// Target-blocked check: the target hex must exist, be walkable, and be
/// unoccupied. An order without a direction has no target and is blocked.
fn target_is_blocked(state: &GameState, order: &mut Order) -> bool {
    let open = order.target().and_then(|t| state.hexes.get(&t)).is_some_and(|hex| {
        hex.terrain.is_walkable() && hex.entity.is_none()
    });
    if !open {
        order.status = OrderStatus::Blocked;
    }
    !open
}

/// Payment check: deducts `cost` from the player's pool only if sufficient.
fn try_pay(state: &mut GameState, order: &mut Order, cost: u32) -> bool {
    match state.player_resources.get_mut(order.player) {
        Some(pool) if *pool >= cost => {
            *pool -= cost;
            true
        }
        _ => {
            order.status = OrderStatus::NotEnoughResources;
            false
        }
    }
}

fn apply_move(state: &mut GameState, order: &mut Order) {
    if check_unit(state, order).is_none() || target_is_blocked(state, order) {
        return;
    }
    let Some(target) = order.target() else { return };

    let moved = state.hexes.get_mut(&order.coords).and_then(|hex| hex.entity.take());
    if let (Some(hex), Some(unit)) = (state.hexes.get_mut(&target), moved) {
        hex.entity = Some(unit);
    }
    order.status = OrderStatus::Ok;
}

fn apply_attack(
    state: &mut GameState,
    order: &mut Order,
    stunned: &mut BTreeSet<EntityId>,
    rng: &mut impl Rng,
) {
    if check_unit(state, order).is_none() {
        return;
    }

    let victim = order.target().and_then(|t| state.entity_at(t).map(|e| (t, e.id, e.kind)));
    let Some((target, id, kind)) = victim else {
        order.status = OrderStatus::InvalidTarget;
        return;
    };

    match kind {
        EntityKind::Wall => {
            // Walls never counter-attack; they just occasionally crumble.
            if rng.gen_range(0..WALL_BREAK_SIDES) == 0 {
                if let Some(hex) = state.hexes.get_mut(&target) {
                    hex.entity = None;
                }
            }
        }
        EntityKind::Bee => {
            if rng.gen_bool(STUN_CHANCE) {
                stunned.insert(id);
            }
        }
        EntityKind::Hive => {}
    }
    order.status = OrderStatus::Ok;
}

fn apply_build_wall(state: &mut GameState, order: &mut Order) {
    if check_unit(state, order).is_none()
        || target_is_blocked(state, order)
        || !try_pay(state, order, WALL_COST)
    {
        return;
    }
    let Some(target) = order.target() else { return };

    state.place_entity(target, EntityKind::Wall, order.player);
    order.status = OrderStatus::Ok;
}

fn apply_build_hive(state: &mut GameState, order: &mut Order) {
    if check_unit(state, order).is_none() || !try_pay(state, order, HIVE_COST) {
        return;
    }

    // The hive is planted where the building bee stands; the bee is
    // replaced, so no blocked check applies.
    if let Some(hex) = state.hexes.get_mut(&order.coords) {
        hex.entity = None;
    }
    state.place_entity(order.coords, EntityKind::Hive, order.player);
    order.status = OrderStatus::Ok;
}

fn apply_forage(state: &mut GameState, order: &mut Order) {
    if check_unit(state, order).is_none() {
        return;
    }
    let carrying = state.entity_at(order.coords).is_some_and(|e| e.flower);

    if carrying {
        deliver_flower(state, order);
    } else {
        pick_up_flower(state, order);
    }
}

/// A bee with empty hands picks a flower from its own field hex.
fn pick_up_flower(state: &mut GameState, order: &mut Order) {
    let Some(hex) = state.hexes.get_mut(&order.coords) else { return };
    if hex.terrain != Terrain::Field || hex.resources == 0 {
        order.status = OrderStatus::CannotForage;
        return;
    }

    hex.resources -= 1;
    if let Some(bee) = hex.entity.as_mut() {
        bee.flower = true;
    }
    order.status = OrderStatus::Ok;
}

/// A carrying bee next to one of its own hives drops the flower off,
/// crediting the player's pool.
fn deliver_flower(state: &mut GameState, order: &mut Order) {
    let own_hive_adjacent = order.coords.neighbours().into_iter().any(|n| {
        state
            .entity_at(n)
            .is_some_and(|e| e.kind == EntityKind::Hive && e.player == order.player)
    });
    if !own_hive_adjacent {
        order.status = OrderStatus::CannotForage;
        return;
    }

    if let Some(bee) = state.entity_at_mut(order.coords) {
        bee.flower = false;
    }
    state.player_resources[order.player] += 1;
    state.last_resource_change = state.turn;
    order.status = OrderStatus::Ok;
}

fn apply_spawn(state: &mut GameState, order: &mut Order) {
    if check_unit(state, order).is_none()
        || target_is_blocked(state, order)
        || !try_pay(state, order, BEE_COST)
    {
        return;
    }
    let Some(target) = order.target() else { return };

    state.place_entity(target, EntityKind::Bee, order.player);
    order.status = OrderStatus::Ok;
}
