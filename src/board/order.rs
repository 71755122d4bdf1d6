//! Player orders and their outcome statuses.
//!
//! An order commands one unit at one coordinate. The engine treats orders as
//! write-once except for the status field, which records exactly one terminal
//! outcome per processed order.

use serde::{Deserialize, Serialize};

use super::coords::{Coords, Direction};
use super::entity::EntityKind;

/// The command an order gives to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Move,
    Attack,
    BuildWall,
    BuildHive,
    Forage,
    Spawn,
}

/// The outcome of an order after resolution.
///
/// Order-level failures are never surfaced as errors; they land here so the
/// turn always completes even when every order in it fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    InvalidUnit,
    Blocked,
    InvalidTarget,
    CannotForage,
    NotEnoughResources,
    UnitAlreadyActed,
    UnitStunned,
    Ok,
}

/// A command issued by a player for one unit at one coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "type")]
    pub kind: OrderKind,
    /// Owning player index. Stamped by the resolver from the position of the
    /// order batch, so the transport layer does not have to fill it in.
    #[serde(default)]
    pub player: usize,
    pub coords: Coords,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Creates a pending order. The player index is stamped at resolution.
    pub fn new(kind: OrderKind, coords: Coords, direction: Option<Direction>) -> Self {
        Order { kind, player: 0, coords, direction, status: OrderStatus::Pending }
    }

    /// The entity kind expected at the order's coordinate: spawning is a hive
    /// action, everything else is done by a bee.
    pub fn unit_kind(&self) -> EntityKind {
        match self.kind {
            OrderKind::Spawn => EntityKind::Hive,
            _ => EntityKind::Bee,
        }
    }

    /// The hex this order targets, if it has a direction.
    pub fn target(&self) -> Option<Coords> {
        self.direction.map(|dir| self.coords.neighbour(dir))
    }
}
