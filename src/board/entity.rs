//! Entities and ownership.
//!
//! Walls, hives, and bees, each belonging to exactly one player. Entities
//! carry a stable integer id allocated by the game state; per-turn bookkeeping
//! (acted, stunned) is keyed by id rather than by reference.

use serde::{Deserialize, Serialize};

/// Stable identifier for an entity, unique within one game and never reused.
pub type EntityId = u32;

/// The kind of an entity on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    Wall,
    Hive,
    Bee,
}

/// An entity occupying a hex. A hex holds at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub player: usize,
    /// True while a bee carries a foraged flower. Always false for walls
    /// and hives.
    #[serde(default, skip_serializing_if = "is_false")]
    pub flower: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}
