//! Game state representation.
//!
//! The aggregate root for one game: the hex map, per-player resource totals,
//! the turn counter, and the end-of-game flags. All player-visible iteration
//! goes through a `BTreeMap` keyed by coordinates, so serialization and scans
//! are deterministic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::coords::Coords;
use super::entity::{Entity, EntityId, EntityKind};
use super::map::MapData;
use super::terrain::Terrain;

/// Starting flower count of every field hex.
pub const INIT_FIELD_FLOWERS: u32 = 60;
/// Resource cost of spawning a bee.
pub const BEE_COST: u32 = 6;
/// Resource cost of building a hive.
pub const HIVE_COST: u32 = 12;
/// Resource cost of building a wall.
pub const WALL_COST: u32 = 1;
/// Visibility radius around a player's entities, in hex distance.
pub const FIELD_OF_VIEW: u32 = 4;
/// Turns without a resource change before the game ends by stagnation.
pub const STAGNATION_TIMEOUT: u32 = 50;
/// Largest supported player count, matching the six map faction slots.
pub const MAX_PLAYERS: usize = 6;

/// Which map faction slots are in play for each player count. Maps always
/// author six factions; smaller games deliberately leave some slots unused
/// to keep starting positions spread out.
const PLAYER_MAPPINGS: [[i8; MAX_PLAYERS]; MAX_PLAYERS + 1] = [
    [-1, -1, -1, -1, -1, -1],
    [0, -1, -1, -1, -1, -1],
    [0, -1, -1, 1, -1, -1],
    [0, -1, 1, -1, 2, -1],
    [-1, 0, 1, -1, 2, 3],
    [0, 1, 2, 3, 4, -1],
    [0, 1, 2, 3, 4, 5],
];

/// Structural errors: these abort the triggering operation, unlike
/// order-level failures which become order statuses.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid player count: {0} (expected 1-{MAX_PLAYERS})")]
    InvalidPlayerCount(usize),

    #[error("cannot process orders in a finished game")]
    GameOver,
}

/// One hex of the map: fixed terrain, a flower counter (field hexes only),
/// and at most one occupying entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hex {
    pub terrain: Terrain,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub resources: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<Entity>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// Complete state of one game at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub num_players: usize,
    pub turn: u32,
    pub hexes: BTreeMap<Coords, Hex>,
    pub player_resources: Vec<u32>,
    /// Turn of the most recent flower delivery, for the stagnation timeout.
    pub last_resource_change: u32,
    pub game_over: bool,
    /// Populated only once the game is over; holds every player tied for the
    /// maximum resource total, in ascending player order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub winners: Vec<usize>,
    #[serde(default)]
    next_entity_id: EntityId,
}

impl GameState {
    /// Builds the starting state from map data and a player count.
    ///
    /// Spawn points are remapped through the per-player-count faction table;
    /// spawns in unused slots are skipped. Field hexes start with
    /// `INIT_FIELD_FLOWERS` flowers.
    pub fn new(map: &MapData, num_players: usize) -> Result<GameState, GameError> {
        if num_players == 0 || num_players > MAX_PLAYERS {
            return Err(GameError::InvalidPlayerCount(num_players));
        }

        let hexes = map
            .terrain
            .iter()
            .map(|(&coords, &terrain)| {
                let resources = match terrain {
                    Terrain::Field => INIT_FIELD_FLOWERS,
                    _ => 0,
                };
                (coords, Hex { terrain, resources, entity: None })
            })
            .collect();

        let mut state = GameState {
            num_players,
            turn: 0,
            hexes,
            player_resources: vec![0; num_players],
            last_resource_change: 0,
            game_over: false,
            winners: Vec::new(),
            next_entity_id: 0,
        };

        for spawn in &map.spawns {
            let player = PLAYER_MAPPINGS[num_players][spawn.player];
            if player < 0 {
                continue;
            }
            state.place_entity(spawn.coords, spawn.kind, player as usize);
        }

        crate::resolve::evaluate_endgame(&mut state);
        Ok(state)
    }

    /// Allocates an entity id and places a new entity at `coords`.
    /// Returns `None` if the hex is missing or already occupied.
    pub fn place_entity(
        &mut self,
        coords: Coords,
        kind: EntityKind,
        player: usize,
    ) -> Option<EntityId> {
        if self.entity_at(coords).is_some() {
            return None;
        }
        let hex = self.hexes.get_mut(&coords)?;
        let id = self.next_entity_id;
        self.next_entity_id += 1;
        hex.entity = Some(Entity { id, kind, player, flower: false });
        Some(id)
    }

    /// The entity occupying `coords`, if any.
    pub fn entity_at(&self, coords: Coords) -> Option<&Entity> {
        self.hexes.get(&coords)?.entity.as_ref()
    }

    /// Mutable access to the entity occupying `coords`, if any.
    pub fn entity_at_mut(&mut self, coords: Coords) -> Option<&mut Entity> {
        self.hexes.get_mut(&coords)?.entity.as_mut()
    }

    /// Sum of all flowers still on field hexes plus all flowers currently
    /// carried by bees. The game ends when this reaches zero.
    pub fn remaining_flowers(&self) -> u32 {
        self.hexes
            .values()
            .map(|hex| hex.resources + u32::from(hex.entity.as_ref().is_some_and(|e| e.flower)))
            .sum()
    }
}
