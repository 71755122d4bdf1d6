//! Board representation and game-state types.
//!
//! Contains the core data structures for hex coordinates, terrain, map data,
//! entities, orders, and the overall game state.

pub mod coords;
pub mod entity;
pub mod map;
pub mod order;
pub mod state;
pub mod terrain;

pub use coords::{Coords, CoordsError, Direction, ALL_DIRECTIONS};
pub use entity::{Entity, EntityId, EntityKind};
pub use map::{load_map, parse_map, MapData, MapError, Spawn};
pub use order::{Order, OrderKind, OrderStatus};
pub use state::{
    GameError, GameState, Hex, BEE_COST, FIELD_OF_VIEW, HIVE_COST, INIT_FIELD_FLOWERS,
    MAX_PLAYERS, STAGNATION_TIMEOUT, WALL_COST,
};
pub use terrain::Terrain;
