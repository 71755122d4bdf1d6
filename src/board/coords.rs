//! Hex coordinates and directions.
//!
//! Uses the doubled coordinate system for pointy-top hexes laid out in
//! horizontal rows (see Red Blob Games' hexagonal grids reference): rows
//! increase downward by 1, columns increase rightward by 2, and a hex and
//! its six neighbours always share row+col parity.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the six hex directions, pointy-top orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    E,
    NE,
    NW,
    W,
    SW,
    SE,
}

/// All six directions in a fixed order, east first, counterclockwise then
/// down. Neighbour enumeration follows this order.
pub const ALL_DIRECTIONS: [Direction; 6] = [
    Direction::E,
    Direction::NE,
    Direction::NW,
    Direction::W,
    Direction::SW,
    Direction::SE,
];

impl Direction {
    /// Returns the (row, col) offset of this direction in doubled coordinates.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::E => (0, 2),
            Direction::NE => (-1, 1),
            Direction::NW => (-1, -1),
            Direction::W => (0, -2),
            Direction::SW => (1, -1),
            Direction::SE => (1, 1),
        }
    }
}

/// A hex position in doubled coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coords {
    pub row: i32,
    pub col: i32,
}

impl Coords {
    pub const fn new(row: i32, col: i32) -> Self {
        Coords { row, col }
    }

    /// Returns the adjacent hex in the given direction.
    pub const fn neighbour(self, dir: Direction) -> Coords {
        let (dr, dc) = dir.offset();
        Coords { row: self.row + dr, col: self.col + dc }
    }

    /// Returns all six adjacent hexes, in `ALL_DIRECTIONS` order.
    pub fn neighbours(self) -> [Coords; 6] {
        ALL_DIRECTIONS.map(|dir| self.neighbour(dir))
    }

    /// Hex distance in the doubled coordinate system.
    pub fn distance(self, other: Coords) -> u32 {
        let drow = self.row.abs_diff(other.row);
        let dcol = self.col.abs_diff(other.col);
        drow + dcol.saturating_sub(drow) / 2
    }
}

/// Errors from parsing the `"row,col"` text form of a coordinate.
#[derive(Debug, thiserror::Error)]
pub enum CoordsError {
    #[error("expected 'row,col', got '{0}'")]
    WrongShape(String),

    #[error("invalid row value: '{0}'")]
    InvalidRow(String),

    #[error("invalid col value: '{0}'")]
    InvalidCol(String),
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Coords {
    type Err = CoordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(CoordsError::WrongShape(s.to_string()));
        }
        let row = parts[0]
            .parse()
            .map_err(|_| CoordsError::InvalidRow(parts[0].to_string()))?;
        let col = parts[1]
            .parse()
            .map_err(|_| CoordsError::InvalidCol(parts[1].to_string()))?;
        Ok(Coords { row, col })
    }
}

// Coordinates serialize as their text form so they can key JSON maps.

impl Serialize for Coords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coords {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(D::Error::custom)
    }
}
