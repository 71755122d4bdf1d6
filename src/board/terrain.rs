//! Terrain kinds.
//!
//! Terrain is fixed once a map is loaded; only empty and field hexes can be
//! entered or built on.

use serde::{Deserialize, Serialize};

/// The terrain of a hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Terrain {
    Empty,
    Rock,
    Field,
}

impl Terrain {
    /// Returns true if units can stand on this terrain.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Terrain::Empty | Terrain::Field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rock_blocks() {
        assert!(Terrain::Empty.is_walkable());
        assert!(Terrain::Field.is_walkable());
        assert!(!Terrain::Rock.is_walkable());
    }

    #[test]
    fn serde_tags_match_wire_form() {
        assert_eq!(serde_json::to_string(&Terrain::Empty).unwrap(), "\"EMPTY\"");
        assert_eq!(serde_json::to_string(&Terrain::Rock).unwrap(), "\"ROCK\"");
        assert_eq!(serde_json::to_string(&Terrain::Field).unwrap(), "\"FIELD\"");
    }
}
