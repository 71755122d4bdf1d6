//! Map data and the text map-file loader.
//!
//! A map file is a character grid. The cell at text column `c` of row `r` is
//! the hex `(r, c/2)`: cells sit four text columns apart within a row and odd
//! rows are indented by two, which yields proper doubled-coordinate parity.
//! `.` is empty terrain, `F` a flower field, `R` rock; `H<d>` and `B<d>`
//! plant a hive or bee spawn for map faction `<d>` on an empty hex. Any other
//! character (spacing included) is ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::coords::Coords;
use super::entity::EntityKind;
use super::terrain::Terrain;

/// A map-authored starting entity.
///
/// `player` is the map faction slot (0-5); the game state remaps it to an
/// actual player index depending on how many players join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawn {
    pub kind: EntityKind,
    pub player: usize,
    pub coords: Coords,
}

/// The coordinate-to-terrain mapping plus spawn points the core consumes.
#[derive(Debug, Clone, Default)]
pub struct MapData {
    pub terrain: BTreeMap<Coords, Terrain>,
    pub spawns: Vec<Spawn>,
}

/// Errors from reading or parsing a map file.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("could not read map file: {0}")]
    Io(#[from] std::io::Error),

    #[error("spawn marker '{marker}' at row {row} has no player digit")]
    MissingPlayer { marker: char, row: usize },

    #[error("invalid player digit '{digit}' after '{marker}' at row {row}")]
    InvalidPlayer { marker: char, digit: char, row: usize },
}

/// Loads and parses a map file.
pub fn load_map(path: impl AsRef<Path>) -> Result<MapData, MapError> {
    parse_map(&fs::read_to_string(path)?)
}

/// Parses map text into terrain and spawn points.
pub fn parse_map(text: &str) -> Result<MapData, MapError> {
    let mut data = MapData::default();

    for (row, line) in text.lines().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        for (col, &ch) in chars.iter().enumerate() {
            let coords = Coords::new(row as i32, (col / 2) as i32);

            let terrain = match ch {
                '.' => Some(Terrain::Empty),
                'F' => Some(Terrain::Field),
                'R' => Some(Terrain::Rock),
                _ => None,
            };
            if let Some(terrain) = terrain {
                data.terrain.insert(coords, terrain);
                continue;
            }

            let kind = match ch {
                'H' => Some(EntityKind::Hive),
                'B' => Some(EntityKind::Bee),
                _ => None,
            };
            if let Some(kind) = kind {
                let digit = *chars
                    .get(col + 1)
                    .ok_or(MapError::MissingPlayer { marker: ch, row })?;
                let player = digit
                    .to_digit(10)
                    .filter(|d| *d < 6)
                    .ok_or(MapError::InvalidPlayer { marker: ch, digit, row })?;

                data.spawns.push(Spawn { kind, player: player as usize, coords });
                data.terrain.insert(coords, Terrain::Empty);
            }
        }
    }

    Ok(data)
}
