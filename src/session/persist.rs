//! Finished-game persistence.
//!
//! One JSON document per finished game: identity, participants, and the
//! full per-turn order/state history. The engine only ever writes these
//! files; reading them back belongs to the replay viewer.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::board::{GameState, Order};

use super::SessionInner;

/// One resolved turn: the orders processed (with final statuses) and a deep
/// snapshot of the state they produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<Order>,
    pub state: GameState,
}

/// The persisted document for one finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedGame {
    pub id: String,
    pub map: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_date: u64,
    pub players: Vec<String>,
    pub history: Vec<TurnRecord>,
}

/// Writes the session's history document under `dir`, returning the path.
pub(super) fn write_history(inner: &SessionInner, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let doc = PersistedGame {
        id: inner.id.clone(),
        map: inner.map_name.clone(),
        created_date: inner.created_ms,
        players: inner.player_names.clone(),
        history: inner.history.clone(),
    };

    let path = dir.join(format!("{}-{}-{}.json", doc.created_date, doc.id, doc.map));
    let file = File::create(&path)?;
    serde_json::to_writer(BufWriter::new(file), &doc)?;
    Ok(path)
}
