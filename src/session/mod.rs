//! Game session: turn scheduling and the concurrency guard.
//!
//! One session owns one game. A single mutex covers the game state and the
//! per-player pending-order slots; every session operation takes it for its
//! duration. Turns advance when all players have submitted or when the
//! deadline timer fires, whichever happens first — the loser of that race
//! re-checks the turn number under the lock and becomes a no-op. Turn-change
//! notifications are best-effort and never block resolution. Finished games
//! are persisted once and stop advancing.

pub mod persist;

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::board::{GameError, GameState, MapData, Order};
use crate::resolve::process_orders;
use crate::view::player_view;

pub use persist::{PersistedGame, TurnRecord};

/// Default time players get to submit their orders each turn.
pub const TURN_TIMEOUT: Duration = Duration::from_secs(2);
/// Default pacing pause before each turn-change broadcast.
pub const MIN_TURN_DURATION: Duration = Duration::from_millis(500);

/// Tuning knobs for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub turn_timeout: Duration,
    pub min_turn_duration: Duration,
    /// Skips the pacing pause; meant for tests and headless tournaments.
    pub fast: bool,
    /// Directory finished games are written to.
    pub history_dir: PathBuf,
    /// Fixed RNG seed for deterministic resolution; `None` seeds from
    /// entropy.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            turn_timeout: TURN_TIMEOUT,
            min_turn_duration: MIN_TURN_DURATION,
            fast: false,
            history_dir: PathBuf::from("history"),
            seed: None,
        }
    }
}

/// Notification sent to observers whenever a new turn opens or the game
/// ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnNotice {
    pub turn: u32,
    pub game_over: bool,
}

/// Structural session errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("player index {0} out of range")]
    InvalidPlayer(usize),

    #[error("game is already finished")]
    GameFinished,
}

struct SessionInner {
    id: String,
    map_name: String,
    created_ms: u64,
    player_names: Vec<String>,
    state: GameState,
    /// One slot per player for the turn being collected; `None` until that
    /// player submits.
    pending: Vec<Option<Vec<Order>>>,
    history: Vec<TurnRecord>,
    observers: Vec<Sender<TurnNotice>>,
    rng: SmallRng,
}

impl SessionInner {
    fn broadcast(&mut self) {
        let notice = TurnNotice { turn: self.state.turn, game_over: self.state.game_over };
        // Fire and forget; disconnected observers are dropped.
        self.observers.retain(|tx| tx.send(notice).is_ok());
    }
}

/// A running game session. Clone-cheap handle; all methods synchronize on
/// the session lock.
pub struct GameSession {
    inner: Arc<Mutex<SessionInner>>,
    config: SessionConfig,
}

impl GameSession {
    /// Creates a session for one game on the given map.
    ///
    /// The player count is the number of names. The initial state snapshot
    /// is recorded as history entry zero. The session does not collect
    /// orders until [`GameSession::start`] is called.
    pub fn new(
        id: impl Into<String>,
        map_name: impl Into<String>,
        player_names: Vec<String>,
        map: &MapData,
        config: SessionConfig,
    ) -> Result<GameSession, GameError> {
        let state = GameState::new(map, player_names.len())?;
        let created_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let pending = vec![None; player_names.len()];
        let inner = SessionInner {
            id: id.into(),
            map_name: map_name.into(),
            created_ms,
            player_names,
            history: vec![TurnRecord { orders: Vec::new(), state: state.clone() }],
            state,
            pending,
            observers: Vec::new(),
            rng,
        };
        Ok(GameSession { inner: Arc::new(Mutex::new(inner)), config })
    }

    /// Opens the first order-collection window.
    pub fn start(&self) {
        let mut inner = self.lock();
        info!(game = %inner.id, players = inner.player_names.len(), "session started");
        begin_turn(&mut inner, &Arc::downgrade(&self.inner), &self.config);
    }

    /// Stores one player's orders for the current turn. If every player has
    /// now submitted, the turn resolves immediately and the pending deadline
    /// becomes a no-op.
    pub fn submit_orders(&self, player: usize, orders: Vec<Order>) -> Result<(), SessionError> {
        let mut inner = self.lock();
        if inner.state.game_over {
            return Err(SessionError::GameFinished);
        }
        if player >= inner.pending.len() {
            return Err(SessionError::InvalidPlayer(player));
        }

        debug!(game = %inner.id, player, count = orders.len(), "orders received");
        inner.pending[player] = Some(orders);

        if inner.pending.iter().all(Option::is_some) {
            resolve_turn(&mut inner, &Arc::downgrade(&self.inner), &self.config);
        }
        Ok(())
    }

    /// Registers an observer for turn-change notifications.
    pub fn subscribe(&self) -> Receiver<TurnNotice> {
        let (tx, rx) = std::sync::mpsc::channel();
        self.lock().observers.push(tx);
        rx
    }

    /// The fog-of-war view for one player.
    pub fn view(&self, player: usize) -> Result<GameState, SessionError> {
        let inner = self.lock();
        if player >= inner.state.num_players {
            return Err(SessionError::InvalidPlayer(player));
        }
        Ok(player_view(&inner.state, player))
    }

    /// A full snapshot of the current state.
    pub fn state(&self) -> GameState {
        self.lock().state.clone()
    }

    /// Number of turns recorded so far, the initial snapshot included.
    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }

    pub fn is_over(&self) -> bool {
        self.lock().state.game_over
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clone for GameSession {
    fn clone(&self) -> Self {
        GameSession { inner: Arc::clone(&self.inner), config: self.config.clone() }
    }
}

/// Opens an order-collection window: clears the slots, notifies observers,
/// and arms the deadline for the current turn number.
fn begin_turn(inner: &mut SessionInner, handle: &Weak<Mutex<SessionInner>>, config: &SessionConfig) {
    if !config.fast {
        // Throttles turn pace for human observers; the only sleep taken
        // while the session lock is held.
        thread::sleep(config.min_turn_duration);
    }

    inner.broadcast();
    if inner.state.game_over {
        return;
    }

    for slot in &mut inner.pending {
        *slot = None;
    }
    arm_deadline(handle.clone(), config.clone(), inner.state.turn);
}

/// Schedules a forced resolution for `turn`. The timer re-acquires the lock
/// and backs off if the turn already advanced through submission.
fn arm_deadline(handle: Weak<Mutex<SessionInner>>, config: SessionConfig, turn: u32) {
    thread::spawn(move || {
        thread::sleep(config.turn_timeout);
        let Some(session) = handle.upgrade() else { return };
        let mut inner = session.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.state.turn != turn || inner.state.game_over {
            return;
        }
        info!(game = %inner.id, turn, "turn deadline reached, forcing resolution");
        resolve_turn(&mut inner, &Arc::downgrade(&session), &config);
    });
}

/// Resolves the pending turn: missing players contribute an empty batch.
/// Appends a deep snapshot to the history, persists on game over, and opens
/// the next collection window.
fn resolve_turn(
    inner: &mut SessionInner,
    handle: &Weak<Mutex<SessionInner>>,
    config: &SessionConfig,
) {
    let batches: Vec<Vec<Order>> =
        inner.pending.iter_mut().map(|slot| slot.take().unwrap_or_default()).collect();

    let resolved_turn = inner.state.turn;
    let SessionInner { state, rng, .. } = inner;
    let processed = match process_orders(state, batches, rng) {
        Ok(processed) => processed,
        Err(err) => {
            // Unreachable while the game-over guards hold.
            error!(game = %inner.id, %err, "turn resolution rejected");
            return;
        }
    };

    info!(game = %inner.id, turn = resolved_turn, orders = processed.len(), "turn resolved");
    let snapshot = inner.state.clone();
    inner.history.push(TurnRecord { orders: processed, state: snapshot });

    if inner.state.game_over {
        info!(game = %inner.id, winners = ?inner.state.winners, "game over");
        if let Err(err) = persist::write_history(inner, &config.history_dir) {
            error!(game = %inner.id, %err, "failed to persist finished game");
        }
    }

    begin_turn(inner, handle, config);
}
