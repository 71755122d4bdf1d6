//! Order resolution.
//!
//! Validates and applies one turn of simultaneous orders against the game
//! state: per-order application, round scheduling, and end-game evaluation.

pub mod apply;
pub mod endgame;
pub mod turn;

pub use endgame::evaluate_endgame;
pub use turn::process_orders;
