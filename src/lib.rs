//! Hivemind engine library.
//!
//! The authoritative core of a simultaneous-turn hex-grid strategy game:
//! the board representation, the order resolver, the fog-of-war view, and
//! the concurrent game session that collects per-player orders, forces turn
//! advancement on timeout, and persists finished games. Transport, map
//! authoring tools, and viewers live outside this crate and talk to it
//! through these modules.

pub mod board;
pub mod resolve;
pub mod session;
pub mod view;
