/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Orders a piece can carry out, and the messages pieces emit while doing so.
mod action;

/// Board geometry, piece kinds, starting positions, and the live piece set.
mod board;

/// Commands accepted by the interactive engine.
mod cli;

/// Tunable parameters of a simulation.
mod config;

/// Per-player cursors and selections, mapping abstract input to orders.
mod controller;

/// Code related to the engine's functionality, such as user input handling.
mod engine;

/// Reasons an order may be refused.
mod error;

/// The tick loop and everything that drives a game forward.
mod game;

/// Time-stamped records of what pieces did.
mod history;

/// Deciding which actions a piece may start.
mod movegen;

/// Conversion to standard FEN and checkmate detection.
mod oracle;

/// A single piece and its action state machine.
mod piece;

/// Playing a recorded history back on a fresh game.
mod replay;

/// Per-player fractions that summarize how a game is going.
mod statistics;

/// Game time and tick lengths.
mod time;

pub use action::*;
pub use board::*;
pub use cli::*;
pub use config::*;
pub use controller::*;
pub use engine::*;
pub use error::*;
pub use game::*;
pub use history::*;
pub use movegen::*;
pub use oracle::*;
pub use piece::*;
pub use replay::*;
pub use statistics::*;
pub use time::*;
