//! Game rules and session state.
//!
//! This module drives the core data structures through a game:
//!
//! - [`GameSession`] - Lifecycle, piece commands, gravity timer, locking
//! - [`GameStats`] - Score, cleared lines, and level
//! - [`GameConfig`] - Drop speed and scoring parameters
//! - [`PieceGenerator`] - Uniform random piece draws
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`GameEvent`] - Notifications for sound or status layers
//! - [`GameSnapshot`] - Read-only view of a session for renderers
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] and [`start`](GameSession::start) it
//! 2. Forward player input to the move, rotate, and drop commands
//! 3. Pump [`advance_time`](GameSession::advance_time) so the piece falls
//! 4. A piece that cannot fall locks, full rows clear, the next piece spawns
//! 5. Repeat until a new piece collides at spawn
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GameConfig, GameSession};
//!
//! let mut session = GameSession::new(GameConfig::default());
//! session.start();
//!
//! while session.move_left() {}
//! while session.soft_drop() {}
//!
//! // The piece locked and the next one is falling.
//! assert_eq!(session.stats().completed_pieces(), 1);
//! assert!(session.board().filled_count() > 0);
//! ```

pub use self::{config::*, event::*, piece_generator::*, session::*, snapshot::*, stats::*};

mod config;
mod event;
mod piece_generator;
mod session;
mod snapshot;
mod stats;
