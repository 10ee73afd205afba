//! Rules engine for a falling-block puzzle game on a 10×20 board.
//!
//! [`core`] holds the data types (shapes, pieces, the board, collision
//! checks) and [`engine`] the game session built on top of them.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
