//! Rules engine for two-player chess.
//!
//! This crate provides:
//! - [`Board`] - the 8x8 grid, with the king positions and the game's check
//!   and winner state
//! - [`rules`] - movement shapes, legality, castling, check and checkmate
//! - [`Game`] - a turn-based session with selection, pawn promotion and
//!   observer notifications
//!
//! # Example
//!
//! ```
//! use chess_core::{Coord, Player};
//! use chess_engine::Game;
//!
//! let mut game = Game::new();
//! let sq = |s: &str| s.parse::<Coord>().unwrap();
//! for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     assert!(game.try_move(sq(&m[..2]), sq(&m[2..])));
//! }
//! assert_eq!(game.winner(), Some(Player::Black));
//! ```

mod board;
mod events;
mod game;
pub mod rules;

pub use board::{Board, MoveRecord, PlacementError};
pub use events::{GameEvent, GameObserver, ObserverId};
pub use game::{Game, MoveError, PromotionError};
pub use rules::{possible_moves, try_move, CastleSide, CheckStatus, LegalMove, MoveOutcome};
