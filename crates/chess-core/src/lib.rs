//! Core types for the chess rules engine.
//!
//! This crate provides the plain values shared by the engine and its callers:
//! - [`Player`] for the two sides
//! - [`PieceKind`] and [`Piece`] for piece identity
//! - [`Coord`] for board cells
//! - [`Move`] and [`MoveFlag`] for move representation

mod coord;
mod mov;
mod piece;
mod player;

pub use coord::{Coord, ParseCoordError};
pub use mov::{Move, MoveFlag, ParseMoveError};
pub use piece::{Piece, PieceKind};
pub use player::Player;

/// Number of files and ranks on the board.
pub const BOARD_SIZE: i32 = 8;
