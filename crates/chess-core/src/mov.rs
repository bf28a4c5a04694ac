//! Move representation.

use crate::coord::ParseCoordError;
use crate::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a coordinate move such as `"e2e4"`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected a move like \"e2e4\", got {0:?}")]
    InvalidFormat(String),

    #[error(transparent)]
    InvalidSquare(#[from] ParseCoordError),
}

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum MoveFlag {
    /// Single-piece move, possibly a capture.
    Normal = 0,
    /// King and rook swap sides toward the h-file.
    CastleKingside = 1,
    /// King and rook swap sides toward the a-file.
    CastleQueenside = 2,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A move of one piece from one cell to another.
///
/// Moves are transient values: the board never stores them. For castling,
/// `from`/`to` describe the king; the rook's relocation is implied by the flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub flag: MoveFlag,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Coord, to: Coord, flag: MoveFlag) -> Self {
        Move { from, to, flag }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(from: Coord, to: Coord) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    /// Creates a castling move for the king travelling `from` -> `to`.
    #[inline]
    pub const fn castle(from: Coord, to: Coord, kingside: bool) -> Self {
        let flag = if kingside {
            MoveFlag::CastleKingside
        } else {
            MoveFlag::CastleQueenside
        };
        Self::new(from, to, flag)
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    /// Parses coordinate form (`"e2e4"`). The flag is always `Normal`; the
    /// rules decide whether a king's two-file step is a castle.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(ParseMoveError::InvalidFormat(s.to_string()));
        }
        let from: Coord = s[0..2].parse()?;
        let to: Coord = s[2..4].parse()?;
        Ok(Move::normal(from, to))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}, {:?})", self.from, self.to, self.flag)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_coordinate_move() {
        let m: Move = "e2e4".parse().unwrap();
        assert_eq!(m.from, Coord::new(4, 1));
        assert_eq!(m.to, Coord::new(4, 3));
        assert_eq!(m.flag, MoveFlag::Normal);
        assert_eq!(m.to_string(), "e2e4");
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            "e2".parse::<Move>(),
            Err(ParseMoveError::InvalidFormat(_))
        ));
        assert!(matches!(
            "e2z4".parse::<Move>(),
            Err(ParseMoveError::InvalidSquare(ParseCoordError::InvalidFile('z')))
        ));
        assert!(matches!(
            "é2e4".parse::<Move>(),
            Err(ParseMoveError::InvalidFormat(_))
        ));
    }

    #[test]
    fn castle_flags() {
        let king = Coord::new(4, 0);
        let short = Move::castle(king, Coord::new(6, 0), true);
        let long = Move::castle(king, Coord::new(2, 0), false);
        assert_eq!(short.flag, MoveFlag::CastleKingside);
        assert_eq!(long.flag, MoveFlag::CastleQueenside);
        assert!(short.flag.is_castling());
        assert!(!MoveFlag::Normal.is_castling());
    }
}
