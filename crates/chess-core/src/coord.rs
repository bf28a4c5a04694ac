//! Board coordinates.

use crate::BOARD_SIZE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing a square name such as `"e4"`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseCoordError {
    #[error("expected a square like \"e4\", got {0:?}")]
    InvalidFormat(String),

    #[error("file '{0}' is outside a-h")]
    InvalidFile(char),

    #[error("rank '{0}' is outside 1-8")]
    InvalidRank(char),
}

/// A cell on the board: `x` is the file (column), `y` the rank (row).
///
/// Coordinates are signed so that off-board neighbours (`x - 1` on file 0,
/// `x + 2` near the edge) can be expressed and rejected by
/// [`in_bounds`](Coord::in_bounds) instead of overflowing.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Creates a coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Returns true if the coordinate lies on the board.
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    /// Returns the coordinate shifted by the given deltas.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Returns `(dx, dy)` from `self` to `to`.
    #[inline]
    pub const fn delta(self, to: Coord) -> (i32, i32) {
        (to.x - self.x, to.y - self.y)
    }

    /// Iterates over every on-board coordinate, rank by rank from rank 0.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
    }

    /// Returns the square name (e.g. `"e4"`), or `None` off the board.
    pub fn name(self) -> Option<String> {
        if !self.in_bounds() {
            return None;
        }
        let file = (b'a' + self.x as u8) as char;
        let rank = (b'1' + self.y as u8) as char;
        Some(format!("{file}{rank}"))
    }
}

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCoordError::InvalidFormat(s.to_string()));
        };
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ParseCoordError::InvalidFile(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(ParseCoordError::InvalidRank(rank));
        }
        Ok(Coord::new(
            (file_lower as u8 - b'a') as i32,
            (rank as u8 - b'1') as i32,
        ))
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Coord({name})"),
            None => write!(f, "Coord({}, {})", self.x, self.y),
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "({}, {})", self.x, self.y),
        }
    }
}
