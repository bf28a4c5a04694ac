//! Player identity.

use serde::{Deserialize, Serialize};

/// One of the two sides of the board.
///
/// Player 0 (`White`) starts at rank 0 and advances toward higher ranks;
/// player 1 (`Black`) starts at the far rank and advances downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    /// Both players, in index order.
    pub const BOTH: [Player; 2] = [Player::White, Player::Black];

    /// Returns the other player.
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Returns the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the player for an index, if it is 0 or 1.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Player::White),
            1 => Some(Player::Black),
            _ => None,
        }
    }

    /// Returns the direction pawns advance for this player (+1 or -1).
    #[inline]
    pub const fn forward_direction(self) -> i32 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Returns the rank holding this player's pieces at the start.
    #[inline]
    pub const fn back_rank(self) -> i32 {
        match self {
            Player::White => 0,
            Player::Black => crate::BOARD_SIZE - 1,
        }
    }

    /// Returns the rank this player's pawns start on.
    #[inline]
    pub const fn pawn_rank(self) -> i32 {
        self.back_rank() + self.forward_direction()
    }

    /// Returns the rank on which this player's pawns promote.
    #[inline]
    pub const fn promotion_rank(self) -> i32 {
        self.opponent().back_rank()
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}
