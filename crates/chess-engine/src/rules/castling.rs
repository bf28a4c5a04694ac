//! Castling eligibility and execution.

use super::check::is_in_check;
use super::validate::{checked_after_move, is_blocked};
use crate::Board;
use chess_core::{Coord, Move, PieceKind, BOARD_SIZE};
use tracing::debug;

/// Which rook the king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    /// Toward the higher files (rook on the last file).
    Kingside,
    /// Toward file 0.
    Queenside,
}

impl CastleSide {
    /// File of the rook this side castles with.
    #[inline]
    pub const fn rook_file(self) -> i32 {
        match self {
            CastleSide::Kingside => BOARD_SIZE - 1,
            CastleSide::Queenside => 0,
        }
    }

    /// Direction the king travels along the rank.
    #[inline]
    pub const fn direction(self) -> i32 {
        match self {
            CastleSide::Kingside => 1,
            CastleSide::Queenside => -1,
        }
    }
}

/// Decides whether the king on `king_at` may castle onto `target`, and on
/// which side.
///
/// All of the following must hold:
/// - `target` is exactly two files away on the king's rank;
/// - an unmoved rook of the same owner stands in the matching corner;
/// - the king has not moved;
/// - nothing stands between king and rook;
/// - the king is not in check;
/// - the king would not be attacked on any square between itself and the
///   rook, nor on `target`.
pub fn castle_side(board: &mut Board, king_at: Coord, target: Coord) -> Option<CastleSide> {
    let king = *board.piece_at(king_at)?;
    if king.kind != PieceKind::King || king.has_moved {
        return None;
    }
    if target.y != king_at.y {
        return None;
    }
    let side = match target.x - king_at.x {
        2 => CastleSide::Kingside,
        -2 => CastleSide::Queenside,
        _ => return None,
    };

    let rook_at = Coord::new(side.rook_file(), king_at.y);
    let rook = board.piece_at(rook_at)?;
    if rook.kind != PieceKind::Rook || rook.owner != king.owner || rook.has_moved {
        return None;
    }

    if is_blocked(board, PieceKind::King, king_at, rook_at) {
        return None;
    }
    if is_in_check(board, king.owner) {
        return None;
    }

    let mut transit = board.coords_between(PieceKind::King, king_at, rook_at);
    transit.push(target);
    for at in transit {
        if checked_after_move(board, king_at, at).is_checked(king.owner) {
            return None;
        }
    }
    Some(side)
}

/// Returns true if the king on `king_at` may castle onto `target`.
#[inline]
pub fn can_castle(board: &mut Board, king_at: Coord, target: Coord) -> bool {
    castle_side(board, king_at, target).is_some()
}

/// Castles if allowed, moving king and rook together.
///
/// The rook lands on the square next to the king's destination, on the side
/// the king came from. Returns the king's move tagged with the castle flag.
pub fn castle(board: &mut Board, king_at: Coord, target: Coord) -> Option<Move> {
    let side = castle_side(board, king_at, target)?;
    let rook_at = Coord::new(side.rook_file(), king_at.y);
    let rook_to = target.offset(-side.direction(), 0);

    board.apply_move(rook_at, rook_to)?;
    board.apply_move(king_at, target)?;
    debug!(from = %king_at, to = %target, ?side, "castled");

    Some(Move::castle(king_at, target, side == CastleSide::Kingside))
}
