//! Chess rules over a [`Board`].
//!
//! The rules are free functions grouped by concern:
//! - [`shape`]: per-kind movement shapes
//! - [`validate`]: blocking, self-check look-ahead and move enumeration
//! - [`castling`]: castling eligibility and execution
//! - [`check`]: attack scanning and checkmate detection
//!
//! Functions that need to look ahead take `&mut Board`: they move pieces on
//! the real grid, inspect the result and restore it before returning, so the
//! board a caller sees afterwards is always identical to the one passed in.

pub mod castling;
pub mod check;
pub mod shape;
pub mod validate;

pub use castling::{can_castle, castle, castle_side, CastleSide};
pub use check::{checked_players, checkers, is_checkmate, is_in_check, CheckStatus};
pub use shape::can_reach;
pub use validate::{
    attacks, checked_after_move, is_blocked, is_legal_move, legal_move, possible_moves, LegalMove,
};

use crate::Board;
use chess_core::{Coord, Move, Piece, Player};
use tracing::{debug, info};

/// What happened when a move was played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move made; castles carry their flag.
    pub mov: Move,
    /// The piece that moved, after the move.
    pub piece: Piece,
    /// The piece removed from the destination, if any.
    pub captured: Option<Piece>,
    /// The player left in check, if any.
    pub checked: Option<Player>,
    /// The move ended the game.
    pub checkmate: bool,
}

/// Plays the piece on `from` to `to` if the rules allow it.
///
/// Castling is tried first; otherwise the move must pass the ordinary
/// legality checks. On success the board's check and winner state are
/// updated. Returns `None`, leaving the board untouched, for illegal moves.
pub fn try_move(board: &mut Board, from: Coord, to: Coord) -> Option<MoveOutcome> {
    let mover = board.piece_at(from)?.owner;

    let (mov, captured) = if let Some(mov) = castle(board, from, to) {
        (mov, None)
    } else if legal_move(board, from, to).is_some() {
        let record = board.apply_move(from, to)?;
        debug!(%from, %to, captured = ?record.captured.map(|p| p.kind), "moved");
        (Move::normal(from, to), record.captured)
    } else {
        debug!(%from, %to, "rejected illegal move");
        return None;
    };

    let piece = *board.piece_at(to)?;
    let checkmate = record_check_status(board, mover);
    Some(MoveOutcome {
        mov,
        piece,
        captured,
        checked: board.checked_player(),
        checkmate,
    })
}

/// Recomputes whether `attacker` has the opponent in check or checkmate and
/// stores the result on the board. Returns true on checkmate.
///
/// Every checking piece is considered, so discovered checks and checks given
/// by a castling rook are judged the same way as direct ones.
pub fn record_check_status(board: &mut Board, attacker: Player) -> bool {
    let defender = attacker.opponent();
    if !is_in_check(board, defender) {
        board.set_checked_player(None);
        return false;
    }

    board.set_checked_player(Some(defender));
    let mate = is_checkmate(board, defender);
    if mate {
        info!(winner = %attacker, "checkmate");
        board.set_winner(Some(attacker));
    } else {
        info!(player = %defender, "check");
    }
    mate
}
