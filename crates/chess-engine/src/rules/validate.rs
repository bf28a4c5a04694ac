//! Ordinary move legality.
//!
//! A move is legal when it is on the board, fits the piece's shape, is not
//! obstructed, and does not leave the mover's own king attacked. The last
//! condition is decided by moving the piece on the real grid, scanning for
//! attacks and putting everything back before returning.

use super::castling;
use super::check::{checked_players, CheckStatus};
use super::shape::can_reach;
use crate::Board;
use chess_core::{Coord, Piece, PieceKind};

/// A move that passed every legality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Coord,
    pub to: Coord,
    /// The move leaves the opponent's king attacked.
    pub checks_opponent: bool,
}

/// Returns true if any cell on the path `from` -> `to` is occupied.
pub fn is_blocked(board: &Board, kind: PieceKind, from: Coord, to: Coord) -> bool {
    board
        .coords_between(kind, from, to)
        .into_iter()
        .any(|at| board.piece_at(at).is_some())
}

/// Returns true if `piece` could move onto `target` as far as shape and
/// obstruction go. This is the attack test used for check detection.
pub fn attacks(board: &Board, piece: &Piece, target: Coord) -> bool {
    target.in_bounds()
        && can_reach(piece, target, board.piece_at(target))
        && !is_blocked(board, piece.kind, piece.position, target)
}

/// Reports which kings would be attacked after moving the piece on `from`
/// to `to`. The board is restored before returning and no moved flag is
/// touched.
pub fn checked_after_move(board: &mut Board, from: Coord, to: Coord) -> CheckStatus {
    match board.relocate(from, to) {
        Some(record) => {
            let status = checked_players(board);
            board.revert_move(record);
            status
        }
        None => checked_players(board),
    }
}

/// Validates an ordinary (non-castling) move.
pub fn legal_move(board: &mut Board, from: Coord, to: Coord) -> Option<LegalMove> {
    if !to.in_bounds() {
        return None;
    }
    let piece = *board.piece_at(from)?;
    let occupant = board.piece_at(to);
    if occupant.is_some_and(|o| o.kind == PieceKind::King) {
        return None;
    }
    if !can_reach(&piece, to, occupant) {
        return None;
    }
    if is_blocked(board, piece.kind, from, to) {
        return None;
    }

    let status = checked_after_move(board, from, to);
    if status.is_checked(piece.owner) {
        return None;
    }
    Some(LegalMove {
        from,
        to,
        checks_opponent: status.is_checked(piece.owner.opponent()),
    })
}

/// Returns true if moving the piece on `from` to `to` is a legal ordinary
/// move.
#[inline]
pub fn is_legal_move(board: &mut Board, from: Coord, to: Coord) -> bool {
    legal_move(board, from, to).is_some()
}

/// Lists every destination the piece on `from` may legally move to,
/// castling destinations included.
pub fn possible_moves(board: &mut Board, from: Coord) -> Vec<Coord> {
    let Some(piece) = board.piece_at(from).copied() else {
        return Vec::new();
    };

    let mut moves: Vec<Coord> = Coord::all()
        .filter(|&to| is_legal_move(board, from, to))
        .collect();

    if piece.kind == PieceKind::King && !piece.has_moved {
        for dx in [2, -2] {
            let to = from.offset(dx, 0);
            if castling::can_castle(board, from, to) {
                moves.push(to);
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Player;

    fn c(x: i32, y: i32) -> Coord {
        Coord::new(x, y)
    }

    #[test]
    fn opening_moves() {
        let mut board = Board::new();
        let mut knight = possible_moves(&mut board, c(1, 0));
        knight.sort();
        assert_eq!(knight, vec![c(0, 2), c(2, 2)]);

        let pawn = possible_moves(&mut board, c(4, 1));
        assert_eq!(pawn, vec![c(4, 2), c(4, 3)]);

        assert!(possible_moves(&mut board, c(0, 0)).is_empty());
        assert!(possible_moves(&mut board, c(3, 0)).is_empty());
        assert!(possible_moves(&mut board, c(4, 0)).is_empty());
        assert!(possible_moves(&mut board, c(4, 4)).is_empty());
    }

    #[test]
    fn twenty_moves_from_the_opening() {
        let mut board = Board::new();
        for player in Player::BOTH {
            let from: Vec<Coord> = board.pieces_of(player).map(|p| p.position).collect();
            let total: usize = from
                .into_iter()
                .map(|at| possible_moves(&mut board, at).len())
                .sum();
            assert_eq!(total, 20, "{player} should have 20 moves");
        }
    }

    #[test]
    fn sliders_are_blocked() {
        let mut board = Board::from_placement("4k3/8/8/8/R2p4/8/8/4K3").unwrap();
        let rook = c(0, 3);
        assert!(is_legal_move(&mut board, rook, c(3, 3)));
        assert!(!is_legal_move(&mut board, rook, c(4, 3)));
        assert!(is_blocked(&board, PieceKind::Rook, rook, c(5, 3)));
        assert!(!is_blocked(&board, PieceKind::Rook, rook, c(0, 7)));
    }

    #[test]
    fn pawn_double_step_needs_clear_path() {
        let mut board = Board::from_placement("4k3/8/8/8/8/4n3/4P3/4K3").unwrap();
        assert!(!is_legal_move(&mut board, c(4, 1), c(4, 2)));
        assert!(!is_legal_move(&mut board, c(4, 1), c(4, 3)));
    }

    #[test]
    fn knights_jump_over_pieces() {
        let mut board = Board::new();
        assert!(!is_blocked(&board, PieceKind::Knight, c(6, 0), c(5, 2)));
        assert!(is_legal_move(&mut board, c(6, 0), c(5, 2)));
    }

    #[test]
    fn pinned_piece_cannot_move_off_the_line() {
        // White bishop on e2 is pinned by the rook on e8.
        let mut board = Board::from_placement("4r1k1/8/8/8/8/8/4B3/4K3").unwrap();
        assert!(possible_moves(&mut board, c(4, 1)).is_empty());
    }

    #[test]
    fn king_cannot_step_into_attack() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/3r4/4K3").unwrap();
        let mut moves = possible_moves(&mut board, c(4, 0));
        moves.sort();
        // The rook covers d1, e2 and f2; it is undefended on d2.
        assert_eq!(moves, vec![c(3, 1), c(5, 0)]);
    }

    #[test]
    fn reports_check_on_opponent() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/8/R3K3").unwrap();
        let verdict = legal_move(&mut board, c(0, 0), c(0, 7)).unwrap();
        assert!(verdict.checks_opponent);
        let quiet = legal_move(&mut board, c(0, 0), c(0, 5)).unwrap();
        assert!(!quiet.checks_opponent);
    }

    #[test]
    fn kings_are_never_captured() {
        let mut board = Board::from_placement("8/8/8/8/8/8/8/Rk2K3").unwrap();
        assert!(!is_legal_move(&mut board, c(0, 0), c(1, 0)));
    }

    #[test]
    fn look_ahead_leaves_board_untouched() {
        let mut board = Board::from_placement("4r1k1/8/8/8/8/8/4B3/4K3").unwrap();
        let before = board.clone();
        let _ = checked_after_move(&mut board, c(4, 1), c(3, 2));
        let _ = possible_moves(&mut board, c(4, 0));
        assert_eq!(board, before);
    }

    #[test]
    fn out_of_bounds_and_empty_origin() {
        let mut board = Board::new();
        assert!(legal_move(&mut board, c(0, 1), c(0, -1)).is_none());
        assert!(legal_move(&mut board, c(3, 3), c(3, 4)).is_none());
    }
}
