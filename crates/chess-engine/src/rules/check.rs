//! Check and checkmate detection.

use super::validate::{attacks, is_legal_move};
use crate::Board;
use chess_core::{Coord, Player};

/// Which kings are attacked, one flag per player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckStatus([bool; 2]);

impl CheckStatus {
    /// Returns true if `player`'s king is attacked.
    #[inline]
    pub const fn is_checked(self, player: Player) -> bool {
        self.0[player.index()]
    }

    /// Returns true if either king is attacked.
    #[inline]
    pub const fn any(self) -> bool {
        self.0[0] || self.0[1]
    }
}

/// Scans the whole board for attacks on both kings.
///
/// A player without a king on the board is never reported as checked.
pub fn checked_players(board: &Board) -> CheckStatus {
    let mut result = [false; 2];
    for piece in board.pieces() {
        let enemy = piece.owner.opponent();
        if result[enemy.index()] {
            continue;
        }
        let Some(king) = board.king(enemy) else {
            continue;
        };
        if attacks(board, piece, king) {
            result[enemy.index()] = true;
        }
    }
    CheckStatus(result)
}

/// Returns true if `player`'s king is attacked.
#[inline]
pub fn is_in_check(board: &Board, player: Player) -> bool {
    checked_players(board).is_checked(player)
}

/// Lists the enemy pieces attacking `player`'s king.
pub fn checkers(board: &Board, player: Player) -> Vec<Coord> {
    let Some(king) = board.king(player) else {
        return Vec::new();
    };
    board
        .pieces_of(player.opponent())
        .filter(|p| attacks(board, p, king))
        .map(|p| p.position)
        .collect()
}

/// Returns true if `player` is in check and cannot get out of it.
///
/// The king must have no safe neighbouring square, and no piece of
/// `player`'s (the king included) may legally capture a checking piece or
/// step between a checker and the king. Knights can only be captured.
pub fn is_checkmate(board: &mut Board, player: Player) -> bool {
    let Some(king) = board.king(player) else {
        return false;
    };
    let threats = checkers(board, player);
    if threats.is_empty() {
        return false;
    }
    if king_has_legal_move(board, king) {
        return false;
    }
    !threat_can_be_captured_or_blocked(board, player, king, &threats)
}

fn king_has_legal_move(board: &mut Board, king: Coord) -> bool {
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if is_legal_move(board, king, king.offset(dx, dy)) {
                return true;
            }
        }
    }
    false
}

fn threat_can_be_captured_or_blocked(
    board: &mut Board,
    player: Player,
    king: Coord,
    threats: &[Coord],
) -> bool {
    let mut targets = Vec::new();
    for &threat in threats {
        targets.push(threat);
        if let Some(attacker) = board.piece_at(threat) {
            targets.extend(board.coords_between(attacker.kind, threat, king));
        }
    }

    let defenders: Vec<Coord> = board.pieces_of(player).map(|p| p.position).collect();
    defenders.into_iter().any(|from| {
        targets.iter().any(|&to| is_legal_move(board, from, to))
    })
}
