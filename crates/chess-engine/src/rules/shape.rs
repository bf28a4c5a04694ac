//! Per-kind movement shapes.
//!
//! A shape says whether a destination is geometrically reachable, ignoring
//! pieces in between and the safety of the mover's own king.

use chess_core::{Coord, Piece, PieceKind};

/// Returns true if `piece` could land on `target` given what occupies it.
///
/// The zero move and landing on a friendly piece are always rejected.
pub fn can_reach(piece: &Piece, target: Coord, occupant: Option<&Piece>) -> bool {
    let (dx, dy) = piece.position.delta(target);
    if dx == 0 && dy == 0 {
        return false;
    }
    if occupant.is_some_and(|o| o.is_friend(piece)) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_shape(piece, dx, dy, occupant.is_some()),
        PieceKind::Bishop => diagonal(dx, dy),
        PieceKind::Knight => knight_jump(dx, dy),
        PieceKind::Rook => straight(dx, dy),
        PieceKind::Queen => straight(dx, dy) || diagonal(dx, dy),
        PieceKind::King => dx.abs() <= 1 && dy.abs() <= 1,
    }
}

fn pawn_shape(pawn: &Piece, dx: i32, dy: i32, capturing: bool) -> bool {
    let forward = pawn.owner.forward_direction();
    if capturing {
        return dy == forward && dx.abs() == 1;
    }
    // The square jumped over is covered by the blocking check.
    let double_step = !pawn.has_moved && dy == 2 * forward;
    dx == 0 && (dy == forward || double_step)
}

#[inline]
fn diagonal(dx: i32, dy: i32) -> bool {
    dx != 0 && dx.abs() == dy.abs()
}

#[inline]
fn straight(dx: i32, dy: i32) -> bool {
    (dx == 0) != (dy == 0)
}

#[inline]
fn knight_jump(dx: i32, dy: i32) -> bool {
    matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1))
}
