//! Grid storage and geometric primitives.

use chess_core::{Coord, Piece, PieceKind, Player, BOARD_SIZE};
use std::fmt;
use thiserror::Error;

const N: usize = BOARD_SIZE as usize;

/// Back rank arrangement from file 0 to file 7.
const BACK_RANK: [PieceKind; N] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Errors from parsing a piece placement string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("rank {rank} describes {files} files")]
    RankWidth { rank: usize, files: usize },

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("{0} has more than one king")]
    DuplicateKing(Player),
}

/// Everything needed to undo [`Board::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    /// The moving piece as it was before the move.
    pub piece: Piece,
    /// The cell the piece left.
    pub from: Coord,
    /// The cell the piece landed on.
    pub to: Coord,
    /// Whatever stood on `to` before the move.
    pub captured: Option<Piece>,
}

/// The authoritative 8×8 grid.
///
/// Kings are tracked by coordinate rather than by reference, so clearing or
/// resetting a cell can never leave a dangling king handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Indexed `[y][x]`.
    squares: [[Option<Piece>; N]; N],
    kings: [Option<Coord>; 2],
    winner: Option<Player>,
    checked_player: Option<Player>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates a board in the standard opening arrangement.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            squares: [[None; N]; N],
            kings: [None; 2],
            winner: None,
            checked_player: None,
        }
    }

    /// Builds a board from a FEN-style placement field, e.g.
    /// `"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"`.
    ///
    /// Ranks are listed from rank 8 down to rank 1; uppercase letters are
    /// White. A piece counts as unmoved only when it stands on its square
    /// from the opening arrangement.
    pub fn from_placement(placement: &str) -> Result<Self, PlacementError> {
        let ranks: Vec<&str> = placement.trim().split('/').collect();
        if ranks.len() != N {
            return Err(PlacementError::RankCount(ranks.len()));
        }

        let mut board = Self::empty();
        for (i, rank_str) in ranks.iter().enumerate() {
            let y = (N - 1 - i) as i32;
            let mut x = 0i32;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    x += skip as i32;
                    continue;
                }
                let (kind, owner) = PieceKind::from_char(c).ok_or(PlacementError::InvalidPiece(c))?;
                let at = Coord::new(x, y);
                if at.in_bounds() {
                    if kind == PieceKind::King && board.kings[owner.index()].is_some() {
                        return Err(PlacementError::DuplicateKing(owner));
                    }
                    let mut piece = Piece::new(kind, owner, at);
                    piece.has_moved = !is_home_square(kind, owner, at);
                    board.place(piece);
                }
                x += 1;
            }
            if x != BOARD_SIZE {
                return Err(PlacementError::RankWidth {
                    rank: N - i,
                    files: x as usize,
                });
            }
        }
        Ok(board)
    }

    /// Returns true iff the coordinate is on the board.
    #[inline]
    pub fn in_bounds(&self, at: Coord) -> bool {
        at.in_bounds()
    }

    /// Returns the piece on a cell; `None` when empty or off the board.
    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        if !at.in_bounds() {
            return None;
        }
        self.squares[at.y as usize][at.x as usize].as_ref()
    }

    /// Returns the direction pawns of `player` advance.
    #[inline]
    pub fn forward_direction(&self, player: Player) -> i32 {
        player.forward_direction()
    }

    /// Returns where `player`'s king stands, if it is on the board.
    #[inline]
    pub fn king(&self, player: Player) -> Option<Coord> {
        self.kings[player.index()]
    }

    /// Returns the recorded winner.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Returns the player whose king was left in check by the last move.
    #[inline]
    pub fn checked_player(&self) -> Option<Player> {
        self.checked_player
    }

    pub(crate) fn set_winner(&mut self, winner: Option<Player>) {
        self.winner = winner;
    }

    pub(crate) fn set_checked_player(&mut self, player: Option<Player>) {
        self.checked_player = player;
    }

    /// Iterates over every piece on the board.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten().flatten()
    }

    /// Iterates over the pieces owned by `player`.
    pub fn pieces_of(&self, player: Player) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.owner == player)
    }

    /// Returns the interior cells on the line `from` -> `to`, exclusive of
    /// both ends.
    ///
    /// Knights jump, so they have no path. Pairs that are neither on a rank,
    /// a file nor a diagonal have no path either.
    pub fn coords_between(&self, kind: PieceKind, from: Coord, to: Coord) -> Vec<Coord> {
        if !kind.is_blockable() {
            return Vec::new();
        }
        let (dx, dy) = from.delta(to);
        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return Vec::new();
        }
        let step_x = dx.signum();
        let step_y = dy.signum();

        let mut cells = Vec::new();
        let mut at = from.offset(step_x, step_y);
        while at != to && at.in_bounds() {
            cells.push(at);
            at = at.offset(step_x, step_y);
        }
        cells
    }

    /// Returns true if the piece on `at` is a pawn standing on its owner's
    /// last rank.
    pub fn can_be_promoted(&self, at: Coord) -> bool {
        self.piece_at(at).is_some_and(|p| {
            p.kind == PieceKind::Pawn && p.position.y == p.owner.promotion_rank()
        })
    }

    /// Puts a piece on its own `position`, replacing any occupant.
    ///
    /// Returns the replaced piece. A king placed this way becomes that
    /// player's tracked king. Off-board positions are ignored.
    pub(crate) fn place(&mut self, piece: Piece) -> Option<Piece> {
        let at = piece.position;
        if !at.in_bounds() {
            return None;
        }
        let replaced = self.take(at);
        if piece.kind == PieceKind::King {
            self.kings[piece.owner.index()] = Some(at);
        }
        self.squares[at.y as usize][at.x as usize] = Some(piece);
        replaced
    }

    /// Removes and returns the piece on `at`.
    pub(crate) fn take(&mut self, at: Coord) -> Option<Piece> {
        if !at.in_bounds() {
            return None;
        }
        let taken = self.squares[at.y as usize][at.x as usize].take();
        if let Some(piece) = taken {
            if piece.kind == PieceKind::King && self.kings[piece.owner.index()] == Some(at) {
                self.kings[piece.owner.index()] = None;
            }
        }
        taken
    }

    /// Forcibly moves the piece on `from` to `to`.
    ///
    /// Any occupant of `to` is captured, the origin is cleared and the piece
    /// is marked as moved. No legality is checked. Returns `None` when `from`
    /// is empty.
    pub fn apply_move(&mut self, from: Coord, to: Coord) -> Option<MoveRecord> {
        let record = self.relocate(from, to)?;
        if let Some(piece) = self.cell_mut(to) {
            piece.has_moved = true;
        }
        Some(record)
    }

    /// Undoes a move made by [`apply_move`](Board::apply_move), restoring the
    /// piece's flags and the captured piece.
    pub fn revert_move(&mut self, record: MoveRecord) {
        self.take(record.to);
        self.place(record.piece);
        if let Some(captured) = record.captured {
            self.place(captured);
        }
    }

    /// Moves a piece without touching its moved flag.
    ///
    /// This is the primitive behind both real moves and the temporary
    /// placements used to look ahead for check.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<MoveRecord> {
        if !to.in_bounds() {
            return None;
        }
        let piece = self.take(from)?;
        let captured = self.take(to);
        debug_assert!(
            captured.map_or(true, |c| c.kind != PieceKind::King),
            "a king was captured on {to:?}"
        );
        let mut moved = piece;
        moved.position = to;
        self.place(moved);
        Some(MoveRecord {
            piece,
            from,
            to,
            captured,
        })
    }

    /// Replaces the piece on `at` with one of a different kind, keeping its
    /// owner and moved flag. Returns the new piece.
    pub(crate) fn replace_kind(&mut self, at: Coord, kind: PieceKind) -> Option<Piece> {
        let old = self.take(at)?;
        let new = Piece {
            kind,
            ..old
        };
        self.place(new);
        Some(new)
    }

    /// Clears the board and places the standard opening arrangement.
    pub fn setup_initial_position(&mut self) {
        self.squares = [[None; N]; N];
        self.kings = [None; 2];
        self.winner = None;
        self.checked_player = None;

        for player in Player::BOTH {
            let back = player.back_rank();
            for (x, kind) in BACK_RANK.iter().enumerate() {
                self.place(Piece::new(*kind, player, Coord::new(x as i32, back)));
            }
            let pawns = player.pawn_rank();
            for x in 0..BOARD_SIZE {
                self.place(Piece::new(PieceKind::Pawn, player, Coord::new(x, pawns)));
            }
        }
    }

    /// Removes every piece and sets up a fresh game.
    pub fn reset(&mut self) {
        self.setup_initial_position();
    }

    fn cell_mut(&mut self, at: Coord) -> Option<&mut Piece> {
        if !at.in_bounds() {
            return None;
        }
        self.squares[at.y as usize][at.x as usize].as_mut()
    }

    /// Writes the board with one character per cell.
    ///
    /// `glyphs` selects Unicode chess symbols instead of letters.
    pub fn render(&self, glyphs: bool) -> String {
        let mut out = String::new();
        for y in (0..BOARD_SIZE).rev() {
            out.push((b'1' + y as u8) as char);
            out.push(' ');
            for x in 0..BOARD_SIZE {
                let c = match self.piece_at(Coord::new(x, y)) {
                    Some(p) if glyphs => p.kind.glyph(p.owner),
                    Some(p) => p.to_char(),
                    None => '.',
                };
                out.push(c);
                if x + 1 < BOARD_SIZE {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out.push_str("  a b c d e f g h");
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

fn is_home_square(kind: PieceKind, owner: Player, at: Coord) -> bool {
    if kind == PieceKind::Pawn {
        return at.y == owner.pawn_rank();
    }
    at.y == owner.back_rank() && BACK_RANK[at.x as usize] == kind
}
