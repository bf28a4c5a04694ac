//! A two-player game session on one [`Board`].
//!
//! [`Game`] owns the board and the turn state around it: whose turn it is,
//! which piece is selected, and whether a pawn is waiting to be promoted.
//! Presentation layers drive it through [`Game::select`], [`Game::try_move`]
//! and [`Game::promote`], and learn about turn changes, checkmate and
//! promotion requests through [`GameObserver`]s.

use crate::events::{GameEvent, GameObserver, ObserverId, Observers};
use crate::rules::{self, MoveOutcome};
use crate::Board;
use chess_core::{Coord, Piece, PieceKind, Player};
use std::sync::mpsc;
use thiserror::Error;
use tracing::{debug, info};

/// Why a move was not played.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,
    #[error("a pawn is waiting to be promoted")]
    PromotionPending,
    #[error("no piece on {0}")]
    NoPiece(Coord),
    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: Player },
    #[error("no piece is selected")]
    NothingSelected,
    #[error("illegal move from {from} to {to}")]
    Illegal { from: Coord, to: Coord },
}

/// Why a promotion was refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PromotionError {
    #[error("no promotion is pending")]
    NotPending,
    #[error("the pawn awaiting promotion is not on {0}")]
    WrongSquare(Coord),
    #[error("a pawn cannot be promoted to a {0}")]
    InvalidKind(PieceKind),
}

/// A running game between White and Black.
#[derive(Debug)]
pub struct Game {
    board: Board,
    current_turn: Player,
    selected: Option<Coord>,
    /// False while a promotion choice is outstanding.
    is_running: bool,
    promoting: Option<Coord>,
    observers: Observers,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a game from the opening position with White to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::White)
    }

    /// Starts a game on an arbitrary board.
    pub fn from_board(board: Board, current_turn: Player) -> Self {
        Game {
            board,
            current_turn,
            selected: None,
            is_running: true,
            promoting: None,
            observers: Observers::default(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    /// Returns false while waiting for a promotion choice.
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Square of the pawn awaiting promotion, if any.
    pub fn promoting_piece(&self) -> Option<Coord> {
        self.promoting
    }

    pub fn piece_at(&self, at: Coord) -> Option<&Piece> {
        self.board.piece_at(at)
    }

    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    pub fn checked_player(&self) -> Option<Player> {
        self.board.checked_player()
    }

    pub fn is_game_over(&self) -> bool {
        self.board.winner().is_some()
    }

    /// Legal destinations for the piece on `at`, castles included.
    pub fn possible_moves(&mut self, at: Coord) -> Vec<Coord> {
        rules::possible_moves(&mut self.board, at)
    }

    /// Selects the piece on `at` if it belongs to the player to move.
    ///
    /// Returns false, keeping the previous selection, otherwise.
    pub fn select(&mut self, at: Coord) -> bool {
        if !self.is_running || self.is_game_over() {
            return false;
        }
        match self.board.piece_at(at) {
            Some(piece) if piece.owner == self.current_turn => {
                self.selected = Some(at);
                true
            }
            _ => false,
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Moves the selected piece to `to`.
    pub fn move_selected(&mut self, to: Coord) -> Result<MoveOutcome, MoveError> {
        let from = self.selected.ok_or(MoveError::NothingSelected)?;
        self.play(from, to)
    }

    /// Plays the piece on `from` to `to` for the player to move.
    ///
    /// On success the turn passes to the opponent, unless the move brought a
    /// pawn to its last rank: then the session stops until [`Game::promote`]
    /// is called.
    pub fn play(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, MoveError> {
        if self.is_game_over() {
            return Err(MoveError::GameOver);
        }
        if !self.is_running {
            return Err(MoveError::PromotionPending);
        }
        let piece = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if piece.owner != self.current_turn {
            return Err(MoveError::NotYourTurn {
                expected: self.current_turn,
            });
        }

        let outcome =
            rules::try_move(&mut self.board, from, to).ok_or(MoveError::Illegal { from, to })?;
        info!(player = %self.current_turn, mov = %outcome.mov, "move played");

        if !outcome.mov.flag.is_castling() && self.board.can_be_promoted(to) {
            self.is_running = false;
            self.promoting = Some(to);
            self.selected = None;
            debug!(at = %to, "promotion required");
            self.observers.emit(GameEvent::PromotionRequired {
                at: to,
                player: self.current_turn,
            });
        } else {
            self.advance_turn();
        }
        Ok(outcome)
    }

    /// Like [`Game::play`], reporting only whether the move was consumed.
    pub fn try_move(&mut self, from: Coord, to: Coord) -> bool {
        match self.play(from, to) {
            Ok(_) => true,
            Err(err) => {
                debug!(%from, %to, %err, "move rejected");
                false
            }
        }
    }

    /// Turns the pawn on `at` into `kind`, then resumes play.
    ///
    /// The promoted piece keeps its square and moved flag. Check and
    /// checkmate are re-evaluated with the new piece before the turn passes.
    pub fn promote_to(&mut self, at: Coord, kind: PieceKind) -> Result<Piece, PromotionError> {
        match self.promoting {
            None => return Err(PromotionError::NotPending),
            Some(pending) if pending != at => return Err(PromotionError::WrongSquare(at)),
            Some(_) => {}
        }
        if !kind.is_promotion_target() {
            return Err(PromotionError::InvalidKind(kind));
        }
        let piece = self
            .board
            .replace_kind(at, kind)
            .ok_or(PromotionError::WrongSquare(at))?;

        self.promoting = None;
        self.is_running = true;
        info!(%at, %kind, "promoted");
        rules::record_check_status(&mut self.board, piece.owner);
        self.advance_turn();
        Ok(piece)
    }

    /// Like [`Game::promote_to`], reporting only whether it succeeded.
    pub fn promote(&mut self, at: Coord, kind: PieceKind) -> bool {
        match self.promote_to(at, kind) {
            Ok(_) => true,
            Err(err) => {
                debug!(%at, %kind, %err, "promotion rejected");
                false
            }
        }
    }

    /// Hands the turn to the other player and clears the selection.
    ///
    /// Observers hear about a winner first, then about the new turn.
    pub fn advance_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
        self.selected = None;
        if let Some(winner) = self.board.winner() {
            self.observers.emit(GameEvent::GameOver { winner });
        }
        self.observers.emit(GameEvent::TurnChanged {
            player: self.current_turn,
        });
    }

    /// Puts the pieces back and starts over with White to move. Observers
    /// stay subscribed.
    pub fn restart(&mut self) {
        self.board.reset();
        self.current_turn = Player::White;
        self.selected = None;
        self.is_running = true;
        self.promoting = None;
        info!("game restarted");
    }

    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: GameObserver + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Subscribes a channel; every later event is sent to the receiver.
    pub fn subscribe_channel(&mut self) -> (ObserverId, mpsc::Receiver<GameEvent>) {
        self.observers.subscribe_channel()
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }
}
