//! Parsing of the lines a player types.

use chess_core::{Coord, Move, ParseCoordError, ParseMoveError, PieceKind};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("invalid move: {0}")]
    InvalidMove(#[from] ParseMoveError),
    #[error("invalid square: {0}")]
    InvalidSquare(#[from] ParseCoordError),
    #[error("unknown piece '{0}', expected one of q, r, b, n")]
    InvalidPiece(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
}

/// Commands understood by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play a move in coordinate form, e.g. `e2e4`.
    Move(Move),
    /// Select a piece: `select e2`.
    Select(Coord),
    /// Move the selected piece: `to e4`.
    To(Coord),
    /// List legal destinations: `moves e2`.
    Moves(Coord),
    /// Choose the kind for a pending promotion: `promote q`.
    Promote(PieceKind),
    Board,
    Restart,
    Help,
    Quit,
    /// Blank line.
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let cmd = parts.next().unwrap_or("");
        let mut arg = |name: &'static str| parts.next().ok_or(CommandError::MissingArgument(name));

        match cmd {
            "" => Ok(Command::Empty),
            "board" => Ok(Command::Board),
            "restart" => Ok(Command::Restart),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "select" => Ok(Command::Select(arg("select")?.parse()?)),
            "to" => Ok(Command::To(arg("to")?.parse()?)),
            "moves" => Ok(Command::Moves(arg("moves")?.parse()?)),
            "promote" => Ok(Command::Promote(parse_promotion(arg("promote")?)?)),
            _ if looks_like_move(cmd) => Ok(Command::Move(cmd.parse()?)),
            _ => Ok(Command::Unknown(input.to_string())),
        }
    }
}

fn looks_like_move(s: &str) -> bool {
    s.len() == 4 && s.bytes().next().is_some_and(|b| b.is_ascii_lowercase())
}

/// Accepts a letter (`q`) or a full name (`queen`).
fn parse_promotion(s: &str) -> Result<PieceKind, CommandError> {
    let lower = s.to_ascii_lowercase();
    let kind = match lower.as_str() {
        "q" | "queen" => PieceKind::Queen,
        "r" | "rook" => PieceKind::Rook,
        "b" | "bishop" => PieceKind::Bishop,
        "n" | "knight" => PieceKind::Knight,
        _ => return Err(CommandError::InvalidPiece(s.to_string())),
    };
    Ok(kind)
}

pub const HELP: &str = "\
commands:
  e2e4          play a move
  select e2     select a piece
  to e4         move the selected piece
  moves e2      list legal destinations
  promote q     choose a promotion (q, r, b, n)
  board         show the board
  restart       start a new game
  quit          leave";
