//! Line-oriented game loop.
//!
//! The driver reads commands, forwards them to a [`Game`] and reports what
//! happened. Turn changes, checkmate and promotion requests arrive through a
//! channel subscribed to the session, so the text printed for them comes
//! from the same notifications any other front end would receive.

use crate::command::{Command, HELP};
use crate::config::CliConfig;
use chess_core::{Coord, Move};
use chess_engine::{Game, GameEvent};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;

pub struct Driver<R: BufRead, W: Write> {
    game: Game,
    config: CliConfig,
    events: Receiver<GameEvent>,
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Driver<R, W> {
    pub fn new(config: CliConfig, reader: R, writer: W) -> Self {
        let mut game = Game::new();
        let (_, events) = game.subscribe_channel();
        Self {
            game,
            config,
            events,
            reader,
            writer,
        }
    }

    #[cfg(test)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[cfg(test)]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.show_board()?;
        writeln!(self.writer, "{} to move", self.game.current_turn())?;

        let mut line = String::new();
        loop {
            self.prompt()?;
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                break;
            }
            match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command)?,
                Err(e) => writeln!(self.writer, "{e}")?,
            }
            self.drain_events()?;
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Move(Move { from, to, .. }) => match self.game.play(from, to) {
                Ok(outcome) => {
                    tracing::debug!("Played {}", outcome.mov);
                    self.show_board()?;
                }
                Err(e) => writeln!(self.writer, "{e}")?,
            },
            Command::Select(at) => {
                if self.game.select(at) {
                    if let Some(piece) = self.game.piece_at(at).copied() {
                        writeln!(self.writer, "Selected {piece}")?;
                    }
                    if self.config.show_moves {
                        self.list_moves(at)?;
                    }
                } else {
                    writeln!(self.writer, "Cannot select {at}")?;
                }
            }
            Command::To(to) => match self.game.move_selected(to) {
                Ok(_) => self.show_board()?,
                Err(e) => writeln!(self.writer, "{e}")?,
            },
            Command::Moves(at) => self.list_moves(at)?,
            Command::Promote(kind) => match self.game.promoting_piece() {
                Some(at) => match self.game.promote_to(at, kind) {
                    Ok(_) => self.show_board()?,
                    Err(e) => writeln!(self.writer, "{e}")?,
                },
                None => writeln!(self.writer, "No promotion is pending")?,
            },
            Command::Board => self.show_board()?,
            Command::Restart => {
                self.game.restart();
                self.show_board()?;
                writeln!(self.writer, "{} to move", self.game.current_turn())?;
            }
            Command::Help => writeln!(self.writer, "{HELP}")?,
            Command::Empty | Command::Quit => {}
            Command::Unknown(input) => {
                writeln!(self.writer, "Unknown command '{input}', type help")?
            }
        }
        Ok(())
    }

    /// Reports every queued session event. Automatic promotion may queue
    /// more events while draining; those are reported too.
    fn drain_events(&mut self) -> io::Result<()> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                GameEvent::TurnChanged { player } => {
                    if self.game.is_game_over() {
                        continue;
                    }
                    if self.game.checked_player() == Some(player) {
                        writeln!(self.writer, "{player} is in check")?;
                    }
                    writeln!(self.writer, "{player} to move")?;
                }
                GameEvent::GameOver { winner } => {
                    writeln!(self.writer, "Checkmate. {winner} wins")?;
                }
                GameEvent::PromotionRequired { at, player } => match self.config.auto_promote {
                    Some(kind) if self.game.promote(at, kind) => {
                        writeln!(self.writer, "{player} pawn on {at} promoted to {kind}")?;
                        self.show_board()?;
                    }
                    _ => writeln!(
                        self.writer,
                        "{player} pawn on {at} must be promoted: promote q|r|b|n"
                    )?,
                },
            }
        }
        Ok(())
    }

    fn list_moves(&mut self, at: Coord) -> io::Result<()> {
        let mut moves = self.game.possible_moves(at);
        moves.sort_by_key(|c| (c.x, c.y));
        let names: Vec<String> = moves.iter().map(Coord::to_string).collect();
        if names.is_empty() {
            writeln!(self.writer, "No moves from {at}")
        } else {
            writeln!(self.writer, "Moves from {at}: {}", names.join(" "))
        }
    }

    fn show_board(&mut self) -> io::Result<()> {
        writeln!(self.writer, "{}", self.game.board().render(self.config.unicode))
    }

    fn prompt(&mut self) -> io::Result<()> {
        write!(self.writer, "> ")?;
        self.writer.flush()
    }
}
