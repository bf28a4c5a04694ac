//! Notifications sent from a [`Game`](crate::Game) to its observers.

use chess_core::{Coord, Player};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::mpsc;

/// Something a presentation layer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// It is now `player`'s turn.
    TurnChanged { player: Player },
    /// `winner` delivered checkmate.
    GameOver { winner: Player },
    /// The pawn on `at` reached the last rank and needs a new kind.
    PromotionRequired { at: Coord, player: Player },
}

/// Receives [`GameEvent`]s synchronously, right after the state change that
/// caused them.
pub trait GameObserver {
    fn notify(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn notify(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Observers registered with one session.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn GameObserver>)>,
    channels: Vec<(ObserverId, mpsc::Sender<GameEvent>)>,
}

impl Observers {
    fn next_id(&mut self) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn subscribe(&mut self, observer: Box<dyn GameObserver>) -> ObserverId {
        let id = self.next_id();
        self.entries.push((id, observer));
        id
    }

    /// Returns a receiver fed with every event. The subscription ends by
    /// itself once the receiver is dropped.
    pub(crate) fn subscribe_channel(&mut self) -> (ObserverId, mpsc::Receiver<GameEvent>) {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id();
        self.channels.push((id, tx));
        (id, rx)
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.channels.retain(|(entry, _)| *entry != id);
        self.len() != before
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        for (_, observer) in &mut self.entries {
            observer.notify(&event);
        }
        self.channels.retain(|(_, tx)| tx.send(event).is_ok());
    }

    fn len(&self) -> usize {
        self.entries.len() + self.channels.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.len())
            .finish()
    }
}
