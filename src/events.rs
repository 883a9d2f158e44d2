//! The synchronous event feed that renderers, HUDs and audio listen to.

use std::fmt;

use circular_buffer::CircularBuffer;
use serde::Serialize;
use strum_macros::AsRefStr;
use tracing::trace;

use crate::entity::ghost::{AiMode, GhostMode, Mood};
use crate::game::state::GameState;
use crate::map::PelletKind;

/// How many emitted events the bus remembers.
pub const EVENT_HISTORY: usize = 256;

/// Everything the simulation reports to the outside world.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum GameEvent {
    State {
        state: GameState,
    },
    Score {
        score: u32,
        high_score: u32,
    },
    HighScore {
        high_score: u32,
    },
    Lives {
        lives: u32,
    },
    Level {
        level: u32,
        maze: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        previous: Option<String>,
    },
    /// The scatter/chase phase, or `frightened` while a power pellet is active.
    Mode {
        mode: GhostMode,
    },
    Frightened {
        remaining: f32,
    },
    Pellet {
        #[serde(rename = "type")]
        kind: PelletKind,
        score: u32,
    },
    GhostEaten {
        ghost: String,
        combo: u32,
        score: u32,
    },
    Fruit {
        active: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        score: Option<u32>,
    },
    GhostMood {
        ghost: String,
        mood: Mood,
        affinity: f32,
        #[serde(rename = "trait")]
        trait_label: &'static str,
    },
    PowerUps {
        enabled: bool,
    },
    GhostMode {
        mode: AiMode,
    },
    Memory {
        title: &'static str,
        caption: &'static str,
        level: u32,
    },
    MemoryEnd,
    Theme {
        id: String,
    },
    GameOver {
        score: u32,
        level: u32,
    },
    CruiseControl {
        ghost: String,
    },
}

/// The name of an event, used to subscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum EventKind {
    State,
    Score,
    HighScore,
    Lives,
    Level,
    Mode,
    Frightened,
    Pellet,
    GhostEaten,
    Fruit,
    GhostMood,
    PowerUps,
    GhostMode,
    Memory,
    MemoryEnd,
    Theme,
    GameOver,
    CruiseControl,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::State { .. } => EventKind::State,
            GameEvent::Score { .. } => EventKind::Score,
            GameEvent::HighScore { .. } => EventKind::HighScore,
            GameEvent::Lives { .. } => EventKind::Lives,
            GameEvent::Level { .. } => EventKind::Level,
            GameEvent::Mode { .. } => EventKind::Mode,
            GameEvent::Frightened { .. } => EventKind::Frightened,
            GameEvent::Pellet { .. } => EventKind::Pellet,
            GameEvent::GhostEaten { .. } => EventKind::GhostEaten,
            GameEvent::Fruit { .. } => EventKind::Fruit,
            GameEvent::GhostMood { .. } => EventKind::GhostMood,
            GameEvent::PowerUps { .. } => EventKind::PowerUps,
            GameEvent::GhostMode { .. } => EventKind::GhostMode,
            GameEvent::Memory { .. } => EventKind::Memory,
            GameEvent::MemoryEnd => EventKind::MemoryEnd,
            GameEvent::Theme { .. } => EventKind::Theme,
            GameEvent::GameOver { .. } => EventKind::GameOver,
            GameEvent::CruiseControl { .. } => EventKind::CruiseControl,
        }
    }
}

/// Handle returned by [`EventBus::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

pub type Handler = Box<dyn FnMut(&GameEvent)>;

struct Listener {
    id: ListenerId,
    kind: EventKind,
    once: bool,
    handler: Handler,
}

/// An event as remembered by the bus.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    /// Position in the overall emission order, starting at zero.
    pub sequence: u64,
    pub event: GameEvent,
}

/// In-process publish/subscribe.
///
/// Emission runs every matching handler immediately, in the order they were
/// registered. The most recent [`EVENT_HISTORY`] events are kept for inspection.
pub struct EventBus {
    listeners: Vec<Listener>,
    next_id: u64,
    history: Box<CircularBuffer<EVENT_HISTORY, RecordedEvent>>,
    emitted: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("emitted", &self.emitted)
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        EventBus {
            listeners: Vec::new(),
            next_id: 0,
            history: CircularBuffer::boxed(),
            emitted: 0,
        }
    }

    /// Subscribes `handler` to every event of `kind`.
    pub fn on(&mut self, kind: EventKind, handler: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        self.register(kind, Box::new(handler), false)
    }

    /// Subscribes `handler` to the next event of `kind` only.
    pub fn once(&mut self, kind: EventKind, handler: impl FnMut(&GameEvent) + 'static) -> ListenerId {
        self.register(kind, Box::new(handler), true)
    }

    fn register(&mut self, kind: EventKind, handler: Handler, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener { id, kind, once, handler });
        id
    }

    /// Removes a listener. Returns whether it was still registered.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|listener| listener.id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: GameEvent) {
        let kind = event.kind();
        trace!(event = kind.as_ref(), "Emitting event");

        let mut fired_once = false;
        for listener in self.listeners.iter_mut().filter(|listener| listener.kind == kind) {
            (listener.handler)(&event);
            fired_once |= listener.once;
        }
        if fired_once {
            self.listeners.retain(|listener| !(listener.once && listener.kind == kind));
        }

        self.history.push_back(RecordedEvent {
            sequence: self.emitted,
            event,
        });
        self.emitted += 1;
    }

    /// Remembered events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &RecordedEvent> {
        self.history.iter()
    }

    /// Remembered events of one kind, oldest first.
    pub fn history_of(&self, kind: EventKind) -> impl Iterator<Item = &GameEvent> {
        self.history
            .iter()
            .map(|recorded| &recorded.event)
            .filter(move |event| event.kind() == kind)
    }

    /// The most recent remembered event of `kind`.
    pub fn last(&self, kind: EventKind) -> Option<&GameEvent> {
        self.history_of(kind).last()
    }

    /// Total events emitted since construction or the last [`clear`](Self::clear).
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drops every listener and forgets the history.
    pub fn clear(&mut self) {
        self.listeners.clear();
        self.history.clear();
        self.emitted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(EventKind::HighScore.as_ref(), "highScore");
        assert_eq!(EventKind::MemoryEnd.as_ref(), "memoryEnd");
        assert_eq!(GameEvent::MemoryEnd.kind(), EventKind::MemoryEnd);
    }

    #[test]
    fn test_event_json_shape() {
        let event = GameEvent::Pellet {
            kind: PelletKind::Power,
            score: 60,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "pellet", "type": "power", "score": 60 }));

        let json = serde_json::to_value(GameEvent::HighScore { high_score: 10 }).unwrap();
        assert_eq!(json, serde_json::json!({ "event": "highScore", "highScore": 10 }));
    }
}
