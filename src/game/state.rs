//! The game-flow states and a small guarded state machine.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter};
use tracing::{debug, trace};

/// The phases of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum GameState {
    /// Waiting for the first tick of a life.
    Ready,
    Playing,
    /// A power pellet is active.
    Frightened,
    /// The narrative interstitial between levels.
    Memory,
    Paused,
    GameOver,
}

impl GameState {
    /// Every legal transition, keyed by the source state.
    pub const TRANSITIONS: &'static [(GameState, &'static [GameState])] = &[
        (
            GameState::Ready,
            &[GameState::Playing, GameState::Paused, GameState::Memory],
        ),
        (
            GameState::Playing,
            &[
                GameState::Frightened,
                GameState::Paused,
                GameState::GameOver,
                GameState::Memory,
            ],
        ),
        (
            GameState::Frightened,
            &[GameState::Playing, GameState::GameOver, GameState::Memory],
        ),
        (GameState::Memory, &[GameState::Ready, GameState::Playing]),
        (GameState::Paused, &[GameState::Playing, GameState::Memory]),
        (GameState::GameOver, &[GameState::Ready]),
    ];

    /// Whether the simulation step is skipped entirely in this state.
    pub fn is_halted(self) -> bool {
        matches!(self, GameState::Paused | GameState::GameOver)
    }
}

/// A state machine that only moves along a static adjacency table.
#[derive(Debug, Clone)]
pub struct StateMachine<S: 'static> {
    current: S,
    transitions: &'static [(S, &'static [S])],
}

impl<S> StateMachine<S>
where
    S: Copy + PartialEq + Debug + 'static,
{
    pub fn new(initial: S, transitions: &'static [(S, &'static [S])]) -> Self {
        StateMachine {
            current: initial,
            transitions,
        }
    }

    pub fn state(&self) -> S {
        self.current
    }

    /// Whether `target` is reachable from the current state in one step.
    pub fn can_transition(&self, target: S) -> bool {
        self.transitions
            .iter()
            .find(|(from, _)| *from == self.current)
            .is_some_and(|(_, targets)| targets.contains(&target))
    }

    /// Moves to `target` if the table allows it.
    ///
    /// Staying in the current state always succeeds. Returns `false`, leaving the
    /// state untouched, for an illegal transition.
    pub fn transition(&mut self, target: S) -> bool {
        if target == self.current {
            return true;
        }
        if !self.can_transition(target) {
            trace!(from = ?self.current, to = ?target, "Rejected state transition");
            return false;
        }

        debug!(from = ?self.current, to = ?target, "State transition");
        self.current = target;
        true
    }

    /// Jumps to `state` regardless of the table.
    pub fn reset(&mut self, state: S) {
        if state != self.current {
            debug!(from = ?self.current, to = ?state, "State forced");
        }
        self.current = state;
    }
}

impl StateMachine<GameState> {
    /// A game-flow machine starting in [`GameState::Ready`].
    pub fn game() -> Self {
        Self::new(GameState::Ready, GameState::TRANSITIONS)
    }
}
