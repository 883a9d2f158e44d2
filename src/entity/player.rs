//! The player-controlled entity.

use std::f32::consts::TAU;

use circular_buffer::CircularBuffer;
use glam::Vec2;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::{mechanics::PLAYER_SPEED, timing::TRAIL_DECAY, PLAYER_SPAWN, PLAYER_TRAIL_LENGTH};
use crate::entity::motion::Motion;
use crate::entity::Actor;
use crate::map::direction::Direction;
use crate::map::{Maze, PelletKind};
use crate::theme::PlayerConfig;

/// Samples fade out once their life drops to this.
const TRAIL_CUTOFF: f32 = 0.02;
/// Mouth animation radians per millisecond.
const MOUTH_RATE: f32 = 0.012;

/// One fading afterimage behind the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSample {
    pub position: Vec2,
    /// 1.0 when pushed, decaying towards zero.
    pub life: f32,
}

#[derive(Debug, Clone)]
pub struct Player {
    motion: Motion,
    base_speed: f32,
    /// The last heading the player actually moved in.
    facing: Direction,
    /// Newest sample first.
    trail: CircularBuffer<PLAYER_TRAIL_LENGTH, TrailSample>,
    trail_enabled: bool,
    mouth_phase: f32,
    variant: String,
}

impl Actor for Player {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(&PlayerConfig::default())
    }
}

impl Player {
    pub fn new(config: &PlayerConfig) -> Self {
        let base_speed = config.speed.unwrap_or(PLAYER_SPEED);
        let variant = config.variant.clone().unwrap_or_else(|| "classic".to_string());
        let trail_enabled = config.trail.unwrap_or(variant != "classic");

        Player {
            motion: Motion::new(config.spawn.unwrap_or(PLAYER_SPAWN), base_speed),
            base_speed,
            facing: Direction::Right,
            trail: CircularBuffer::new(),
            trail_enabled,
            mouth_phase: 0.0,
            variant,
        }
    }

    /// Returns to spawn, stopped and facing right, with the trail cleared.
    pub fn reset(&mut self) {
        self.motion.reset();
        self.motion.speed = self.base_speed;
        self.facing = Direction::Right;
        self.trail.clear();
        self.mouth_phase = 0.0;
    }

    /// Buffers the player's intended heading.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.motion.set_direction(direction);
    }

    /// Moves the player and eats whatever lies on the tiles it passes.
    ///
    /// `speed_multiplier` scales the base speed for this step only.
    pub fn update(&mut self, delta_ms: f32, maze: &mut Maze, speed_multiplier: f32) -> SmallVec<[PelletKind; 2]> {
        self.motion.speed = self.base_speed * speed_multiplier;

        let visited = self.motion.advance(delta_ms, maze, |_, _| {});
        if let Some(direction) = self.motion.direction {
            self.facing = direction;
        }

        self.mouth_phase = (self.mouth_phase + delta_ms * MOUTH_RATE) % TAU;

        if self.trail_enabled {
            self.update_trail(delta_ms);
        }

        let eaten: SmallVec<[PelletKind; 2]> = visited.iter().filter_map(|&tile| maze.consume(tile)).collect();
        if !eaten.is_empty() {
            trace!(count = eaten.len(), tile = ?self.motion.tile(), "Player ate");
        }
        eaten
    }

    fn update_trail(&mut self, delta_ms: f32) {
        if self.motion.direction.is_some() {
            self.trail.push_front(TrailSample {
                position: self.motion.position,
                life: 1.0,
            });
        }

        let decay = delta_ms / TRAIL_DECAY;
        for sample in self.trail.iter_mut() {
            sample.life = (sample.life - decay).max(0.0);
        }

        // Older samples sit at the back and always have less life left.
        while self.trail.back().is_some_and(|sample| sample.life <= TRAIL_CUTOFF) {
            self.trail.pop_back();
        }
    }

    /// Returns and clears the tunnel wrap flag from the last move.
    pub fn consume_wrap_flag(&mut self) -> bool {
        self.motion.consume_wrap_flag()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.motion.direction
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// The heading used for look-ahead targeting: the current one, or the facing when stopped.
    pub fn heading(&self) -> Direction {
        self.motion.direction.unwrap_or(self.facing)
    }

    pub fn speed(&self) -> f32 {
        self.motion.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn trail(&self) -> impl Iterator<Item = &TrailSample> {
        self.trail.iter()
    }

    pub fn trail_enabled(&self) -> bool {
        self.trail_enabled
    }

    pub fn mouth_phase(&self) -> f32 {
        self.mouth_phase
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }
}
