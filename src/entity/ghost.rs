//! Ghost entity: frightened state, difficulty scaling and the social mood model.

use std::str::FromStr;

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use tracing::{debug, trace};

use crate::constants::{
    ai,
    mechanics::{FRIGHTENED_SPEED, GHOST_SPEED},
    timing, DEFAULT_SCATTER_TARGET, GHOST_SPAWN,
};
use crate::entity::motion::Motion;
use crate::entity::targeting::{self, Brain, PursuitContext};
use crate::entity::Actor;
use crate::error::SettingsError;
use crate::map::Maze;
use crate::theme::{EnemyConfig, EnemyType};

/// The macro behavior ghosts are told to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
}

/// Which targeting model the ghosts use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AiMode {
    /// Per-ghost pursuit heuristics driven by scatter/chase.
    #[default]
    Classic,
    /// Targets and speed follow each ghost's mood.
    Social,
}

impl FromStr for AiMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(AiMode::Classic),
            "social" => Ok(AiMode::Social),
            other => Err(SettingsError::UnknownAiMode(other.to_string())),
        }
    }
}

/// A ghost's feelings towards the player in social mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Friendly,
    Curious,
    Anxious,
    Betrayed,
    Tricked,
    Wary,
}

impl Mood {
    /// Speed scaling applied in social mode.
    pub const fn speed_multiplier(self) -> f32 {
        match self {
            Mood::Friendly => 0.75,
            Mood::Curious => 0.95,
            Mood::Tricked => 0.9,
            Mood::Betrayed => 1.2,
            Mood::Anxious | Mood::Wary => 0.98,
        }
    }
}

/// How a ghost picks its chase target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Pursuit {
    /// Straight at the player.
    Aggressive,
    /// Four tiles ahead of the player.
    Ambush,
    /// Mirrors the aggressor through a point two tiles ahead of the player.
    Flanking,
    /// Chases from afar, retreats when close.
    Shy,
}

impl Pursuit {
    pub fn from_name(name: &str) -> Pursuit {
        match name {
            "pinky" => Pursuit::Ambush,
            "inky" => Pursuit::Flanking,
            "clyde" => Pursuit::Shy,
            _ => Pursuit::Aggressive,
        }
    }
}

/// The static temperament looked up from a ghost's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Personality {
    pub base_mood: Mood,
    pub trait_label: &'static str,
}

impl Personality {
    pub fn from_name(name: &str) -> Personality {
        let (base_mood, trait_label) = match name {
            "blinky" => (Mood::Wary, "Driven rival"),
            "pinky" => (Mood::Curious, "Strategic dreamer"),
            "inky" => (Mood::Anxious, "Empathic skeptic"),
            "clyde" => (Mood::Friendly, "Warm-hearted drifter"),
            _ => (Mood::Wary, "Mysterious rival"),
        };
        Personality { base_mood, trait_label }
    }
}

/// Cosmetic presets for glitch ghosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GlitchKind {
    #[default]
    Static,
    Neon,
    Crystal,
    Inferno,
}

impl GlitchKind {
    pub const fn speed_factor(self) -> f32 {
        match self {
            GlitchKind::Static => 0.9,
            GlitchKind::Neon => 1.05,
            GlitchKind::Crystal => 1.0,
            GlitchKind::Inferno => 1.1,
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            GlitchKind::Static => "#a36bff",
            GlitchKind::Neon => "#ff4fd8",
            GlitchKind::Crystal => "#5fe0ff",
            GlitchKind::Inferno => "#ff7830",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostVariant {
    Classic,
    Glitch(GlitchKind),
}

impl GhostVariant {
    fn speed_factor(self) -> f32 {
        match self {
            GhostVariant::Classic => 1.0,
            GhostVariant::Glitch(kind) => kind.speed_factor(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ghost {
    name: String,
    color: String,
    variant: GhostVariant,
    motion: Motion,
    scatter_target: IVec2,
    mode: GhostMode,
    frightened: bool,
    frightened_timer: f32,
    ai_mode: AiMode,
    personality: Personality,
    pursuit: Pursuit,
    mood: Mood,
    affinity: f32,
    mood_timer: f32,
    /// Cruise control bonus, in pixels per second.
    acceleration: f32,
    /// Speed before frightened and mood scaling.
    base_speed: f32,
    mood_dirty: bool,
}

impl Actor for Ghost {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Ghost {
    /// A classic ghost with default spawn and scatter corner.
    pub fn named(name: &str, color: &str) -> Ghost {
        Self::from_config(&EnemyConfig {
            name: Some(name.to_string()),
            color: Some(color.to_string()),
            ..EnemyConfig::default()
        })
    }

    /// Builds a ghost from a theme entry. Glitch entries take their name and
    /// color from the preset unless the entry overrides them.
    pub fn from_config(config: &EnemyConfig) -> Ghost {
        let variant = match config.kind {
            EnemyType::Ghost => GhostVariant::Classic,
            EnemyType::Glitch => GhostVariant::Glitch(config.glitch.unwrap_or_default()),
        };

        let (default_name, default_color) = match &variant {
            GhostVariant::Classic => ("ghost", "#fff"),
            GhostVariant::Glitch(kind) => (kind.as_ref(), kind.color()),
        };
        let name = config.name.clone().unwrap_or_else(|| default_name.to_string());
        let color = config.color.clone().unwrap_or_else(|| default_color.to_string());

        let personality = Personality::from_name(&name);
        let pursuit = Pursuit::from_name(&name);
        let base_speed = GHOST_SPEED * variant.speed_factor();

        Ghost {
            motion: Motion::new(config.spawn.unwrap_or(GHOST_SPAWN), base_speed),
            scatter_target: config.scatter_target.unwrap_or(DEFAULT_SCATTER_TARGET),
            mode: GhostMode::Scatter,
            frightened: false,
            frightened_timer: 0.0,
            ai_mode: AiMode::Classic,
            mood: personality.base_mood,
            personality,
            pursuit,
            affinity: 0.0,
            mood_timer: 0.0,
            acceleration: 0.0,
            base_speed,
            mood_dirty: false,
            name,
            color,
            variant,
        }
    }

    pub fn set_mode(&mut self, mode: GhostMode) {
        self.mode = mode;
    }

    /// Makes the ghost vulnerable for `duration_ms` and turns it around.
    pub fn enter_frightened(&mut self, duration_ms: f32) {
        self.frightened = true;
        self.frightened_timer = duration_ms;
        let reverse = self.motion.direction.map(|direction| direction.opposite());
        self.motion.direction = reverse;
        self.motion.next_direction = reverse;
        self.sync_speed();
        trace!(ghost = %self.name, duration_ms, "Ghost frightened");
    }

    pub fn leave_frightened(&mut self) {
        self.frightened = false;
        self.frightened_timer = 0.0;
        self.sync_speed();
    }

    /// Scales the base speed for the current level.
    pub fn apply_difficulty(&mut self, multiplier: f32) {
        self.base_speed = (GHOST_SPEED * self.variant.speed_factor() + self.acceleration) * multiplier;
        self.sync_speed();
    }

    /// Sets the permanent speed bonus.
    pub fn accelerate(&mut self, amount: f32) {
        self.acceleration = amount;
        self.base_speed = GHOST_SPEED * self.variant.speed_factor() + amount;
        self.sync_speed();
        debug!(ghost = %self.name, amount, "Ghost accelerated");
    }

    /// Returns to spawn, no longer frightened.
    pub fn respawn(&mut self) {
        self.motion.reset();
        self.leave_frightened();
    }

    pub fn set_ai_mode(&mut self, mode: AiMode) {
        self.ai_mode = mode;
        self.sync_speed();
    }

    /// The mood implied by the current affinity alone.
    pub fn resolve_mood_from_affinity(&self) -> Mood {
        if self.affinity >= 3.0 {
            Mood::Friendly
        } else if self.affinity <= -3.0 {
            Mood::Betrayed
        } else if self.affinity >= 1.0 {
            Mood::Curious
        } else if self.affinity <= -1.0 {
            Mood::Wary
        } else {
            self.personality.base_mood
        }
    }

    /// Sets the mood, or re-resolves it from affinity when `mood` is `None`.
    ///
    /// A positive `duration_ms` makes the mood a timed override. Returns whether
    /// anything changed.
    pub fn set_mood(&mut self, mood: Option<Mood>, duration_ms: f32) -> bool {
        let next = mood.unwrap_or_else(|| self.resolve_mood_from_affinity());
        if self.mood == next && duration_ms <= 0.0 {
            return false;
        }

        self.mood = next;
        self.mood_timer = duration_ms.max(0.0);
        self.mood_dirty = true;
        self.sync_speed();
        trace!(ghost = %self.name, mood = next.as_ref(), duration_ms, "Ghost mood changed");
        true
    }

    /// Derives the actual speed from the base speed, frightened flag and mood.
    pub fn sync_speed(&mut self) {
        self.motion.speed = if self.frightened {
            FRIGHTENED_SPEED
        } else if self.ai_mode == AiMode::Social {
            self.base_speed * self.mood.speed_multiplier()
        } else {
            self.base_speed
        };
    }

    /// Nudges affinity within its bounds and re-resolves the mood.
    pub fn adjust_affinity(&mut self, delta: f32) -> bool {
        self.affinity = (self.affinity + delta).clamp(-ai::AFFINITY_LIMIT, ai::AFFINITY_LIMIT);
        self.mood_dirty = true;
        self.set_mood(None, 0.0)
    }

    /// Fools the ghost into chasing someone else's corner for a while.
    pub fn mark_tricked(&mut self) -> bool {
        self.set_mood(Some(Mood::Tricked), timing::TRICKED_MOOD_DURATION)
    }

    /// Counts down a timed mood; on expiry the mood is re-resolved from affinity.
    pub fn tick_mood(&mut self, delta_ms: f32) -> bool {
        if self.mood_timer <= 0.0 {
            return false;
        }
        self.mood_timer -= delta_ms;
        if self.mood_timer <= 0.0 {
            self.mood_timer = 0.0;
            return self.set_mood(None, 0.0);
        }
        false
    }

    /// Returns and clears whether mood or affinity changed since the last call.
    pub fn take_mood_change(&mut self) -> bool {
        std::mem::take(&mut self.mood_dirty)
    }

    /// Counts down the frightened window, then moves, re-targeting at every tile center.
    pub fn update<R: Rng>(&mut self, delta_ms: f32, maze: &Maze, ctx: &PursuitContext, rng: &mut R) {
        if self.frightened {
            self.frightened_timer -= delta_ms;
            if self.frightened_timer <= 0.0 {
                self.leave_frightened();
            }
        }

        let brain = self.brain();
        self.motion
            .advance(delta_ms, maze, |motion, maze| targeting::steer(&brain, motion, maze, ctx, &mut *rng));

        self.tick_mood(delta_ms);
    }

    /// The state that drives targeting.
    pub fn brain(&self) -> Brain {
        Brain {
            mode: self.mode,
            frightened: self.frightened,
            ai_mode: self.ai_mode,
            mood: self.mood,
            pursuit: self.pursuit,
            scatter_target: self.scatter_target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn variant(&self) -> GhostVariant {
        self.variant
    }

    pub fn scatter_target(&self) -> IVec2 {
        self.scatter_target
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn is_frightened(&self) -> bool {
        self.frightened
    }

    pub fn frightened_timer(&self) -> f32 {
        self.frightened_timer
    }

    pub fn ai_mode(&self) -> AiMode {
        self.ai_mode
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn mood_timer(&self) -> f32 {
        self.mood_timer
    }

    pub fn affinity(&self) -> f32 {
        self.affinity
    }

    pub fn personality(&self) -> Personality {
        self.personality
    }

    pub fn pursuit(&self) -> Pursuit {
        self.pursuit
    }

    pub fn speed(&self) -> f32 {
        self.motion.speed
    }

    pub fn base_speed(&self) -> f32 {
        self.base_speed
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }
}
