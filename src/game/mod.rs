//! This module contains the main game logic and state.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::constants::{ai, collider::CONTACT_RADIUS, mechanics, scoring, timing, FRUIT_FALLBACK_TILE};
use crate::entity::fruit::BonusFruit;
use crate::entity::ghost::{AiMode, Ghost, GhostMode, Mood, Pursuit};
use crate::entity::player::Player;
use crate::entity::targeting::PursuitContext;
use crate::entity::Actor;
use crate::error::GameResult;
use crate::events::{EventBus, GameEvent};
use crate::map::direction::Direction;
use crate::map::{Maze, MazeSet, PelletKind};
use crate::memory::memory_panel;
use crate::settings::GameConfig;
use crate::theme::ThemeConfig;

pub mod state;

use state::{GameState, StateMachine};

/// A serializable summary of the game aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub state: GameState,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub frightened_timer: f32,
    pub mode_timer: f32,
    pub chase_mode: bool,
    pub ghost_combo: u32,
    pub fruit_visible: bool,
    pub pellets_remaining: usize,
}

/// The `Game` struct owns the whole simulation and is stepped by an external clock.
///
/// Each call to [`update`](Game::update) runs one tick: timers, the player, the
/// ghosts, fruit, collisions and level completion, in that order. Changes are
/// reported through the [`EventBus`].
pub struct Game {
    theme: ThemeConfig,
    mazes: MazeSet,
    player: Player,
    ghosts: SmallVec<[Ghost; 4]>,
    fruit: BonusFruit,
    machine: StateMachine<GameState>,
    events: EventBus,
    rng: SmallRng,

    score: u32,
    high_score: u32,
    lives: u32,
    level: u32,
    frightened_timer: f32,
    mode_timer: f32,
    chase_mode: bool,
    ghost_combo: u32,
    /// One-shot fruit spawns at 65% and 30% of the level's pellets.
    fruit_armed: [bool; 2],
    pellets_at_start: usize,
    power_ups_enabled: bool,
    ghost_ai_mode: AiMode,
    ghosts_eaten_during_frightened: u32,
    memory_active: bool,
    memory_timer: f32,
    cruise_control: bool,
}

impl Game {
    pub fn new(config: GameConfig) -> GameResult<Game> {
        Self::with_event_bus(config, EventBus::new())
    }

    /// Builds a game that reports through `events`, so listeners registered
    /// beforehand see the initial announcements too.
    pub fn with_event_bus(config: GameConfig, events: EventBus) -> GameResult<Game> {
        let mazes = MazeSet::new(&config.mazes)?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let player = Player::new(&config.theme.player);
        let ghosts = config.theme.spawn_ghosts();
        let fruit = Self::spawn_fruit(mazes.current());
        let pellets_at_start = mazes.current().pellets_remaining();

        let mut game = Game {
            theme: config.theme,
            mazes,
            player,
            ghosts,
            fruit,
            machine: StateMachine::game(),
            events,
            rng,
            score: 0,
            high_score: config.high_score,
            lives: mechanics::STARTING_LIVES,
            level: 1,
            frightened_timer: 0.0,
            mode_timer: timing::MODE_SWITCH_INTERVAL,
            chase_mode: false,
            ghost_combo: 0,
            fruit_armed: [true, true],
            pellets_at_start,
            power_ups_enabled: config.power_ups_enabled,
            ghost_ai_mode: config.ghost_ai_mode,
            ghosts_eaten_during_frightened: 0,
            memory_active: false,
            memory_timer: 0.0,
            cruise_control: false,
        };

        game.emit(GameEvent::State {
            state: game.machine.state(),
        });
        game.emit_score();
        game.emit(GameEvent::Lives { lives: game.lives });
        game.emit_level(None);
        game.emit_mode();
        game.emit(GameEvent::PowerUps {
            enabled: game.power_ups_enabled,
        });
        game.emit(GameEvent::GhostMode {
            mode: game.ghost_ai_mode,
        });
        game.configure_ghosts();

        info!(
            maze = game.maze().name(),
            theme = %game.theme.id,
            ghosts = game.ghosts.len(),
            "Game created"
        );
        Ok(game)
    }

    /// Advances the simulation by `delta_ms` milliseconds.
    ///
    /// Does nothing while paused or after game over. During a memory interstitial
    /// only the reveal timer runs.
    pub fn update(&mut self, delta_ms: f32) {
        let state = self.machine.state();
        if state.is_halted() {
            return;
        }

        if state == GameState::Memory {
            if self.memory_active {
                self.memory_timer -= delta_ms;
                if self.memory_timer <= 0.0 {
                    self.complete_memory();
                }
            }
            return;
        }

        if state == GameState::Ready {
            self.transition(GameState::Playing);
        }

        self.update_ghost_difficulty();
        self.update_mode(delta_ms);
        self.update_frightened(delta_ms);
        self.update_cruise_control();
        self.update_player(delta_ms);
        self.update_ghosts(delta_ms);
        self.update_fruit(delta_ms);

        if self.check_collisions() {
            self.check_level_completion();
        }
        self.check_combo_reset();
    }

    fn update_ghost_difficulty(&mut self) {
        let multiplier = self.difficulty_multiplier();
        for ghost in &mut self.ghosts {
            ghost.apply_difficulty(multiplier);
        }
    }

    fn update_mode(&mut self, delta_ms: f32) {
        self.mode_timer -= delta_ms;
        if self.mode_timer > 0.0 {
            return;
        }

        self.chase_mode = !self.chase_mode;
        self.mode_timer = timing::MIN_MODE_SWITCH_INTERVAL
            .max(timing::MODE_SWITCH_INTERVAL - self.level as f32 * timing::MODE_SWITCH_LEVEL_STEP);

        let mode = self.phase_mode();
        for ghost in &mut self.ghosts {
            ghost.set_mode(mode);
        }
        debug!(mode = mode.as_ref(), interval = self.mode_timer, "Ghost phase switched");
        self.emit(GameEvent::Mode { mode });
    }

    fn update_frightened(&mut self, delta_ms: f32) {
        if self.machine.state() != GameState::Frightened {
            return;
        }

        self.frightened_timer -= delta_ms;
        self.emit(GameEvent::Frightened {
            remaining: self.frightened_timer.max(0.0),
        });
        if self.frightened_timer > 0.0 {
            return;
        }

        self.end_frightened();
        if self.ghost_ai_mode == AiMode::Social {
            let spared = self.ghosts_eaten_during_frightened == 0;
            for ghost in &mut self.ghosts {
                if spared {
                    ghost.adjust_affinity(ai::AFFINITY_SPARED);
                    ghost.set_mood(Some(Mood::Friendly), timing::FRIENDLY_MOOD_DURATION);
                } else {
                    ghost.adjust_affinity(ai::AFFINITY_PARTIAL);
                }
            }
            self.broadcast_mood_changes();
        }
    }

    /// Closes the frightened window: back to playing, every ghost recovered.
    fn end_frightened(&mut self) {
        self.frightened_timer = 0.0;
        self.transition(GameState::Playing);
        for ghost in &mut self.ghosts {
            ghost.leave_frightened();
        }
        self.emit_mode();
    }

    fn update_cruise_control(&mut self) {
        if self.cruise_control || self.maze().pellets_remaining() >= mechanics::CRUISE_CONTROL_THRESHOLD {
            return;
        }

        let multiplier = self.difficulty_multiplier();
        let Some(ghost) = self
            .ghosts
            .iter_mut()
            .find(|ghost| ghost.pursuit() == Pursuit::Aggressive)
        else {
            return;
        };

        ghost.accelerate(mechanics::CRUISE_CONTROL_BONUS);
        ghost.apply_difficulty(multiplier);
        let name = ghost.name().to_string();
        self.cruise_control = true;
        info!(ghost = %name, "Cruise control engaged");
        self.emit(GameEvent::CruiseControl { ghost: name });
    }

    fn update_player(&mut self, delta_ms: f32) {
        let multiplier = 1.0 + self.ghost_combo as f32 * mechanics::COMBO_SPEED_BONUS;
        let eaten = self.player.update(delta_ms, self.mazes.current_mut(), multiplier);

        for kind in eaten {
            match kind {
                PelletKind::Pellet => self.handle_pellet(scoring::PELLET, PelletKind::Pellet),
                PelletKind::Power if self.power_ups_enabled => {
                    self.handle_pellet(scoring::POWER_PELLET, PelletKind::Power);
                    self.handle_power_pellet();
                }
                PelletKind::Power => self.handle_pellet(scoring::PELLET, PelletKind::Pellet),
            }
        }

        let wrapped = self.player.consume_wrap_flag();
        if wrapped && self.ghost_ai_mode == AiMode::Social {
            debug!("Player tunnel wrap tricked the ghosts");
            for ghost in &mut self.ghosts {
                ghost.mark_tricked();
            }
            self.broadcast_mood_changes();
        }
    }

    fn update_ghosts(&mut self, delta_ms: f32) {
        let maze = self.mazes.current();
        for index in 0..self.ghosts.len() {
            // Rebuilt per ghost so each one sees its siblings' fresh positions.
            let ctx = PursuitContext::new(&self.player, &self.ghosts, Some(index), maze);
            self.ghosts[index].update(delta_ms, maze, &ctx, &mut self.rng);
        }
        self.broadcast_mood_changes();
    }

    fn update_fruit(&mut self, delta_ms: f32) {
        if self.fruit.update(delta_ms) {
            trace!("Fruit expired");
            self.emit(GameEvent::Fruit {
                active: false,
                score: None,
            });
        }
        self.try_arm_fruit();
    }

    fn try_arm_fruit(&mut self) {
        let start = self.pellets_at_start;
        if start == 0 {
            return;
        }

        let remaining = self.maze().pellets_remaining();
        let first_threshold = start - start * 35 / 100;
        let second_threshold = start - start * 70 / 100;

        if self.fruit_armed[0] && remaining <= first_threshold {
            self.fruit_armed[0] = false;
            self.show_fruit();
        } else if self.fruit_armed[1] && remaining <= second_threshold {
            self.fruit_armed[1] = false;
            self.show_fruit();
        }
    }

    fn show_fruit(&mut self) {
        self.fruit.appear(timing::FRUIT_DURATION);
        debug!(tile = ?self.fruit.tile(), "Fruit appeared");
        self.emit(GameEvent::Fruit {
            active: true,
            score: None,
        });
    }

    /// Resolves ghost and fruit contact. Returns `false` if a life was lost.
    fn check_collisions(&mut self) -> bool {
        for index in 0..self.ghosts.len() {
            if self.ghosts[index].distance_to(&self.player) >= CONTACT_RADIUS {
                continue;
            }
            if self.ghosts[index].is_frightened() {
                self.handle_ghost_eaten(index);
            } else {
                self.handle_life_loss();
                return false;
            }
        }

        if self.fruit.is_visible() && self.fruit.position().distance(self.player.position()) < CONTACT_RADIUS {
            let points = self.fruit.score();
            self.fruit.despawn();
            debug!(points, "Fruit eaten");
            self.score = self.score.saturating_add(points);
            self.emit(GameEvent::Fruit {
                active: false,
                score: Some(points),
            });
            self.emit_score();
            self.update_high_score();
        }
        true
    }

    fn check_level_completion(&mut self) {
        if self.maze().pellets_remaining() == 0 {
            self.advance_level();
        }
    }

    fn check_combo_reset(&mut self) {
        if self.machine.state() != GameState::Frightened {
            self.ghost_combo = 0;
        }
    }

    fn handle_pellet(&mut self, points: u32, kind: PelletKind) {
        self.score = self.score.saturating_add(points);
        self.emit_score();
        self.emit(GameEvent::Pellet {
            kind,
            score: self.score,
        });
        self.update_high_score();

        if self.ghost_ai_mode == AiMode::Social {
            let delta = match kind {
                PelletKind::Pellet => ai::AFFINITY_PELLET,
                PelletKind::Power => ai::AFFINITY_POWER_PELLET,
            };
            for ghost in &mut self.ghosts {
                ghost.adjust_affinity(delta);
            }
            self.broadcast_mood_changes();
        }
    }

    fn handle_power_pellet(&mut self) {
        self.frightened_timer = timing::FRIGHTENED_DURATION;
        self.ghost_combo = 0;
        self.ghosts_eaten_during_frightened = 0;
        self.transition(GameState::Frightened);
        for ghost in &mut self.ghosts {
            ghost.enter_frightened(self.frightened_timer);
        }
        debug!(duration = self.frightened_timer, "Power pellet eaten");
        self.emit(GameEvent::Mode {
            mode: GhostMode::Frightened,
        });
    }

    fn handle_ghost_eaten(&mut self, index: usize) {
        let points = scoring::ghost_combo_value(self.ghost_combo as usize);
        self.ghost_combo += 1;
        self.ghosts_eaten_during_frightened += 1;
        self.score = self.score.saturating_add(points);

        let ghost = &mut self.ghosts[index];
        ghost.respawn();
        let name = ghost.name().to_string();
        if self.ghost_ai_mode == AiMode::Social {
            ghost.adjust_affinity(ai::AFFINITY_EATEN);
            ghost.set_mood(Some(Mood::Betrayed), timing::BETRAYED_MOOD_DURATION);
        }

        debug!(ghost = %name, combo = self.ghost_combo, points, "Ghost eaten");
        self.emit(GameEvent::GhostEaten {
            ghost: name,
            combo: self.ghost_combo,
            score: points,
        });
        self.emit_score();
        self.broadcast_mood_changes();
        self.update_high_score();
    }

    fn handle_life_loss(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        debug!(lives = self.lives, "Life lost");
        self.emit(GameEvent::Lives { lives: self.lives });

        if self.lives == 0 {
            self.transition(GameState::GameOver);
            info!(score = self.score, level = self.level, "Game over");
            self.emit(GameEvent::GameOver {
                score: self.score,
                level: self.level,
            });
            return;
        }

        // Ready is only reachable from playing.
        if self.machine.state() == GameState::Frightened {
            self.end_frightened();
        }
        self.reset_actors();
        self.transition(GameState::Ready);
    }

    fn advance_level(&mut self) {
        self.level += 1;
        let previous = self.maze().name().to_string();
        self.mazes.advance();

        self.ghosts = self.theme.spawn_ghosts();
        self.configure_ghosts();
        self.fruit = Self::spawn_fruit(self.mazes.current());

        info!(level = self.level, maze = self.maze().name(), previous = %previous, "Level complete");
        self.emit_level(Some(previous));
        self.reset_level_state();

        if self.transition(GameState::Memory) {
            self.memory_active = true;
            self.memory_timer = timing::MEMORY_REVEAL_DURATION;
            let panel = memory_panel(self.level);
            self.emit(GameEvent::Memory {
                title: panel.title,
                caption: panel.caption,
                level: self.level,
            });
        }
    }

    /// Repopulates the maze and clears every per-level counter.
    fn reset_level_state(&mut self) {
        self.mazes.current_mut().reset();
        self.pellets_at_start = self.maze().pellets_remaining();
        self.fruit = Self::spawn_fruit(self.mazes.current());
        self.fruit_armed = [true, true];
        self.frightened_timer = 0.0;
        self.mode_timer = timing::MODE_SWITCH_INTERVAL;
        self.chase_mode = false;
        self.cruise_control = false;
        self.ghosts_eaten_during_frightened = 0;
        self.emit_mode();
        self.emit(GameEvent::Fruit {
            active: false,
            score: None,
        });
        self.reset_actors();
    }

    /// Puts every actor back on its spawn tile.
    fn reset_actors(&mut self) {
        self.player.reset();
        let multiplier = self.difficulty_multiplier();
        let mode = self.phase_mode();
        for ghost in &mut self.ghosts {
            ghost.respawn();
            ghost.set_mode(mode);
            ghost.apply_difficulty(multiplier);
            ghost.set_ai_mode(self.ghost_ai_mode);
        }
        self.ghost_combo = 0;
    }

    fn configure_ghosts(&mut self) {
        for index in 0..self.ghosts.len() {
            self.ghosts[index].set_ai_mode(self.ghost_ai_mode);
            self.ghosts[index].take_mood_change();
            self.broadcast_mood(index);
        }
    }

    fn spawn_fruit(maze: &Maze) -> BonusFruit {
        BonusFruit::new(maze.fruit_tiles().first().copied().unwrap_or(FRUIT_FALLBACK_TILE))
    }

    /// Buffers the player's next heading; `None` clears the buffered turn.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.player.set_direction(direction);
    }

    /// Pauses or resumes. Returns whether the state changed.
    pub fn toggle_pause(&mut self) -> bool {
        match self.machine.state() {
            GameState::Paused => self.transition(GameState::Playing),
            GameState::GameOver => false,
            _ => self.transition(GameState::Paused),
        }
    }

    /// Starts over from level one on the first maze, keeping the high score and settings.
    pub fn reset_game(&mut self) {
        self.score = 0;
        self.lives = mechanics::STARTING_LIVES;
        self.level = 1;
        self.ghost_combo = 0;
        self.ghosts_eaten_during_frightened = 0;
        self.memory_active = false;
        self.memory_timer = 0.0;
        self.machine.reset(GameState::Ready);

        self.mazes.restart();
        self.player = Player::new(&self.theme.player);
        self.ghosts = self.theme.spawn_ghosts();
        self.configure_ghosts();
        self.fruit = Self::spawn_fruit(self.mazes.current());

        info!("Game reset");
        self.emit(GameEvent::State {
            state: GameState::Ready,
        });
        self.emit_score();
        self.emit(GameEvent::Lives { lives: self.lives });
        self.emit_level(None);
        self.reset_level_state();
        self.emit(GameEvent::PowerUps {
            enabled: self.power_ups_enabled,
        });
        self.emit(GameEvent::GhostMode {
            mode: self.ghost_ai_mode,
        });
    }

    /// Ends the memory interstitial early. Returns `false` if none is showing.
    pub fn complete_memory(&mut self) -> bool {
        if !self.memory_active {
            return false;
        }
        self.memory_active = false;
        self.memory_timer = 0.0;
        self.transition(GameState::Ready);
        self.emit(GameEvent::MemoryEnd);
        true
    }

    pub fn set_power_ups_enabled(&mut self, enabled: bool) {
        self.power_ups_enabled = enabled;
        self.emit(GameEvent::PowerUps { enabled });
    }

    pub fn set_ghost_ai_mode(&mut self, mode: AiMode) {
        self.ghost_ai_mode = mode;
        self.configure_ghosts();
        self.emit(GameEvent::GhostMode { mode });
    }

    /// Swaps the theme, rebuilding the actors and restarting the current level.
    pub fn set_theme(&mut self, theme: ThemeConfig) {
        self.theme = theme;
        self.player = Player::new(&self.theme.player);
        self.ghosts = self.theme.spawn_ghosts();
        self.configure_ghosts();
        self.reset_level_state();
        debug!(theme = %self.theme.id, "Theme applied");
        self.emit(GameEvent::Theme {
            id: self.theme.id.clone(),
        });
    }

    /// Moves the machine and announces the new state if it actually changed.
    fn transition(&mut self, target: GameState) -> bool {
        let previous = self.machine.state();
        if !self.machine.transition(target) {
            return false;
        }
        if previous != target {
            self.emit(GameEvent::State { state: target });
        }
        true
    }

    fn update_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
            self.emit(GameEvent::HighScore {
                high_score: self.high_score,
            });
        }
    }

    fn broadcast_mood(&mut self, index: usize) {
        let ghost = &self.ghosts[index];
        let event = GameEvent::GhostMood {
            ghost: ghost.name().to_string(),
            mood: ghost.mood(),
            affinity: ghost.affinity(),
            trait_label: ghost.personality().trait_label,
        };
        self.emit(event);
    }

    fn broadcast_mood_changes(&mut self) {
        for index in 0..self.ghosts.len() {
            if self.ghosts[index].take_mood_change() {
                self.broadcast_mood(index);
            }
        }
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.emit(event);
    }

    fn emit_score(&mut self) {
        self.emit(GameEvent::Score {
            score: self.score,
            high_score: self.high_score.max(self.score),
        });
    }

    fn emit_level(&mut self, previous: Option<String>) {
        self.emit(GameEvent::Level {
            level: self.level,
            maze: self.maze().name().to_string(),
            previous,
        });
    }

    fn emit_mode(&mut self) {
        let mode = self.phase_mode();
        self.emit(GameEvent::Mode { mode });
    }

    /// Scatter or chase, ignoring any frightened window.
    fn phase_mode(&self) -> GhostMode {
        if self.chase_mode {
            GhostMode::Chase
        } else {
            GhostMode::Scatter
        }
    }

    /// Ghost speed scaling for the current level.
    pub fn difficulty_multiplier(&self) -> f32 {
        1.0 + (self.level as f32 - 1.0) * mechanics::DIFFICULTY_STEP
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.machine.state(),
            score: self.score,
            lives: self.lives,
            level: self.level,
            frightened_timer: self.frightened_timer,
            mode_timer: self.mode_timer,
            chase_mode: self.chase_mode,
            ghost_combo: self.ghost_combo,
            fruit_visible: self.fruit.is_visible(),
            pellets_remaining: self.maze().pellets_remaining(),
        }
    }

    pub fn state(&self) -> GameState {
        self.machine.state()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn ghost_combo(&self) -> u32 {
        self.ghost_combo
    }

    pub fn is_chase_mode(&self) -> bool {
        self.chase_mode
    }

    pub fn frightened_timer(&self) -> f32 {
        self.frightened_timer
    }

    pub fn power_ups_enabled(&self) -> bool {
        self.power_ups_enabled
    }

    pub fn ghost_ai_mode(&self) -> AiMode {
        self.ghost_ai_mode
    }

    pub fn is_cruise_control(&self) -> bool {
        self.cruise_control
    }

    pub fn memory_timer(&self) -> f32 {
        self.memory_timer
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn maze(&self) -> &Maze {
        self.mazes.current()
    }

    pub fn maze_mut(&mut self) -> &mut Maze {
        self.mazes.current_mut()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> &mut [Ghost] {
        &mut self.ghosts
    }

    pub fn fruit(&self) -> &BonusFruit {
        &self.fruit
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }
}
