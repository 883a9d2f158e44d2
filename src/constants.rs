//! This module contains all the constants used in the simulation.

use std::time::Duration;

use glam::IVec2;

/// The fixed step used by the headless driver.
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels.
pub const TILE_SIZE: f32 = 20.0;

/// Half-width of the window around a tile center in which turns are committed, in pixels.
pub const CENTER_TOLERANCE: f32 = 0.45;

/// Movement speeds and difficulty scaling.
pub mod mechanics {
    /// Pac-Man's base speed, in pixels per second.
    pub const PLAYER_SPEED: f32 = 85.0;
    /// A ghost's base speed before difficulty and mood scaling, in pixels per second.
    pub const GHOST_SPEED: f32 = 80.0;
    /// The fixed speed of any frightened ghost, in pixels per second.
    pub const FRIGHTENED_SPEED: f32 = 60.0;
    /// Ghost speed gained per level past the first (multiplicative).
    pub const DIFFICULTY_STEP: f32 = 0.08;
    /// Extra speed granted to the aggressive ghost once the maze is nearly cleared.
    pub const CRUISE_CONTROL_BONUS: f32 = 30.0;
    /// Cruise control engages once fewer than this many pellets remain.
    pub const CRUISE_CONTROL_THRESHOLD: usize = 20;
    /// Player speed bonus per ghost eaten in the current frightened window.
    pub const COMBO_SPEED_BONUS: f32 = 0.05;
    /// Lives at the start of a game.
    pub const STARTING_LIVES: u32 = 3;
}

/// Timer lengths, in milliseconds.
pub mod timing {
    pub const FRIGHTENED_DURATION: f32 = 6000.0;
    pub const MODE_SWITCH_INTERVAL: f32 = 7000.0;
    /// The scatter/chase interval never drops below this.
    pub const MIN_MODE_SWITCH_INTERVAL: f32 = 3000.0;
    /// The scatter/chase interval shrinks by this much per level.
    pub const MODE_SWITCH_LEVEL_STEP: f32 = 300.0;
    pub const FRUIT_DURATION: f32 = 9000.0;
    pub const MEMORY_REVEAL_DURATION: f32 = 4500.0;
    pub const FRIENDLY_MOOD_DURATION: f32 = 5000.0;
    pub const BETRAYED_MOOD_DURATION: f32 = 6000.0;
    pub const TRICKED_MOOD_DURATION: f32 = 3500.0;
    /// Trail samples lose this fraction of their life per millisecond (inverse).
    pub const TRAIL_DECAY: f32 = 400.0;
}

/// Point values.
pub mod scoring {
    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    pub const FRUIT: u32 = 100;
    /// Escalating ghost values within one frightened window. The last entry repeats.
    pub const GHOST_COMBO: [u32; 4] = [200, 400, 800, 1600];

    /// The score for the `index`-th ghost (zero based) eaten in one frightened window.
    pub fn ghost_combo_value(index: usize) -> u32 {
        GHOST_COMBO[index.min(GHOST_COMBO.len() - 1)]
    }
}

/// Collision radii, in pixels.
pub mod collider {
    use super::TILE_SIZE;

    /// Ghosts and fruit touch the player within this distance.
    pub const CONTACT_RADIUS: f32 = TILE_SIZE * 0.6;
}

/// Ghost AI tuning.
pub mod ai {
    /// Distance past which the shy ghost chases instead of retreating, in tiles.
    pub const SHY_DISTANCE_TILES: f32 = 8.0;
    /// Tiles ahead of the player targeted by the ambusher.
    pub const AMBUSH_LOOKAHEAD: i32 = 4;
    /// Tiles ahead of the player used as the flanker's pivot.
    pub const FLANK_LOOKAHEAD: i32 = 2;
    pub const AFFINITY_LIMIT: f32 = 5.0;
    pub const AFFINITY_PELLET: f32 = 0.1;
    pub const AFFINITY_POWER_PELLET: f32 = 0.2;
    pub const AFFINITY_SPARED: f32 = 1.0;
    pub const AFFINITY_EATEN: f32 = -2.0;
    pub const AFFINITY_PARTIAL: f32 = -0.5;
}

/// Length of the player's trail ring.
pub const PLAYER_TRAIL_LENGTH: usize = 12;

/// Pac-Man's spawn tile unless the theme overrides it.
pub const PLAYER_SPAWN: IVec2 = IVec2::new(13, 23);
/// Ghost spawn tile unless the theme overrides it.
pub const GHOST_SPAWN: IVec2 = IVec2::new(13, 11);
/// Scatter corner used when a ghost config does not name one.
pub const DEFAULT_SCATTER_TARGET: IVec2 = IVec2::new(1, 1);
/// Fruit tile used when the maze marks none.
pub const FRUIT_FALLBACK_TILE: IVec2 = IVec2::new(13, 17);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_time() {
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_ghost_combo_saturates() {
        assert_eq!(scoring::ghost_combo_value(0), 200);
        assert_eq!(scoring::ghost_combo_value(3), 1600);
        assert_eq!(scoring::ghost_combo_value(4), 1600);
        assert_eq!(scoring::ghost_combo_value(usize::MAX), 1600);
    }

    #[test]
    fn test_contact_radius() {
        assert_eq!(collider::CONTACT_RADIUS, 12.0);
    }

    #[test]
    fn test_speed_ordering() {
        assert!(mechanics::FRIGHTENED_SPEED < mechanics::GHOST_SPEED);
        assert!(mechanics::GHOST_SPEED < mechanics::PLAYER_SPEED);
    }
}
