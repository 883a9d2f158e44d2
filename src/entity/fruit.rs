use glam::{IVec2, Vec2};

use crate::constants::scoring;
use crate::map::Maze;

/// A timed bonus collectible sitting on a fixed tile.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusFruit {
    tile: IVec2,
    position: Vec2,
    score: u32,
    visible: bool,
    /// Milliseconds left before the fruit disappears.
    timer: f32,
}

impl BonusFruit {
    pub fn new(tile: IVec2) -> Self {
        BonusFruit {
            tile,
            position: Maze::tile_center(tile),
            score: scoring::FRUIT,
            visible: false,
            timer: 0.0,
        }
    }

    /// Shows the fruit for `duration_ms`.
    pub fn appear(&mut self, duration_ms: f32) {
        self.position = Maze::tile_center(self.tile);
        self.visible = true;
        self.timer = duration_ms;
    }

    /// Counts down while visible. Returns `true` on the tick the fruit expires.
    pub fn update(&mut self, delta_ms: f32) -> bool {
        if !self.visible {
            return false;
        }
        self.timer -= delta_ms;
        if self.timer <= 0.0 {
            self.visible = false;
            self.timer = 0.0;
            return true;
        }
        false
    }

    pub fn despawn(&mut self) {
        self.visible = false;
        self.timer = 0.0;
    }

    pub fn tile(&self) -> IVec2 {
        self.tile
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fruit_expires() {
        let mut fruit = BonusFruit::new(IVec2::new(13, 17));
        assert!(!fruit.update(100.0));

        fruit.appear(1000.0);
        assert!(fruit.is_visible());
        assert!(!fruit.update(600.0));
        assert!(fruit.update(600.0));
        assert!(!fruit.is_visible());
        assert!(!fruit.update(600.0));
    }
}
