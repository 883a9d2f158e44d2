//! The actors that move through the maze.

use glam::{IVec2, Vec2};

pub mod fruit;
pub mod ghost;
pub mod motion;
pub mod player;
pub mod targeting;

use motion::Motion;

/// Trait defining common functionality for entities that move through the maze.
///
/// Implementors own a [`Motion`]; everything else here is derived from it.
pub trait Actor {
    /// Returns a reference to the entity's movement state.
    fn motion(&self) -> &Motion;

    /// Returns a mutable reference to the entity's movement state.
    fn motion_mut(&mut self) -> &mut Motion;

    /// The pixel position of the entity's center.
    fn position(&self) -> Vec2 {
        self.motion().position
    }

    /// The tile the entity currently occupies.
    fn tile(&self) -> IVec2 {
        self.motion().tile()
    }

    /// Pixel distance between the centers of two actors.
    fn distance_to(&self, other: &impl Actor) -> f32 {
        self.position().distance(other.position())
    }
}
