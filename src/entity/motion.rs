use glam::{IVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::{CENTER_TOLERANCE, TILE_SIZE};
use crate::map::direction::Direction;
use crate::map::Maze;

/// Tile-grid movement shared by every moving entity.
///
/// A `Motion` keeps a continuous pixel position and a discrete heading. Turns are
/// only committed at tile centers, where the buffered `next_direction` is tried
/// first and the current heading is dropped if a wall blocks it. The maze is
/// handed in on every call so a level change never leaves a stale reference behind.
#[derive(Debug, Clone)]
pub struct Motion {
    /// The pixel position of the entity's center.
    pub position: Vec2,
    /// The heading currently being travelled, `None` while stopped.
    pub direction: Option<Direction>,
    /// The buffered heading, applied at the next tile center where it is open.
    pub next_direction: Option<Direction>,
    /// Pixels per second.
    pub speed: f32,
    spawn: IVec2,
    wrapped: bool,
}

impl Motion {
    pub fn new(spawn: IVec2, speed: f32) -> Self {
        Motion {
            position: Maze::tile_center(spawn),
            direction: None,
            next_direction: None,
            speed,
            spawn,
            wrapped: false,
        }
    }

    /// Returns to the spawn tile, stopped, with no buffered turn.
    pub fn reset(&mut self) {
        self.position = Maze::tile_center(self.spawn);
        self.direction = None;
        self.next_direction = None;
        self.wrapped = false;
    }

    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    /// Moves the entity onto the center of `tile` without changing its heading.
    pub fn place(&mut self, tile: IVec2) {
        self.position = Maze::tile_center(tile);
    }

    /// Buffers a heading to be committed at the next tile center.
    pub fn set_direction(&mut self, direction: Option<Direction>) {
        self.next_direction = direction;
    }

    /// The tile containing the entity's position.
    pub fn tile(&self) -> IVec2 {
        Maze::tile_at(self.position)
    }

    /// Whether the entity sits within the turning window of its tile's center.
    pub fn at_center(&self) -> bool {
        let offset = (self.position - Maze::tile_center(self.tile())).abs();
        offset.x < CENTER_TOLERANCE && offset.y < CENTER_TOLERANCE
    }

    /// Whether the neighboring tile in `direction` is open. Tunnel rows wrap.
    pub fn can_move(&self, direction: Direction, maze: &Maze) -> bool {
        !maze.is_wall(maze.neighbor(self.tile(), direction))
    }

    /// Returns and clears the flag set when the last move crossed a tunnel edge.
    pub fn consume_wrap_flag(&mut self) -> bool {
        std::mem::take(&mut self.wrapped)
    }

    /// Advances the entity by `delta_ms` worth of travel.
    ///
    /// Every tile center reached along the way is a decision point: `steer` runs
    /// first (ghosts pick their heading there), then the buffered heading is
    /// committed if open, the heading is dropped if blocked, and the position is
    /// snapped onto the center. Travel never overshoots a center in one step, so
    /// large deltas cannot carry an entity through a wall.
    ///
    /// Returns every tile the entity occupied during the move, starting tile first.
    pub fn advance<F>(&mut self, delta_ms: f32, maze: &Maze, mut steer: F) -> SmallVec<[IVec2; 4]>
    where
        F: FnMut(&mut Motion, &Maze),
    {
        let mut visited: SmallVec<[IVec2; 4]> = SmallVec::new();
        visited.push(self.tile());
        self.wrapped = false;

        let mut remaining = self.speed.max(0.0) * delta_ms.max(0.0) / 1000.0;
        let mut first = true;
        loop {
            // A center reached with no travel left is decided on the next move.
            if !first && remaining <= 0.0 {
                break;
            }
            first = false;

            if self.at_center() {
                self.turn_at_center(maze, &mut steer);
            }

            let Some(direction) = self.direction else {
                break;
            };
            if remaining <= 0.0 {
                break;
            }

            let gap = self.gap_to_next_center(direction);
            let step = remaining.min(gap);
            self.translate(direction, step, maze);
            remaining -= step;

            let tile = self.tile();
            if visited.last() != Some(&tile) {
                visited.push(tile);
            }

            if step < gap {
                break;
            }
        }

        visited
    }

    fn turn_at_center<F>(&mut self, maze: &Maze, steer: &mut F)
    where
        F: FnMut(&mut Motion, &Maze),
    {
        self.position = Maze::tile_center(self.tile());
        steer(self, maze);

        if let Some(next) = self.next_direction {
            if self.can_move(next, maze) {
                self.direction = Some(next);
            }
        }
        if let Some(current) = self.direction {
            if !self.can_move(current, maze) {
                self.direction = None;
            }
        }
    }

    /// Distance along `direction` to the next tile center ahead.
    fn gap_to_next_center(&self, direction: Direction) -> f32 {
        let offset = (Maze::tile_center(self.tile()) - self.position).dot(direction.as_vec2());
        if offset > 0.0 {
            offset
        } else {
            offset + TILE_SIZE
        }
    }

    fn translate(&mut self, direction: Direction, distance: f32, maze: &Maze) {
        self.position += direction.as_vec2() * distance;

        if direction.is_horizontal() && maze.is_tunnel_row(self.tile().y) {
            let width = maze.total_width();
            if self.position.x < 0.0 {
                self.position.x += width;
                self.wrapped = true;
            } else if self.position.x >= width {
                self.position.x -= width;
                self.wrapped = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: [&str; 3] = ["#######", "#.....#", "#######"];

    #[test]
    fn test_stops_against_wall() {
        let maze = Maze::from_layout("corridor", &CORRIDOR).unwrap();
        let mut motion = Motion::new(IVec2::new(1, 1), 100.0);
        motion.set_direction(Some(Direction::Right));

        motion.advance(10_000.0, &maze, |_, _| {});
        assert_eq!(motion.tile(), IVec2::new(5, 1));
        assert_eq!(motion.direction, None);
        assert!(motion.at_center());
    }

    #[test]
    fn test_cannot_start_into_wall() {
        let maze = Maze::from_layout("corridor", &CORRIDOR).unwrap();
        let mut motion = Motion::new(IVec2::new(1, 1), 100.0);
        motion.set_direction(Some(Direction::Up));

        motion.advance(100.0, &maze, |_, _| {});
        assert_eq!(motion.position, Maze::tile_center(IVec2::new(1, 1)));
        assert_eq!(motion.direction, None);
    }

    #[test]
    fn test_visited_tiles() {
        let maze = Maze::from_layout("corridor", &CORRIDOR).unwrap();
        let mut motion = Motion::new(IVec2::new(1, 1), 100.0);
        motion.set_direction(Some(Direction::Right));

        let visited = motion.advance(400.0, &maze, |_, _| {});
        assert_eq!(
            visited.as_slice(),
            &[IVec2::new(1, 1), IVec2::new(2, 1), IVec2::new(3, 1)]
        );
    }

    #[test]
    fn test_steer_runs_at_each_center() {
        let maze = Maze::from_layout("corridor", &CORRIDOR).unwrap();
        let mut motion = Motion::new(IVec2::new(1, 1), 100.0);
        motion.set_direction(Some(Direction::Right));

        let mut calls = 0;
        motion.advance(400.0, &maze, |_, _| calls += 1);
        assert_eq!(calls, 2);

        motion.advance(0.0, &maze, |_, _| calls += 1);
        assert_eq!(calls, 3);
    }
}
