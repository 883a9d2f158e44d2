//! Ghost pursuit: target tile selection and the per-center direction choice.

use glam::{IVec2, Vec2};
use rand::seq::IndexedRandom;
use rand::Rng;
use smallvec::SmallVec;
use tracing::trace;

use crate::constants::{ai, TILE_SIZE};
use crate::entity::ghost::{AiMode, Ghost, GhostMode, Mood, Pursuit};
use crate::entity::motion::Motion;
use crate::entity::player::Player;
use crate::entity::Actor;
use crate::map::direction::Direction;
use crate::map::Maze;

/// What a ghost needs to know about the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub tile: IVec2,
    pub position: Vec2,
    /// The current heading, or the facing while stopped.
    pub heading: Direction,
}

impl From<&Player> for PlayerView {
    fn from(player: &Player) -> Self {
        PlayerView {
            tile: player.tile(),
            position: player.position(),
            heading: player.heading(),
        }
    }
}

/// What a ghost needs to know about another ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostView {
    pub tile: IVec2,
    pub scatter_target: IVec2,
    pub pursuit: Pursuit,
}

impl From<&Ghost> for GhostView {
    fn from(ghost: &Ghost) -> Self {
        GhostView {
            tile: ghost.tile(),
            scatter_target: ghost.scatter_target(),
            pursuit: ghost.pursuit(),
        }
    }
}

/// A snapshot of the world taken just before one ghost moves.
#[derive(Debug, Clone)]
pub struct PursuitContext {
    pub player: PlayerView,
    /// Every ghost in play, in roster order.
    pub ghosts: SmallVec<[GhostView; 4]>,
    /// The roster slot of the ghost this context was built for.
    pub own_index: Option<usize>,
    /// The largest valid tile coordinate on each axis.
    pub bounds: IVec2,
}

impl PursuitContext {
    pub fn new(player: &Player, ghosts: &[Ghost], own_index: Option<usize>, maze: &Maze) -> Self {
        PursuitContext {
            player: PlayerView::from(player),
            ghosts: ghosts.iter().map(GhostView::from).collect(),
            own_index,
            bounds: IVec2::new(maze.cols() as i32 - 1, maze.rows() as i32 - 1),
        }
    }

    fn clamp(&self, tile: IVec2) -> IVec2 {
        tile.clamp(IVec2::ZERO, self.bounds)
    }

    /// The tile `tiles` steps ahead of the player, clamped to the grid.
    fn ahead_of_player(&self, tiles: i32) -> IVec2 {
        self.clamp(self.player.tile + self.player.heading.as_ivec2() * tiles)
    }

    /// The ghost the flanker pivots around: the first aggressive one, else the first in the roster.
    fn aggressor(&self) -> Option<&GhostView> {
        self.ghosts
            .iter()
            .find(|ghost| ghost.pursuit == Pursuit::Aggressive)
            .or_else(|| self.ghosts.first())
    }

    fn other_scatter_targets(&self) -> SmallVec<[IVec2; 4]> {
        self.ghosts
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != self.own_index)
            .map(|(_, ghost)| ghost.scatter_target)
            .collect()
    }
}

/// The parts of a ghost's state that steer it. Fixed for the duration of one move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brain {
    pub mode: GhostMode,
    pub frightened: bool,
    pub ai_mode: AiMode,
    pub mood: Mood,
    pub pursuit: Pursuit,
    pub scatter_target: IVec2,
}

/// The tile a ghost at `motion` is heading for.
pub fn target_tile<R: Rng>(brain: &Brain, motion: &Motion, ctx: &PursuitContext, rng: &mut R) -> IVec2 {
    if brain.ai_mode == AiMode::Social {
        match brain.mood {
            Mood::Friendly => return brain.scatter_target,
            Mood::Betrayed => return ctx.player.tile,
            Mood::Tricked => {
                return ctx
                    .other_scatter_targets()
                    .choose(rng)
                    .copied()
                    .unwrap_or(brain.scatter_target);
            }
            Mood::Curious => return pursuit_target(brain, motion, ctx),
            Mood::Anxious | Mood::Wary => return brain.scatter_target,
        }
    }

    if brain.mode == GhostMode::Scatter {
        return brain.scatter_target;
    }
    if brain.mode == GhostMode::Frightened || brain.frightened {
        return motion.tile();
    }
    pursuit_target(brain, motion, ctx)
}

/// The chase target for each pursuit style.
pub fn pursuit_target(brain: &Brain, motion: &Motion, ctx: &PursuitContext) -> IVec2 {
    match brain.pursuit {
        Pursuit::Aggressive => ctx.player.tile,
        Pursuit::Ambush => ctx.ahead_of_player(ai::AMBUSH_LOOKAHEAD),
        Pursuit::Flanking => {
            let ahead = ctx.ahead_of_player(ai::FLANK_LOOKAHEAD);
            let pivot = ctx.aggressor().map(|ghost| ghost.tile).unwrap_or(motion.tile());
            ctx.clamp(ahead + (ahead - pivot))
        }
        Pursuit::Shy => {
            if motion.position.distance(ctx.player.position) > TILE_SIZE * ai::SHY_DISTANCE_TILES {
                ctx.player.tile
            } else {
                brain.scatter_target
            }
        }
    }
}

/// Picks the option whose next tile lies closest to `target`. Earlier options win ties.
pub fn choose_direction(from: IVec2, options: &[Direction], target: IVec2) -> Option<Direction> {
    let target = target.as_vec2();
    options.iter().copied().min_by(|a, b| {
        let a_distance = (from + a.as_ivec2()).as_vec2().distance(target);
        let b_distance = (from + b.as_ivec2()).as_vec2().distance(target);
        a_distance.total_cmp(&b_distance)
    })
}

/// The legal headings from the motion's tile, in preference order, excluding a reversal.
pub fn open_options(motion: &Motion, maze: &Maze) -> SmallVec<[Direction; 4]> {
    let reverse = motion.direction.map(Direction::opposite);
    Direction::GHOST_PREFERENCE
        .into_iter()
        .filter(|&direction| Some(direction) != reverse && motion.can_move(direction, maze))
        .collect()
}

/// Decides a ghost's heading at a tile center.
///
/// A reversal only happens when nothing else is open. Frightened ghosts wander at
/// random; everyone else closes in on their target tile.
pub fn steer<R: Rng>(brain: &Brain, motion: &mut Motion, maze: &Maze, ctx: &PursuitContext, rng: &mut R) {
    let options = open_options(motion, maze);

    if options.is_empty() {
        let reverse = motion.direction.map(Direction::opposite);
        trace!(tile = ?motion.tile(), direction = ?reverse, "Ghost forced to reverse direction");
        motion.direction = reverse;
        motion.next_direction = reverse;
        return;
    }

    let choice = if brain.frightened {
        options.choose(rng).copied()
    } else {
        let target = target_tile(brain, motion, ctx, rng);
        choose_direction(motion.tile(), &options, target)
    };

    motion.direction = choice;
    motion.next_direction = choice;
}
