//! The mutable pellet store for one maze variant, and the rotating set of variants.

use std::collections::BTreeSet;

use glam::{IVec2, Vec2};
use serde::Serialize;
use smallvec::SmallVec;
use strum_macros::AsRefStr;
use tracing::{debug, trace};

use crate::constants::TILE_SIZE;
use crate::error::{GameResult, MapError, ParseError};
use crate::map::direction::Direction;
use crate::map::layouts::{MazeVariant, MAZE_VARIANTS};
use crate::map::parser::{MapTile, MapTileParser, ParsedMap};

/// What was eaten from a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PelletKind {
    Pellet,
    Power,
}

/// A single maze: static walls plus the pellets still on the board.
///
/// Tiles are addressed either by `(col, row)` or by the flat index `row * cols + col`.
/// A tile index belongs to at most one of the wall, pellet and power pellet sets.
#[derive(Debug, Clone)]
pub struct Maze {
    name: String,
    source: ParsedMap,
    walls: BTreeSet<usize>,
    pellets: BTreeSet<usize>,
    power_pellets: BTreeSet<usize>,
}

impl Maze {
    /// Builds a maze from a raw layout.
    pub fn from_layout(name: impl Into<String>, layout: &[&str]) -> Result<Maze, ParseError> {
        let source = MapTileParser::parse_board(layout)?;
        let mut maze = Maze {
            name: name.into(),
            source,
            walls: BTreeSet::new(),
            pellets: BTreeSet::new(),
            power_pellets: BTreeSet::new(),
        };
        maze.reset();
        Ok(maze)
    }

    pub fn from_variant(variant: &MazeVariant) -> Result<Maze, ParseError> {
        Self::from_layout(variant.name, variant.layout)
    }

    /// Repopulates walls and pellets from the source layout.
    pub fn reset(&mut self) {
        self.walls.clear();
        self.pellets.clear();
        self.power_pellets.clear();

        for (index, tile) in self.source.tiles.iter().enumerate() {
            match tile {
                MapTile::Wall => {
                    self.walls.insert(index);
                }
                MapTile::Pellet | MapTile::FruitPellet => {
                    self.pellets.insert(index);
                }
                MapTile::PowerPellet => {
                    self.power_pellets.insert(index);
                }
                MapTile::Empty => {}
            }
        }

        debug!(maze = %self.name, pellets = self.pellets_remaining(), "Maze populated");
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cols(&self) -> usize {
        self.source.cols
    }

    pub fn rows(&self) -> usize {
        self.source.rows
    }

    pub fn total_width(&self) -> f32 {
        self.cols() as f32 * TILE_SIZE
    }

    pub fn total_height(&self) -> f32 {
        self.rows() as f32 * TILE_SIZE
    }

    /// Whether the tile lies inside the grid.
    pub fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as usize) < self.cols() && (tile.y as usize) < self.rows()
    }

    /// The flat index of a tile, or `None` outside the grid.
    pub fn index(&self, tile: IVec2) -> Option<usize> {
        self.in_bounds(tile)
            .then(|| tile.y as usize * self.cols() + tile.x as usize)
    }

    /// The tile for a flat index.
    pub fn tile_of(&self, index: usize) -> IVec2 {
        IVec2::new((index % self.cols()) as i32, (index / self.cols()) as i32)
    }

    /// Out-of-bounds tiles are always walls.
    pub fn is_wall(&self, tile: IVec2) -> bool {
        match self.index(tile) {
            Some(index) => self.walls.contains(&index),
            None => true,
        }
    }

    pub fn is_tunnel_row(&self, row: i32) -> bool {
        row >= 0 && self.source.tunnel_rows.contains(&(row as usize))
    }

    pub fn tunnel_rows(&self) -> &[usize] {
        &self.source.tunnel_rows
    }

    /// The tile one step from `tile` in `direction`, wrapping across the
    /// horizontal edges of tunnel rows.
    pub fn neighbor(&self, tile: IVec2, direction: Direction) -> IVec2 {
        let mut next = tile + direction.as_ivec2();
        if direction.is_horizontal() && self.is_tunnel_row(next.y) {
            next.x = next.x.rem_euclid(self.cols() as i32);
        }
        next
    }

    /// Removes the pellet on a tile, reporting what was there.
    pub fn consume(&mut self, tile: IVec2) -> Option<PelletKind> {
        let index = self.index(tile)?;
        if self.pellets.remove(&index) {
            trace!(maze = %self.name, col = tile.x, row = tile.y, "Pellet consumed");
            return Some(PelletKind::Pellet);
        }
        if self.power_pellets.remove(&index) {
            trace!(maze = %self.name, col = tile.x, row = tile.y, "Power pellet consumed");
            return Some(PelletKind::Power);
        }
        None
    }

    pub fn pellets_remaining(&self) -> usize {
        self.pellets.len() + self.power_pellets.len()
    }

    pub fn has_pellet(&self, tile: IVec2) -> bool {
        self.index(tile).is_some_and(|index| self.pellets.contains(&index))
    }

    pub fn has_power_pellet(&self, tile: IVec2) -> bool {
        self.index(tile).is_some_and(|index| self.power_pellets.contains(&index))
    }

    /// Tiles still holding a regular pellet, in index order.
    pub fn pellet_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.pellets.iter().map(|&index| self.tile_of(index))
    }

    /// Tiles still holding a power pellet, in index order.
    pub fn power_pellet_tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.power_pellets.iter().map(|&index| self.tile_of(index))
    }

    pub fn fruit_tiles(&self) -> &[IVec2] {
        &self.source.fruit_tiles
    }

    /// The pixel center of a tile.
    pub fn tile_center(tile: IVec2) -> Vec2 {
        tile.as_vec2() * TILE_SIZE + Vec2::splat(TILE_SIZE / 2.0)
    }

    /// The tile containing a pixel position.
    pub fn tile_at(position: Vec2) -> IVec2 {
        (position / TILE_SIZE).floor().as_ivec2()
    }
}

/// The ordered list of maze variants and the one currently in play.
#[derive(Debug, Clone)]
pub struct MazeSet {
    /// Freshly parsed variants, never mutated.
    variants: SmallVec<[Maze; 4]>,
    index: usize,
    current: Maze,
}

impl MazeSet {
    /// Builds a set over the given variants, starting on the first.
    ///
    /// # Errors
    ///
    /// Fails when `variants` is empty, when any layout does not parse, or when
    /// the variants disagree on grid size.
    pub fn new(variants: &[MazeVariant]) -> GameResult<MazeSet> {
        if variants.is_empty() {
            return Err(MapError::NoVariants.into());
        }

        let mut parsed: SmallVec<[Maze; 4]> = SmallVec::with_capacity(variants.len());
        for variant in variants {
            let maze = Maze::from_variant(variant)?;
            if let Some(first) = parsed.first() {
                let expected = (first.cols(), first.rows());
                let found = (maze.cols(), maze.rows());
                if found != expected {
                    return Err(MapError::SizeMismatch {
                        name: variant.name.to_string(),
                        expected,
                        found,
                    }
                    .into());
                }
            }
            parsed.push(maze);
        }

        Ok(MazeSet {
            current: parsed[0].clone(),
            variants: parsed,
            index: 0,
        })
    }

    /// The built-in variants.
    pub fn builtin() -> GameResult<MazeSet> {
        Self::new(&MAZE_VARIANTS)
    }

    pub fn current(&self) -> &Maze {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Maze {
        &mut self.current
    }

    /// Index of the variant in play.
    pub fn variant_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Rotates to the next variant, wrapping after the last.
    pub fn advance(&mut self) -> &Maze {
        self.index = (self.index + 1) % self.variants.len();
        self.load();
        &self.current
    }

    /// Returns to the first variant with a fresh pellet set.
    pub fn restart(&mut self) -> &Maze {
        self.index = 0;
        self.load();
        &self.current
    }

    fn load(&mut self) {
        self.current = self.variants[self.index].clone();
    }
}
