//! Map parsing functionality for converting raw layouts into structured data.

use glam::IVec2;
use smallvec::SmallVec;

use crate::error::ParseError;

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// Open floor.
    Empty,
    /// A wall tile.
    Wall,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    PowerPellet,
    /// A regular pellet that also marks where bonus fruit appears.
    FruitPellet,
}

/// Represents the parsed data from a raw layout.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    /// The parsed tiles, row-major.
    pub tiles: Vec<MapTile>,
    pub cols: usize,
    pub rows: usize,
    /// Rows that wrap horizontally.
    pub tunnel_rows: SmallVec<[usize; 8]>,
    /// Fruit spawn tiles in reading order.
    pub fruit_tiles: SmallVec<[IVec2; 2]>,
}

/// Parser for converting raw layouts into structured map data.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single character into a map tile.
    ///
    /// Returns `None` for characters outside the layout alphabet.
    pub fn parse_character(c: char) -> Option<MapTile> {
        match c {
            '#' => Some(MapTile::Wall),
            '.' => Some(MapTile::Pellet),
            'o' => Some(MapTile::PowerPellet),
            'f' => Some(MapTile::FruitPellet),
            ' ' => Some(MapTile::Empty),
            _ => None,
        }
    }

    /// Whether a raw row is a tunnel row. Any double space marks one.
    pub fn is_tunnel_row(line: &str) -> bool {
        line.contains("  ")
    }

    /// Parses a raw layout into structured map data.
    ///
    /// # Errors
    ///
    /// Returns an error if the layout is empty, if rows differ in width, or if it
    /// contains characters outside `#`, `.`, `o`, `f` and space.
    pub fn parse_board(layout: &[&str]) -> Result<ParsedMap, ParseError> {
        let first = layout.first().ok_or(ParseError::EmptyLayout)?;
        let cols = first.chars().count();
        if cols == 0 {
            return Err(ParseError::EmptyLayout);
        }

        let mut tiles = Vec::with_capacity(cols * layout.len());
        let mut tunnel_rows = SmallVec::new();
        let mut fruit_tiles = SmallVec::new();

        for (row, line) in layout.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(ParseError::RaggedRow {
                    row,
                    expected: cols,
                    found: width,
                });
            }

            if Self::is_tunnel_row(line) {
                tunnel_rows.push(row);
            }

            for (col, character) in line.chars().enumerate() {
                let tile = Self::parse_character(character).ok_or(ParseError::UnknownCharacter { character, col, row })?;
                if tile == MapTile::FruitPellet {
                    fruit_tiles.push(IVec2::new(col as i32, row as i32));
                }
                tiles.push(tile);
            }
        }

        Ok(ParsedMap {
            tiles,
            cols,
            rows: layout.len(),
            tunnel_rows,
            fruit_tiles,
        })
    }
}
