//! This module defines the maze grid and provides functions for interacting with it.

pub mod direction;
pub mod layouts;
pub mod maze;
pub mod parser;

pub use maze::{Maze, MazeSet, PelletKind};
