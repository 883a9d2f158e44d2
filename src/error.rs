//! Centralized error types for the simulation.
//!
//! The simulation step itself never fails; errors only arise while building
//! mazes from layout data or reading persisted settings.

/// Main error type for the crate.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Error type for maze layout parsing.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown character in layout: {character:?} at ({col}, {row})")]
    UnknownCharacter { character: char, col: usize, row: usize },

    #[error("Row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Layout has no rows")]
    EmptyLayout,
}

/// Errors related to maze sets.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("No maze variants were provided")]
    NoVariants,

    #[error("Maze variant {name:?} is {found:?}, expected {expected:?}")]
    SizeMismatch {
        name: String,
        expected: (usize, usize),
        found: (usize, usize),
    },
}

/// Errors raised while reading persisted settings.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown ghost AI mode: {0:?}")]
    UnknownAiMode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
