//! Haunted arcade simulation library crate.
//!
//! A headless maze-chase simulation: a [`game::Game`] aggregate is stepped by an
//! external clock and reports everything that happens through an [`events::EventBus`].

pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod map;
pub mod memory;
pub mod replay;
pub mod settings;
pub mod theme;
