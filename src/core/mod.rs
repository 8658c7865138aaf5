//! Core game types: players, RNG, configuration, grid, questions, events.
//!
//! Everything here is independent of the turn state machine; the engine in
//! [`crate::engine`] composes these pieces.

pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod player;
pub mod question;
pub mod rng;

pub use config::{GameConfig, OptionBounds};
pub use error::{ConfigError, GameError, Result};
pub use event::GameEvent;
pub use grid::{Cell, CellPos, CellState, Grid, Verdict};
pub use player::{PlayerId, PlayerMap};
pub use question::{generate_options, Operator, Question};
pub use rng::GameRng;
