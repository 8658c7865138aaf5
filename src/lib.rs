//! # math-grid
//!
//! Turn-based arithmetic game for three players on an 8×8 grid of numbers.
//!
//! On their turn a player picks two hidden cells. The engine poses a random
//! `a + b` or `a - b` question on the two values with four answer options and
//! a 15 second countdown. A correct answer scores 10 points; a wrong answer or
//! running out of time scores nothing. The round ends once every player has
//! answered one question.
//!
//! ## Architecture
//!
//! - The engine is a plain state machine. It never draws, sleeps or reads
//!   input: commands go in, [`GameEvent`]s come out.
//! - Time is an explicit `tick()` command, so tests drive the clock directly.
//! - Illegal input (wrong phase, revealed cell) is ignored, never an error.
//! - All randomness flows through a seeded [`GameRng`]; a seed replays a game.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration, grid, questions, events, errors
//! - `engine`: the turn state machine, timer and command queue
//! - `ui`: text rendering for terminal shells
//!
//! ## Example
//!
//! ```
//! use math_grid::{GameConfig, GameEngine, GamePhase};
//!
//! let mut engine = GameEngine::new(GameConfig::default(), 42).unwrap();
//! engine.select_cell(0, 0).unwrap();
//! engine.select_cell(3, 4).unwrap();
//! assert_eq!(engine.phase(), GamePhase::AwaitingAnswer);
//!
//! let answer = engine.question().unwrap().correct_result;
//! engine.submit_answer(answer);
//! assert_eq!(engine.scores(), vec![10, 0, 0]);
//! ```

pub mod core;
pub mod engine;
pub mod ui;

// Re-export commonly used types
pub use crate::core::{
    CellPos, CellState, ConfigError, GameConfig, GameError, GameEvent, GameRng, Grid, Operator,
    OptionBounds, PlayerId, Question, Verdict,
};

pub use crate::engine::{
    Command, EventSink, GameEngine, GamePhase, GameResult, GameSession, IgnoreReason, Outcome,
};
