//! The turn state machine and the command queue that drives it.
//!
//! - [`GameEngine`]: grid, scores, selection, question and timer
//! - [`GameSession`]: serializes commands from any number of sources
//! - [`Timer`]: countdown advanced by explicit ticks

pub mod game;
pub mod phase;
pub mod session;
pub mod timer;

pub use game::{GameEngine, GameResult, IgnoreReason, Outcome, Resolution};
pub use phase::GamePhase;
pub use session::{Command, EventSink, GameSession};
pub use timer::{Timer, TimerStatus};
