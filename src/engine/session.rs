//! Single-writer command queue around a `GameEngine`.
//!
//! Input may come from several places at once (clicks, key presses, a clock
//! thread). All of it is funnelled into one FIFO of `Command`s and applied
//! strictly one at a time, and every event a command produces reaches the
//! `EventSink` before the next command runs. A double click therefore turns
//! into two queued commands, the second of which the engine ignores.
//!
//! ```
//! use math_grid::core::{GameConfig, GameEvent};
//! use math_grid::engine::{Command, GameEngine, GameSession};
//!
//! let engine = GameEngine::new(GameConfig::default(), 42).unwrap();
//! let mut session = GameSession::new(engine);
//! let mut events: Vec<GameEvent> = Vec::new();
//!
//! session.enqueue(Command::SelectCell { row: 0, col: 0 });
//! session.enqueue(Command::SelectCell { row: 0, col: 0 });
//! session.process_pending(&mut events).unwrap();
//!
//! assert_eq!(session.engine().selection().len(), 1);
//! ```

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::game::{GameEngine, Outcome};
use crate::core::{GameError, GameEvent, Result};

/// Inbound command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Init,
    SelectCell { row: usize, col: usize },
    SubmitAnswer { value: i32 },
    Tick,
}

/// Receives events after the command that produced them has been applied.
pub trait EventSink {
    fn on_event(&mut self, engine: &GameEngine, event: &GameEvent);

    /// A command failed inside `GameSession::run` and was skipped.
    fn on_error(&mut self, _engine: &GameEngine, _error: &GameError) {}
}

/// Records events, mostly for tests.
impl EventSink for Vec<GameEvent> {
    fn on_event(&mut self, _engine: &GameEngine, event: &GameEvent) {
        self.push(event.clone());
    }
}

#[derive(Debug)]
pub struct GameSession {
    engine: GameEngine,
    pending: VecDeque<Command>,
}

impl GameSession {
    #[must_use]
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            pending: VecDeque::new(),
        }
    }

    #[must_use]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    #[must_use]
    pub fn into_engine(self) -> GameEngine {
        self.engine
    }

    /// Queue a command without applying it.
    pub fn enqueue(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Forward events the engine recorded outside a command, such as the
    /// initial grid.
    pub fn flush(&mut self, sink: &mut impl EventSink) {
        for event in self.engine.drain_events() {
            sink.on_event(&self.engine, &event);
        }
    }

    /// Apply queued commands in arrival order.
    ///
    /// Stops at the first command that fails; that command is dropped and
    /// the rest stay queued. Returns how many commands were applied.
    pub fn process_pending(&mut self, sink: &mut impl EventSink) -> Result<usize> {
        let mut applied = 0;
        while let Some(command) = self.pending.pop_front() {
            self.apply(command, sink)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Queue `command` behind anything pending and run the queue.
    /// Returns the outcome of `command` itself.
    ///
    /// If an earlier command fails, `command` stays queued behind the rest.
    pub fn dispatch(&mut self, command: Command, sink: &mut impl EventSink) -> Result<Outcome> {
        self.enqueue(command);
        while self.pending.len() > 1 {
            if let Some(earlier) = self.pending.pop_front() {
                self.apply(earlier, sink)?;
            }
        }
        self.pending.clear();
        self.apply(command, sink)
    }

    /// Apply a stream of commands until it ends or the round is over.
    ///
    /// Typically fed from a channel shared by input and clock threads.
    /// Errors are logged, reported to `sink` and the offending command
    /// skipped, so a long-running shell keeps going.
    pub fn run(&mut self, commands: impl IntoIterator<Item = Command>, sink: &mut impl EventSink) {
        self.flush(sink);
        for command in commands {
            self.enqueue(command);
            if let Err(err) = self.process_pending(sink) {
                warn!(%err, "command failed");
                sink.on_error(&self.engine, &err);
            }
            if self.engine.is_over() {
                break;
            }
        }
    }

    fn apply(&mut self, command: Command, sink: &mut impl EventSink) -> Result<Outcome> {
        let outcome = match command {
            Command::Init => self.engine.init(),
            Command::SelectCell { row, col } => self.engine.select_cell(row, col)?,
            Command::SubmitAnswer { value } => self.engine.submit_answer(value),
            Command::Tick => self.engine.tick(),
        };
        if !outcome.has_update() {
            debug!(?command, ?outcome, "command had no effect");
        }
        self.flush(sink);
        Ok(outcome)
    }
}
