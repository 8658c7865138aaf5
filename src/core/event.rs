//! Outbound game events.
//!
//! The engine never draws anything. Every visible change is announced as a
//! `GameEvent`, and the presentation layer renders from those. Events
//! serialize as internally tagged JSON:
//!
//! ```
//! use math_grid::core::{GameEvent, PlayerId};
//!
//! let json = serde_json::to_string(&GameEvent::TurnAdvanced { next_player: PlayerId::new(1) }).unwrap();
//! assert_eq!(json, r#"{"type":"turn_advanced","next_player":1}"#);
//! ```

use serde::{Deserialize, Serialize};

use super::grid::{CellPos, Verdict};
use super::player::PlayerId;
use super::question::Operator;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A fresh grid was drawn. Values are listed row by row.
    GridInitialized { values: Vec<Vec<i32>> },

    /// A cell was selected and its value shown.
    CellRevealed { row: usize, col: usize, value: i32 },

    /// Both cells are picked and the player must answer.
    QuestionPosed {
        operand_a: i32,
        operand_b: i32,
        operator: Operator,
        options: Vec<i32>,
        seconds_left: u32,
    },

    /// One second passed while a question is open.
    TimerTick { seconds_left: u32 },

    /// The current question was answered or timed out.
    AnswerResolved {
        player: PlayerId,
        correct: bool,
        cells: [CellPos; 2],
        scores: Vec<u32>,
    },

    /// The next player is up.
    TurnAdvanced { next_player: PlayerId },

    /// Every player has had a turn.
    GameOver { scores: Vec<u32> },
}

impl GameEvent {
    /// Verdict of an `AnswerResolved` event.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            GameEvent::AnswerResolved { correct, .. } => Some(Verdict::from_correct(*correct)),
            _ => None,
        }
    }

    /// Whether this event ends the round.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self, GameEvent::GameOver { .. })
    }
}
