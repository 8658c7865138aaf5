//! Text rendering of engine state and events.
//!
//! Pure formatting: nothing here mutates the engine. Players are shown
//! 1-based, rows and columns 0-based so they match the commands typed back.

use std::fmt::Write;

use crate::core::{CellState, GameEvent, Grid, PlayerId};
use crate::engine::{GameEngine, GamePhase, GameResult};

/// "Scores: Player 1: 10 | Player 2: 0 | Player 3: 0"
#[must_use]
pub fn score_line(scores: &[u32]) -> String {
    format!("Scores: {}", score_list(scores))
}

fn score_list(scores: &[u32]) -> String {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| format!("{}: {}", PlayerId::new(i as u8), score))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Prompt for whoever is to act.
#[must_use]
pub fn status_line(engine: &GameEngine) -> String {
    let player = engine.current_player();
    match engine.phase() {
        GamePhase::AwaitingFirstSelection => format!("{player}: select a cell"),
        GamePhase::AwaitingSecondSelection => format!("{player}: select another cell"),
        GamePhase::AwaitingAnswer => match (engine.question(), engine.seconds_left()) {
            (Some(question), Some(seconds)) => format!("{player}: find: {question} = ? ({seconds}s)"),
            (Some(question), None) => format!("{player}: find: {question} = ?"),
            _ => format!("{player}: answer the question"),
        },
        GamePhase::RoundOver => final_line(engine),
    }
}

fn final_line(engine: &GameEngine) -> String {
    let standing = match engine.result() {
        Some(GameResult::Winner(player)) => format!(" {player} wins."),
        Some(GameResult::Winners(players)) => {
            let names: Vec<_> = players.iter().map(ToString::to_string).collect();
            format!(" Tie between {}.", names.join(", "))
        }
        Some(GameResult::Draw) | None => String::new(),
    };
    format!("Game over! Final scores: {}.{}", score_list(&engine.scores()), standing)
}

/// "[1] 42  [2] 38  [3] 45  [4] 40"
#[must_use]
pub fn options_line(options: &[i32]) -> String {
    options
        .iter()
        .enumerate()
        .map(|(i, value)| format!("[{}] {}", i + 1, value))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Draw the grid with hidden cells as `?`.
#[must_use]
pub fn render_board(grid: &Grid) -> String {
    let mut out = String::from("    ");
    for col in 0..grid.cols() {
        let _ = write!(out, "{col:>4}");
    }
    out.push('\n');

    for (pos, cell) in grid.iter() {
        if pos.col == 0 {
            let _ = write!(out, "{:>3} ", pos.row);
        }
        let label = match cell.state {
            CellState::Hidden => "?".to_string(),
            CellState::Revealed => cell.value.to_string(),
            CellState::Consumed(verdict) if verdict.is_correct() => format!("{}+", cell.value),
            CellState::Consumed(_) => format!("{}x", cell.value),
        };
        let _ = write!(out, "{label:>4}");
        if pos.col + 1 == grid.cols() {
            out.push('\n');
        }
    }
    out
}

/// Lines to show for one event. Called after the command that produced the
/// event has been applied, so `engine` already reflects it.
#[must_use]
pub fn describe_event(engine: &GameEngine, event: &GameEvent) -> Vec<String> {
    match event {
        GameEvent::GridInitialized { .. } => vec![
            render_board(engine.grid()),
            status_line(engine),
        ],
        GameEvent::CellRevealed { row, col, value } => {
            vec![format!("Cell ({row}, {col}) is {value}")]
        }
        GameEvent::QuestionPosed {
            operand_a,
            operand_b,
            operator,
            options,
            seconds_left,
        } => vec![
            format!("Find: {operand_a} {operator} {operand_b} = ? ({seconds_left}s)"),
            options_line(options),
        ],
        GameEvent::TimerTick { seconds_left } if *seconds_left <= 5 => {
            vec![format!("{seconds_left}s left")]
        }
        GameEvent::TimerTick { .. } => Vec::new(),
        GameEvent::AnswerResolved {
            player, correct, scores, ..
        } => {
            let verdict = if *correct { "correct!" } else { "incorrect!" };
            let mut lines = vec![format!("{player}: {verdict}")];
            if let Some(resolution) = engine.last_resolution() {
                if resolution.timed_out() {
                    lines[0] = format!("{player}: time is up!");
                }
                if !correct {
                    lines.push(format!(
                        "{} = {}",
                        resolution.question, resolution.question.correct_result
                    ));
                }
            }
            lines.push(score_line(scores));
            lines
        }
        GameEvent::TurnAdvanced { .. } => vec![
            render_board(engine.grid()),
            status_line(engine),
        ],
        GameEvent::GameOver { .. } => vec![final_line(engine)],
    }
}
