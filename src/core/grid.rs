//! The number grid.
//!
//! Values are drawn once when the grid is created and never change. Only the
//! per-cell `CellState` moves, driven by the engine:
//!
//! ```text
//! Hidden -> Revealed -> Consumed(verdict) -> Hidden
//! ```

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Position of a cell on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Outcome of an answered question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    #[must_use]
    pub const fn from_correct(correct: bool) -> Self {
        if correct {
            Self::Correct
        } else {
            Self::Incorrect
        }
    }

    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Face down and selectable.
    #[default]
    Hidden,
    /// Picked this turn, value visible.
    Revealed,
    /// Used in a resolved question.
    Consumed(Verdict),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub value: i32,
    pub state: CellState,
}

impl Cell {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self {
            value,
            state: CellState::Hidden,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.state == CellState::Hidden
    }
}

/// Row-major grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Fill a `rows × cols` grid with uniform values in `min..=max`.
    pub fn random(rows: usize, cols: usize, min: i32, max: i32, rng: &mut GameRng) -> Self {
        let cells = (0..rows * cols)
            .map(|_| Cell::new(rng.gen_range_inclusive(min, max)))
            .collect();
        Self { rows, cols, cells }
    }

    /// Build a grid from explicit rows of values. Returns `None` when the
    /// rows are empty or ragged.
    pub fn from_rows(rows: &[Vec<i32>]) -> Option<Self> {
        let cols = rows.first()?.len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let cells = rows.iter().flatten().copied().map(Cell::new).collect();
        Some(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Get a cell, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, pos: CellPos) -> Option<&Cell> {
        self.offset(pos).map(|i| &self.cells[i])
    }

    /// Value at `pos`, or `None` when out of bounds.
    #[must_use]
    pub fn value(&self, pos: CellPos) -> Option<i32> {
        self.get(pos).map(|c| c.value)
    }

    /// State at `pos`, or `None` when out of bounds.
    #[must_use]
    pub fn state(&self, pos: CellPos) -> Option<CellState> {
        self.get(pos).map(|c| c.state)
    }

    /// Set the state of an in-bounds cell. Out-of-bounds positions are ignored.
    pub(crate) fn set_state(&mut self, pos: CellPos, state: CellState) {
        if let Some(i) = self.offset(pos) {
            self.cells[i].state = state;
        }
    }

    /// Values as rows, for rendering and events.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<i32>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.value).collect())
            .collect()
    }

    /// Iterate over `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, &Cell)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (CellPos::new(i / cols, i % cols), c))
    }

    fn offset(&self, pos: CellPos) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }
}
