//! Game configuration.
//!
//! `GameConfig::default()` is the classic game: an 8×8 grid of values in
//! 10..=99, three players, a 15 second timer, 10 points per correct answer
//! and four answer options drawn within ±10 of the result.
//!
//! Configurations can be built in code with the `with_*` methods or read
//! from TOML, where any missing key keeps its default:
//!
//! ```
//! use math_grid::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str("timer_seconds = 30").unwrap();
//! assert_eq!(config.timer_seconds, 30);
//! assert_eq!(config.rows, 8);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// How wrong answers are kept near the grid's value range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionBounds {
    /// Wrong answers stay in the grid's value range while the correct result
    /// does; otherwise they follow the result wherever it lies.
    #[default]
    Adaptive,
    /// Wrong answers always stay in the grid's value range. Results far
    /// outside it fail with `GameError::OptionGeneration`.
    Strict,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Grid height.
    pub rows: usize,

    /// Grid width.
    pub cols: usize,

    /// Smallest value a cell can hold.
    pub min_value: i32,

    /// Largest value a cell can hold.
    pub max_value: i32,

    /// Number of players taking turns (1-255).
    pub player_count: usize,

    /// Seconds on the clock when a question is posed.
    pub timer_seconds: u32,

    /// Points awarded for a correct answer.
    pub points_per_correct: u32,

    /// Answer options shown per question, including the correct one.
    pub option_count: usize,

    /// Maximum distance between a wrong answer and the correct result.
    pub wrong_answer_spread: u32,

    /// Range policy for wrong answers.
    pub option_bounds: OptionBounds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            min_value: 10,
            max_value: 99,
            player_count: 3,
            timer_seconds: 15,
            points_per_correct: 10,
            option_count: 4,
            wrong_answer_spread: 10,
            option_bounds: OptionBounds::Adaptive,
        }
    }
}

impl GameConfig {
    /// Largest magnitude allowed for cell values. Keeps every sum,
    /// difference and wrong answer well inside `i32`.
    pub const VALUE_LIMIT: i32 = 1_000_000;

    /// Largest allowed `wrong_answer_spread`.
    pub const MAX_WRONG_ANSWER_SPREAD: u32 = 1_000;

    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Set the grid dimensions.
    #[must_use]
    pub fn with_grid_size(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    /// Set the inclusive range of cell values.
    #[must_use]
    pub fn with_value_range(mut self, min: i32, max: i32) -> Self {
        self.min_value = min;
        self.max_value = max;
        self
    }

    /// Set the number of players.
    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the answer timer.
    #[must_use]
    pub fn with_timer_seconds(mut self, seconds: u32) -> Self {
        self.timer_seconds = seconds;
        self
    }

    /// Set the points for a correct answer.
    #[must_use]
    pub fn with_points_per_correct(mut self, points: u32) -> Self {
        self.points_per_correct = points;
        self
    }

    /// Set how many options each question offers.
    #[must_use]
    pub fn with_option_count(mut self, count: usize) -> Self {
        self.option_count = count;
        self
    }

    /// Set the maximum distance of wrong answers from the result.
    #[must_use]
    pub fn with_wrong_answer_spread(mut self, spread: u32) -> Self {
        self.wrong_answer_spread = spread;
        self
    }

    /// Set the wrong-answer range policy.
    #[must_use]
    pub fn with_option_bounds(mut self, bounds: OptionBounds) -> Self {
        self.option_bounds = bounds;
        self
    }

    /// Number of cells on the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Number of wrong answers each question needs.
    #[must_use]
    pub fn wrong_answer_count(&self) -> usize {
        self.option_count.saturating_sub(1)
    }

    /// Check the configuration can produce a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        if self.cell_count() < 2 {
            return Err(ConfigError::GridTooSmall);
        }
        if self.min_value > self.max_value {
            return Err(ConfigError::EmptyValueRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.min_value < -Self::VALUE_LIMIT || self.max_value > Self::VALUE_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                min: self.min_value,
                max: self.max_value,
                limit: Self::VALUE_LIMIT,
            });
        }
        if !(1..=255).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.timer_seconds == 0 {
            return Err(ConfigError::ZeroTimer);
        }
        if self.option_count < 2 {
            return Err(ConfigError::OptionCount(self.option_count));
        }
        if self.wrong_answer_spread > Self::MAX_WRONG_ANSWER_SPREAD {
            return Err(ConfigError::SpreadTooLarge {
                spread: self.wrong_answer_spread,
                max: Self::MAX_WRONG_ANSWER_SPREAD,
            });
        }
        // Offsets -spread..=spread without zero.
        let candidates = self.wrong_answer_spread as usize * 2;
        if candidates < self.wrong_answer_count() {
            return Err(ConfigError::SpreadTooSmall {
                spread: self.wrong_answer_spread,
                needed: self.wrong_answer_count(),
            });
        }
        Ok(())
    }
}
