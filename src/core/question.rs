//! Arithmetic questions and their answer options.

use serde::{Deserialize, Serialize};

use super::config::{GameConfig, OptionBounds};
use super::error::{GameError, Result};
use super::rng::GameRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
}

impl Operator {
    /// Pick `+` or `-` with equal probability.
    pub fn random(rng: &mut GameRng) -> Self {
        if rng.gen_bool(0.5) {
            Self::Add
        } else {
            Self::Subtract
        }
    }

    /// Apply the operator. Subtraction is not clamped, so results may be negative.
    #[must_use]
    pub const fn apply(self, a: i32, b: i32) -> i32 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Question posed on two revealed values, in selection order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub operand_a: i32,
    pub operand_b: i32,
    pub operator: Operator,
    pub correct_result: i32,
}

impl Question {
    #[must_use]
    pub const fn new(operand_a: i32, operand_b: i32, operator: Operator) -> Self {
        Self {
            operand_a,
            operand_b,
            operator,
            correct_result: operator.apply(operand_a, operand_b),
        }
    }

    /// A question on `a` and `b` with a random operator.
    pub fn random(operand_a: i32, operand_b: i32, rng: &mut GameRng) -> Self {
        Self::new(operand_a, operand_b, Operator::random(rng))
    }

    #[must_use]
    pub fn is_correct(&self, answer: i32) -> bool {
        answer == self.correct_result
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.operand_a, self.operator, self.operand_b)
    }
}

/// Build the shuffled answer options for `correct`.
///
/// Wrong answers are `correct + d` for distinct non-zero offsets `d` within
/// `wrong_answer_spread`, filtered by the configured `OptionBounds`. They are
/// sampled from the full candidate pool, so generation never retries and
/// fails up front when the pool is too small.
pub fn generate_options(correct: i32, config: &GameConfig, rng: &mut GameRng) -> Result<Vec<i32>> {
    let needed = config.wrong_answer_count();
    let spread = config.wrong_answer_spread as i32;
    let in_value_range = |v: i32| (config.min_value..=config.max_value).contains(&v);

    let bounded = match config.option_bounds {
        OptionBounds::Strict => true,
        OptionBounds::Adaptive => in_value_range(correct),
    };

    let candidates: Vec<i32> = (-spread..=spread)
        .filter(|&d| d != 0)
        .map(|d| correct + d)
        .filter(|&v| !bounded || in_value_range(v))
        .collect();

    if candidates.len() < needed {
        return Err(GameError::OptionGeneration {
            correct,
            available: candidates.len(),
            needed,
        });
    }

    let mut options = rng.sample(&candidates, needed);
    options.push(correct);
    rng.shuffle(&mut options);
    Ok(options)
}
