use thiserror::Error;

/// Failures the engine reports to its caller.
///
/// Illegal player input is not an error: it is ignored and reported
/// through the command outcome instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot build {needed} wrong answers around {correct}: only {available} candidates in range")]
    OptionGeneration {
        correct: i32,
        available: usize,
        needed: usize,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("grid needs at least two cells to pose a question")]
    GridTooSmall,
    #[error("value range is empty: min {min} > max {max}")]
    EmptyValueRange { min: i32, max: i32 },
    #[error("value range {min}..={max} exceeds the limit of ±{limit}")]
    ValueOutOfRange { min: i32, max: i32, limit: i32 },
    #[error("grid value {value} exceeds the limit of ±{limit}")]
    GridValueOutOfRange { value: i32, limit: i32 },
    #[error("player count must be between 1 and 255, got {0}")]
    PlayerCount(usize),
    #[error("timer must allow at least one second")]
    ZeroTimer,
    #[error("need at least two answer options, got {0}")]
    OptionCount(usize),
    #[error("a spread of {spread} cannot produce {needed} distinct wrong answers")]
    SpreadTooSmall { spread: u32, needed: usize },
    #[error("a spread of {spread} exceeds the maximum of {max}")]
    SpreadTooLarge { spread: u32, max: u32 },
    #[error("invalid config file: {0}")]
    Parse(String),
    #[error("cannot read config file: {0}")]
    Io(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
