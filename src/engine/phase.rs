use serde::{Deserialize, Serialize};

/// Where the engine is in the current turn.
///
/// ```text
/// AwaitingFirstSelection -> AwaitingSecondSelection -> AwaitingAnswer
///        ^                                                  |
///        +------------- next player ------------------------+
///                                                           |
///                                  RoundOver <---- all players attempted
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    AwaitingFirstSelection,
    AwaitingSecondSelection,
    AwaitingAnswer,
    RoundOver,
}

impl GamePhase {
    /// Cells can be picked in this phase.
    #[must_use]
    pub const fn accepts_selection(self) -> bool {
        matches!(self, Self::AwaitingFirstSelection | Self::AwaitingSecondSelection)
    }

    /// A question is open.
    #[must_use]
    pub const fn accepts_answer(self) -> bool {
        matches!(self, Self::AwaitingAnswer)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::RoundOver)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AwaitingFirstSelection => "awaiting first selection",
            Self::AwaitingSecondSelection => "awaiting second selection",
            Self::AwaitingAnswer => "awaiting answer",
            Self::RoundOver => "round over",
        };
        f.write_str(name)
    }
}
