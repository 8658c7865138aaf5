//! Turn state machine.
//!
//! `GameEngine` owns the grid, scores, selection, open question and timer.
//! It accepts four commands (`init`, `select_cell`, `submit_answer`, `tick`)
//! and records a `GameEvent` for every visible change. Illegal commands are
//! ignored and reported as `Outcome::Ignored`; they never change state.

use smallvec::SmallVec;
use tracing::{debug, error, info, trace};

use super::phase::GamePhase;
use super::timer::{Timer, TimerStatus};
use crate::core::{
    generate_options, CellPos, CellState, ConfigError, GameConfig, GameEvent, GameRng, Grid, PlayerId,
    PlayerMap, Question, Result, Verdict,
};

/// Why a command had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The command is not valid in this phase.
    WrongPhase(GamePhase),
    /// No such cell on the grid.
    OutOfBounds,
    /// The cell was already picked this turn.
    CellNotHidden,
}

/// What a command did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored(IgnoreReason),
    /// A new grid was drawn and the game reset.
    Initialized,
    /// First cell of the turn picked.
    Selected,
    /// Second cell picked; a question is open.
    QuestionPosed,
    /// The countdown advanced.
    Ticked { seconds_left: u32 },
    /// The question was answered or timed out and the turn moved on.
    Resolved { verdict: Verdict, round_over: bool },
}

impl Outcome {
    #[must_use]
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored(_))
    }
}

/// Record of the last resolved question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub player: PlayerId,
    pub cells: [CellPos; 2],
    pub question: Question,
    /// `None` when the timer ran out.
    pub answer: Option<i32>,
    pub verdict: Verdict,
}

impl Resolution {
    /// State the two cells were left in before being turned face down.
    #[must_use]
    pub fn cell_state(&self) -> CellState {
        CellState::Consumed(self.verdict)
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.answer.is_none()
    }
}

/// Final standing of a finished round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single top scorer.
    Winner(PlayerId),
    /// Several players tied on the top score.
    Winners(Vec<PlayerId>),
    /// Nobody scored.
    Draw,
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

pub struct GameEngine {
    config: GameConfig,
    rng: GameRng,
    grid: Grid,
    scores: PlayerMap<u32>,
    attempted: PlayerMap<bool>,
    current_player: PlayerId,
    phase: GamePhase,
    selection: SmallVec<[CellPos; 2]>,
    question: Option<Question>,
    options: Vec<i32>,
    timer: Timer,
    last_resolution: Option<Resolution>,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Start a game with a random grid drawn from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Start a game seeded from the operating system.
    pub fn from_entropy(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, GameRng::from_entropy())
    }

    /// Start a game on a fixed grid. The grid's shape replaces the
    /// configured one; `seed` still drives operators and options.
    pub fn with_grid(config: GameConfig, grid: Grid, seed: u64) -> Result<Self> {
        let config = config.with_grid_size(grid.rows(), grid.cols());
        config.validate()?;
        let limit = GameConfig::VALUE_LIMIT;
        if let Some((_, cell)) = grid.iter().find(|(_, c)| !(-limit..=limit).contains(&c.value)) {
            return Err(ConfigError::GridValueOutOfRange {
                value: cell.value,
                limit,
            }
            .into());
        }
        Ok(Self::assemble(config, GameRng::new(seed), grid))
    }

    fn with_rng(config: GameConfig, mut rng: GameRng) -> Result<Self> {
        config.validate()?;
        let grid = draw_grid(&config, &mut rng);
        Ok(Self::assemble(config, rng, grid))
    }

    fn assemble(config: GameConfig, rng: GameRng, grid: Grid) -> Self {
        let players = config.player_count;
        let mut engine = Self {
            config,
            rng,
            grid,
            scores: PlayerMap::with_value(players, 0),
            attempted: PlayerMap::with_value(players, false),
            current_player: PlayerId::new(0),
            phase: GamePhase::AwaitingFirstSelection,
            selection: SmallVec::new(),
            question: None,
            options: Vec::new(),
            timer: Timer::new(),
            last_resolution: None,
            events: Vec::new(),
        };
        engine.announce_start();
        engine
    }

    // === Commands ===

    /// Draw a new grid and reset every player.
    pub fn init(&mut self) -> Outcome {
        self.grid = draw_grid(&self.config, &mut self.rng);
        self.scores.fill(0);
        self.attempted.fill(false);
        self.current_player = PlayerId::new(0);
        self.phase = GamePhase::AwaitingFirstSelection;
        self.selection.clear();
        self.question = None;
        self.options.clear();
        self.timer.stop();
        self.last_resolution = None;
        self.events.clear();
        self.announce_start();
        Outcome::Initialized
    }

    fn announce_start(&mut self) {
        info!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            players = self.config.player_count,
            seed = self.rng.seed(),
            "game started"
        );
        self.events.push(GameEvent::GridInitialized {
            values: self.grid.values(),
        });
    }

    /// Pick a cell for the current player.
    ///
    /// The second pick of a turn poses the question and starts the timer.
    /// Errors only when no answer options can be built for the question,
    /// in which case nothing changes and the turn still awaits a second cell.
    pub fn select_cell(&mut self, row: usize, col: usize) -> Result<Outcome> {
        if !self.phase.accepts_selection() {
            return Ok(self.ignore(IgnoreReason::WrongPhase(self.phase)));
        }

        let pos = CellPos::new(row, col);
        let value = match self.grid.get(pos) {
            None => return Ok(self.ignore(IgnoreReason::OutOfBounds)),
            Some(cell) if !cell.is_hidden() => return Ok(self.ignore(IgnoreReason::CellNotHidden)),
            Some(cell) => cell.value,
        };

        if self.phase == GamePhase::AwaitingFirstSelection {
            self.reveal(pos, value);
            self.phase = GamePhase::AwaitingSecondSelection;
            return Ok(Outcome::Selected);
        }

        let Some(first_value) = self.selection.first().and_then(|&p| self.grid.value(p)) else {
            return Ok(self.ignore(IgnoreReason::WrongPhase(self.phase)));
        };

        let question = Question::random(first_value, value, &mut self.rng);
        let options = match generate_options(question.correct_result, &self.config, &mut self.rng) {
            Ok(options) => options,
            Err(err) => {
                error!(%question, %err, "cannot pose question");
                return Err(err);
            }
        };

        self.reveal(pos, value);
        self.pose(question, options);
        Ok(Outcome::QuestionPosed)
    }

    /// Answer the open question.
    pub fn submit_answer(&mut self, value: i32) -> Outcome {
        if !self.phase.accepts_answer() {
            return self.ignore(IgnoreReason::WrongPhase(self.phase));
        }
        self.resolve(Some(value))
    }

    /// Advance the clock by one second. Running out of time counts as a
    /// wrong answer.
    pub fn tick(&mut self) -> Outcome {
        if !self.phase.accepts_answer() {
            return self.ignore(IgnoreReason::WrongPhase(self.phase));
        }

        match self.timer.tick() {
            TimerStatus::Running(seconds_left) => {
                trace!(seconds_left, "tick");
                self.events.push(GameEvent::TimerTick { seconds_left });
                Outcome::Ticked { seconds_left }
            }
            TimerStatus::Expired => {
                debug!(player = %self.current_player, "time is up");
                self.resolve(None)
            }
            TimerStatus::Inactive => self.ignore(IgnoreReason::WrongPhase(self.phase)),
        }
    }

    fn reveal(&mut self, pos: CellPos, value: i32) {
        debug!(player = %self.current_player, row = pos.row, col = pos.col, value, "cell revealed");
        self.grid.set_state(pos, CellState::Revealed);
        self.selection.push(pos);
        self.events.push(GameEvent::CellRevealed {
            row: pos.row,
            col: pos.col,
            value,
        });
    }

    fn pose(&mut self, question: Question, options: Vec<i32>) {
        let seconds = self.config.timer_seconds;
        if self.timer.start(seconds) {
            debug!("replaced a running timer");
        }
        debug!(player = %self.current_player, %question, ?options, "question posed");

        self.events.push(GameEvent::QuestionPosed {
            operand_a: question.operand_a,
            operand_b: question.operand_b,
            operator: question.operator,
            options: options.clone(),
            seconds_left: seconds,
        });
        self.question = Some(question);
        self.options = options;
        self.phase = GamePhase::AwaitingAnswer;
    }

    fn resolve(&mut self, answer: Option<i32>) -> Outcome {
        self.timer.stop();

        let (Some(question), &[first, second]) = (self.question, self.selection.as_slice()) else {
            return self.ignore(IgnoreReason::WrongPhase(self.phase));
        };

        let player = self.current_player;
        let verdict = Verdict::from_correct(answer.is_some_and(|a| question.is_correct(a)));

        self.attempted[player] = true;
        if verdict.is_correct() {
            self.scores[player] = self.scores[player].saturating_add(self.config.points_per_correct);
        }
        for pos in [first, second] {
            self.grid.set_state(pos, CellState::Consumed(verdict));
        }

        debug!(%player, ?answer, expected = question.correct_result, ?verdict, "answer resolved");
        self.last_resolution = Some(Resolution {
            player,
            cells: [first, second],
            question,
            answer,
            verdict,
        });
        self.events.push(GameEvent::AnswerResolved {
            player,
            correct: verdict.is_correct(),
            cells: [first, second],
            scores: self.scores(),
        });

        let round_over = self.advance_turn();
        Outcome::Resolved { verdict, round_over }
    }

    /// Turn the picked cells face down and hand over to the next player.
    /// Returns `true` when the round is over.
    fn advance_turn(&mut self) -> bool {
        for pos in self.selection.drain(..) {
            self.grid.set_state(pos, CellState::Hidden);
        }
        self.question = None;
        self.options.clear();
        self.current_player = self.current_player.next(self.config.player_count);

        if self.attempted.all(|&a| a) {
            self.phase = GamePhase::RoundOver;
            self.timer.stop();
            info!(scores = ?self.scores.values(), "game over");
            self.events.push(GameEvent::GameOver { scores: self.scores() });
            true
        } else {
            self.phase = GamePhase::AwaitingFirstSelection;
            debug!(next = %self.current_player, "turn advanced");
            self.events.push(GameEvent::TurnAdvanced {
                next_player: self.current_player,
            });
            false
        }
    }

    fn ignore(&self, reason: IgnoreReason) -> Outcome {
        debug!(?reason, phase = %self.phase, "input ignored");
        Outcome::Ignored(reason)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Scores indexed by player.
    #[must_use]
    pub fn scores(&self) -> Vec<u32> {
        self.scores.values().to_vec()
    }

    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player]
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn has_attempted(&self, player: PlayerId) -> bool {
        self.attempted[player]
    }

    /// Cells picked this turn, in order.
    #[must_use]
    pub fn selection(&self) -> &[CellPos] {
        &self.selection
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    /// Answer options of the open question, in presentation order.
    #[must_use]
    pub fn options(&self) -> &[i32] {
        &self.options
    }

    #[must_use]
    pub fn seconds_left(&self) -> Option<u32> {
        self.timer.seconds_left()
    }

    #[must_use]
    pub fn last_resolution(&self) -> Option<&Resolution> {
        self.last_resolution.as_ref()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Final standing, once the round is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.is_over() {
            return None;
        }
        let top = self.scores.values().iter().copied().max().unwrap_or(0);
        if top == 0 {
            return Some(GameResult::Draw);
        }
        let mut leaders: Vec<_> = self
            .scores
            .iter()
            .filter(|&(_, &score)| score == top)
            .map(|(player, _)| player)
            .collect();
        Some(match leaders.len() {
            1 => GameResult::Winner(leaders.remove(0)),
            _ => GameResult::Winners(leaders),
        })
    }

    /// Take the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

fn draw_grid(config: &GameConfig, rng: &mut GameRng) -> Grid {
    Grid::random(config.rows, config.cols, config.min_value, config.max_value, rng)
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("phase", &self.phase)
            .field("current_player", &self.current_player)
            .field("scores", &self.scores.values())
            .field("selection", &self.selection)
            .field("question", &self.question)
            .finish_non_exhaustive()
    }
}
