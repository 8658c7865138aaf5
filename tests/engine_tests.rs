//! Turn state machine scenarios.
//!
//! These drive a `GameEngine` through whole turns and rounds and check the
//! scoring, cell, rotation and timer rules from the outside.

use math_grid::core::{CellPos, CellState, GameConfig, GameEvent, Grid, OptionBounds, PlayerId, Verdict};
use math_grid::engine::{GameEngine, GamePhase, GameResult, IgnoreReason, Outcome};
use math_grid::{GameError, Operator};

fn fixed_engine(seed: u64) -> GameEngine {
    let grid = Grid::from_rows(&[vec![25, 17, 64, 11], vec![99, 10, 52, 38]]).unwrap();
    GameEngine::with_grid(GameConfig::default(), grid, seed).unwrap()
}

/// Select two cells and return the posed question's correct result.
fn pose(engine: &mut GameEngine, first: (usize, usize), second: (usize, usize)) -> i32 {
    assert_eq!(engine.select_cell(first.0, first.1).unwrap(), Outcome::Selected);
    assert_eq!(engine.select_cell(second.0, second.1).unwrap(), Outcome::QuestionPosed);
    engine.question().unwrap().correct_result
}

/// Every generated grid is 8×8 with values in 10..=99.
#[test]
fn test_generated_grid_shape_and_range() {
    for seed in 0..20 {
        let engine = GameEngine::new(GameConfig::default(), seed).unwrap();
        let grid = engine.grid();

        assert_eq!((grid.rows(), grid.cols()), (8, 8));
        assert!(grid.iter().all(|(_, cell)| (10..=99).contains(&cell.value)));
        assert!(grid.iter().all(|(_, cell)| cell.state == CellState::Hidden));
    }
}

/// 25 + 17 = 42 and 25 - 17 = 8, whichever operator the engine picks.
#[test]
fn test_addition_and_subtraction_scenario() {
    let mut seen_add = false;
    let mut seen_sub = false;

    for seed in 0..50 {
        let mut engine = fixed_engine(seed);
        let correct = pose(&mut engine, (0, 0), (0, 1));
        match engine.question().unwrap().operator {
            Operator::Add => {
                assert_eq!(correct, 42);
                seen_add = true;
            }
            Operator::Subtract => {
                assert_eq!(correct, 8);
                seen_sub = true;
            }
        }
    }

    assert!(seen_add && seen_sub);
}

/// Operands follow selection order, so reversing the picks flips subtraction.
#[test]
fn test_operands_in_selection_order() {
    let mut engine = fixed_engine(3);
    pose(&mut engine, (0, 1), (0, 0));

    let question = engine.question().unwrap();
    assert_eq!((question.operand_a, question.operand_b), (17, 25));
}

/// A correct answer adds 10 to the current player only.
#[test]
fn test_correct_answer_scores_only_current_player() {
    let mut engine = fixed_engine(1);

    let correct = pose(&mut engine, (0, 0), (1, 1));
    engine.submit_answer(correct);
    assert_eq!(engine.scores(), vec![10, 0, 0]);

    let correct = pose(&mut engine, (0, 2), (1, 3));
    engine.submit_answer(correct);
    assert_eq!(engine.scores(), vec![10, 10, 0]);
    assert_eq!(engine.score(PlayerId::new(2)), 0);
}

/// Correct answers consume cells as Correct, anything else as Incorrect.
#[test]
fn test_cells_consumed_with_verdict() {
    let mut engine = fixed_engine(2);

    let correct = pose(&mut engine, (0, 0), (0, 1));
    engine.submit_answer(correct);
    let resolution = *engine.last_resolution().unwrap();
    assert_eq!(resolution.cell_state(), CellState::Consumed(Verdict::Correct));
    assert_eq!(resolution.cells, [CellPos::new(0, 0), CellPos::new(0, 1)]);
    assert_eq!(resolution.answer, Some(correct));

    let correct = pose(&mut engine, (1, 0), (1, 1));
    engine.submit_answer(correct - 3);
    let resolution = *engine.last_resolution().unwrap();
    assert_eq!(resolution.cell_state(), CellState::Consumed(Verdict::Incorrect));
    assert_eq!(resolution.player, PlayerId::new(1));
}

/// Resolved cells are face down again, values intact, and can be replayed.
#[test]
fn test_cells_reset_and_replayable() {
    let mut engine = fixed_engine(4);
    let before = engine.grid().values();

    let correct = pose(&mut engine, (1, 2), (1, 3));
    engine.submit_answer(correct);

    assert_eq!(engine.grid().state(CellPos::new(1, 2)), Some(CellState::Hidden));
    assert_eq!(engine.grid().state(CellPos::new(1, 3)), Some(CellState::Hidden));
    assert_eq!(engine.grid().values(), before);

    // The next player may pick the very same cells.
    pose(&mut engine, (1, 2), (1, 3));
    let question = engine.question().unwrap();
    assert_eq!((question.operand_a, question.operand_b), (52, 38));
}

/// Turns rotate 0 → 1 → 2 → 0.
#[test]
fn test_turn_rotation() {
    let mut engine = fixed_engine(5);
    let mut order = vec![engine.current_player()];

    for _ in 0..3 {
        let correct = pose(&mut engine, (0, 0), (0, 1));
        engine.submit_answer(correct + 1);
        order.push(engine.current_player());
    }

    assert_eq!(
        order,
        vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2), PlayerId::new(0)]
    );
}

/// The round ends exactly when the last player has attempted, and stays over.
#[test]
fn test_round_over_is_terminal() {
    let mut engine = fixed_engine(6);

    for player in 0..3u8 {
        assert!(!engine.is_over(), "round ended before player {player} played");
        let correct = pose(&mut engine, (0, 0), (1, 0));
        engine.submit_answer(correct);
    }

    assert_eq!(engine.phase(), GamePhase::RoundOver);
    assert!(PlayerId::all(3).all(|p| engine.has_attempted(p)));

    let ignored = Outcome::Ignored(IgnoreReason::WrongPhase(GamePhase::RoundOver));
    assert_eq!(engine.select_cell(0, 2).unwrap(), ignored);
    assert_eq!(engine.submit_answer(42), ignored);
    assert_eq!(engine.tick(), ignored);
    assert_eq!(engine.phase(), GamePhase::RoundOver);
    assert_eq!(engine.scores(), vec![10, 10, 10]);
}

/// GameOver is announced once, after the last resolution.
#[test]
fn test_game_over_event_emitted_once() {
    let mut engine = fixed_engine(7);
    engine.drain_events();

    for _ in 0..3 {
        let correct = pose(&mut engine, (0, 0), (0, 1));
        engine.submit_answer(correct);
    }
    engine.submit_answer(0);
    engine.tick();

    let events = engine.drain_events();
    let game_overs: Vec<_> = events.iter().filter(|e| e.is_game_over()).collect();
    assert_eq!(game_overs, vec![&GameEvent::GameOver { scores: vec![10, 10, 10] }]);
    assert!(events.last().unwrap().is_game_over());
}

/// The full event sequence of one turn.
#[test]
fn test_turn_event_sequence() {
    let mut engine = fixed_engine(8);
    engine.drain_events();

    let correct = pose(&mut engine, (0, 0), (0, 1));
    engine.tick();
    engine.submit_answer(correct);

    let events = engine.drain_events();
    assert_eq!(events.len(), 6);
    assert_eq!(events[0], GameEvent::CellRevealed { row: 0, col: 0, value: 25 });
    assert_eq!(events[1], GameEvent::CellRevealed { row: 0, col: 1, value: 17 });
    match &events[2] {
        GameEvent::QuestionPosed {
            operand_a,
            operand_b,
            options,
            seconds_left,
            ..
        } => {
            assert_eq!((*operand_a, *operand_b), (25, 17));
            assert_eq!(options.len(), 4);
            assert!(options.contains(&correct));
            assert_eq!(*seconds_left, 15);
        }
        other => panic!("expected QuestionPosed, got {other:?}"),
    }
    assert_eq!(events[3], GameEvent::TimerTick { seconds_left: 14 });
    assert_eq!(
        events[4],
        GameEvent::AnswerResolved {
            player: PlayerId::new(0),
            correct: true,
            cells: [CellPos::new(0, 0), CellPos::new(0, 1)],
            scores: vec![10, 0, 0],
        }
    );
    assert_eq!(events[5], GameEvent::TurnAdvanced { next_player: PlayerId::new(1) });
}

/// Letting the clock run out is a wrong answer and still passes the turn.
#[test]
fn test_timeout_resolves_incorrect_and_advances() {
    let mut engine = fixed_engine(9);
    pose(&mut engine, (0, 0), (0, 1));

    let mut outcome = Outcome::QuestionPosed;
    let mut ticks = 0;
    while engine.phase() == GamePhase::AwaitingAnswer {
        outcome = engine.tick();
        ticks += 1;
    }

    assert_eq!(ticks, 16);
    assert_eq!(
        outcome,
        Outcome::Resolved {
            verdict: Verdict::Incorrect,
            round_over: false
        }
    );
    assert_eq!(engine.scores(), vec![0, 0, 0]);
    assert!(engine.has_attempted(PlayerId::new(0)));
    assert!(engine.last_resolution().unwrap().timed_out());
    assert_eq!(engine.current_player(), PlayerId::new(1));
    assert_eq!(engine.seconds_left(), None);
}

/// A new question gets a full clock, however long the last one ran.
#[test]
fn test_timer_restarts_for_each_question() {
    let mut engine = fixed_engine(10);
    let correct = pose(&mut engine, (0, 0), (0, 1));
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.seconds_left(), Some(5));
    engine.submit_answer(correct);

    pose(&mut engine, (1, 0), (1, 1));
    assert_eq!(engine.seconds_left(), Some(15));
}

/// Clicking a revealed cell again changes nothing.
#[test]
fn test_reselecting_revealed_cell_is_noop() {
    let mut engine = fixed_engine(11);
    engine.select_cell(0, 3).unwrap();
    engine.drain_events();

    let outcome = engine.select_cell(0, 3).unwrap();

    assert_eq!(outcome, Outcome::Ignored(IgnoreReason::CellNotHidden));
    assert_eq!(engine.phase(), GamePhase::AwaitingSecondSelection);
    assert_eq!(engine.grid().state(CellPos::new(0, 3)), Some(CellState::Revealed));
    assert_eq!(engine.selection(), &[CellPos::new(0, 3)]);
    assert!(engine.drain_events().is_empty());
}

/// Selecting while a question is open is ignored.
#[test]
fn test_no_third_selection() {
    let mut engine = fixed_engine(12);
    pose(&mut engine, (0, 0), (0, 1));

    let outcome = engine.select_cell(1, 1).unwrap();
    assert_eq!(
        outcome,
        Outcome::Ignored(IgnoreReason::WrongPhase(GamePhase::AwaitingAnswer))
    );
    assert_eq!(engine.selection().len(), 2);
    assert_eq!(engine.grid().state(CellPos::new(1, 1)), Some(CellState::Hidden));
}

/// With strict option bounds an unreachable result is an error, not a hang,
/// and the turn is left waiting for a different second cell.
#[test]
fn test_strict_bounds_fail_without_side_effects() {
    let grid = Grid::from_rows(&[vec![99, 99, 30]]).unwrap();
    let config = GameConfig::default().with_option_bounds(OptionBounds::Strict);
    let mut engine = GameEngine::with_grid(config, grid, 13).unwrap();

    engine.select_cell(0, 0).unwrap();
    engine.drain_events();

    // 99 + 99 = 198 and 99 - 99 = 0 both leave too few wrong answers in 10..=99.
    let err = engine.select_cell(0, 1).unwrap_err();
    assert!(matches!(err, GameError::OptionGeneration { needed: 3, .. }));
    assert_eq!(engine.phase(), GamePhase::AwaitingSecondSelection);
    assert_eq!(engine.grid().state(CellPos::new(0, 1)), Some(CellState::Hidden));
    assert_eq!(engine.selection(), &[CellPos::new(0, 0)]);
    assert!(engine.drain_events().is_empty());
}

/// The default bounds handle negative and large results.
#[test]
fn test_adaptive_bounds_handle_any_result() {
    let grid = Grid::from_rows(&[vec![99, 99, 10]]).unwrap();
    for seed in 0..20 {
        let mut engine = GameEngine::with_grid(GameConfig::default(), grid.clone(), seed).unwrap();
        let correct = pose(&mut engine, (0, 2), (0, 0));

        assert!(correct == 109 || correct == -89);
        let options = engine.options();
        assert_eq!(options.len(), 4);
        assert!(options.contains(&correct));
        assert!(options.iter().all(|o| (o - correct).abs() <= 10));
    }
}

/// The same seed replays the same game.
#[test]
fn test_seed_replays_game() {
    let play = |seed| {
        let mut engine = GameEngine::new(GameConfig::default(), seed).unwrap();
        pose(&mut engine, (2, 3), (5, 6));
        (engine.grid().values(), *engine.question().unwrap(), engine.options().to_vec())
    };

    assert_eq!(play(77), play(77));
    assert_ne!(play(77).0, play(78).0);
}

/// Final standing after a round.
#[test]
fn test_game_result() {
    let mut engine = fixed_engine(14);
    for right in [true, false, true] {
        let correct = pose(&mut engine, (0, 0), (0, 1));
        engine.submit_answer(if right { correct } else { correct + 1 });
    }
    assert_eq!(
        engine.result(),
        Some(GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]))
    );

    let mut engine = fixed_engine(15);
    for _ in 0..3 {
        pose(&mut engine, (0, 0), (0, 1));
        while engine.phase() == GamePhase::AwaitingAnswer {
            engine.tick();
        }
    }
    assert_eq!(engine.result(), Some(GameResult::Draw));
}

/// Player count and points come from the configuration.
#[test]
fn test_configured_players_and_points() {
    let grid = Grid::from_rows(&[vec![20, 30], vec![40, 50]]).unwrap();
    let config = GameConfig::default().with_player_count(2).with_points_per_correct(5);
    let mut engine = GameEngine::with_grid(config, grid, 16).unwrap();

    let correct = pose(&mut engine, (0, 0), (1, 1));
    engine.submit_answer(correct);
    assert_eq!(engine.current_player(), PlayerId::new(1));

    let correct = pose(&mut engine, (0, 1), (1, 0));
    engine.submit_answer(correct);

    assert!(engine.is_over());
    assert_eq!(engine.scores(), vec![5, 5]);
    assert_eq!(engine.current_player(), PlayerId::new(0));
}

/// `init` starts a fresh round mid-game.
#[test]
fn test_init_mid_question() {
    let mut engine = GameEngine::new(GameConfig::default(), 17).unwrap();
    pose(&mut engine, (0, 0), (0, 1));
    let old_grid = engine.grid().values();

    assert_eq!(engine.init(), Outcome::Initialized);

    assert_eq!(engine.phase(), GamePhase::AwaitingFirstSelection);
    assert_eq!(engine.seconds_left(), None);
    assert!(engine.question().is_none());
    assert_ne!(engine.grid().values(), old_grid);
    assert!(matches!(engine.drain_events().as_slice(), [GameEvent::GridInitialized { .. }]));
    assert_eq!(engine.tick(), Outcome::Ignored(IgnoreReason::WrongPhase(GamePhase::AwaitingFirstSelection)));
}
