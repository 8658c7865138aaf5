//! Terminal front end.
//!
//! Stdin and a clock thread both feed one channel; the main thread owns the
//! session and applies commands one at a time.

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use math_grid::engine::{Command, EventSink, GameEngine, GameSession};
use math_grid::{ui, GameConfig, GameError, GameEvent};

const HELP: &str = "Commands: `<row> <col>` to pick a cell, `<value>` to answer, `n` for a new grid, `q` to quit";
const RESTART: &str = "Type `n` for a new grid or `q` to quit";

#[derive(Parser, Debug)]
#[command(version, about = "Arithmetic grid game for three players", long_about = None)]
struct Args {
    /// Seed for the random number generator
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds to answer each question
    #[arg(long)]
    timer_seconds: Option<u32>,

    /// Number of players
    #[arg(long)]
    players: Option<usize>,

    /// Milliseconds between clock ticks
    #[arg(long, default_value_t = 1000)]
    tick_ms: u64,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,
}

enum Message {
    Command(Command),
    Quit,
}

fn parse_input(line: &str) -> Option<Message> {
    let words: Vec<_> = line.split_whitespace().collect();
    match words.as_slice() {
        ["q" | "quit"] => Some(Message::Quit),
        ["n" | "new"] => Some(Message::Command(Command::Init)),
        [row, col] => Some(Message::Command(Command::SelectCell {
            row: row.parse().ok()?,
            col: col.parse().ok()?,
        })),
        [value] => Some(Message::Command(Command::SubmitAnswer {
            value: value.parse().ok()?,
        })),
        _ => None,
    }
}

struct TerminalSink {
    json: bool,
}

impl EventSink for TerminalSink {
    fn on_event(&mut self, engine: &GameEngine, event: &GameEvent) {
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(err) => tracing::warn!(%err, "cannot encode event"),
            }
            return;
        }
        for line in ui::describe_event(engine, event) {
            println!("{line}");
        }
    }

    fn on_error(&mut self, _engine: &GameEngine, error: &GameError) {
        if self.json {
            println!("{}", serde_json::json!({ "type": "error", "message": error.to_string() }));
        } else {
            println!("No question possible here ({error}). Pick another cell.");
        }
    }
}

/// Run rounds until input ends. A finished round waits for `Init`.
fn play(session: &mut GameSession, mut commands: impl Iterator<Item = Command>, sink: &mut impl EventSink) {
    loop {
        session.run(&mut commands, sink);
        if !session.engine().is_over() {
            return;
        }
        println!("{RESTART}");
        if !commands.any(|command| command == Command::Init) {
            return;
        }
        if let Err(err) = session.dispatch(Command::Init, sink) {
            sink.on_error(session.engine(), &err);
        }
    }
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seconds) = args.timer_seconds {
        config = config.with_timer_seconds(seconds);
    }
    if let Some(players) = args.players {
        config = config.with_player_count(players);
    }
    config.validate().context("invalid settings")?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("math_grid=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let engine = match args.seed {
        Some(seed) => GameEngine::new(config, seed),
        None => GameEngine::from_entropy(config),
    }
    .context("starting game")?;

    let (tx, rx) = mpsc::channel();

    let input_tx = tx.clone();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match parse_input(&line) {
                Some(message) => {
                    if input_tx.send(message).is_err() {
                        return;
                    }
                }
                None => eprintln!("{HELP}"),
            }
        }
        let _ = input_tx.send(Message::Quit);
    });

    let tick = Duration::from_millis(args.tick_ms);
    thread::spawn(move || loop {
        thread::sleep(tick);
        if tx.send(Message::Command(Command::Tick)).is_err() {
            break;
        }
    });

    println!("{HELP}");
    let mut session = GameSession::new(engine);
    let commands = rx.iter().map_while(|message| match message {
        Message::Command(command) => Some(command),
        Message::Quit => None,
    });
    play(&mut session, commands, &mut TerminalSink { json: args.json });

    Ok(())
}
