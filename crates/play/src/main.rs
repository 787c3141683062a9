//! Interactive play, self-play and position analysis for tic-tac-toe.
//!
//! Every engine move comes from the exhaustive minimax search in
//! `gametree_minimax`. Self-play can pit the engine against a seeded random
//! baseline and save the games as JSON.

mod agent;

use agent::Agent;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gametree_core::{Game, Outcome, Player, Utility};
use gametree_minimax::games::{GridAction, TicTacToe, TicTacToeState};
use gametree_minimax::{Minimax, MinimaxConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tic-tac-toe with a perfect minimax opponent.
#[derive(Parser)]
#[command(name = "gametree-play")]
#[command(about = "Play, self-play and analyze tic-tac-toe with an exhaustive minimax engine")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the engine in the terminal.
    Play {
        /// Mark played by the human.
        #[arg(long, value_enum, default_value = "x")]
        human: Seat,

        /// Evaluate the engine's candidate moves in parallel.
        #[arg(long)]
        parallel: bool,
    },

    /// Play engine games, optionally against a random baseline.
    Selfplay {
        /// Number of games to play.
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Seat taken by the random baseline instead of the engine.
        #[arg(long, value_enum)]
        random: Option<Seat>,

        /// Write game records to this JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the minimax value of every legal move in a position.
    Analyze {
        /// Board in row-major order, e.g. "XX./OO./...".
        board: String,

        /// Evaluate root moves in parallel.
        #[arg(long)]
        parallel: bool,
    },
}

/// A side of the board, as named on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Seat {
    X,
    O,
}

impl From<Seat> for Player {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::X => Player::First,
            Seat::O => Player::Second,
        }
    }
}

/// A finished self-play game.
#[derive(Serialize, Debug)]
struct GameRecord {
    /// Seed of the random baseline (unused for engine-only games).
    seed: u64,

    /// Agent playing X.
    x: &'static str,

    /// Agent playing O.
    o: &'static str,

    /// Moves in play order.
    moves: Vec<GridAction>,

    /// Winner, or `None` for a draw.
    winner: Option<Player>,

    /// Final utility for X.
    utility: Utility,

    /// Final board, rows separated by `/`.
    board: String,
}

/// Win/draw totals over a batch of games.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl Summary {
    fn tally(records: &[GameRecord]) -> Self {
        records
            .iter()
            .fold(Self::default(), |mut summary, record| {
                if record.utility.is_win() {
                    summary.x_wins += 1;
                } else if record.utility.is_loss() {
                    summary.o_wins += 1;
                } else {
                    summary.draws += 1;
                }
                summary
            })
    }

    fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    fn percent(&self, count: usize) -> f32 {
        if self.total() == 0 {
            return 0.0;
        }
        count as f32 / self.total() as f32 * 100.0
    }
}

/// Parse "row col" or "row,col".
fn parse_action(line: &str) -> Option<GridAction> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(GridAction::new(row, col))
}

/// Render a board on one line, rows separated by `/`.
fn compact_board(state: &TicTacToeState) -> String {
    state
        .to_string()
        .lines()
        .map(|row| row.replace(' ', ""))
        .collect::<Vec<_>>()
        .join("/")
}

/// Play one game between two agents.
fn play_game(
    game: &TicTacToe,
    x: &mut Agent,
    o: &mut Agent,
) -> gametree_core::Result<(Vec<GridAction>, TicTacToeState)> {
    let mut state = game.initial_state();
    let mut moves = Vec::new();

    while !game.is_terminal(&state) {
        let agent = match game.to_move(&state)? {
            Player::First => &mut *x,
            Player::Second => &mut *o,
        };
        let action = agent.choose(game, &state)?;
        state = game.apply(&state, action)?;
        moves.push(action);
    }

    Ok((moves, state))
}

/// Agents for X and O. Self-play games already run in parallel, so the
/// engine searches sequentially.
fn agents_for(random: Option<Seat>, seed: u64) -> (Agent, Agent) {
    let pick = |seat: Seat| {
        if random == Some(seat) {
            Agent::Random(ChaCha8Rng::seed_from_u64(seed))
        } else {
            Agent::Engine(Minimax::new(MinimaxConfig::sequential()))
        }
    };
    (pick(Seat::X), pick(Seat::O))
}

/// Human versus engine over line-based input.
///
/// Returns `None` when input ends before the game does.
fn run_interactive<R: BufRead, W: Write>(
    game: &TicTacToe,
    minimax: &Minimax,
    human: Player,
    mut input: R,
    out: &mut W,
) -> Result<Option<Outcome>> {
    let mut state = game.initial_state();
    let mut line = String::new();

    while !game.is_terminal(&state) {
        let player = game.to_move(&state)?;

        if player != human {
            let action = minimax.best_action(game, &state)?;
            writeln!(out, "Engine ({}) plays {}", player, action)?;
            state = game.apply(&state, action)?;
            continue;
        }

        writeln!(out, "\n{}\n", state)?;
        write!(out, "{} to move (row col): ", player)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        let action = match parse_action(&line) {
            Some(action) => action,
            None => {
                writeln!(out, "Enter a row and a column, e.g. \"1 1\".")?;
                continue;
            }
        };

        match game.apply(&state, action) {
            Ok(next) => state = next,
            Err(err) if err.is_recoverable() => writeln!(out, "{}", err)?,
            Err(err) => return Err(err.into()),
        }
    }

    let outcome = game.outcome(&state);
    writeln!(out, "\n{}\n\nResult: {}", state, outcome)?;
    Ok(Some(outcome))
}

fn cmd_play(human: Seat, parallel: bool) -> Result<()> {
    let game = TicTacToe::default();
    let minimax = Minimax::new(MinimaxConfig {
        parallel_root: parallel,
    });
    info!(
        ?human,
        parallel = minimax.config().parallel_root,
        "starting interactive game"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    match run_interactive(&game, &minimax, human.into(), stdin.lock(), &mut stdout)? {
        Some(outcome) => info!(%outcome, "game finished"),
        None => info!("input closed before the game ended"),
    }
    Ok(())
}

fn cmd_selfplay(games: usize, seed: u64, random: Option<Seat>, output: Option<&Path>) -> Result<()> {
    let game = TicTacToe::default();
    println!("Playing {} games (seed {})", games, seed);
    if let Some(seat) = random {
        println!("Random baseline plays {:?}", seat);
    }

    let start = Instant::now();
    let records: Vec<GameRecord> = (0..games as u64)
        .into_par_iter()
        .map(|i| -> gametree_core::Result<GameRecord> {
            let game_seed = seed.wrapping_add(i);
            let (mut x, mut o) = agents_for(random, game_seed);
            let (moves, state) = play_game(&game, &mut x, &mut o)?;
            let winner = game.winner(&state);
            let utility = game.utility(&state, Player::First)?;
            debug!(game = i, ?winner, moves = moves.len(), "game finished");

            Ok(GameRecord {
                seed: game_seed,
                x: x.name(),
                o: o.name(),
                moves,
                winner,
                utility,
                board: compact_board(&state),
            })
        })
        .collect::<gametree_core::Result<_>>()
        .context("self-play game failed")?;
    let elapsed = start.elapsed();

    let summary = Summary::tally(&records);
    println!("\nCompleted in {:.2}s", elapsed.as_secs_f64());
    println!("================================================");
    println!("X wins: {} ({:.1}%)", summary.x_wins, summary.percent(summary.x_wins));
    println!("O wins: {} ({:.1}%)", summary.o_wins, summary.percent(summary.o_wins));
    println!("Draws:  {} ({:.1}%)", summary.draws, summary.percent(summary.draws));

    if let Some(path) = output {
        write_records(path, &records)?;
        println!("Records saved to: {}", path.display());
    }

    Ok(())
}

/// Save game records as pretty-printed JSON.
fn write_records(path: &Path, records: &[GameRecord]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("failed to write {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Print the outcome of a finished board, or every legal move with its value.
///
/// Optimal moves are marked with `*`.
fn analyze<W: Write>(
    game: &TicTacToe,
    minimax: &Minimax,
    state: &TicTacToeState,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}\n", state)?;

    let outcome = game.outcome(state);
    if outcome.is_over() {
        writeln!(out, "Game over: {}", outcome)?;
        if let Some(cells) = game.winning_cells(state) {
            let cells: Vec<String> = cells.iter().map(ToString::to_string).collect();
            writeln!(out, "Winning line: {}", cells.join(" "))?;
        }
        return Ok(());
    }

    let player = game.to_move(state)?;
    let result = minimax.search(game, state)?;

    writeln!(
        out,
        "{} to move, value {} for X ({} states searched)",
        player, result.root_value, result.nodes
    )?;
    for (action, value) in &result.action_values {
        let marker = if *value == result.root_value { "*" } else { " " };
        writeln!(out, "  {} {}  {}", marker, action, value)?;
    }
    writeln!(out, "Best move: {}", result.best_action)?;
    Ok(())
}

fn cmd_analyze(board: &str, parallel: bool) -> Result<()> {
    let game = TicTacToe::default();
    let state: TicTacToeState = board
        .parse()
        .with_context(|| format!("cannot use board '{}'", board))?;
    let minimax = Minimax::new(MinimaxConfig {
        parallel_root: parallel,
    });

    let stdout = io::stdout();
    analyze(&game, &minimax, &state, &mut stdout.lock())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,gametree_play=debug,gametree_minimax=debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Play { human, parallel } => cmd_play(human, parallel),
        Commands::Selfplay {
            games,
            seed,
            random,
            output,
        } => cmd_selfplay(games, seed, random, output.as_deref()),
        Commands::Analyze { board, parallel } => cmd_analyze(&board, parallel),
    }
}
