//! goboard-agents: bot-versus-bot driver.
//!
//! ## Usage
//!
//! - `goboard-agents` - MCTS (Black) against the random bot (White) on 9x9
//! - `goboard-agents selfplay --size 5 --black alpha-beta --white mcts` - Pick the agents
//!
//! Set `RUST_LOG=debug` to see each agent's search summary.

use std::rc::Rc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use goboard_agents::agent::{Agent, RandomBot};
use goboard_agents::alpha_beta::AlphaBetaAgent;
use goboard_agents::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_KOMI, DEFAULT_SEED, MAX_BOARD_SIZE, MCTS_ROUNDS,
    MCTS_TEMPERATURE, SEARCH_DEPTH,
};
use goboard_agents::depth_prune::DepthPrunedAgent;
use goboard_agents::eval::capture_diff;
use goboard_agents::game_state::GameState;
use goboard_agents::mcts::MctsAgent;
use goboard_agents::scoring::{AreaScoring, GameResult};
use goboard_agents::types::Player;

/// goboard-agents: Go search agents playing each other
#[derive(Parser)]
#[command(name = "goboard-agents")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between two agents, printing the board after each move
    Selfplay(SelfplayArgs),
}

#[derive(Args)]
struct SelfplayArgs {
    /// Board size
    #[arg(long, default_value_t = DEFAULT_BOARD_SIZE)]
    size: u8,
    /// Komi for White
    #[arg(long, default_value_t = DEFAULT_KOMI)]
    komi: f32,
    /// Agent playing Black
    #[arg(long, value_enum, default_value_t = AgentKind::Mcts)]
    black: AgentKind,
    /// Agent playing White
    #[arg(long, value_enum, default_value_t = AgentKind::Random)]
    white: AgentKind,
    /// MCTS rounds per move
    #[arg(long, default_value_t = MCTS_ROUNDS)]
    rounds: usize,
    /// MCTS exploration temperature
    #[arg(long, default_value_t = MCTS_TEMPERATURE)]
    temperature: f64,
    /// Search depth for the depth-limited agents
    #[arg(long, default_value_t = SEARCH_DEPTH)]
    depth: u32,
    /// Seed for the agents' random choices
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

impl Default for SelfplayArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            komi: DEFAULT_KOMI,
            black: AgentKind::Mcts,
            white: AgentKind::Random,
            rounds: MCTS_ROUNDS,
            temperature: MCTS_TEMPERATURE,
            depth: SEARCH_DEPTH,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentKind {
    Random,
    Depth,
    AlphaBeta,
    Mcts,
}

fn build_agent(kind: AgentKind, args: &SelfplayArgs, seed: u64) -> Box<dyn Agent> {
    match kind {
        AgentKind::Random => Box::new(RandomBot::new(seed)),
        AgentKind::Depth => Box::new(DepthPrunedAgent::with_rng(
            args.depth,
            capture_diff,
            fastrand::Rng::with_seed(seed),
        )),
        AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::with_rng(
            args.depth,
            capture_diff,
            fastrand::Rng::with_seed(seed),
        )),
        AgentKind::Mcts => Box::new(MctsAgent::new(args.rounds, args.temperature, seed)),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Selfplay(args)) => selfplay(&args),
        None => selfplay(&SelfplayArgs::default()),
    }
}

fn selfplay(args: &SelfplayArgs) -> Result<()> {
    if !(2..=MAX_BOARD_SIZE).contains(&args.size) {
        bail!("board size must be between 2 and {MAX_BOARD_SIZE}, got {}", args.size);
    }

    let referee = AreaScoring::for_board(args.size);
    let referee = AreaScoring {
        komi: args.komi,
        ..referee
    };
    let komi = referee.komi;
    let mut game = GameState::new_game_with_referee(args.size, Rc::new(referee));

    let mut black = build_agent(args.black, args, args.seed);
    let mut white = build_agent(args.white, args, args.seed.wrapping_add(1));
    info!(size = args.size, komi, "starting game");

    while !game.is_over() {
        let player = game.next_player();
        let agent = match player {
            Player::Black => &mut black,
            Player::White => &mut white,
        };
        let mv = agent
            .select_move(&game)
            .with_context(|| format!("{player} failed to select a move"))?;
        println!("{player} {mv}");
        game = game
            .apply_move(mv)
            .with_context(|| format!("{player} played an illegal move: {mv}"))?;
        println!("{}", game.board());
    }

    let result = GameResult::compute(game.board(), komi);
    match game.winner() {
        Some(winner) => println!("winner: {winner} ({result})"),
        None => println!("draw ({result})"),
    }
    info!(moves = game.move_number(), "game over");
    Ok(())
}
