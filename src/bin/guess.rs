use clap::Parser;
use log::{error, info};

use mystery_guess::config::ConfigStore;
use mystery_guess::game::{MatchBuilder, MatchObserver, RoundReport};
use mystery_guess::players::HumanPlayer;
use mystery_guess::{GameConfig, Level, MatchSummary};

/// Guess the mystery number against automated players.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Your display name
    #[clap(short, long, default_value = "Bill")]
    name: String,
    /// Number of automated opponents
    #[clap(short, long, default_value = "1")]
    bots: usize,
    /// Difficulty level (0-100); level L spans ±2^(5+L)
    #[clap(short, long)]
    level: Option<u8>,
    /// Seed for the mystery and the bots (random if omitted)
    #[clap(short, long)]
    seed: Option<u64>,
    /// Only bots play; watch them converge
    #[clap(short, long)]
    zero_player: bool,
    /// Give up after this many rounds
    #[clap(short, long)]
    max_rounds: Option<u32>,
}

/// Prints each round to stdout.
struct ConsoleObserver;

impl MatchObserver for ConsoleObserver {
    fn on_start(&mut self, level: &Level, _player_count: usize) {
        println!("LEVEL {}! Range {} to {}", level.id(), level.lower(), level.upper());
    }

    fn on_round(&mut self, report: &RoundReport) {
        println!("Turn {}", report.turn);
        for entry in &report.entries {
            println!("{}", entry);
        }
        println!();
    }

    fn on_end(&mut self, summary: &MatchSummary) {
        println!("{}", summary);
        if summary.has_winner() {
            println!("Mystery number was {}, found by {}", summary.mystery, summary.winner_names.join(", "));
        } else {
            println!("Mystery number was {}", summary.mystery);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let store = ConfigStore::with_defaults();
    let mut config = GameConfig::from_store(&store)?;

    let default_filter = if config.is_debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    if let Some(level) = args.level {
        config = config.with_level(level);
    }
    config = config.with_seed(args.seed.unwrap_or_else(rand::random));
    if let Some(rounds) = args.max_rounds {
        config = config.with_max_rounds(rounds);
    }
    info!("seed {}", config.seed);

    let mut builder = MatchBuilder::new(config).quiet().observer(Box::new(ConsoleObserver));
    let bots = if args.zero_player {
        args.bots.max(1)
    } else {
        builder = builder.player(HumanPlayer::console(args.name));
        args.bots
    };
    let mut engine = builder.bots(bots).build()?;

    match engine.start() {
        Ok(_) => Ok(()),
        Err(err) => {
            error!("match failed: {}", err);
            Err(err.into())
        }
    }
}
