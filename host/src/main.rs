use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use host::{ConsoleUi, FileRemote};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tycoon::{Game, Player, Remote};

#[derive(Parser)]
struct Args {
    /// Path to the board configuration JSON (bottom/left/top/right bands)
    #[arg(short, long)]
    board: PathBuf,

    /// Players as nick[:country[:color]], two or more
    #[clap(num_args(2..), value_delimiter = ' ')]
    players: Vec<String>,

    /// Path to the countries JSON, used to validate player countries
    #[arg(long)]
    countries: Option<PathBuf>,

    /// Append submitted scores to this JSON ledger
    #[arg(long)]
    scores: Option<PathBuf>,

    /// How many turns to play before the game is ended and scored
    #[arg(short, long, default_value_t = 50)]
    turns: u64,

    /// Decide purchases and construction automatically instead of prompting
    #[arg(short, long, default_value_t = false)]
    auto: bool,

    /// Milliseconds between movement steps (0 disables pacing)
    #[arg(long, default_value_t = 180)]
    step_delay_ms: u64,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn parse_player(id: u32, spec: &str) -> Player {
    let mut parts = spec.splitn(3, ':');
    let nick = parts.next().unwrap_or("player");
    let country = parts.next().unwrap_or("XX");
    let color = parts.next().unwrap_or("#ffffff");
    Player::new(id, nick, country, color)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    let mut remote = FileRemote::new(args.board, args.countries, args.scores);

    let players: Vec<Player> = args
        .players
        .iter()
        .enumerate()
        .map(|(id, spec)| parse_player(id as u32, spec))
        .collect();
    anyhow::ensure!(players.len() >= 2, "a game needs at least two players");

    let countries = remote.fetch_countries()?;
    if !countries.is_empty() {
        for player in &players {
            anyhow::ensure!(
                countries.iter().any(|c| c.code == player.country),
                "unknown country code '{}' for player {}",
                player.country,
                player.nick
            );
        }
    }

    let ui = ConsoleUi::new(args.auto, Duration::from_millis(args.step_delay_ms));
    let mut game = Game::new(players, ui, remote, rng)?;

    for _ in 0..args.turns {
        if game.ended() {
            break;
        }
        game.roll_and_move(None);
    }

    let standings = game.end_game();
    let winner = standings.first().expect("at least two players finished");
    println!("\nWinner: {} with {}", winner.nick, winner.score);

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
