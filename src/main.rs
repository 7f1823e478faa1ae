use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;
use tile_merge::config::GameConfig;
use tile_merge::engine::Move;
use tile_merge::game::Game;

#[derive(Debug, Parser)]
#[command(
    name = "tile-merge",
    version,
    about = "Play the sliding-tile merge puzzle in the terminal"
)]
struct Args {
    /// Path to a TOML game configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Board rows (overrides the config file)
    #[arg(long)]
    rows: Option<usize>,
    /// Board columns (overrides the config file)
    #[arg(long)]
    cols: Option<usize>,
    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

fn load_config(args: &Args) -> anyhow::Result<GameConfig> {
    let mut cfg = match &args.config {
        Some(path) => GameConfig::from_toml(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(rows) = args.rows { cfg.rows = rows; }
    if let Some(cols) = args.cols { cfg.cols = cols; }
    if args.seed.is_some() { cfg.seed = args.seed; }
    cfg.validate()?;
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let cfg = load_config(&args)?;
    info!("starting {}x{} game (seed {:?})", cfg.rows, cfg.cols, cfg.seed);

    let mut game = Game::new(&cfg)?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut out = io::stdout();

    loop {
        writeln!(out, "\n{}", game.board())?;
        writeln!(out, "Score: {}", game.score())?;
        if game.is_over() {
            writeln!(out, "GAME OVER! No moves left.")?;
            break;
        }
        write!(out, "Move (w/a/s/d, q to quit): ")?;
        out.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line.context("reading input")?;
        let input = line.trim();
        if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        match input.parse::<Move>() {
            Ok(dir) => {
                game.step(dir);
            }
            Err(e) => writeln!(out, "{e}")?,
        }
    }

    writeln!(out, "Final score: {} in {} moves", game.score(), game.moves())?;
    Ok(())
}
