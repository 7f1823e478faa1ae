use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use tile_merge::config::GameConfig;
use tile_merge::game::Game;

#[derive(Debug, Parser)]
#[command(
    name = "simulate",
    about = "Play many random-policy games in parallel and summarise them"
)]
struct Args {
    /// Path to a TOML game configuration
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Number of games to play
    #[arg(long, default_value_t = 1000)]
    games: u64,
    /// Base seed; game i uses seed + i (falls back to the config seed, then 0)
    #[arg(long)]
    seed: Option<u64>,
    /// Stop each game after this many moves
    #[arg(long)]
    max_moves: Option<u64>,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy)]
struct GameResult {
    score: u64,
    moves: u64,
    highest_tile: u64,
}

#[derive(Debug, Serialize)]
struct Summary {
    games: u64,
    rows: usize,
    cols: usize,
    mean_score: f64,
    best_score: u64,
    mean_moves: f64,
    elapsed_s: f64,
    /// Highest tile reached -> number of games.
    highest_tiles: BTreeMap<u64, u64>,
}

/// `--seed` wins over the config file's seed; 0 when neither is set.
fn base_seed(flag: Option<u64>, cfg: &GameConfig) -> u64 {
    flag.or(cfg.seed).unwrap_or(0)
}

fn play_one(cfg: &GameConfig, seed: u64, max_moves: Option<u64>) -> anyhow::Result<GameResult> {
    let mut game = Game::with_rng(cfg, StdRng::seed_from_u64(seed))?;
    while let Some(dir) = game.random_move() {
        game.step(dir);
        if let Some(limit) = max_moves {
            if game.moves() >= limit { break; }
        }
    }
    Ok(GameResult {
        score: game.score(),
        moves: game.moves(),
        highest_tile: game.board().highest_tile(),
    })
}

fn summarise(cfg: &GameConfig, results: &[GameResult], elapsed_s: f64) -> Summary {
    let games = results.len() as u64;
    let denom = (games as f64).max(1.0);
    let mut highest_tiles = BTreeMap::new();
    for r in results {
        *highest_tiles.entry(r.highest_tile).or_insert(0) += 1;
    }
    Summary {
        games,
        rows: cfg.rows,
        cols: cfg.cols,
        mean_score: results.iter().map(|r| r.score as f64).sum::<f64>() / denom,
        best_score: results.iter().map(|r| r.score).max().unwrap_or(0),
        mean_moves: results.iter().map(|r| r.moves as f64).sum::<f64>() / denom,
        elapsed_s,
        highest_tiles,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let cfg = match &args.config {
        Some(path) => GameConfig::from_toml(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = base_seed(args.seed, &cfg);
    info!(
        "simulating {} games on {}x{} (base seed {}, max moves {:?})",
        args.games, cfg.rows, cfg.cols, seed, args.max_moves
    );

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.games);
        pb.set_style(
            ProgressStyle::with_template(concat!(
                "{spinner:.green} [{elapsed_precise}] ",
                "[{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})",
            ))?
            .progress_chars("=>-"),
        );
        pb
    };

    let start = Instant::now();
    let results: Vec<GameResult> = (0..args.games)
        .into_par_iter()
        .map(|i| {
            let r = play_one(&cfg, seed.wrapping_add(i), args.max_moves);
            pb.inc(1);
            r
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    pb.finish_and_clear();

    let summary = summarise(&cfg, &results, start.elapsed().as_secs_f64());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Games: {} | mean score: {:.1} | best score: {} | mean moves: {:.1} | {:.2}s",
            summary.games,
            summary.mean_score,
            summary.best_score,
            summary.mean_moves,
            summary.elapsed_s
        );
        for (tile, count) in &summary.highest_tiles {
            println!("{:>8}: {}", tile, count);
        }
    }
    info!("done in {:.2}s", summary.elapsed_s);
    Ok(())
}
