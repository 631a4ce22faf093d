mod pilot;

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use territory_core::{Color, Difficulty, Match, MatchConfig, ScoreEntry, TICK_RATE};

use crate::pilot::{Pilot, Sweep};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Normal,
    Insane,
}

impl From<DifficultyArg> for Difficulty {
    fn from(d: DifficultyArg) -> Self {
        match d {
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Insane => Difficulty::Insane,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PilotArg {
    /// Human stands still at its spawn
    Idle,
    /// Human sweeps the arena row by row
    Sweep,
}

#[derive(Parser, Debug)]
#[command(name = "territory-host")]
#[command(about = "Run a headless territory-capture match and report the standings")]
struct Args {
    /// JSON match config; flags below override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u32>,

    /// Arena side length in cells (8..=256)
    #[arg(long)]
    grid_size: Option<u32>,

    /// NPC opponents (1..=3)
    #[arg(long)]
    npcs: Option<u32>,

    #[arg(long, value_enum)]
    difficulty: Option<DifficultyArg>,

    /// Human colour as #RRGGBB
    #[arg(long, value_parser = Color::parse)]
    color: Option<Color>,

    /// Match length in seconds
    #[arg(long)]
    duration: Option<u32>,

    #[arg(long, value_enum, default_value = "sweep")]
    pilot: PilotArg,

    /// Pace ticks at 60 Hz instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Write the final snapshot as JSON to this path
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

#[derive(Serialize)]
struct Report {
    seed: u32,
    ticks: u32,
    winner: Option<usize>,
    standings: Vec<ScoreEntry>,
}

fn resolve_config(args: &Args) -> Result<MatchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => MatchConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(size) = args.grid_size {
        config.grid_size = size;
    }
    if let Some(npcs) = args.npcs {
        config.npc_count = npcs;
    }
    if let Some(d) = args.difficulty {
        config.difficulty = d.into();
    }
    if let Some(color) = args.color {
        config.human_color = color;
    }
    if let Some(secs) = args.duration {
        config.duration_secs = secs;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = resolve_config(&args)?;
    let seed = config.seed;
    let mut game = Match::new(config).context("invalid match config")?;

    let mut pilot = match args.pilot {
        PilotArg::Idle => Pilot::Idle,
        PilotArg::Sweep => Pilot::Sweep(Sweep::default()),
    };

    let tick_budget = Duration::from_secs(1) / TICK_RATE;
    let started = Instant::now();
    let mut ticks = 0u32;

    while !game.is_over() {
        let tick_started = Instant::now();
        let intent = pilot.next_intent(game.state());
        let events = game.tick(intent);
        ticks += 1;

        for c in &events.collisions {
            tracing::info!(tick = events.tick, a = c.a, b = c.b, "collision");
        }
        for s in &events.swaps {
            tracing::info!(tick = events.tick, picker = s.picker, target = s.target, "swap");
        }

        if ticks % TICK_RATE == 0 {
            game.countdown_second();
            let state = game.state();
            tracing::debug!(
                remaining = state.remaining_secs,
                leader = ?state.winner(),
                "second elapsed"
            );
        }

        if args.realtime {
            if let Some(rest) = tick_budget.checked_sub(tick_started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let elapsed = started.elapsed();
    tracing::info!(
        ticks,
        elapsed_ms = elapsed.as_millis() as u64,
        "simulation finished"
    );

    let state = game.state();
    let report = Report {
        seed,
        ticks,
        winner: state.winner(),
        standings: state.standings(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("failed to serialize report")?
    );

    if let Some(path) = &args.snapshot_out {
        let json = serde_json::to_vec_pretty(&game.snapshot())
            .context("failed to serialize snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("failed writing snapshot: {}", path.display()))?;
        tracing::info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}
