//! Brickfall headless runner
//!
//! Plays levels back to back with the paddle in idle mode, carrying the score
//! from one level to the next and stopping at the first loss.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use brickfall::render::{AsciiSurface, Drawable};
use brickfall::sim::{GamePhase, GameState, TickInput, run_level};
use brickfall::{LevelInfo, Result, Settings};

#[derive(Parser, Debug)]
#[command(name = "brickfall")]
#[command(about = "Play Brickfall levels headless with the paddle on autopilot")]
struct Args {
    /// Built-in levels to play in order (1 = Direct Hit, 2 = Wide Easy, 3 = Green 3)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=3))]
    levels: Vec<u8>,

    /// JSON file holding one level or a list of levels
    #[arg(long)]
    level_file: Option<PathBuf>,

    /// Add a randomly generated level from this seed
    #[arg(long)]
    random: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Frame limit per level (overrides settings)
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Print the last frame of each level as ASCII art
    #[arg(long)]
    ascii: bool,
}

const ASCII_COLS: usize = 80;
const ASCII_ROWS: usize = 30;

fn collect_levels(args: &Args) -> Result<Vec<LevelInfo>> {
    let mut levels: Vec<LevelInfo> = args
        .levels
        .iter()
        .filter_map(|&n| LevelInfo::by_number(n as usize))
        .collect();
    if let Some(path) = &args.level_file {
        levels.extend(LevelInfo::load(path)?);
    }
    if let Some(seed) = args.random {
        levels.push(LevelInfo::generated(seed));
    }
    if levels.is_empty() {
        levels = LevelInfo::builtin();
    }
    Ok(levels)
}

fn run(args: Args) -> Result<bool> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let max_ticks = args.max_ticks.unwrap_or(settings.max_ticks);
    let levels = collect_levels(&args)?;

    log::info!("Brickfall starting: {} level(s)", levels.len());

    let mut score = 0;
    for level in &levels {
        let mut state = GameState::from_level(level, &settings, score);
        let phase = run_level(&mut state, max_ticks, |_| TickInput {
            idle_mode: true,
            ..Default::default()
        });
        score = state.score;

        println!(
            "{:<16} {:<9} ticks {:>6}  blocks left {:>3}  score {}",
            state.level_name,
            format!("{phase:?}"),
            state.time_ticks,
            state.remaining_blocks,
            state.score
        );
        if args.ascii {
            let mut surface = AsciiSurface::new(
                settings.screen_width,
                settings.screen_height,
                ASCII_COLS,
                ASCII_ROWS,
            );
            state.draw_on(&mut surface);
            print!("{surface}");
        }

        if phase != GamePhase::Cleared {
            if phase != GamePhase::GameOver {
                log::warn!("Tick limit reached on '{}'", state.level_name);
            }
            println!("Final score: {score}");
            return Ok(false);
        }
    }

    println!("All levels cleared! Final score: {score}");
    Ok(true)
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}
