//! Tilerunner headless runner.
//!
//! Plays one or more level files at a fixed tick rate with no window:
//! - **bevy_ecs** holds the world and runs the per-tick schedule
//! - **configparser** reads tuning from `config.ini`
//! - **serde_json** reads an optional input script
//!
//! # Main Loop
//!
//! 1. Load `config.ini` (defaults when missing) and parse every level file
//! 2. Build the world, start the audio thread and load the first level
//! 3. For each tick: sample the script, run [`game::step`], log progress
//! 4. Stop the audio thread on exit
//!
//! # Input scripts
//!
//! A script is a JSON array of spans. Each span holds its input for `ticks`
//! ticks; after the last span the input is released.
//!
//! ```json
//! [
//!   { "ticks": 30, "move_right": true },
//!   { "ticks": 5, "move_right": true, "jump": true },
//!   { "ticks": 60 }
//! ]
//! ```
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- assets/levels/0.txt --inputs run.json
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::message::Messages;
use clap::Parser;
use log::{debug, info, warn};
use serde::Deserialize;

use tilerunner::events::audio::{AudioCmd, sounds};
use tilerunner::game::{self, ContinueAction};
use tilerunner::level::LevelLayout;
use tilerunner::resources::audio::{setup_audio, shutdown_audio};
use tilerunner::resources::gameconfig::GameConfig;
use tilerunner::resources::input::TickInput;
use tilerunner::resources::levelplaylist::LevelPlaylist;
use tilerunner::resources::levelstate::LevelState;

/// Ticks simulated when neither `--ticks` nor a script says otherwise.
const DEFAULT_SECONDS: u64 = 10;

/// Tilerunner headless simulation
#[derive(Parser)]
#[command(version, about = "Runs tile platformer levels headless at a fixed tick rate.")]
struct Cli {
    /// Level files, played in order and cycled after the last one.
    #[arg(required = true, value_name = "LEVEL")]
    levels: Vec<PathBuf>,

    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Number of ticks to simulate. Defaults to the length of the input
    /// script, or ten seconds without one.
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,

    /// JSON input script.
    #[arg(long, value_name = "SCRIPT.json")]
    inputs: Option<PathBuf>,
}

/// One stretch of constant input.
#[derive(Debug, Deserialize)]
struct InputSpan {
    ticks: u64,
    #[serde(flatten)]
    input: TickInput,
}

fn load_script(path: &Path) -> Result<Vec<InputSpan>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))
}

fn input_at(script: &[InputSpan], tick: u64) -> TickInput {
    let mut start = 0;
    for span in script {
        if tick < start + span.ticks {
            return span.input;
        }
        start += span.ticks;
    }
    TickInput::default()
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = GameConfig::with_path(cli.config.clone());
    if let Err(e) = config.load_from_file() {
        warn!("Using default configuration: {}", e);
    }
    let dt = config.fixed_delta();

    let mut layouts = Vec::with_capacity(cli.levels.len());
    for path in &cli.levels {
        let layout = LevelLayout::load_from_file(path).map_err(|e| format!("{}: {}", path.display(), e))?;
        layouts.push(layout);
    }
    let playlist = LevelPlaylist::new(layouts).ok_or("no levels given")?;

    let script = match &cli.inputs {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    let ticks = cli.ticks.unwrap_or_else(|| {
        if script.is_empty() {
            DEFAULT_SECONDS * config.fps as u64
        } else {
            script.iter().map(|span| span.ticks).sum()
        }
    });
    let fps = config.fps.max(1) as u64;

    let mut world = game::init_world(config);
    if let Err(e) = setup_audio(&mut world) {
        warn!("Running without audio sink: {}", e);
    }
    world
        .resource_mut::<Messages<AudioCmd>>()
        .write(AudioCmd::PlayMusic {
            id: sounds::MUSIC.to_string(),
            looped: true,
        });
    game::start_playlist(&mut world, playlist).map_err(|e| e.to_string())?;

    let mut update = game::build_update_schedule();
    update
        .initialize(&mut world)
        .map_err(|e| format!("Failed to initialize schedule: {e}"))?;

    info!("running {} ticks at {} fps", ticks, fps);
    let mut result = Ok(());
    for tick in 0..ticks {
        match game::step(&mut world, &mut update, dt, input_at(&script, tick)) {
            Ok(ContinueAction::None) => {}
            Ok(action) => info!("tick {}: {:?}", tick, action),
            Err(e) => {
                result = Err(e.to_string());
                break;
            }
        }
        if tick % fps == 0 {
            let level = world.resource::<LevelState>();
            debug!(
                "tick {}: level {} time {:.1}s score {}",
                tick,
                level.level_index(),
                level.time_remaining(),
                level.score()
            );
        }
    }

    let level = world.resource::<LevelState>();
    info!(
        "stopped on level {} with {:.1}s left, score {}, exit reached: {}",
        level.level_index(),
        level.time_remaining(),
        level.score(),
        level.reached_exit()
    );
    shutdown_audio(&mut world);
    result
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
