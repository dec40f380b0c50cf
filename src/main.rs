//! Stompcore headless runner.
//!
//! Drives the simulation for a fixed number of frames with scripted or
//! seeded-random input and logs every gameplay event. Useful for checking
//! level files and tuning changes without a renderer.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --level levels/intro.json --frames 1200
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, error, info, warn};

use stompcore::components::character::Character;
use stompcore::events::simulation::SimEvent;
use stompcore::game::Game;
use stompcore::resources::gameconfig::GameConfig;
use stompcore::resources::gamestate::GameStates;
use stompcore::resources::input::{Action, HeldActions};
use stompcore::resources::leveldata::LevelData;

/// Headless platformer simulation runner
#[derive(Parser)]
#[command(version, about = "Runs the stompcore simulation without a window.")]
struct Cli {
    /// Tuning file (INI). Defaults are used when missing or invalid.
    #[arg(long, value_name = "PATH", default_value = "stompcore.ini")]
    config: PathBuf,

    /// Level file (JSON). The built-in demo level is used when omitted.
    #[arg(long, value_name = "PATH")]
    level: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    frames: u32,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Starting character: striker, hacker or brawler.
    #[arg(long, default_value = "striker")]
    character: Character,

    /// Drive input from a seeded random generator instead of the fixed script.
    #[arg(long)]
    seed: Option<u64>,
}

/// Fixed input pattern: run right, hop regularly, attack and use the ability now and then.
fn scripted_input(frame: u32) -> HeldActions {
    let mut held = HeldActions::none().with(Action::MoveRight);
    held.set(Action::Jump, frame % 45 < 12);
    held.set(Action::Attack, frame % 90 == 30);
    held.set(Action::Ability, frame % 120 == 60);
    held.set(Action::Dash, frame % 150 == 100);
    held
}

/// Random input that mostly keeps the previous frame's buttons.
fn random_input(rng: &mut fastrand::Rng, previous: HeldActions) -> HeldActions {
    let mut held = previous;
    for action in Action::ALL {
        if rng.f32() < 0.08 {
            held.set(action, rng.bool());
        }
    }
    held
}

fn load_level(path: &Path) -> Option<LevelData> {
    match LevelData::load_from_file(path) {
        Ok(level) => Some(level),
        Err(e) => {
            error!("Failed to load level {}: {}", path.display(), e);
            None
        }
    }
}

fn log_event(frame: u32, event: &SimEvent) {
    match event {
        SimEvent::Died | SimEvent::Respawned | SimEvent::LevelCompleted => {
            info!("[{frame:05}] {:?}", event)
        }
        _ => debug!("[{frame:05}] {:?}", event),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("Using default tuning: {}", e);
    }

    let level = match &cli.level {
        Some(path) => match load_level(path) {
            Some(level) => level,
            None => std::process::exit(1),
        },
        None => LevelData::demo(),
    };
    let level_dir = cli
        .level
        .as_ref()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_default();

    let mut game = Game::new(config, cli.character);
    game.load_level(&level);

    let dt = if cli.fps > 0.0 { 1.0 / cli.fps } else { 1.0 / 60.0 };
    let mut rng = cli.seed.map(fastrand::Rng::with_seed);
    let mut held = HeldActions::none();

    let mut deaths = 0u32;
    let mut kills = 0u32;
    let mut levels_completed = 0u32;

    for frame in 0..cli.frames {
        held = match rng.as_mut() {
            Some(rng) => random_input(rng, held),
            None => scripted_input(frame),
        };

        let events = game.step(dt, &held);
        for event in events.iter() {
            log_event(frame, event);
        }
        deaths += events.count(|e| matches!(e, SimEvent::Died)) as u32;
        kills += events.count(|e| {
            matches!(
                e,
                SimEvent::EnemyStomped { .. } | SimEvent::EnemyKilled { .. }
            )
        }) as u32;

        if game.state() == GameStates::LevelComplete {
            levels_completed += 1;
            let Some(next) = game.next_level().map(|name| level_dir.join(name)) else {
                info!("No further level after '{}'", game.level_name());
                break;
            };
            if !next.exists() {
                warn!("Next level {} does not exist", next.display());
                break;
            }
            match load_level(&next) {
                Some(next_level) => game.load_level(&next_level),
                None => break,
            }
        }
    }

    let time = game.time();
    info!(
        "Simulated {} frames ({:.2}s): {} levels completed, {} enemies defeated, {} deaths",
        time.frame_count, time.elapsed, levels_completed, kills, deaths
    );
    if let Some(actor) = game.actor() {
        info!(
            "Actor {:?} ended at {:?} with {} health",
            actor.character(),
            actor.body.pos,
            actor.health
        );
    }
}
