//! Pipe Dash entry point
//!
//! The browser build is driven by a JS host through `platform::web`. Natively
//! this runs a headless attract-mode game with the autopilot and prints the
//! final snapshot. The best score is kept in the per-user data directory.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;
#[cfg(not(target_arch = "wasm32"))]
use pipe_dash::platform::KeyValueStore;
#[cfg(not(target_arch = "wasm32"))]
use pipe_dash::{BestScoreStore, Session, Tuning};

/// Demo frame rate
#[cfg(not(target_arch = "wasm32"))]
const FRAME_MS: f32 = 1000.0 / 60.0;
/// Stop the demo after five minutes of simulated play
#[cfg(not(target_arch = "wasm32"))]
const MAX_FRAMES: u32 = 60 * 60 * 5;
#[cfg(not(target_arch = "wasm32"))]
const SAVE_FILE: &str = "best.json";

/// Headless attract-mode run of Pipe Dash
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file overriding the default gameplay tuning
    #[arg(long, value_name = "PATH")]
    tuning: Option<PathBuf>,
    /// RNG seed; a random one is drawn when omitted
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pipe_dash::platform::{FileStore, MemoryStore};

    env_logger::init();
    let cli = Cli::parse();
    log::info!("Pipe Dash (native) starting...");

    let tuning = cli.tuning.as_deref().map(load_tuning).unwrap_or_default();
    let seed = cli.seed.unwrap_or_else(rand::random);

    match save_path() {
        Some(path) => {
            log::info!("Best score file: {}", path.display());
            run(seed, tuning, FileStore::new(path));
        }
        None => {
            log::warn!("No per-user data directory; the best score will not be kept");
            run(seed, tuning, MemoryStore::new());
        }
    }
}

/// `<data dir>/best.json`, creating the directory if needed
#[cfg(not(target_arch = "wasm32"))]
fn save_path() -> Option<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "pipe-dash")?;
    let data_dir = dirs.data_dir();
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        log::warn!("Could not create {}: {}", data_dir.display(), e);
        return None;
    }
    Some(data_dir.join(SAVE_FILE))
}

#[cfg(not(target_arch = "wasm32"))]
fn run<S: KeyValueStore>(seed: u64, tuning: Tuning, backend: S) {
    use pipe_dash::sim::{GameEvent, GamePhase, autopilot};

    let mut session = Session::new(seed, tuning, BestScoreStore::new(backend));
    log::info!("Game initialized with seed: {}", seed);

    for _ in 0..MAX_FRAMES {
        if autopilot::should_flap(session.state()) {
            session.flap();
        }
        for event in session.tick(FRAME_MS) {
            match event {
                GameEvent::Scored { score } => log::debug!("Score: {}", score),
                GameEvent::NewBest { best } => log::info!("New best: {}", best),
                other => log::debug!("{:?}", other),
            }
        }
        if session.phase() == GamePhase::Ended {
            break;
        }
    }

    let snapshot = session.snapshot();
    println!(
        "Run finished: score {}, best {}{}",
        snapshot.score,
        snapshot.best,
        if snapshot.new_best { " (new best!)" } else { "" }
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &Path) -> Tuning {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Could not read tuning {}: {}; using defaults", path.display(), e);
            return Tuning::default();
        }
    };
    match Tuning::from_json(&json) {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path.display());
            tuning
        }
        Err(e) => {
            log::warn!("{}; using defaults", e);
            Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
