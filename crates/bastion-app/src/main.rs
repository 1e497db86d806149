use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use bastion_app::game_loop::spawn_game_loop;
use bastion_app::state::AppState;
use bastion_app::AppError;
use bastion_core::commands::PlayerCommand;
use bastion_core::config::SimParams;
use bastion_core::enums::Difficulty;
use bastion_sim::engine::SimConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Bastion wave-defense simulation", long_about = None)]
struct Cli {
    /// RNG seed. The same seed and the same commands replay the same session.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// casual, normal or hard.
    #[arg(long, default_value = "normal", value_parser = parse_difficulty)]
    difficulty: Difficulty,
    /// Wall-clock seconds to run before shutting down.
    #[arg(long, default_value_t = 30)]
    seconds: u64,
    /// Initial time scale, snapped to the nearest quarter step.
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,
    /// JSON file overriding the built-in simulation parameters.
    #[arg(long)]
    params: Option<PathBuf>,
}

fn parse_difficulty(value: &str) -> Result<Difficulty, String> {
    Difficulty::parse(value).ok_or_else(|| format!("unknown difficulty `{value}`"))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let params = match &cli.params {
        Some(path) => SimParams::from_file(path)?,
        None => SimParams::builtin(),
    };
    let config = SimConfig {
        seed: cli.seed,
        difficulty: cli.difficulty,
        time_scale: cli.time_scale,
        params,
    };
    info!(seed = cli.seed, difficulty = cli.difficulty.label(), seconds = cli.seconds, "starting");

    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(config, Arc::clone(&state.latest_snapshot))?;
    state.attach(tx);
    state.send(PlayerCommand::StartNewGame)?;

    std::thread::sleep(Duration::from_secs(cli.seconds));

    state.shutdown();
    handle.join().map_err(|_| AppError::LoopPanicked)?;

    if let Some(snapshot) = state.latest() {
        info!(
            phase = ?snapshot.phase,
            wave = snapshot.hud.wave,
            scrap = snapshot.hud.scrap,
            simulated_secs = snapshot.time.elapsed_secs,
            "session ended"
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "bastion failed");
            ExitCode::FAILURE
        }
    }
}
