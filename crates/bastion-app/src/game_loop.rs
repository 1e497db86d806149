//! Game loop thread: runs the simulation engine at 60Hz and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::info;

use bastion_core::constants::{FRAME_DT, FRAME_RATE};
use bastion_core::state::GameStateSnapshot;
use bastion_sim::engine::{SimConfig, SimulationEngine};

use crate::error::AppError;
use crate::state::GameLoopCommand;

/// Wall-clock duration of one frame. Time scale changes simulated time
/// per frame, not the frame rate.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>), AppError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || {
            let engine = SimulationEngine::new(config);
            run_game_loop(engine, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: SimulationEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut next_frame_time = Instant::now();
    let mut hud = HudClock::default();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one frame (engine handles pause and terminal phases)
        let snapshot = engine.tick(FRAME_DT);

        // 3. Summarize once per simulated second
        if hud.due(&snapshot) {
            log_hud(&snapshot);
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}

/// Tracks whole simulated seconds already reported.
#[derive(Debug, Default)]
struct HudClock {
    reported: u64,
}

impl HudClock {
    fn due(&mut self, snapshot: &GameStateSnapshot) -> bool {
        let whole = snapshot.time.elapsed_secs.floor() as u64;
        if whole > self.reported {
            self.reported = whole;
            true
        } else {
            false
        }
    }
}

fn log_hud(snapshot: &GameStateSnapshot) {
    let hud = &snapshot.hud;
    info!(
        phase = ?snapshot.phase,
        wave = hud.wave,
        enemies = hud.enemies_remaining,
        scrap = hud.scrap,
        objective_hp = snapshot.objective.hp,
        intermission = ?hud.intermission_remaining,
        difficulty = %hud.difficulty_label,
        time_scale = hud.time_scale,
        "hud"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::commands::PlayerCommand;
    use bastion_core::enums::GamePhase;

    #[test]
    fn test_loop_drains_queued_commands_before_first_frame() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Player(PlayerCommand::StartNewGame))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::AdjustTimeScale { steps: 2 }))
            .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::TogglePause))
            .unwrap();

        let latest = Arc::new(Mutex::new(None));
        let published = Arc::clone(&latest);
        let handle = std::thread::spawn(move || {
            let engine = SimulationEngine::new(SimConfig::default());
            run_game_loop(engine, rx, &published);
        });

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut first: Option<GameStateSnapshot> = None;
        while first.is_none() && Instant::now() < deadline {
            first = latest.lock().unwrap().clone();
            std::thread::sleep(Duration::from_millis(5));
        }
        let first = first.expect("loop should publish a snapshot");

        // All three commands landed before the first frame ran.
        assert_eq!(first.phase, GamePhase::Paused);
        assert_eq!(first.hud.time_scale, 1.5);
        assert_eq!(first.time.frame, 0);
        assert_eq!(first.units.len(), 6);

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_snapshot_serializes_with_projectiles_in_flight() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        engine.queue_command(PlayerCommand::StartNewGame);

        // Run enough frames to get projectiles in flight
        for _ in 0..120 {
            engine.step();
        }

        let snapshot = engine.step();
        let json = serde_json::to_string(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["units"].as_array().map(Vec::len), Some(6));
        assert_eq!(
            value["projectiles"].as_array().map(Vec::len),
            Some(snapshot.projectiles.len())
        );
        assert_eq!(value["hud"]["wave"], 1);
        assert!(value["objective"]["upgrades"].is_object());
    }

    #[test]
    fn test_pause_resume_via_commands() {
        let mut engine = SimulationEngine::new(SimConfig::default());

        engine.queue_command(PlayerCommand::StartNewGame);
        let snap = engine.step();
        assert_eq!(snap.phase, GamePhase::Active);

        engine.queue_command(PlayerCommand::TogglePause);
        let snap = engine.step();
        assert_eq!(snap.phase, GamePhase::Paused);
        let paused_frame = snap.time.frame;

        // Frames while paused do not advance simulated time
        let snap = engine.step();
        assert_eq!(snap.time.frame, paused_frame);

        engine.queue_command(PlayerCommand::TogglePause);
        let snap = engine.step();
        assert_eq!(snap.phase, GamePhase::Active);
        assert!(snap.time.frame > paused_frame);
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_hud_clock_fires_once_per_second() {
        let mut clock = HudClock::default();
        let mut snapshot = GameStateSnapshot::default();
        let mut fired = 0;
        for _ in 0..150 {
            snapshot.time.advance(FRAME_DT);
            if clock.due(&snapshot) {
                fired += 1;
            }
        }
        assert_eq!(fired, 2);
    }

    #[test]
    fn test_loop_thread_publishes_and_stops() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(SimConfig::default(), Arc::clone(&latest)).unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::StartNewGame))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut active = false;
        while Instant::now() < deadline {
            let phase = latest.lock().unwrap().as_ref().map(|s: &GameStateSnapshot| s.phase);
            if phase == Some(GamePhase::Active) {
                active = true;
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert!(active, "loop should start the game");

        tx.send(GameLoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }
}
