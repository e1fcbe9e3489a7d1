//! Swarm Shooter entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively there is no renderer: this runs a headless session with a simple
//! autopilot and logs what happens, which is handy for balance checks.
//!
//! Usage: `swarm-shooter [seed] [frames]`, with an optional tuning document
//! in the `SWARM_TUNING` environment variable (path to a JSON file).
//! `swarm-shooter --print-tuning` writes the default tuning document to
//! stdout as a starting point for such a file.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use swarm_shooter::sim::{GameEvent, GamePhase, RenderSnapshot, Simulation, TickInput, Viewport};
    use swarm_shooter::Tuning;

    /// Fixed frame time (ms), roughly 60 Hz
    const FRAME_MS: f32 = 16.0;
    /// Default session length (~10 minutes of play)
    const DEFAULT_FRAMES: u64 = 60 * 60 * 10;
    /// Autopilot shoots every this many frames
    const FIRE_INTERVAL: u64 = 6;
    /// Autopilot backs off from threats closer than this
    const PANIC_RADIUS: f32 = 150.0;

    pub fn run() {
        let mut args = std::env::args().skip(1).peekable();
        if args.peek().is_some_and(|a| a == "--print-tuning") {
            print_tuning();
            return;
        }
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
        let frames = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_FRAMES);

        let tuning_doc = std::env::var("SWARM_TUNING").ok().and_then(|path| {
            std::fs::read_to_string(&path)
                .map_err(|e| log::warn!("Could not read tuning file {path}: {e}"))
                .ok()
        });
        let tuning = Tuning::load_or_default(tuning_doc.as_deref());

        let mut sim = Simulation::with_tuning(Viewport::new(1280.0, 720.0), seed, tuning);
        log::info!("Running {} frames with seed {}", frames, sim.seed());
        let mut input = TickInput::default();
        let mut frame = 0;

        while frame < frames {
            let snapshot = sim.step(FRAME_MS, &input);
            for event in sim.drain_events() {
                log_event(frame, &event);
            }
            if sim.is_over() {
                break;
            }
            input = autopilot(&snapshot, frame);
            frame += 1;
        }

        let snapshot = sim.snapshot();
        log::info!(
            "Session over after {} frames (seed {}): round {}, {} kills, health {}/{}{}",
            frame,
            sim.seed(),
            snapshot.round,
            snapshot.total_kills,
            snapshot.player.health,
            snapshot.player.max_health,
            if snapshot.game_over { " (dead)" } else { "" }
        );
    }

    fn print_tuning() {
        match Tuning::default().to_json() {
            Ok(doc) => println!("{doc}"),
            Err(e) => log::error!("Could not serialize default tuning: {e}"),
        }
    }

    fn log_event(frame: u64, event: &GameEvent) {
        match event {
            GameEvent::EnemyKilled { .. } => {}
            GameEvent::PlayerHit { health } => log::info!("[{frame}] player hit, health {health}"),
            GameEvent::BossSpawned { round, health } => {
                log::info!("[{frame}] boss for round {round} arrives ({health} hp)")
            }
            GameEvent::BossDefeated { round } => log::info!("[{frame}] round {round} boss down"),
            GameEvent::UpgradeChosen(kind) => log::info!("[{frame}] took {}", kind.label()),
            GameEvent::RoundStarted { round } => log::info!("[{frame}] round {round} begins"),
            GameEvent::PlayerDied { round, total_kills } => {
                log::info!("[{frame}] player died in round {round} ({total_kills} kills)")
            }
        }
    }

    /// Aim at the closest threat, back away when it gets close, take the
    /// first upgrade offered
    fn autopilot(snapshot: &RenderSnapshot, frame: u64) -> TickInput {
        if snapshot.phase == GamePhase::UpgradeSelect {
            return TickInput {
                select_at: snapshot.upgrades.first().map(|card| {
                    Vec2::new(
                        card.slot.x + card.slot.width / 2.0,
                        card.slot.y + card.slot.height / 2.0,
                    )
                }),
                ..Default::default()
            };
        }

        let me = snapshot.player.pos;
        let threat = snapshot
            .enemies
            .iter()
            .map(|e| e.pos)
            .chain(snapshot.boss.iter().map(|b| b.pos))
            .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me)));

        let Some(threat) = threat else {
            return TickInput::default();
        };

        let mut input = TickInput {
            fire_at: (frame % FIRE_INTERVAL == 0).then_some(threat),
            ..Default::default()
        };
        if threat.distance(me) < PANIC_RADIUS {
            let away = me - threat;
            input.left = away.x < 0.0;
            input.right = away.x > 0.0;
            input.up = away.y < 0.0;
            input.down = away.y > 0.0;
        }
        input
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Swarm Shooter (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
