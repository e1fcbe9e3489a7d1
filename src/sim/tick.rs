//! Per-frame simulation step
//!
//! The host calls [`Simulation::step`] once per animation frame with the
//! elapsed time and the current input. Combat frames run movement, spawning,
//! collision and the boss trigger in that order; selection frames only look
//! at the selection gesture.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::Viewport;
use super::snapshot::RenderSnapshot;
use super::state::{Bullet, GameEvent, GamePhase, GameState};
use super::{combat, movement, progression, spawner};
use crate::tuning::Tuning;

/// Input state for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire one bullet toward this screen point
    pub fire_at: Option<Vec2>,
    /// Click/tap while choosing an upgrade
    pub select_at: Option<Vec2>,
}

/// Advance the game state by one frame
///
/// `elapsed` is the time since the previous frame in spawn-clock units
/// (milliseconds). Does nothing once the run is over.
pub fn tick<R: Rng>(state: &mut GameState, input: &TickInput, elapsed: f32, rng: &mut R) {
    if state.game_over {
        return;
    }
    state.frame += 1;

    match state.phase {
        GamePhase::UpgradeSelect => {
            if let Some(point) = input.select_at {
                progression::select_upgrade(state, point);
            }
        }

        GamePhase::Combat => {
            movement::move_player(state, input);
            movement::move_bullets(state);
            if let Some(target) = input.fire_at {
                fire(state, target);
            }
            movement::move_enemies(state);
            movement::move_boss(state, elapsed);

            if !state.player.is_alive() {
                state.purge();
                end_run(state);
                return;
            }

            spawner::update(state, elapsed, rng);

            let outcome = combat::resolve_bullet_hits(state);
            state.purge();

            if outcome.boss_defeated {
                progression::begin_upgrade_select(state, rng);
            }
        }
    }
}

/// Spawn a bullet from the player toward `target`
fn fire(state: &mut GameState, target: Vec2) {
    let id = state.next_entity_id();
    if let Some(bullet) = Bullet::fire(id, &state.player, target, state.tuning.bullet_size) {
        state.bullets.push(bullet);
    }
}

/// Mark the run finished and raise the terminal event
fn end_run(state: &mut GameState) {
    state.game_over = true;
    state.events.push(GameEvent::PlayerDied {
        round: state.round.round,
        total_kills: state.round.total_kills,
    });
    log::info!(
        "Player died in round {} after {} kills",
        state.round.round,
        state.round.total_kills
    );
}

/// One game session: state plus its seeded RNG
///
/// A finished session stays finished; the host starts over with a new
/// `Simulation` rather than resetting this one.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: GameState,
    rng: Pcg32,
    seed: u64,
}

impl Simulation {
    /// New session with default tuning
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        Self::with_tuning(viewport, seed, Tuning::default())
    }

    /// New session with custom balance
    pub fn with_tuning(viewport: Viewport, seed: u64, tuning: Tuning) -> Self {
        log::info!(
            "New session {}x{} with seed {}",
            viewport.width,
            viewport.height,
            seed
        );
        Self {
            state: GameState::new(viewport, tuning.sanitized()),
            rng: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Advance one frame and return what to draw
    pub fn step(&mut self, elapsed: f32, input: &TickInput) -> RenderSnapshot {
        tick(&mut self.state, input, elapsed, &mut self.rng);
        self.snapshot()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    /// Host viewport changed; keep the player on screen
    pub fn resize(&mut self, viewport: Viewport) {
        self.state.viewport = viewport;
        let player = &mut self.state.player;
        player.pos = viewport.clamp_square(player.pos, player.size);
        log::debug!("Viewport resized to {}x{}", viewport.width, viewport.height);
    }

    /// Whether the player has died
    pub fn is_over(&self) -> bool {
        self.state.game_over
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios in tests
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
