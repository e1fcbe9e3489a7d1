//! Enemy and boss creation
//!
//! Enemies are time-gated through an accumulator; the boss is triggered by
//! the round's kill counter.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Boss, Enemy, GameEvent, GameState};

/// Spawn clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Time-units accumulated since the last spawn attempt
    pub accumulator: f32,
}

impl Spawner {
    /// Accumulate frame time. Returns true when a spawn attempt is due,
    /// in which case the accumulator restarts from zero.
    pub fn advance(&mut self, elapsed: f32, rate: f32) -> bool {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }
        if self.accumulator > rate {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }
}

/// Spawn one enemy at a random on-screen position if below the population cap
///
/// Only live enemies count toward the cap; enemies killed earlier in the frame
/// are still waiting for the purge. Returns the new enemy's id.
pub fn spawn_enemy<R: Rng>(state: &mut GameState, rng: &mut R) -> Option<u32> {
    let live = state.enemies.iter().filter(|e| e.alive).count();
    if live >= state.round.max_enemies {
        return None;
    }

    let pos = state.viewport.point_at(rng.random::<f32>(), rng.random::<f32>());
    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(
        id,
        pos,
        state.tuning.enemy_size,
        state.tuning.enemy_health,
    ));
    log::debug!("Spawned enemy {} at ({:.0}, {:.0})", id, pos.x, pos.y);
    Some(id)
}

/// Put the round boss in the middle of the screen
///
/// Replaces any existing boss and restarts the kill counter.
pub fn spawn_boss(state: &mut GameState) {
    let size = state.tuning.boss_size;
    let pos = state
        .viewport
        .clamp_square(state.viewport.center() - Vec2::splat(size / 2.0), size);
    let health = state.round.boss_health;

    state.boss = Some(Boss::new(pos, size, health));
    state.round.kill_count = 0;
    state.events.push(GameEvent::BossSpawned {
        round: state.round.round,
        health,
    });
    log::info!("Round {} boss spawned with {} health", state.round.round, health);
}

/// Run the spawner for one combat frame
pub fn update<R: Rng>(state: &mut GameState, elapsed: f32, rng: &mut R) {
    if state.spawner.advance(elapsed, state.tuning.enemy_spawn_rate) {
        spawn_enemy(state, rng);
    }

    if state.boss.is_none() && state.round.kill_count >= state.tuning.boss_kill_threshold {
        spawn_boss(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Viewport;
    use crate::tuning::Tuning;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn state() -> GameState {
        GameState::new(Viewport::new(800.0, 600.0), Tuning::default())
    }

    #[test]
    fn test_accumulator_fires_strictly_after_rate() {
        let mut spawner = Spawner::default();
        assert!(!spawner.advance(1000.0, 2000.0));
        assert!(!spawner.advance(1000.0, 2000.0)); // exactly 2000 is not "exceeds"
        assert!(spawner.advance(1.0, 2000.0));
        assert_eq!(spawner.accumulator, 0.0);
    }

    #[test]
    fn test_accumulator_ignores_bad_frame_times() {
        let mut spawner = Spawner::default();
        spawner.advance(-50.0, 2000.0);
        spawner.advance(f32::NAN, 2000.0);
        assert_eq!(spawner.accumulator, 0.0);
    }

    #[test]
    fn test_spawn_respects_cap() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..50 {
            spawn_enemy(&mut state, &mut rng);
        }
        assert_eq!(state.enemies.len(), state.round.max_enemies);
        for e in &state.enemies {
            assert!(state.viewport.contains(e.pos));
            assert_eq!(e.health, 3);
        }
    }

    #[test]
    fn test_dead_enemies_free_their_slot() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(4);
        for _ in 0..state.round.max_enemies {
            spawn_enemy(&mut state, &mut rng);
        }
        assert!(spawn_enemy(&mut state, &mut rng).is_none());

        // Killed by contact this frame, not purged yet
        state.enemies[0].kill();
        state.spawner.accumulator = 1999.0;
        update(&mut state, 16.0, &mut rng);

        let live = state.enemies.iter().filter(|e| e.alive).count();
        assert_eq!(live, state.round.max_enemies);
        state.purge();
        assert_eq!(state.enemies.len(), state.round.max_enemies);
    }

    #[test]
    fn test_boss_triggers_on_kill_threshold() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(2);

        state.round.kill_count = 49;
        update(&mut state, 16.0, &mut rng);
        assert!(state.boss.is_none());

        state.round.kill_count = 50;
        update(&mut state, 16.0, &mut rng);
        let boss = state.boss.as_ref().unwrap();
        assert_eq!(boss.health, 100);
        assert_eq!(state.round.kill_count, 0);
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::BossSpawned { round: 1, health: 100 })));
    }

    #[test]
    fn test_no_second_boss_while_one_lives() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(3);
        spawn_boss(&mut state);
        state.boss.as_mut().unwrap().health = 7;
        state.round.kill_count = 60;
        update(&mut state, 16.0, &mut rng);
        assert_eq!(state.boss.as_ref().unwrap().health, 7);
        assert_eq!(state.round.kill_count, 60);
    }
}
