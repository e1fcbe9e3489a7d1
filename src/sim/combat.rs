//! Bullet collision resolution
//!
//! Each bullet is consumed by the first live enemy (in spawn order) it
//! overlaps, or failing that by the boss. Explosive bullets splash every other
//! live enemy around the impact point; chain-lightning bullets hop from enemy
//! to enemy. Neither effect touches the boss and neither keeps the bullet
//! alive.
//!
//! Entities are addressed by index and flagged rather than removed, so the
//! collections keep a stable layout until [`GameState::purge`] runs at the end
//! of the step.

use glam::Vec2;

use super::geometry::within;
use super::state::{GameEvent, GameState};

/// What the collision pass did this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Bullets that hit something
    pub bullets_spent: u32,
    /// Enemies killed by bullets, splash or chain
    pub kills: u32,
    /// The boss went down this frame
    pub boss_defeated: bool,
}

/// Resolve every live bullet against enemies, then the leftovers against the boss
///
/// The enemy pass covers all bullets before any boss hit lands, so a boss
/// defeat always resets the kill counter after this frame's enemy kills.
pub fn resolve_bullet_hits(state: &mut GameState) -> CombatOutcome {
    let mut outcome = CombatOutcome::default();
    let splash_factor = state.tuning.explosion_radius_factor;
    let chain_factor = state.tuning.chain_radius_factor;

    for bi in 0..state.bullets.len() {
        let bullet = &state.bullets[bi];
        if bullet.consumed {
            continue;
        }
        let (pos, size, damage) = (bullet.pos, bullet.size, bullet.damage);
        let (explosive, chain) = (bullet.explosive, bullet.chain);

        let hit = state
            .enemies
            .iter()
            .position(|e| e.alive && within(pos, e.pos, size + e.size));

        if let Some(target) = hit {
            state.bullets[bi].consumed = true;
            outcome.bullets_spent += 1;
            outcome.kills += damage_enemy(state, target, damage);
            if explosive {
                outcome.kills += splash(state, target, pos, size * splash_factor, damage);
            }
            if chain {
                outcome.kills += chain_lightning(state, target, size * chain_factor, damage);
            }
        }
    }

    for bi in 0..state.bullets.len() {
        let Some(boss) = state.boss.as_mut() else {
            break;
        };
        let bullet = &mut state.bullets[bi];
        if bullet.consumed || !within(bullet.pos, boss.pos, bullet.size + boss.size) {
            continue;
        }
        bullet.consumed = true;
        outcome.bullets_spent += 1;
        if boss.take_damage(bullet.damage) {
            defeat_boss(state);
            outcome.boss_defeated = true;
        }
    }

    outcome
}

/// Damage one enemy, counting the kill if this hit finished it
///
/// Returns 1 on a kill, 0 otherwise.
fn damage_enemy(state: &mut GameState, index: usize, damage: u32) -> u32 {
    let enemy = &mut state.enemies[index];
    if enemy.take_damage(damage) {
        let id = enemy.id;
        state.round.record_kill();
        state.events.push(GameEvent::EnemyKilled { id });
        log::debug!("Enemy {} destroyed", id);
        1
    } else {
        0
    }
}

/// Area damage around `center` to every live enemy except the one struck
pub fn splash(state: &mut GameState, struck: usize, center: Vec2, radius: f32, damage: u32) -> u32 {
    let victims: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|&(i, e)| i != struck && e.alive && within(center, e.pos, radius))
        .map(|(i, _)| i)
        .collect();

    victims
        .into_iter()
        .map(|i| damage_enemy(state, i, damage))
        .sum()
}

/// Chain damage outward from the struck enemy
///
/// Repeatedly picks a live enemy not yet linked that lies within `radius` of
/// the most recently linked one, damages it and links it. Stops when no enemy
/// qualifies. The struck enemy is the first link and is not damaged again.
pub fn chain_lightning(state: &mut GameState, struck: usize, radius: f32, damage: u32) -> u32 {
    let mut linked = vec![false; state.enemies.len()];
    linked[struck] = true;
    let mut last = struck;
    let mut kills = 0;

    loop {
        let from = state.enemies[last].pos;
        let next = state
            .enemies
            .iter()
            .enumerate()
            .position(|(i, e)| !linked[i] && e.alive && within(from, e.pos, radius));

        let Some(next) = next else {
            break;
        };
        linked[next] = true;
        kills += damage_enemy(state, next, damage);
        last = next;
    }

    kills
}

/// Clear the boss and restart the kill counter
fn defeat_boss(state: &mut GameState) {
    state.boss = None;
    state.round.kill_count = 0;
    state.events.push(GameEvent::BossDefeated {
        round: state.round.round,
    });
    log::info!("Round {} boss defeated", state.round.round);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Viewport;
    use crate::sim::state::{Boss, Bullet, Enemy};
    use crate::tuning::Tuning;

    fn state() -> GameState {
        let mut state = GameState::new(Viewport::new(800.0, 600.0), Tuning::default());
        // Keep the player out of the way
        state.player.pos = Vec2::new(780.0, 580.0);
        state
    }

    fn bullet(pos: Vec2, damage: u32, explosive: bool, chain: bool) -> Bullet {
        Bullet {
            id: 0,
            pos,
            vel: Vec2::new(0.0, -7.0),
            size: 5.0,
            damage,
            explosive,
            chain,
            consumed: false,
        }
    }

    fn add_enemy(state: &mut GameState, x: f32, y: f32) -> usize {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, Vec2::new(x, y), 20.0, 3));
        state.enemies.len() - 1
    }

    #[test]
    fn test_bullet_hits_single_enemy_and_is_consumed() {
        let mut state = state();
        add_enemy(&mut state, 100.0, 100.0);
        add_enemy(&mut state, 110.0, 100.0);
        state.bullets.push(bullet(Vec2::new(105.0, 100.0), 1, false, false));

        let outcome = resolve_bullet_hits(&mut state);
        assert_eq!(outcome.bullets_spent, 1);
        assert_eq!(state.enemies[0].health, 2);
        // Overlapping second enemy is untouched: single hit per bullet
        assert_eq!(state.enemies[1].health, 3);
        assert!(state.bullets[0].consumed);
    }

    #[test]
    fn test_kill_counts_once() {
        let mut state = state();
        add_enemy(&mut state, 100.0, 100.0);
        state.bullets.push(bullet(Vec2::new(100.0, 100.0), 3, false, false));
        state.bullets.push(bullet(Vec2::new(100.0, 100.0), 3, false, false));

        let outcome = resolve_bullet_hits(&mut state);
        assert_eq!(outcome.kills, 1);
        assert_eq!(state.round.kill_count, 1);
        // The dead enemy no longer absorbs bullets
        assert!(!state.bullets[1].consumed);
    }

    #[test]
    fn test_explosive_splash_radius() {
        let mut state = state();
        let impact = Vec2::new(200.0, 200.0);
        add_enemy(&mut state, 200.0, 200.0);
        add_enemy(&mut state, 210.0, 200.0);
        add_enemy(&mut state, 190.0, 200.0);
        add_enemy(&mut state, 200.0, 215.0);
        add_enemy(&mut state, 200.0, 186.0);
        // Outside size * 5 = 25
        add_enemy(&mut state, 230.0, 200.0);
        add_enemy(&mut state, 200.0, 260.0);
        state.bullets.push(bullet(impact, 1, true, false));

        resolve_bullet_hits(&mut state);
        for e in &state.enemies[..5] {
            assert_eq!(e.health, 2);
        }
        assert_eq!(state.enemies[5].health, 3);
        assert_eq!(state.enemies[6].health, 3);
        assert!(state.bullets[0].consumed);
    }

    #[test]
    fn test_chain_propagates_enemy_to_enemy() {
        let mut state = state();
        add_enemy(&mut state, 100.0, 100.0); // A, struck
        add_enemy(&mut state, 140.0, 100.0); // B, 40 from A, out of bullet reach
        add_enemy(&mut state, 185.0, 100.0); // C, 45 from B, 85 from A
        add_enemy(&mut state, 400.0, 400.0); // far away
        state.bullets.push(bullet(Vec2::new(100.0, 100.0), 1, false, true));

        resolve_bullet_hits(&mut state);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.enemies[1].health, 2);
        assert_eq!(state.enemies[2].health, 2);
        assert_eq!(state.enemies[3].health, 3);
    }

    #[test]
    fn test_chain_does_not_revisit() {
        let mut state = state();
        add_enemy(&mut state, 100.0, 100.0);
        add_enemy(&mut state, 120.0, 100.0);
        let kills = chain_lightning(&mut state, 0, 50.0, 1);
        assert_eq!(kills, 0);
        assert_eq!(state.enemies[0].health, 3);
        assert_eq!(state.enemies[1].health, 2);
    }

    #[test]
    fn test_chain_link_killed_still_propagates() {
        let mut state = state();
        add_enemy(&mut state, 100.0, 100.0);
        add_enemy(&mut state, 140.0, 100.0);
        add_enemy(&mut state, 180.0, 100.0);
        state.enemies[1].health = 1;

        let kills = chain_lightning(&mut state, 0, 50.0, 1);
        assert_eq!(kills, 1);
        assert!(!state.enemies[1].alive);
        assert_eq!(state.enemies[2].health, 2);
        assert_eq!(state.round.kill_count, 1);
    }

    #[test]
    fn test_special_effects_skip_boss() {
        let mut state = state();
        state.boss = Some(Boss::new(Vec2::new(120.0, 100.0), 50.0, 100));
        add_enemy(&mut state, 100.0, 100.0);
        state.bullets.push(bullet(Vec2::new(100.0, 100.0), 1, true, true));

        resolve_bullet_hits(&mut state);
        assert_eq!(state.enemies[0].health, 2);
        assert_eq!(state.boss.as_ref().unwrap().health, 100);
    }

    #[test]
    fn test_enemy_kills_land_before_boss_reset() {
        let mut state = state();
        state.boss = Some(Boss::new(Vec2::new(300.0, 300.0), 50.0, 1));
        add_enemy(&mut state, 100.0, 100.0);
        state.enemies[0].health = 1;
        // Boss bullet comes first in fire order, enemy bullet second
        state.bullets.push(bullet(Vec2::new(300.0, 300.0), 1, false, false));
        state.bullets.push(bullet(Vec2::new(100.0, 100.0), 1, false, false));

        let outcome = resolve_bullet_hits(&mut state);
        assert!(outcome.boss_defeated);
        assert_eq!(outcome.kills, 1);
        assert!(state.boss.is_none());
        assert_eq!(state.round.kill_count, 0);
        assert_eq!(state.round.total_kills, 1);
    }

    #[test]
    fn test_boss_defeat_clears_boss_and_counter() {
        let mut state = state();
        state.boss = Some(Boss::new(Vec2::new(300.0, 300.0), 50.0, 2));
        state.round.kill_count = 12;
        state.bullets.push(bullet(Vec2::new(300.0, 300.0), 1, false, false));
        state.bullets.push(bullet(Vec2::new(310.0, 300.0), 1, false, false));
        state.bullets.push(bullet(Vec2::new(320.0, 300.0), 1, false, false));

        let outcome = resolve_bullet_hits(&mut state);
        assert!(outcome.boss_defeated);
        assert!(state.boss.is_none());
        assert_eq!(state.round.kill_count, 0);
        // Third bullet had no boss left to hit
        assert_eq!(outcome.bullets_spent, 2);
        assert!(!state.bullets[2].consumed);
    }
}
