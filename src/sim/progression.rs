//! Boss-to-boss progression
//!
//! Two phases: `Combat` and `UpgradeSelect`. Defeating the boss rolls three
//! distinct upgrades from the catalog and enters selection; a click on one of
//! the offered slots applies it, escalates difficulty, clears the swarm and
//! brings in the next boss. Anything else leaves the phase untouched.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Rect, Viewport};
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState, Player, RoundState, UpgradeKind};
use crate::consts::{UPGRADE_CHOICES, UPGRADE_SLOT_GAP, UPGRADE_SLOT_HEIGHT, UPGRADE_SLOT_WIDTH};
use crate::tuning::Tuning;

/// Apply an upgrade's effect to the player
pub fn apply_upgrade(kind: UpgradeKind, player: &mut Player) {
    match kind {
        UpgradeKind::IncreaseBulletSpeed => player.bullet_speed += 2.0,
        UpgradeKind::IncreaseDamage => player.damage = player.damage.saturating_mul(2),
        UpgradeKind::IncreaseMoveSpeed => player.speed += 1.0,
        UpgradeKind::ExtraHealth => {
            player.max_health += 1;
            player.health = (player.health + 1).min(player.max_health);
        }
        UpgradeKind::ExplosiveBullets => player.explosive_bullets = true,
        UpgradeKind::ChainLightning => player.chain_lightning = true,
    }
}

/// Sample `count` distinct upgrades uniformly from the catalog
pub fn roll_upgrade_choices<R: Rng>(rng: &mut R, count: usize) -> Vec<UpgradeKind> {
    let catalog = &UpgradeKind::CATALOG;
    rand::seq::index::sample(rng, catalog.len(), count.min(catalog.len()))
        .into_iter()
        .map(|i| catalog[i])
        .collect()
}

/// Screen rectangles for `count` upgrade cards, centred in the viewport
pub fn upgrade_slots(viewport: &Viewport, count: usize) -> Vec<Rect> {
    let n = count as f32;
    let total_width = n * UPGRADE_SLOT_WIDTH + (n - 1.0).max(0.0) * UPGRADE_SLOT_GAP;
    let left = viewport.width / 2.0 - total_width / 2.0;
    let top = viewport.height / 2.0 - UPGRADE_SLOT_HEIGHT / 2.0;

    (0..count)
        .map(|i| {
            Rect::new(
                left + i as f32 * (UPGRADE_SLOT_WIDTH + UPGRADE_SLOT_GAP),
                top,
                UPGRADE_SLOT_WIDTH,
                UPGRADE_SLOT_HEIGHT,
            )
        })
        .collect()
}

/// Which offered slot (if any) a point lands on
pub fn slot_at(viewport: &Viewport, count: usize, point: Vec2) -> Option<usize> {
    upgrade_slots(viewport, count)
        .iter()
        .position(|slot| slot.contains(point))
}

/// Raise difficulty for the next round
pub fn escalate(round: &mut RoundState, tuning: &Tuning) {
    round.round += 1;
    round.enemy_speed += tuning.enemy_speed_step;
    round.max_enemies += tuning.max_enemies_step;
    round.boss_health = round.boss_health.saturating_add(tuning.boss_health_step);
    round.kill_count = 0;
}

/// Combat -> UpgradeSelect: offer a fresh set of upgrades
pub fn begin_upgrade_select<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.upgrade_choices = roll_upgrade_choices(rng, UPGRADE_CHOICES);
    state.phase = GamePhase::UpgradeSelect;
    log::info!(
        "Upgrade selection: {}",
        state
            .upgrade_choices
            .iter()
            .map(|u| u.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

/// UpgradeSelect -> Combat if `point` lands on an offered upgrade
///
/// Returns the chosen upgrade, or `None` if the gesture missed every slot
/// (or the simulation is not selecting).
pub fn select_upgrade(state: &mut GameState, point: Vec2) -> Option<UpgradeKind> {
    if state.phase != GamePhase::UpgradeSelect {
        return None;
    }
    let slot = slot_at(&state.viewport, state.upgrade_choices.len(), point)?;
    let kind = state.upgrade_choices[slot];

    apply_upgrade(kind, &mut state.player);
    state.events.push(GameEvent::UpgradeChosen(kind));
    log::info!("Upgrade chosen: {}", kind.label());

    escalate(&mut state.round, &state.tuning);
    state.enemies.clear();
    state.upgrade_choices.clear();
    state.phase = GamePhase::Combat;
    state.events.push(GameEvent::RoundStarted {
        round: state.round.round,
    });
    log::info!(
        "Round {} started: enemy speed {}, max enemies {}, boss health {}",
        state.round.round,
        state.round.enemy_speed,
        state.round.max_enemies,
        state.round.boss_health
    );

    spawner::spawn_boss(state);
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    fn state() -> GameState {
        GameState::new(Viewport::new(800.0, 600.0), Tuning::default())
    }

    fn slot_center(state: &GameState, slot: usize) -> Vec2 {
        let r = upgrade_slots(&state.viewport, state.upgrade_choices.len())[slot];
        Vec2::new(r.x + r.width / 2.0, r.y + r.height / 2.0)
    }

    #[test]
    fn test_damage_upgrade_is_multiplicative() {
        let mut state = state();
        let base = state.player.damage;
        apply_upgrade(UpgradeKind::IncreaseDamage, &mut state.player);
        apply_upgrade(UpgradeKind::IncreaseDamage, &mut state.player);
        assert_eq!(state.player.damage, base * 4);
    }

    #[test]
    fn test_extra_health_raises_cap() {
        let mut state = state();
        state.player.health = 2;
        apply_upgrade(UpgradeKind::ExtraHealth, &mut state.player);
        assert_eq!(state.player.max_health, 6);
        assert_eq!(state.player.health, 3);
    }

    #[test]
    fn test_flags_and_speeds() {
        let mut player = state().player;
        apply_upgrade(UpgradeKind::ExplosiveBullets, &mut player);
        apply_upgrade(UpgradeKind::ChainLightning, &mut player);
        apply_upgrade(UpgradeKind::IncreaseBulletSpeed, &mut player);
        apply_upgrade(UpgradeKind::IncreaseMoveSpeed, &mut player);
        assert!(player.explosive_bullets);
        assert!(player.chain_lightning);
        assert_eq!(player.bullet_speed, 9.0);
        assert_eq!(player.speed, 6.0);
    }

    #[test]
    fn test_choices_are_distinct() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..100 {
            let choices = roll_upgrade_choices(&mut rng, 3);
            let unique: HashSet<_> = choices.iter().collect();
            assert_eq!(choices.len(), 3);
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_slots_do_not_overlap() {
        let vp = Viewport::new(1024.0, 768.0);
        let slots = upgrade_slots(&vp, 3);
        assert_eq!(slots.len(), 3);
        assert!(slots[0].x + slots[0].width < slots[1].x);
        assert!(slots[1].x + slots[1].width < slots[2].x);
        // Middle slot is centred
        assert!((slots[1].x + slots[1].width / 2.0 - 512.0).abs() < 1e-3);
    }

    #[test]
    fn test_missed_selection_is_noop() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(9);
        begin_upgrade_select(&mut state, &mut rng);
        let offered = state.upgrade_choices.clone();

        assert!(select_upgrade(&mut state, Vec2::new(5.0, 5.0)).is_none());
        assert_eq!(state.phase, GamePhase::UpgradeSelect);
        assert_eq!(state.upgrade_choices, offered);
        assert_eq!(state.round.round, 1);
    }

    #[test]
    fn test_selection_escalates_and_spawns_boss() {
        let mut state = state();
        let mut rng = Pcg32::seed_from_u64(11);
        state.enemies.push(crate::sim::state::Enemy::new(1, Vec2::ZERO, 20.0, 3));
        state.round.kill_count = 4;
        begin_upgrade_select(&mut state, &mut rng);
        let expected = state.upgrade_choices[2];

        let point = slot_center(&state, 2);
        assert_eq!(select_upgrade(&mut state, point), Some(expected));

        assert_eq!(state.phase, GamePhase::Combat);
        assert_eq!(state.round.round, 2);
        assert_eq!(state.round.enemy_speed, 2.5);
        assert_eq!(state.round.max_enemies, 15);
        assert_eq!(state.round.boss_health, 150);
        assert_eq!(state.round.kill_count, 0);
        assert!(state.enemies.is_empty());
        assert!(state.upgrade_choices.is_empty());
        assert_eq!(state.boss.as_ref().unwrap().health, 150);
        assert!(state.events.contains(&GameEvent::UpgradeChosen(expected)));
    }

    #[test]
    fn test_select_ignored_during_combat() {
        let mut state = state();
        let point = state.viewport.center();
        assert!(select_upgrade(&mut state, point).is_none());
        assert_eq!(state.round.round, 1);
    }
}
