//! Data-driven game balance
//!
//! Every baseline the simulation reads lives here so a host can ship a JSON
//! document to rebalance a run without recompiling. Missing fields fall back
//! to the values in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_max_health: i32,
    pub player_bullet_speed: f32,
    pub player_damage: u32,

    // === Bullets ===
    pub bullet_size: f32,
    pub explosion_radius_factor: f32,
    pub chain_radius_factor: f32,

    // === Enemies ===
    pub enemy_size: f32,
    pub enemy_health: i32,
    pub enemy_speed: f32,
    pub max_enemies: usize,
    /// Time-units between spawn attempts
    pub enemy_spawn_rate: f32,

    // === Boss ===
    pub boss_size: f32,
    pub boss_health: i32,
    pub boss_kill_threshold: u32,
    pub boss_contact_cooldown: f32,

    // === Escalation per round ===
    pub enemy_speed_step: f32,
    pub max_enemies_step: usize,
    pub boss_health_step: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            player_bullet_speed: PLAYER_BULLET_SPEED,
            player_damage: PLAYER_DAMAGE,

            bullet_size: BULLET_SIZE,
            explosion_radius_factor: EXPLOSION_RADIUS_FACTOR,
            chain_radius_factor: CHAIN_RADIUS_FACTOR,

            enemy_size: ENEMY_SIZE,
            enemy_health: ENEMY_HEALTH,
            enemy_speed: ENEMY_SPEED,
            max_enemies: MAX_ENEMIES,
            enemy_spawn_rate: ENEMY_SPAWN_RATE,

            boss_size: BOSS_SIZE,
            boss_health: BOSS_HEALTH,
            boss_kill_threshold: BOSS_KILL_THRESHOLD,
            boss_contact_cooldown: BOSS_CONTACT_COOLDOWN,

            enemy_speed_step: ENEMY_SPEED_STEP,
            max_enemies_step: MAX_ENEMIES_STEP,
            boss_health_step: BOSS_HEALTH_STEP,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize to pretty JSON (for shipping a template to designers)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse the document if one is given, otherwise (or on failure) use defaults
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning overrides");
                tuning.sanitized()
            }
            Some(Err(e)) => {
                log::warn!("Invalid tuning document ({e}), using defaults");
                Self::default()
            }
            None => {
                log::info!("Using default tuning");
                Self::default()
            }
        }
    }

    /// Replace degenerate values with the baselines
    ///
    /// Sizes, speeds and intervals must be positive and finite, the population
    /// cap and the boss threshold must be non-zero, health values must be
    /// positive. Escalation steps may be zero but not negative.
    pub fn sanitized(mut self) -> Self {
        let base = Self::default();

        fix_positive(&mut self.player_size, base.player_size, "player_size");
        fix_positive(&mut self.player_speed, base.player_speed, "player_speed");
        fix_positive(
            &mut self.player_bullet_speed,
            base.player_bullet_speed,
            "player_bullet_speed",
        );
        fix_positive(&mut self.bullet_size, base.bullet_size, "bullet_size");
        fix_positive(
            &mut self.explosion_radius_factor,
            base.explosion_radius_factor,
            "explosion_radius_factor",
        );
        fix_positive(
            &mut self.chain_radius_factor,
            base.chain_radius_factor,
            "chain_radius_factor",
        );
        fix_positive(&mut self.enemy_size, base.enemy_size, "enemy_size");
        fix_positive(&mut self.enemy_speed, base.enemy_speed, "enemy_speed");
        fix_positive(
            &mut self.enemy_spawn_rate,
            base.enemy_spawn_rate,
            "enemy_spawn_rate",
        );
        fix_positive(&mut self.boss_size, base.boss_size, "boss_size");

        if !(self.boss_contact_cooldown.is_finite() && self.boss_contact_cooldown >= 0.0) {
            log::warn!(
                "tuning: boss_contact_cooldown out of range, using {}",
                base.boss_contact_cooldown,
            );
            self.boss_contact_cooldown = base.boss_contact_cooldown;
        }
        if !(self.enemy_speed_step.is_finite() && self.enemy_speed_step >= 0.0) {
            log::warn!("tuning: enemy_speed_step out of range, using {}", base.enemy_speed_step);
            self.enemy_speed_step = base.enemy_speed_step;
        }
        if self.boss_health_step < 0 {
            log::warn!("tuning: boss_health_step negative, using {}", base.boss_health_step);
            self.boss_health_step = base.boss_health_step;
        }
        if self.player_max_health <= 0 {
            log::warn!(
                "tuning: player_max_health must be positive, using {}",
                base.player_max_health,
            );
            self.player_max_health = base.player_max_health;
        }
        if self.player_damage == 0 {
            log::warn!("tuning: player_damage must be positive, using {}", base.player_damage);
            self.player_damage = base.player_damage;
        }
        if self.enemy_health <= 0 {
            log::warn!("tuning: enemy_health must be positive, using {}", base.enemy_health);
            self.enemy_health = base.enemy_health;
        }
        if self.boss_health <= 0 {
            log::warn!("tuning: boss_health must be positive, using {}", base.boss_health);
            self.boss_health = base.boss_health;
        }
        if self.max_enemies == 0 {
            log::warn!("tuning: max_enemies must be non-zero, using {}", base.max_enemies);
            self.max_enemies = base.max_enemies;
        }
        if self.boss_kill_threshold == 0 {
            log::warn!(
                "tuning: boss_kill_threshold must be non-zero, using {}",
                base.boss_kill_threshold,
            );
            self.boss_kill_threshold = base.boss_kill_threshold;
        }

        self
    }
}

fn fix_positive(value: &mut f32, fallback: f32, name: &str) {
    if !(value.is_finite() && *value > 0.0) {
        log::warn!("tuning: {name} must be positive, using {fallback}");
        *value = fallback;
    }
}
