//! Game state and core simulation types
//!
//! Everything a frame reads or writes lives in [`GameState`], owned by one
//! [`super::Simulation`]. Subsystems borrow it for the duration of a step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Viewport;
use super::spawner::Spawner;
use crate::tuning::Tuning;

/// Top-level simulation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Movement, spawning and combat run every frame
    Combat,
    /// Boss down, waiting for the player to pick an upgrade
    UpgradeSelect,
}

/// Display tint for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Blue,
    Yellow,
    Red,
    Purple,
}

/// Permanent upgrades offered after each boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    IncreaseBulletSpeed,
    IncreaseDamage,
    IncreaseMoveSpeed,
    ExtraHealth,
    ExplosiveBullets,
    ChainLightning,
}

impl UpgradeKind {
    /// The fixed catalog rounds sample from
    pub const CATALOG: [UpgradeKind; 6] = [
        UpgradeKind::IncreaseBulletSpeed,
        UpgradeKind::IncreaseDamage,
        UpgradeKind::IncreaseMoveSpeed,
        UpgradeKind::ExtraHealth,
        UpgradeKind::ExplosiveBullets,
        UpgradeKind::ChainLightning,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKind::IncreaseBulletSpeed => "Increase Bullet Speed",
            UpgradeKind::IncreaseDamage => "Increase Damage",
            UpgradeKind::IncreaseMoveSpeed => "Increase Move Speed",
            UpgradeKind::ExtraHealth => "Extra Health",
            UpgradeKind::ExplosiveBullets => "Explosive Bullets",
            UpgradeKind::ChainLightning => "Chain Lightning",
        }
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left anchor
    pub pos: Vec2,
    pub size: f32,
    /// Displacement per frame per pressed axis
    pub speed: f32,
    pub health: i32,
    /// Highest health the player can hold (grows with Extra Health)
    pub max_health: i32,
    pub bullet_speed: f32,
    /// Damage per bullet (doubles with Increase Damage)
    pub damage: u32,
    pub explosive_bullets: bool,
    pub chain_lightning: bool,
}

impl Player {
    pub fn new(tuning: &Tuning, viewport: &Viewport) -> Self {
        Self {
            pos: viewport.clamp_square(viewport.center(), tuning.player_size),
            size: tuning.player_size,
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            bullet_speed: tuning.player_bullet_speed,
            damage: tuning.player_damage,
            explosive_bullets: false,
            chain_lightning: false,
        }
    }

    /// Centre of the avatar square (bullets leave from here)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size / 2.0)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lose one point of health, never going below zero
    pub fn take_hit(&mut self) {
        self.health = (self.health - 1).max(0);
    }
}

/// A player projectile
///
/// Damage and effect flags are copied from the player when fired, so later
/// upgrades do not change bullets already in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    /// Displacement per frame
    pub vel: Vec2,
    pub size: f32,
    pub damage: u32,
    pub explosive: bool,
    pub chain: bool,
    /// Set on first hit; consumed bullets are purged at end of step
    #[serde(skip)]
    pub consumed: bool,
}

impl Bullet {
    /// Fire from the player's centre toward `target`
    ///
    /// Returns `None` when the target coincides with the muzzle.
    pub fn fire(id: u32, player: &Player, target: Vec2, size: f32) -> Option<Self> {
        let origin = player.center();
        let dir = super::geometry::direction_to(origin, target)?;
        Some(Self {
            id,
            pos: origin,
            vel: dir * player.bullet_speed,
            size,
            damage: player.damage,
            explosive: player.explosive_bullets,
            chain: player.chain_lightning,
            consumed: false,
        })
    }
}

/// A homing swarm enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    /// Cleared on death; dead enemies are purged once per step
    pub alive: bool,
    pub tint: Tint,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, size: f32, health: i32) -> Self {
        Self {
            id,
            pos,
            size,
            health,
            alive: true,
            tint: Tint::Red,
        }
    }

    /// Apply damage. Returns true only on the hit that kills.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = self.health.saturating_sub_unsigned(damage);
        if self.health <= 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Kill outright (contact with the player). Returns true if it was alive.
    pub fn kill(&mut self) -> bool {
        let was_alive = self.alive;
        self.alive = false;
        was_alive
    }
}

/// The round boss (at most one at a time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    /// Health at spawn, for the renderer's health bar
    pub max_health: i32,
    pub tint: Tint,
    /// Time-units until the boss may strike the player again
    pub contact_cooldown: f32,
}

impl Boss {
    pub fn new(pos: Vec2, size: f32, health: i32) -> Self {
        Self {
            pos,
            size,
            health,
            max_health: health,
            tint: Tint::Purple,
            contact_cooldown: 0.0,
        }
    }

    /// Apply damage. Returns true once health reaches zero.
    pub fn take_damage(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub_unsigned(damage);
        self.health <= 0
    }
}

/// Per-round bookkeeping and difficulty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// 1-based round number
    pub round: u32,
    /// Kills toward the next boss (reset on boss spawn and defeat)
    pub kill_count: u32,
    /// Kills over the whole run
    pub total_kills: u32,
    pub enemy_speed: f32,
    pub max_enemies: usize,
    /// Health the next boss spawns with
    pub boss_health: i32,
}

impl RoundState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            round: 1,
            kill_count: 0,
            total_kills: 0,
            enemy_speed: tuning.enemy_speed,
            max_enemies: tuning.max_enemies,
            boss_health: tuning.boss_health,
        }
    }

    /// Count one kill
    pub fn record_kill(&mut self) {
        self.kill_count += 1;
        self.total_kills += 1;
    }
}

/// Things that happened during a step, drained by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyKilled { id: u32 },
    PlayerHit { health: i32 },
    BossSpawned { round: u32, health: i32 },
    BossDefeated { round: u32 },
    UpgradeChosen(UpgradeKind),
    RoundStarted { round: u32 },
    /// Terminal: the host should show game over and build a fresh simulation
    PlayerDied { round: u32, total_kills: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Live bullets in fire order
    pub bullets: Vec<Bullet>,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub round: RoundState,
    pub spawner: Spawner,
    /// Upgrades on offer while in [`GamePhase::UpgradeSelect`]
    pub upgrade_choices: Vec<UpgradeKind>,
    /// Set once the player runs out of health; no further steps run
    pub game_over: bool,
    /// Events produced since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Simulation frame counter
    pub frame: u64,
    next_id: u32,
}

impl GameState {
    pub fn new(viewport: Viewport, tuning: Tuning) -> Self {
        Self {
            player: Player::new(&tuning, &viewport),
            round: RoundState::new(&tuning),
            viewport,
            tuning,
            phase: GamePhase::Combat,
            bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            spawner: Spawner::default(),
            upgrade_choices: Vec::new(),
            game_over: false,
            events: Vec::new(),
            frame: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Drop dead enemies and spent bullets
    ///
    /// Runs once per step after every collision check, so an enemy killed
    /// earlier in the frame still occupies its slot during splash and chain
    /// resolution. Running it twice is the same as running it once.
    pub fn purge(&mut self) {
        purge_dead(&mut self.enemies);
        self.bullets.retain(|b| !b.consumed);
    }
}

/// Remove enemies whose alive flag is cleared
pub fn purge_dead(enemies: &mut Vec<Enemy>) {
    enemies.retain(|e| e.alive);
}
