//! Swarm Shooter - survive homing swarms, beat the boss, pick an upgrade
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (movement, combat, progression)
//! - `tuning`: Data-driven game balance
//! - `platform`: Browser host binding

pub mod platform;
pub mod sim;
pub mod tuning;

pub use sim::{RenderSnapshot, Simulation, TickInput};
pub use tuning::Tuning;

/// Baseline balance constants (round 1 values)
pub mod consts {
    /// Player defaults
    pub const PLAYER_SIZE: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: i32 = 5;
    pub const PLAYER_BULLET_SPEED: f32 = 7.0;
    pub const PLAYER_DAMAGE: u32 = 1;

    /// Bullet size (also the base for splash/chain radii)
    pub const BULLET_SIZE: f32 = 5.0;
    /// Splash radius = bullet size * this
    pub const EXPLOSION_RADIUS_FACTOR: f32 = 5.0;
    /// Chain hop radius = bullet size * this
    pub const CHAIN_RADIUS_FACTOR: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 20.0;
    pub const ENEMY_HEALTH: i32 = 3;
    pub const ENEMY_SPEED: f32 = 2.0;
    pub const MAX_ENEMIES: usize = 10;
    /// Time-units (ms) between spawn attempts
    pub const ENEMY_SPAWN_RATE: f32 = 2000.0;

    /// Boss defaults
    pub const BOSS_SIZE: f32 = 50.0;
    pub const BOSS_HEALTH: i32 = 100;
    /// Kills needed before the boss shows up
    pub const BOSS_KILL_THRESHOLD: u32 = 50;
    /// Minimum time-units between two boss contact hits on the player
    pub const BOSS_CONTACT_COOLDOWN: f32 = 1000.0;

    /// Escalation applied after each boss
    pub const ENEMY_SPEED_STEP: f32 = 0.5;
    pub const MAX_ENEMIES_STEP: usize = 5;
    pub const BOSS_HEALTH_STEP: i32 = 50;

    /// Upgrade selection
    pub const UPGRADE_CHOICES: usize = 3;
    pub const UPGRADE_SLOT_WIDTH: f32 = 200.0;
    pub const UPGRADE_SLOT_HEIGHT: f32 = 100.0;
    pub const UPGRADE_SLOT_GAP: f32 = 50.0;
}
