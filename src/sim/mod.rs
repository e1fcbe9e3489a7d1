//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod combat;
pub mod geometry;
pub mod movement;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use combat::{CombatOutcome, resolve_bullet_hits};
pub use geometry::{Rect, Viewport, direction_to, distance, within};
pub use progression::{apply_upgrade, roll_upgrade_choices, select_upgrade, upgrade_slots};
pub use snapshot::{BossView, PlayerView, RenderSnapshot, SpriteView, UpgradeCardView};
pub use state::{
    Boss, Bullet, Enemy, GameEvent, GamePhase, GameState, Player, RoundState, Tint, UpgradeKind,
};
pub use tick::{Simulation, TickInput, tick};
