//! Read-only view of a frame for the rendering collaborator

use glam::Vec2;
use serde::Serialize;

use super::geometry::{Rect, Viewport};
use super::progression::upgrade_slots;
use super::state::{GamePhase, GameState, Tint, UpgradeKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    pub max_health: i32,
}

/// Anything drawn as a plain tinted square
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteView {
    pub pos: Vec2,
    pub size: f32,
    pub tint: Tint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BossView {
    pub pos: Vec2,
    pub size: f32,
    pub health: i32,
    pub max_health: i32,
    pub tint: Tint,
}

/// An upgrade card and where to draw (and click) it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeCardView {
    pub kind: UpgradeKind,
    pub label: &'static str,
    pub slot: Rect,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub viewport: Viewport,
    pub phase: GamePhase,
    pub round: u32,
    pub kill_count: u32,
    pub total_kills: u32,
    pub player: PlayerView,
    pub bullets: Vec<SpriteView>,
    pub enemies: Vec<SpriteView>,
    pub boss: Option<BossView>,
    pub upgrades: Vec<UpgradeCardView>,
    pub game_over: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let slots = upgrade_slots(&state.viewport, state.upgrade_choices.len());
        Self {
            viewport: state.viewport,
            phase: state.phase,
            round: state.round.round,
            kill_count: state.round.kill_count,
            total_kills: state.round.total_kills,
            player: PlayerView {
                pos: state.player.pos,
                size: state.player.size,
                health: state.player.health,
                max_health: state.player.max_health,
            },
            bullets: state
                .bullets
                .iter()
                .map(|b| SpriteView {
                    pos: b.pos,
                    size: b.size,
                    tint: Tint::Yellow,
                })
                .collect(),
            enemies: state
                .enemies
                .iter()
                .filter(|e| e.alive)
                .map(|e| SpriteView {
                    pos: e.pos,
                    size: e.size,
                    tint: e.tint,
                })
                .collect(),
            boss: state.boss.as_ref().map(|b| BossView {
                pos: b.pos,
                size: b.size,
                health: b.health,
                max_health: b.max_health,
                tint: b.tint,
            }),
            upgrades: state
                .upgrade_choices
                .iter()
                .zip(slots)
                .map(|(&kind, slot)| UpgradeCardView {
                    kind,
                    label: kind.label(),
                    slot,
                })
                .collect(),
            game_over: state.game_over,
        }
    }

    /// Serialize for hosts that cross a JS boundary
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
