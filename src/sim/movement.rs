//! Per-frame position updates
//!
//! Player follows directional input, bullets fly ballistic, enemies and the
//! boss home in on the player. Contact with the player is resolved here as a
//! melee hit instead of a move.

use super::geometry::{direction_to, within};
use super::state::{GameEvent, GameState};
use super::tick::TickInput;

/// Displace the player along each pressed axis, clamped to the viewport
///
/// Axes are handled independently, so diagonals move `speed` on both axes.
pub fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    if input.up {
        player.pos.y -= player.speed;
    }
    if input.down {
        player.pos.y += player.speed;
    }
    if input.left {
        player.pos.x -= player.speed;
    }
    if input.right {
        player.pos.x += player.speed;
    }
    player.pos = state.viewport.clamp_square(player.pos, player.size);
}

/// Advance bullets and drop any that left the viewport
pub fn move_bullets(state: &mut GameState) {
    let viewport = state.viewport;
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
    }
    state.bullets.retain(|b| viewport.contains(b.pos));
}

/// Home every live enemy toward the player, or resolve contact
///
/// An enemy that touches the player dies (counting as a kill) and costs the
/// player one health. Coincident positions count as contact.
pub fn move_enemies(state: &mut GameState) {
    let target = state.player.pos;
    let reach = state.player.size;
    let speed = state.round.enemy_speed;

    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        if within(enemy.pos, target, reach + enemy.size) {
            if enemy.kill() {
                state.round.record_kill();
                state.player.take_hit();
                state.events.push(GameEvent::EnemyKilled { id: enemy.id });
                state.events.push(GameEvent::PlayerHit {
                    health: state.player.health,
                });
                log::debug!(
                    "Enemy {} hit the player (health {})",
                    enemy.id,
                    state.player.health
                );
            }
        } else if let Some(dir) = direction_to(enemy.pos, target) {
            enemy.pos += dir * speed;
        }
    }
}

/// Home the boss toward the player at half enemy speed, or strike on contact
///
/// The boss survives contact; it holds position and only strikes again once
/// its contact cooldown has run out. The cooldown is a balance deviation from
/// the bare contact rule, which would let the boss take 1 health every frame
/// and empty the bar in five frames.
pub fn move_boss(state: &mut GameState, elapsed: f32) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };

    if elapsed.is_finite() && elapsed > 0.0 {
        boss.contact_cooldown = (boss.contact_cooldown - elapsed).max(0.0);
    }

    let target = state.player.pos;
    if within(boss.pos, target, state.player.size + boss.size) {
        if boss.contact_cooldown <= 0.0 {
            boss.contact_cooldown = state.tuning.boss_contact_cooldown;
            state.player.take_hit();
            state.events.push(GameEvent::PlayerHit {
                health: state.player.health,
            });
            log::debug!("Boss hit the player (health {})", state.player.health);
        }
    } else if let Some(dir) = direction_to(boss.pos, target) {
        boss.pos += dir * (state.round.enemy_speed / 2.0);
    }
}
