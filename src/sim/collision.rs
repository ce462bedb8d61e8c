//! Collision detection and damage resolution
//!
//! Stateless queries plus the once-per-tick resolution pass. Both checks
//! run after the crafts have integrated, so hits are evaluated against
//! post-movement positions.

use glam::Vec2;

use super::state::{BehaviorState, SimPhase, SimState};
use crate::consts::*;

/// Projectile-vs-enemy hit test: strictly inside 95% of the enemy radius.
/// A projectile at exactly the boundary distance does not count.
pub fn projectile_hits_enemy(projectile: Vec2, enemy_center: Vec2, enemy_diameter: f32) -> bool {
    projectile.distance(enemy_center) < enemy_diameter * ENEMY_HIT_FACTOR / 2.0
}

/// Resolve this tick's collisions and apply damage/destruction.
///
/// Projectiles are tested against the enemy first, then every live ring is
/// tested against the player (at most one `take_damage` per ring per
/// tick). Hit projectiles are compacted out in a single pass.
pub fn resolve(state: &mut SimState) {
    if let Some(enemy) = state.enemy.as_mut() {
        if let Some(player) = state.player.as_mut() {
            // A fading craft is no longer a target
            if enemy.behavior != BehaviorState::Dying {
                let mut hits = 0u32;
                player.projectiles.retain(|p| {
                    let hit = projectile_hits_enemy(
                        p.body.position,
                        enemy.body.position,
                        enemy.diameter,
                    );
                    if hit {
                        hits += 1;
                    }
                    !hit
                });
                for _ in 0..hits {
                    enemy.take_damage();
                }
            }

            for ring in &enemy.rings {
                if ring.contains(player.body.position) && player.take_damage() {
                    log::info!("player caught in shockwave, {} lives left", player.lives);
                }
            }
        }
    }

    if state.player.as_ref().is_some_and(|p| p.destroyed()) {
        state.player = None;
        state.phase = SimPhase::Defeat;
        log::info!("player destroyed, session lost");
    }
}
