use tracing::debug;

use crate::enemy::Enemy;
use crate::events::SimEvent;
use crate::math::Vec2;
use crate::player::Player;
use crate::projectile::Projectile;

pub const PLAYER_PROJECTILE_DAMAGE: u32 = 20;
pub const ENEMY_PROJECTILE_DAMAGE: u32 = 20;

/// Actors are treated as circles of this radius for projectile hits.
pub const HIT_TEST_RADIUS: f32 = 8.0;

/// Blood effects spawn slightly below the impact point, at the actor's
/// feet rather than its center.
pub const BLOOD_EFFECT_OFFSET_Y: f32 = 12.0;

/// Experience for a kill is proportional to how tough the enemy was.
const XP_PER_MAX_HEALTH: f32 = 0.1;

fn blood_position(actor_position: Vec2) -> Vec2 {
    Vec2::new(actor_position.x, actor_position.y + BLOOD_EFFECT_OFFSET_Y)
}

/// Tests every active projectile against the opposing side and applies
/// damage. Each projectile lands at most one hit and deactivates on it.
/// Corpses (Dying or Dead) are transparent to projectiles.
pub fn resolve_projectile_hits(
    projectiles: &mut [Projectile],
    player: &mut Player,
    enemies: &mut [Enemy],
    events: &mut Vec<SimEvent>,
) {
    for projectile in projectiles.iter_mut() {
        if !projectile.is_active() {
            continue;
        }

        if projectile.source().is_player() {
            for enemy in enemies.iter_mut() {
                if !enemy.is_alive() {
                    continue;
                }
                let target = enemy.actor().position();
                if !projectile.hits_circle(target, HIT_TEST_RADIUS) {
                    continue;
                }
                projectile.deactivate();
                events.push(SimEvent::EnemyDamaged {
                    id: enemy.id(),
                    amount: PLAYER_PROJECTILE_DAMAGE,
                });
                if enemy.take_damage(PLAYER_PROJECTILE_DAMAGE) {
                    // The blood effect rides the alive true->false edge,
                    // so it fires exactly once per enemy.
                    events.push(SimEvent::BloodEffectRequested {
                        position: blood_position(target),
                    });
                    events.push(SimEvent::EnemyDied { id: enemy.id() });
                    let reward = enemy.actor().max_health() as f32 * XP_PER_MAX_HEALTH;
                    debug!(id = enemy.id().0, reward, "kill experience awarded");
                    if player.gain_experience(reward) {
                        events.push(SimEvent::PlayerLeveledUp {
                            level: player.level(),
                        });
                    }
                }
                break;
            }
        } else if player.is_alive() {
            let target = player.actor().position();
            if projectile.hits_circle(target, HIT_TEST_RADIUS) {
                projectile.deactivate();
                events.push(SimEvent::PlayerDamaged {
                    amount: ENEMY_PROJECTILE_DAMAGE,
                });
                if player.take_damage(ENEMY_PROJECTILE_DAMAGE) {
                    events.push(SimEvent::PlayerDied);
                }
            }
        }
    }
}
