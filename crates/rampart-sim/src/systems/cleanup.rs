//! Enemy reaping: castle damage for escapees, rewards for kills.
//!
//! Shots still chasing a reaped enemy expire in the same tick, so no
//! snapshot shows a projectile homing on nothing.

use hecs::{Entity, World};
use tracing::debug;

use rampart_core::constants::{CASTLE_HIT_COLOR, CASTLE_TEXT_OFFSET, FLOATING_TEXT_LIFE};
use rampart_core::events::{FloatingText, GameEvent};
use rampart_core::geometry::Path;
use rampart_core::types::Position;

use crate::components::{Enemy, Health, Projectile, ProjectileState};
use crate::session::Session;

/// Castle damage for an enemy that escaped: its own damage plus a wave bonus.
pub fn castle_damage(enemy: &Enemy) -> i32 {
    (enemy.damage + enemy.wave / 3) as i32
}

/// Remove escaped and dead enemies, applying each outcome exactly once.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(
    world: &mut World,
    session: &mut Session,
    path: &Path,
    events: &mut Vec<GameEvent>,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut finished: Vec<(Entity, Enemy, bool)> = world
        .query::<(&Enemy, &Health)>()
        .iter()
        .filter(|(_, (enemy, health))| enemy.reached_end || !health.is_alive())
        .map(|(e, (enemy, _))| (e, enemy.clone(), enemy.reached_end))
        .collect();
    finished.sort_by_key(|(_, enemy, _)| enemy.id);

    despawn_buffer.clear();
    for (entity, enemy, escaped) in finished {
        if escaped {
            let damage = castle_damage(&enemy);
            session.castle_health -= damage;
            let end = path.end();
            session.floating_texts.push(FloatingText {
                position: Position::new(end.x + CASTLE_TEXT_OFFSET.0, end.y + CASTLE_TEXT_OFFSET.1),
                text: format!("-{damage}"),
                color: CASTLE_HIT_COLOR.to_string(),
                life: FLOATING_TEXT_LIFE,
            });
            debug!(
                enemy = %enemy.id,
                damage,
                castle = session.castle_health,
                "enemy reached the castle"
            );
            events.push(GameEvent::EnemyEscaped {
                enemy: enemy.id,
                kind: enemy.kind,
                damage,
            });
        } else {
            session.gold += enemy.reward;
            if session.current_boss == Some(entity) {
                session.current_boss = None;
            }
            events.push(GameEvent::EnemyKilled {
                enemy: enemy.id,
                kind: enemy.kind,
                reward: enemy.reward,
            });
        }
        despawn_buffer.push(entity);
    }

    if despawn_buffer.is_empty() {
        return;
    }
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if !projectile.is_resolved() && despawn_buffer.contains(&projectile.target) {
            projectile.state = ProjectileState::Expired;
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
