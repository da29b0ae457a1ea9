//! Tower fire control: advance and prune each tower's projectiles, then
//! pick the nearest target in range and fire.

use hecs::{Entity, World};
use tracing::trace;

use rampart_core::types::Position;

use crate::components::{Enemy, Health, Projectile, Tower};
use crate::config::CombatRules;
use crate::session::Session;
use crate::systems::projectiles;
use crate::world_setup;

/// Run fire control for every tower, in placement order.
pub fn run(
    world: &mut World,
    session: &mut Session,
    rules: &CombatRules,
    dt: f64,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut towers: Vec<(Entity, u32)> = world
        .query::<&Tower>()
        .iter()
        .map(|(e, t)| (e, t.id.0))
        .collect();
    towers.sort_by_key(|(_, id)| *id);

    for (tower_entity, _) in towers {
        update_projectiles(world, tower_entity, dt, rules, despawn_buffer);
        fire(world, session, tower_entity, rules, dt);
    }
}

/// Advance this tower's shots, then remove the resolved ones.
fn update_projectiles(
    world: &mut World,
    tower: Entity,
    dt: f64,
    rules: &CombatRules,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut owned: Vec<(Entity, u64)> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.owner == tower)
        .map(|(e, p)| (e, p.seq))
        .collect();
    owned.sort_by_key(|(_, seq)| *seq);

    for &(entity, _) in &owned {
        projectiles::advance(world, entity, dt, rules);
    }

    despawn_buffer.clear();
    for (entity, _) in owned {
        let resolved = world
            .get::<&Projectile>(entity)
            .map(|p| p.is_resolved())
            .unwrap_or(false);
        if resolved {
            despawn_buffer.push(entity);
        }
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn fire(
    world: &mut World,
    session: &mut Session,
    tower_entity: Entity,
    rules: &CombatRules,
    dt: f64,
) {
    let (tower, origin) = match world.query_one_mut::<(&mut Tower, &Position)>(tower_entity) {
        Ok((tower, pos)) => {
            if rules.fire_rate_gating {
                tower.cooldown_secs = (tower.cooldown_secs - dt).max(0.0);
                if tower.cooldown_secs > 0.0 {
                    return;
                }
            }
            (tower.clone(), *pos)
        }
        Err(_) => return,
    };

    let Some((target, target_pos)) = select_target(world, origin, tower.range) else {
        return;
    };

    let shot = world_setup::spawn_projectile(
        world,
        session,
        tower_entity,
        origin,
        target,
        target_pos,
        &tower,
    );
    trace!(tower = %tower.id, ?shot, "fired");

    if rules.fire_rate_gating && tower.fire_rate > 0.0 {
        if let Ok(mut t) = world.get::<&mut Tower>(tower_entity) {
            t.cooldown_secs = 1.0 / t.fire_rate;
        }
    }
}

/// Nearest live enemy strictly inside `range`; ties go to the earliest spawned.
pub fn select_target(world: &World, origin: Position, range: f64) -> Option<(Entity, Position)> {
    let mut best: Option<(Entity, Position, f64, u32)> = None;
    for (entity, (enemy, health, pos)) in world.query::<(&Enemy, &Health, &Position)>().iter() {
        if !health.is_alive() || enemy.reached_end {
            continue;
        }
        let distance = origin.distance_to(pos);
        if distance >= range {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, _, best_distance, best_id)) => {
                distance < best_distance || (distance == best_distance && enemy.id.0 < best_id)
            }
        };
        if better {
            best = Some((entity, *pos, distance, enemy.id.0));
        }
    }
    best.map(|(entity, pos, _, _)| (entity, pos))
}
