//! Projectile resolution: homing flight, impact, and on-hit effects.
//!
//! A projectile chases its target's current position. The target is an
//! entity handle, so a target that left the world is an explicit branch:
//! the shot expires without effect.

use hecs::{Entity, World};

use rampart_core::constants::{PROJECTILE_HIT_RADIUS, PROJECTILE_SPEED};
use rampart_core::enums::HitEffect;
use rampart_core::geometry::step_toward;
use rampart_core::types::Position;

use crate::components::{Enemy, Health, Projectile, ProjectileState};
use crate::config::CombatRules;

/// Advance one projectile by `dt`. Resolved projectiles are left untouched.
pub fn advance(world: &mut World, entity: Entity, dt: f64, rules: &CombatRules) {
    let (projectile, pos) = match world.query_one_mut::<(&Projectile, &Position)>(entity) {
        Ok((p, pos)) => (*p, *pos),
        Err(_) => return,
    };
    if projectile.is_resolved() {
        return;
    }

    let target_pos = world.get::<&Position>(projectile.target).map(|p| *p);
    let target_pos = match target_pos {
        Ok(p) => p,
        Err(_) => {
            set_state(world, entity, ProjectileState::Expired);
            return;
        }
    };

    if pos.distance_to(&target_pos) < PROJECTILE_HIT_RADIUS {
        set_state(world, entity, ProjectileState::Hit);
        apply_damage(world, projectile.target, projectile.damage);
        if rules.special_effects {
            apply_effect(
                world,
                projectile.target,
                target_pos,
                projectile.damage,
                projectile.effect,
            );
        }
        return;
    }

    let step = step_toward(pos, target_pos, PROJECTILE_SPEED * dt);
    if let Ok((p, position)) = world.query_one_mut::<(&mut Projectile, &mut Position)>(entity) {
        *position = step.position;
        p.heading = step.position.angle_to(&target_pos);
        if step.position == target_pos {
            // Sitting on the target; keep the last real heading.
            p.heading = projectile.heading;
        }
    }
}

fn set_state(world: &mut World, entity: Entity, state: ProjectileState) {
    if let Ok(mut p) = world.get::<&mut Projectile>(entity) {
        p.state = state;
    }
}

fn apply_damage(world: &mut World, target: Entity, damage: f64) {
    if let Ok(mut health) = world.get::<&mut Health>(target) {
        health.current -= damage;
    }
}

/// Live enemies other than those in `exclude`, with their positions.
fn live_enemies(world: &World, exclude: &[Entity]) -> Vec<(Entity, u32, Position)> {
    let mut found: Vec<(Entity, u32, Position)> = world
        .query::<(&Enemy, &Health, &Position)>()
        .iter()
        .filter(|(e, (enemy, health, _))| {
            health.is_alive() && !enemy.reached_end && !exclude.contains(e)
        })
        .map(|(e, (enemy, _, pos))| (e, enemy.id.0, *pos))
        .collect();
    found.sort_by_key(|(_, id, _)| *id);
    found
}

fn apply_effect(
    world: &mut World,
    target: Entity,
    impact: Position,
    damage: f64,
    effect: HitEffect,
) {
    match effect {
        HitEffect::None => {}
        HitEffect::Slow {
            factor,
            duration_secs,
        } => {
            if let Ok(mut enemy) = world.get::<&mut Enemy>(target) {
                enemy.speed = enemy.base_speed * factor;
                enemy.freeze_secs = duration_secs;
            }
        }
        HitEffect::Splash { radius, fraction } => {
            let splashed: Vec<Entity> = live_enemies(world, &[target])
                .into_iter()
                .filter(|(_, _, pos)| pos.distance_to(&impact) <= radius)
                .map(|(e, _, _)| e)
                .collect();
            for e in splashed {
                apply_damage(world, e, damage * fraction);
            }
        }
        HitEffect::Chain {
            jumps,
            range,
            falloff,
        } => {
            let mut struck = vec![target];
            let mut from = impact;
            let mut arc_damage = damage;
            for _ in 0..jumps {
                arc_damage *= falloff;
                let next = live_enemies(world, &struck)
                    .into_iter()
                    .map(|(e, _, pos)| (e, pos, pos.distance_to(&from)))
                    .filter(|(_, _, d)| *d <= range)
                    // Ties go to the earliest spawned.
                    .min_by(|a, b| a.2.total_cmp(&b.2));
                let Some((e, pos, _)) = next else {
                    break;
                };
                apply_damage(world, e, arc_damage);
                struck.push(e);
                from = pos;
            }
        }
    }
}
