//! Enemy path-following.
//!
//! Each enemy has `speed * dt` of travel per tick. It walks straight toward
//! the next waypoint; within `WAYPOINT_EPSILON` of it (or on reaching it) the
//! path cursor advances and any travel left over carries into the next
//! segment, so a large `dt` covers the same ground as many small ones.
//! Reaching the final waypoint flags `reached_end`.

use hecs::World;

use rampart_core::constants::WAYPOINT_EPSILON;
use rampart_core::geometry::{step_toward, Path};
use rampart_core::types::Position;

use crate::components::Enemy;

pub fn run(world: &mut World, path: &Path, dt: f64) {
    for (_entity, (enemy, pos)) in world.query_mut::<(&mut Enemy, &mut Position)>() {
        advance(enemy, pos, path, dt);
    }
}

/// Advance a single enemy by `dt` seconds.
pub fn advance(enemy: &mut Enemy, pos: &mut Position, path: &Path, dt: f64) {
    if enemy.reached_end {
        return;
    }
    if enemy.path_index >= path.last_index() {
        enemy.reached_end = true;
        return;
    }

    if enemy.freeze_secs > 0.0 {
        enemy.freeze_secs -= dt;
        if enemy.freeze_secs <= 0.0 {
            enemy.freeze_secs = 0.0;
            enemy.speed = enemy.base_speed;
        }
    }

    let mut budget = enemy.speed * dt;
    while !enemy.reached_end {
        let Some(next) = path.waypoint(enemy.path_index + 1) else {
            enemy.reached_end = true;
            return;
        };
        if pos.distance_to(&next) < WAYPOINT_EPSILON {
            pass_waypoint(enemy, path);
            continue;
        }
        if budget <= 0.0 {
            return;
        }

        let step = step_toward(*pos, next, budget);
        budget -= pos.distance_to(&step.position);
        *pos = step.position;
        if !step.arrived {
            return;
        }
        pass_waypoint(enemy, path);
    }
}

fn pass_waypoint(enemy: &mut Enemy, path: &Path) {
    enemy.path_index += 1;
    if enemy.path_index >= path.last_index() {
        enemy.reached_end = true;
    }
}
