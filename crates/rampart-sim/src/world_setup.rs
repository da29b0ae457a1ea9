//! Entity spawn factories for towers, enemies and projectiles.

use hecs::{Entity, World};

use rampart_core::enums::TowerKind;
use rampart_core::geometry::Path;
use rampart_core::types::{EnemyId, Position, TowerId};

use crate::components::*;
use crate::profiles::{tower_profile, EnemyStats};
use crate::session::Session;
use crate::upgrades::upgrade_cost;

/// Spawn a level-1 tower of `kind` at `position`.
pub fn spawn_tower(
    world: &mut World,
    session: &mut Session,
    kind: TowerKind,
    position: Position,
) -> (Entity, TowerId) {
    let profile = tower_profile(kind);
    let id = session.allocate_tower_id();
    let tower = Tower {
        id,
        kind,
        level: 1,
        base_damage: profile.damage,
        base_range: profile.range,
        damage: profile.damage,
        range: profile.range,
        fire_rate: profile.fire_rate,
        cooldown_secs: 0.0,
        upgrade_cost: upgrade_cost(kind, 1),
        effect: profile.effect,
        selected: false,
    };
    (world.spawn((tower, position)), id)
}

/// Spawn an enemy at the start of the path with path progress 0.
pub fn spawn_enemy(
    world: &mut World,
    session: &mut Session,
    path: &Path,
    wave: u32,
    stats: EnemyStats,
    is_boss: bool,
) -> (Entity, EnemyId) {
    let id = session.allocate_enemy_id();
    let enemy = Enemy {
        id,
        kind: stats.kind,
        wave,
        damage: stats.damage,
        reward: stats.reward,
        speed: stats.speed,
        base_speed: stats.speed,
        size: stats.size,
        color: stats.color,
        path_index: 0,
        reached_end: false,
        freeze_secs: 0.0,
        is_boss,
    };
    let entity = world.spawn((enemy, Health::new(stats.health), path.start()));
    (entity, id)
}

/// Spawn a projectile at the tower's position, locked onto `target`.
pub fn spawn_projectile(
    world: &mut World,
    session: &mut Session,
    owner: Entity,
    origin: Position,
    target: Entity,
    target_pos: Position,
    tower: &Tower,
) -> Entity {
    let projectile = Projectile {
        seq: session.allocate_projectile_seq(),
        owner,
        target,
        damage: tower.damage,
        effect: tower.effect,
        heading: origin.angle_to(&target_pos),
        state: ProjectileState::InFlight,
    };
    world.spawn((projectile, origin))
}
