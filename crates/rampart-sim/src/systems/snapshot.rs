//! Snapshot system: reads the ECS world and session into a
//! `GameStateSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::*;
use rampart_core::types::{Position, SimTime};

use crate::components::*;
use crate::session::Session;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    session: &Session,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        gold: session.gold,
        wave: session.wave,
        level: session.level,
        castle_health: session.castle_health,
        wave_in_progress: session.wave_in_progress,
        selection: session.selection,
        towers: build_towers(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        boss: build_boss(world, session),
        floating_texts: session.floating_texts.clone(),
        level_complete_secs: session.level_complete_secs,
        events,
    }
}

fn build_towers(world: &World) -> Vec<TowerView> {
    let mut towers: Vec<TowerView> = world
        .query::<(&Tower, &Position)>()
        .iter()
        .map(|(_, (tower, pos))| TowerView {
            id: tower.id,
            kind: tower.kind,
            position: *pos,
            level: tower.level,
            range: tower.range,
            damage: tower.damage,
            upgrade_cost: tower.upgrade_cost,
            color: crate::profiles::tower_profile(tower.kind).color.to_string(),
            selected: tower.selected,
        })
        .collect();
    towers.sort_by_key(|t| t.id);
    towers
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut enemies: Vec<EnemyView> = world
        .query::<(&Enemy, &Health, &Position)>()
        .iter()
        .map(|(_, (enemy, health, pos))| EnemyView {
            id: enemy.id,
            kind: enemy.kind,
            position: *pos,
            health: health.current,
            max_health: health.max,
            size: enemy.size,
            color: enemy.color.to_string(),
            slowed: enemy.freeze_secs > 0.0,
        })
        .collect();
    enemies.sort_by_key(|e| e.id);
    enemies
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut shots: Vec<(u64, ProjectileView)> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .filter(|(_, (p, _))| !p.is_resolved())
        .map(|(_, (p, pos))| {
            (
                p.seq,
                ProjectileView {
                    position: *pos,
                    angle: p.heading,
                },
            )
        })
        .collect();
    shots.sort_by_key(|(seq, _)| *seq);
    shots.into_iter().map(|(_, view)| view).collect()
}

/// Resolves the boss handle; a boss that left the world yields `None`.
fn build_boss(world: &World, session: &Session) -> Option<BossView> {
    let boss = session.current_boss?;
    let mut query = world.query_one::<(&Enemy, &Health)>(boss).ok()?;
    let (enemy, health) = query.get()?;
    if !health.is_alive() {
        return None;
    }
    Some(BossView {
        enemy: enemy.id,
        health: health.current,
        max_health: health.max,
    })
}
