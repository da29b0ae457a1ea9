//! Wave/spawn controller: decides wave composition and staggers spawns.

use hecs::World;
use rand::{Rng, RngCore};
use tracing::{debug, info};

use rampart_core::constants::*;
use rampart_core::events::GameEvent;
use rampart_core::geometry::Path;

use crate::profiles::{boss_stats, roll_enemy};
use crate::scheduler::{ScheduledAction, Scheduler};
use crate::session::Session;
use crate::world_setup;

/// What a wave consists of.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WavePlan {
    /// A single boss, spawned immediately.
    Boss,
    /// `count` enemies sharing `base_health`, one every `SPAWN_STAGGER_SECS`.
    Horde { count: u32, base_health: f64 },
}

/// Per-enemy base health before the type multiplier.
pub fn base_health(wave: u32) -> f64 {
    match wave {
        0..=3 => 1.0,
        4..=6 => 2.0,
        _ => 1.0 + (0.8 * wave as f64).floor(),
    }
}

pub fn enemy_count(wave: u32) -> u32 {
    BASE_ENEMY_COUNT + wave / 3
}

pub fn plan_wave(wave: u32) -> WavePlan {
    if wave % BOSS_WAVE_INTERVAL == 0 {
        WavePlan::Boss
    } else {
        WavePlan::Horde {
            count: enemy_count(wave),
            base_health: base_health(wave),
        }
    }
}

/// Start the session's current wave: spawn the boss or schedule the horde.
pub fn start_wave(
    world: &mut World,
    session: &mut Session,
    scheduler: &mut Scheduler,
    path: &Path,
    now: f64,
    events: &mut Vec<GameEvent>,
) {
    let wave = session.wave;
    match plan_wave(wave) {
        WavePlan::Boss => {
            let stats = boss_stats(wave);
            let (boss, id) = world_setup::spawn_enemy(world, session, path, wave, stats, true);
            session.boss_wave = true;
            session.current_boss = Some(boss);
            info!(wave, health = stats.health, "boss wave started");
            events.push(GameEvent::WaveStarted {
                wave,
                enemies: 1,
                boss: true,
            });
            events.push(GameEvent::EnemySpawned {
                enemy: id,
                kind: stats.kind,
                health: stats.health,
            });
        }
        WavePlan::Horde { count, base_health } => {
            for i in 0..count {
                scheduler.schedule(
                    now + i as f64 * SPAWN_STAGGER_SECS,
                    ScheduledAction::SpawnEnemy { wave, base_health },
                );
            }
            info!(wave, count, base_health, "wave started");
            events.push(GameEvent::WaveStarted {
                wave,
                enemies: count,
                boss: false,
            });
        }
    }
    session.wave_in_progress = true;
}

/// Materialise one scheduled enemy, rolling its type from `rng`.
pub fn spawn_scheduled(
    world: &mut World,
    session: &mut Session,
    path: &Path,
    rng: &mut dyn RngCore,
    wave: u32,
    base_health: f64,
    events: &mut Vec<GameEvent>,
) {
    let draw: f64 = rng.gen();
    let stats = roll_enemy(wave, base_health, draw);
    let (_, id) = world_setup::spawn_enemy(world, session, path, wave, stats, false);
    debug!(enemy = %id, wave, kind = ?stats.kind, health = stats.health, "enemy spawned");
    events.push(GameEvent::EnemySpawned {
        enemy: id,
        kind: stats.kind,
        health: stats.health,
    });
}
