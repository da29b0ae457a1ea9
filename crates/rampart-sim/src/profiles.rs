//! Stat tables for tower and enemy types.
//!
//! Consolidates per-type numbers and the wave-conditioned enemy type roll.

use rampart_core::constants::*;
use rampart_core::enums::{EnemyKind, HitEffect, TowerKind};

/// Base stats for a tower type at level 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerProfile {
    /// Gold needed to build.
    pub cost: u32,
    /// Upgrade cost at level N is `upgrade_base_cost * N`.
    pub upgrade_base_cost: u32,
    pub range: f64,
    pub damage: f64,
    /// Shots per second.
    pub fire_rate: f64,
    pub color: &'static str,
    pub effect: HitEffect,
}

pub fn tower_profile(kind: TowerKind) -> TowerProfile {
    match kind {
        TowerKind::Basic => TowerProfile {
            cost: 50,
            upgrade_base_cost: 25,
            range: 100.0,
            damage: 0.5,
            fire_rate: 1.0,
            color: "#27ae60",
            effect: HitEffect::None,
        },
        TowerKind::Power => TowerProfile {
            cost: 100,
            upgrade_base_cost: 50,
            range: 80.0,
            damage: 1.5,
            fire_rate: 0.8,
            color: "#e67e22",
            effect: HitEffect::None,
        },
        TowerKind::Freeze => TowerProfile {
            cost: 150,
            upgrade_base_cost: 75,
            range: 120.0,
            damage: 0.25,
            fire_rate: 1.5,
            color: "#3498db",
            effect: HitEffect::Slow {
                factor: FREEZE_SLOW_FACTOR,
                duration_secs: FREEZE_DURATION_SECS,
            },
        },
        TowerKind::Cannon => TowerProfile {
            cost: 120,
            upgrade_base_cost: 75,
            range: 90.0,
            damage: 2.0,
            fire_rate: 0.5,
            color: "#8b4513",
            effect: HitEffect::Splash {
                radius: SPLASH_RADIUS,
                fraction: SPLASH_DAMAGE_FRACTION,
            },
        },
        TowerKind::Lightning => TowerProfile {
            cost: 180,
            upgrade_base_cost: 75,
            range: 110.0,
            damage: 1.0,
            fire_rate: 1.2,
            color: "#9c27b0",
            effect: HitEffect::Chain {
                jumps: CHAIN_JUMPS,
                range: CHAIN_RANGE,
                falloff: CHAIN_DAMAGE_FALLOFF,
            },
        },
    }
}

/// Gold returned when a tower of `kind` is removed. Upgrade spend is not refunded.
pub fn removal_refund(kind: TowerKind) -> u32 {
    (tower_profile(kind).cost as f64 * REMOVAL_REFUND_FRACTION).floor() as u32
}

/// Fully resolved stats for one enemy about to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub kind: EnemyKind,
    pub health: f64,
    pub damage: u32,
    pub reward: u32,
    pub speed: f64,
    pub size: f64,
    pub color: &'static str,
}

fn goblin(health: f64) -> EnemyStats {
    EnemyStats {
        kind: EnemyKind::Goblin,
        health,
        damage: 1,
        reward: 5,
        speed: ENEMY_BASE_SPEED,
        size: 15.0,
        color: "#4CAF50",
    }
}

/// Pick an enemy type for `wave` from a uniform `draw` in `[0, 1)`.
///
/// Forced types are checked before the random draw:
/// waves 1-3 are all goblins, every 10th wave dragons, every 5th knights,
/// waves 4-6 goblins; after that 60% goblin, 15% scout, 10% orc, 15% demon.
pub fn roll_enemy(wave: u32, base_health: f64, draw: f64) -> EnemyStats {
    if wave <= 3 {
        return goblin(base_health);
    }

    if wave % BOSS_WAVE_INTERVAL == 0 {
        EnemyStats {
            kind: EnemyKind::Dragon,
            health: base_health * 6.0,
            damage: 12,
            reward: 50,
            speed: 60.0,
            size: 35.0,
            color: "#8E24AA",
        }
    } else if wave % KNIGHT_WAVE_INTERVAL == 0 {
        EnemyStats {
            kind: EnemyKind::Knight,
            health: base_health * 3.0,
            damage: 5,
            reward: 25,
            speed: 70.0,
            size: 28.0,
            color: "#37474F",
        }
    } else if wave <= 6 || draw < 0.60 {
        goblin(base_health)
    } else if draw < 0.75 {
        EnemyStats {
            kind: EnemyKind::Scout,
            health: (base_health * 0.7).floor().max(1.0),
            damage: 2,
            reward: 8,
            speed: 150.0,
            size: 12.0,
            color: "#4CAF50",
        }
    } else if draw < 0.85 {
        EnemyStats {
            kind: EnemyKind::Orc,
            health: (base_health * 1.3).floor(),
            damage: 3,
            reward: 25,
            speed: 70.0,
            size: 22.0,
            color: "#8D6E63",
        }
    } else {
        EnemyStats {
            kind: EnemyKind::Demon,
            health: (base_health * 1.1).floor(),
            damage: 2,
            reward: 10,
            speed: 100.0,
            size: 18.0,
            color: "#F44336",
        }
    }
}

/// The single enemy of a boss wave.
pub fn boss_stats(wave: u32) -> EnemyStats {
    EnemyStats {
        kind: EnemyKind::Boss,
        health: BOSS_BASE_HEALTH + BOSS_HEALTH_PER_WAVE * wave as f64,
        damage: BOSS_BASE_DAMAGE + wave / 2,
        reward: BOSS_BASE_REWARD + BOSS_REWARD_PER_WAVE * wave,
        speed: BOSS_SPEED,
        size: BOSS_SIZE,
        color: "#1A1A1A",
    }
}
