//! ECS components for hecs entities.
//!
//! Components are plain data. Entities also carry a
//! `rampart_core::types::Position`.

use hecs::Entity;

use rampart_core::enums::{EnemyKind, HitEffect, TowerKind};
use rampart_core::types::{EnemyId, TowerId};

/// A placed tower. Position is fixed at placement.
#[derive(Debug, Clone)]
pub struct Tower {
    pub id: TowerId,
    pub kind: TowerKind,
    /// 1..=MAX_TOWER_LEVEL, only ever increases.
    pub level: u8,
    pub base_damage: f64,
    pub base_range: f64,
    pub damage: f64,
    pub range: f64,
    /// Shots per second. Only enforced under fire-rate gating.
    pub fire_rate: f64,
    /// Seconds until the next shot is allowed (fire-rate gating only).
    pub cooldown_secs: f64,
    /// Cost of the next level, 0 once maxed.
    pub upgrade_cost: u32,
    pub effect: HitEffect,
    /// Range highlight for the renderer.
    pub selected: bool,
}

/// A walking enemy. Health lives in its own component.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    /// Wave the enemy was spawned in; feeds the castle damage bonus.
    pub wave: u32,
    /// Damage dealt to the castle on escape.
    pub damage: u32,
    /// Gold granted on death.
    pub reward: u32,
    pub speed: f64,
    pub base_speed: f64,
    pub size: f64,
    pub color: &'static str,
    /// Index of the last waypoint passed.
    pub path_index: usize,
    pub reached_end: bool,
    /// Remaining slow duration; speed resets to base when it expires.
    pub freeze_secs: f64,
    pub is_boss: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// A homing shot. Holds a handle to its target, never the target itself.
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    /// Creation order, for deterministic processing.
    pub seq: u64,
    /// Firing tower; projectiles are advanced and pruned by their owner.
    pub owner: Entity,
    pub target: Entity,
    /// Copied at fire time; later upgrades do not affect shots in flight.
    pub damage: f64,
    pub effect: HitEffect,
    /// Heading toward the target's last known position.
    pub heading: f64,
    pub state: ProjectileState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    InFlight,
    /// Reached its target and applied damage exactly once.
    Hit,
    /// Target vanished before impact; no damage applied.
    Expired,
}

impl Health {
    pub fn new(max: f64) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }
}

impl Projectile {
    pub fn is_resolved(&self) -> bool {
        self.state != ProjectileState::InFlight
    }
}
