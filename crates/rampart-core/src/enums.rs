//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tower type. Immutable after placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerKind {
    /// Archer tower: cheap, medium range.
    Basic,
    /// Knight tower: short range, heavy hits.
    Power,
    /// Mage tower: long range, slows on hit.
    Freeze,
    /// Cannon: splash damage around the impact.
    Cannon,
    /// Lightning: chains to nearby enemies.
    Lightning,
}

impl TowerKind {
    pub const ALL: [TowerKind; 5] = [
        TowerKind::Basic,
        TowerKind::Power,
        TowerKind::Freeze,
        TowerKind::Cannon,
        TowerKind::Lightning,
    ];
}

/// Enemy type, assigned once at spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Goblin,
    Scout,
    Orc,
    Demon,
    Knight,
    Dragon,
    Boss,
}

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start command; nothing simulates.
    #[default]
    NotStarted,
    Active,
    /// Ticks are render-only; timers are frozen.
    Paused,
    /// Castle fell. Terminal.
    GameOver,
}

/// Pending placement mode chosen from the tower bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "kind", rename_all = "lowercase")]
pub enum Selection {
    Build(TowerKind),
    Remove,
}

/// What a tower's projectile does on impact beyond direct damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HitEffect {
    None,
    /// Multiply the target's speed by `factor` for `duration_secs`.
    Slow { factor: f64, duration_secs: f64 },
    /// Deal `fraction` of the damage to other enemies within `radius`.
    Splash { radius: f64, fraction: f64 },
    /// Jump to up to `jumps` further enemies within `range` of the last one,
    /// multiplying damage by `falloff` at each jump.
    Chain { jumps: u32, range: f64, falloff: f64 },
}
