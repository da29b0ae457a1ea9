//! Game state snapshot: the complete visible state handed to a renderer.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{FloatingText, GameEvent};
use crate::types::{EnemyId, Position, SimTime, TowerId};

/// Everything a renderer needs for one frame. Built after every tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub gold: u32,
    pub wave: u32,
    pub level: u32,
    pub castle_health: i32,
    pub wave_in_progress: bool,
    pub selection: Option<Selection>,
    /// In placement order.
    pub towers: Vec<TowerView>,
    /// In spawn order.
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub boss: Option<BossView>,
    pub floating_texts: Vec<FloatingText>,
    /// Seconds left on the level-complete banner (0 when hidden).
    pub level_complete_secs: f64,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TowerView {
    pub id: TowerId,
    pub kind: TowerKind,
    pub position: Position,
    pub level: u8,
    pub range: f64,
    pub damage: f64,
    /// Zero once the tower is maxed.
    pub upgrade_cost: u32,
    pub color: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub size: f64,
    pub color: String,
    /// True while a slow effect is active.
    pub slowed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Position,
    /// Heading toward the target (radians, atan2 convention).
    pub angle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub enemy: EnemyId,
    pub health: f64,
    pub max_health: f64,
}

/// Result of hovering a placement candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementPreview {
    pub position: Position,
    pub kind: TowerKind,
    pub range: f64,
    pub valid: bool,
    pub affordable: bool,
}
