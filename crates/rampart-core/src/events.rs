//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{EnemyKind, TowerKind};
use crate::error::CommandError;
use crate::types::{EnemyId, Position, TowerId};

/// Discrete things that happened during a tick, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    WaveStarted { wave: u32, enemies: u32, boss: bool },
    EnemySpawned { enemy: EnemyId, kind: EnemyKind, health: f64 },
    EnemyKilled { enemy: EnemyId, kind: EnemyKind, reward: u32 },
    /// An enemy walked off the end of the path and hit the castle.
    EnemyEscaped { enemy: EnemyId, kind: EnemyKind, damage: i32 },
    WaveCleared { wave: u32 },
    LevelComplete { level: u32 },
    TowerPlaced { tower: TowerId, kind: TowerKind, position: Position },
    TowerRemoved { tower: TowerId, refund: u32 },
    TowerUpgraded { tower: TowerId, level: u8 },
    TowerSelected { tower: TowerId },
    CommandRejected { error: CommandError },
    GameOver { wave: u32, level: u32 },
}

/// A transient floating number (e.g. castle damage) for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub position: Position,
    pub text: String,
    pub color: String,
    /// Remaining life in `[0, 1]`; doubles as opacity.
    pub life: f64,
}
