//! Player commands sent from the input layer to the simulation.
//!
//! Commands are either applied immediately or queued for processing at the
//! next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::{Selection, TowerKind};
use crate::types::TowerId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Leave the ready screen and enable simulation.
    StartGame,
    /// Choose a tower type to build, or removal mode.
    SelectTowerType { selection: Selection },
    /// Drop the pending placement mode.
    ClearSelection,
    /// Click on the playfield: place, remove, select or upgrade depending
    /// on the current selection mode.
    InteractAt { x: f64, y: f64 },
    /// Upgrade an already-selected tower.
    UpgradeTower { tower: TowerId },
    TogglePause,
}

/// What an accepted command did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandOutcome {
    Started,
    SelectionChanged { selection: Option<Selection> },
    Placed { tower: TowerId, kind: TowerKind, cost: u32 },
    Removed { tower: TowerId, refund: u32 },
    Upgraded { tower: TowerId, level: u8, cost: u32 },
    /// A tower was selected for range display.
    Selected { tower: TowerId },
    /// Click on empty space; every highlight was cleared.
    Deselected,
    PauseToggled { paused: bool },
}
