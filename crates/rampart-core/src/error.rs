//! Rejected-command taxonomy.
//!
//! None of these are fatal: the engine leaves its state untouched (apart
//! from the documented selection side effects) and reports the reason.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::TowerId;

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CommandError {
    #[error("the game has not been started")]
    NotStarted,
    #[error("the game is already running")]
    AlreadyStarted,
    #[error("the game is over")]
    GameOver,
    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientGold { needed: u32, available: u32 },
    #[error("position ({x}, {y}) is not a finite point")]
    InvalidPosition { x: f64, y: f64 },
    #[error("too close to the path ({distance:.1} units)")]
    TooCloseToPath { distance: f64 },
    #[error("no tower at ({x:.0}, {y:.0})")]
    NoTowerAt { x: f64, y: f64 },
    #[error("{tower} does not exist")]
    TowerNotFound { tower: TowerId },
    #[error("{tower} must be selected before upgrading")]
    NotSelected { tower: TowerId },
    #[error("{tower} is already at max level")]
    MaxLevel { tower: TowerId },
}
