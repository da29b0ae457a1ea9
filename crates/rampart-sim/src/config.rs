//! Session configuration.

use serde::{Deserialize, Serialize};

use rampart_core::constants::{STARTING_CASTLE_HEALTH, STARTING_GOLD};
use rampart_core::geometry::Path;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same commands = same game.
    pub seed: u64,
    pub starting_gold: u32,
    pub castle_health: i32,
    pub path: Path,
    #[serde(default)]
    pub rules: CombatRules,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            starting_gold: STARTING_GOLD,
            castle_health: STARTING_CASTLE_HEALTH,
            path: Path::classic(),
            rules: CombatRules::default(),
        }
    }
}

/// Optional combat mechanics. The default reproduces the classic game:
/// towers fire every tick and only direct damage is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatRules {
    /// Limit each tower to `fire_rate` shots per second.
    pub fire_rate_gating: bool,
    /// Resolve slow/splash/chain effects on impact.
    pub special_effects: bool,
}

impl CombatRules {
    /// Every optional mechanic switched on.
    pub fn full() -> Self {
        Self {
            fire_rate_gating: true,
            special_effects: true,
        }
    }
}
