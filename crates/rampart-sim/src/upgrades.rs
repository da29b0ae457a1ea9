//! Tower upgrade ladder: Level1 → Level2 → Level3 (terminal).
//!
//! Gold is the caller's concern; these functions only move the tower's stats.

use rampart_core::constants::{MAX_LEVEL_RANGE_FACTOR, MAX_TOWER_LEVEL};
use rampart_core::enums::TowerKind;

use crate::components::Tower;
use crate::profiles::tower_profile;

/// Cost to go from `level` to `level + 1`; 0 at max level.
pub fn upgrade_cost(kind: TowerKind, level: u8) -> u32 {
    if level >= MAX_TOWER_LEVEL {
        return 0;
    }
    tower_profile(kind).upgrade_base_cost * level as u32
}

pub fn can_upgrade(tower: &Tower) -> bool {
    tower.level < MAX_TOWER_LEVEL
}

/// Advance one level. Returns the new level, or `None` when already maxed.
///
/// Level 2 doubles base damage; level 3 triples it and adds 30% range.
pub fn upgrade(tower: &mut Tower) -> Option<u8> {
    if !can_upgrade(tower) {
        return None;
    }
    tower.level += 1;
    match tower.level {
        2 => tower.damage = tower.base_damage * 2.0,
        3 => {
            tower.damage = tower.base_damage * 3.0;
            tower.range = tower.base_range * MAX_LEVEL_RANGE_FACTOR;
        }
        _ => {}
    }
    tower.upgrade_cost = upgrade_cost(tower.kind, tower.level);
    Some(tower.level)
}
