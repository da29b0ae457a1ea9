//! Per-session bookkeeping that is not an entity: economy, wave counters,
//! the boss handle and the player's selection.
//!
//! Stored in `SimulationEngine`, NOT in the ECS world.

use hecs::Entity;

use rampart_core::enums::Selection;
use rampart_core::events::FloatingText;
use rampart_core::types::{EnemyId, TowerId};

use crate::config::SimConfig;
use crate::scheduler::TimerId;

#[derive(Debug, Clone)]
pub struct Session {
    /// Only checked at spend time.
    pub gold: u32,
    /// May dip below zero for the tick that ends the game.
    pub castle_health: i32,
    pub wave: u32,
    /// Increments every 20 waves.
    pub level: u32,
    pub wave_in_progress: bool,
    pub boss_wave: bool,
    /// Weak handle: resolves to nothing once the boss leaves the world.
    pub current_boss: Option<Entity>,
    pub selection: Option<Selection>,
    /// Pending auto-clear for the highlighted tower.
    pub highlight_timer: Option<TimerId>,
    pub level_complete_secs: f64,
    pub floating_texts: Vec<FloatingText>,
    next_tower_id: u32,
    next_enemy_id: u32,
    next_projectile_seq: u64,
}

impl Session {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            gold: config.starting_gold,
            castle_health: config.castle_health,
            wave: 1,
            level: 1,
            wave_in_progress: false,
            boss_wave: false,
            current_boss: None,
            selection: None,
            highlight_timer: None,
            level_complete_secs: 0.0,
            floating_texts: Vec::new(),
            next_tower_id: 1,
            next_enemy_id: 1,
            next_projectile_seq: 0,
        }
    }

    pub fn allocate_tower_id(&mut self) -> TowerId {
        let id = TowerId(self.next_tower_id);
        self.next_tower_id += 1;
        id
    }

    pub fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        id
    }

    pub fn allocate_projectile_seq(&mut self) -> u64 {
        let seq = self.next_projectile_seq;
        self.next_projectile_seq += 1;
        seq
    }

    /// Debit `amount` if affordable. Gold never goes below zero.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        match self.gold.checked_sub(amount) {
            Some(rest) => {
                self.gold = rest;
                true
            }
            None => false,
        }
    }
}
