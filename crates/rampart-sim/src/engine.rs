//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the session record and the
//! timer queue, processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use rampart_core::commands::{CommandOutcome, PlayerCommand};
use rampart_core::constants::*;
use rampart_core::enums::{GamePhase, Selection, TowerKind};
use rampart_core::error::CommandError;
use rampart_core::events::GameEvent;
use rampart_core::geometry::Path;
use rampart_core::state::{GameStateSnapshot, PlacementPreview};
use rampart_core::types::{Position, SimTime, TowerId};

use crate::components::{Enemy, Projectile, Tower};
use crate::config::{CombatRules, SimConfig};
use crate::profiles::{removal_refund, tower_profile};
use crate::scheduler::{ScheduledAction, Scheduler, TimerId};
use crate::session::Session;
use crate::systems;
use crate::upgrades;
use crate::world_setup;

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: Box<dyn RngCore + Send>,
    path: Path,
    rules: CombatRules,
    session: Session,
    scheduler: Scheduler,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Create a new engine with a ChaCha8 RNG seeded from `config.seed`.
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, Box::new(rng))
    }

    /// Create a new engine drawing enemy types from an injected RNG.
    pub fn with_rng(config: SimConfig, rng: Box<dyn RngCore + Send>) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng,
            session: Session::new(&config),
            path: config.path,
            rules: config.rules,
            scheduler: Scheduler::new(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    /// Rejections surface as `GameEvent::CommandRejected`.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// Queued commands are always processed. State only advances while the
    /// game is active: not-started, paused and game-over ticks are render-only.
    pub fn tick(&mut self, dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
            self.time.advance(dt);
            self.run_systems(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.session,
            events,
        )
    }

    /// Current state without advancing anything. Pending events stay queued.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.session,
            Vec::new(),
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn gold(&self) -> u32 {
        self.session.gold
    }

    pub fn castle_health(&self) -> i32 {
        self.session.castle_health
    }

    pub fn wave(&self) -> u32 {
        self.session.wave
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get a read-only reference to the session record.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Enemies alive in the world plus those scheduled but not yet spawned.
    pub fn active_enemy_count(&self) -> usize {
        self.enemy_count() + self.scheduler.pending_spawns()
    }

    /// What placing the selected tower type at `(x, y)` would do.
    pub fn placement_preview(&self, x: f64, y: f64) -> Option<PlacementPreview> {
        let Some(Selection::Build(kind)) = self.session.selection else {
            return None;
        };
        let position = Position::new(x, y);
        let profile = tower_profile(kind);
        Some(PlacementPreview {
            position,
            kind,
            range: profile.range,
            valid: position.is_finite() && self.path.is_clear_of(position, PATH_CLEARANCE),
            affordable: self.session.gold >= profile.cost,
        })
    }

    /// Apply a command immediately and report the outcome.
    pub fn apply_command(
        &mut self,
        command: PlayerCommand,
    ) -> Result<CommandOutcome, CommandError> {
        if command != PlayerCommand::StartGame {
            self.ensure_playable()?;
        }

        match command {
            PlayerCommand::StartGame => self.start_game(),
            PlayerCommand::SelectTowerType { selection } => {
                self.session.selection = Some(selection);
                debug!(?selection, "selection changed");
                Ok(CommandOutcome::SelectionChanged {
                    selection: Some(selection),
                })
            }
            PlayerCommand::ClearSelection => {
                self.session.selection = None;
                Ok(CommandOutcome::SelectionChanged { selection: None })
            }
            PlayerCommand::InteractAt { x, y } => self.interact_at(Position::new(x, y)),
            PlayerCommand::UpgradeTower { tower } => {
                let entity = self
                    .find_tower(tower)
                    .ok_or(CommandError::TowerNotFound { tower })?;
                let selected = self
                    .world
                    .get::<&Tower>(entity)
                    .map(|t| t.selected)
                    .unwrap_or(false);
                if !selected {
                    return Err(CommandError::NotSelected { tower });
                }
                self.upgrade_tower(entity, tower)
            }
            PlayerCommand::TogglePause => {
                self.phase = match self.phase {
                    GamePhase::Active => GamePhase::Paused,
                    _ => GamePhase::Active,
                };
                let paused = self.phase == GamePhase::Paused;
                info!(paused, "pause toggled");
                Ok(CommandOutcome::PauseToggled { paused })
            }
        }
    }

    // --- Commands ---

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(error) = self.apply_command(command) {
                debug!(%error, "command rejected");
                self.events.push(GameEvent::CommandRejected { error });
            }
        }
    }

    fn start_game(&mut self) -> Result<CommandOutcome, CommandError> {
        match self.phase {
            GamePhase::NotStarted => {
                self.phase = GamePhase::Active;
                info!(
                    gold = self.session.gold,
                    castle = self.session.castle_health,
                    "game started"
                );
                Ok(CommandOutcome::Started)
            }
            GamePhase::GameOver => Err(CommandError::GameOver),
            GamePhase::Active | GamePhase::Paused => Err(CommandError::AlreadyStarted),
        }
    }

    fn ensure_playable(&self) -> Result<(), CommandError> {
        match self.phase {
            GamePhase::NotStarted => Err(CommandError::NotStarted),
            GamePhase::GameOver => Err(CommandError::GameOver),
            GamePhase::Active | GamePhase::Paused => Ok(()),
        }
    }

    /// Click dispatch: removal mode, then placement (if affordable), then
    /// selection / upgrade-on-reselect.
    fn interact_at(&mut self, position: Position) -> Result<CommandOutcome, CommandError> {
        match self.session.selection {
            Some(Selection::Remove) => {
                // Removal mode is one-shot, hit or miss.
                self.session.selection = None;
                let (entity, tower) = self.find_tower_at(position).ok_or(CommandError::NoTowerAt {
                    x: position.x,
                    y: position.y,
                })?;
                self.remove_tower(entity, tower)
            }
            Some(Selection::Build(kind)) if self.session.gold >= tower_profile(kind).cost => {
                self.place_tower(kind, position)
            }
            Some(Selection::Build(kind)) => match self.select_or_upgrade(position)? {
                CommandOutcome::Deselected => Err(CommandError::InsufficientGold {
                    needed: tower_profile(kind).cost,
                    available: self.session.gold,
                }),
                outcome => Ok(outcome),
            },
            None => self.select_or_upgrade(position),
        }
    }

    fn place_tower(
        &mut self,
        kind: TowerKind,
        position: Position,
    ) -> Result<CommandOutcome, CommandError> {
        if !position.is_finite() {
            return Err(CommandError::InvalidPosition {
                x: position.x,
                y: position.y,
            });
        }
        let distance = self.path.distance_to(position);
        if distance < PATH_CLEARANCE {
            return Err(CommandError::TooCloseToPath { distance });
        }
        let cost = tower_profile(kind).cost;
        if !self.session.try_spend(cost) {
            return Err(CommandError::InsufficientGold {
                needed: cost,
                available: self.session.gold,
            });
        }

        let (_, tower) =
            world_setup::spawn_tower(&mut self.world, &mut self.session, kind, position);
        debug!(
            %tower,
            ?kind,
            x = position.x,
            y = position.y,
            gold = self.session.gold,
            "tower placed"
        );
        self.events.push(GameEvent::TowerPlaced {
            tower,
            kind,
            position,
        });
        Ok(CommandOutcome::Placed { tower, kind, cost })
    }

    /// Remove a tower and its projectiles, refunding half its build cost.
    fn remove_tower(
        &mut self,
        entity: Entity,
        tower: TowerId,
    ) -> Result<CommandOutcome, CommandError> {
        let (kind, selected) = self
            .world
            .get::<&Tower>(entity)
            .map(|t| (t.kind, t.selected))
            .map_err(|_| CommandError::TowerNotFound { tower })?;

        self.despawn_buffer.clear();
        for (e, p) in self.world.query::<&Projectile>().iter() {
            if p.owner == entity {
                self.despawn_buffer.push(e);
            }
        }
        self.despawn_buffer.push(entity);
        for e in self.despawn_buffer.drain(..) {
            let _ = self.world.despawn(e);
        }

        if selected {
            if let Some(timer) = self.session.highlight_timer.take() {
                self.scheduler.cancel(timer);
            }
        }

        let refund = removal_refund(kind);
        self.session.gold += refund;
        debug!(%tower, refund, gold = self.session.gold, "tower removed");
        self.events.push(GameEvent::TowerRemoved { tower, refund });
        Ok(CommandOutcome::Removed { tower, refund })
    }

    /// Clear every highlight, then either upgrade the clicked tower (if it
    /// was already highlighted) or highlight it with a fresh timeout.
    fn select_or_upgrade(&mut self, position: Position) -> Result<CommandOutcome, CommandError> {
        let clicked = self.find_tower_at(position);
        let was_selected = clicked
            .and_then(|(e, _)| self.world.get::<&Tower>(e).ok().map(|t| t.selected))
            .unwrap_or(false);

        for (_entity, tower) in self.world.query_mut::<&mut Tower>() {
            tower.selected = false;
        }
        if let Some(timer) = self.session.highlight_timer.take() {
            self.scheduler.cancel(timer);
        }

        let Some((entity, id)) = clicked else {
            return Ok(CommandOutcome::Deselected);
        };

        if was_selected {
            let affordable_upgrade = self
                .world
                .get::<&Tower>(entity)
                .map(|t| upgrades::can_upgrade(&t) && self.session.gold >= t.upgrade_cost)
                .unwrap_or(false);
            if affordable_upgrade {
                return self.upgrade_tower(entity, id);
            }
        }

        match self.world.get::<&mut Tower>(entity) {
            Ok(mut t) => t.selected = true,
            Err(_) => return Err(CommandError::TowerNotFound { tower: id }),
        }
        let timer = self.scheduler.schedule(
            self.time.elapsed_secs + SELECTION_TIMEOUT_SECS,
            ScheduledAction::ClearHighlight { tower: entity },
        );
        self.session.highlight_timer = Some(timer);
        self.events.push(GameEvent::TowerSelected { tower: id });
        Ok(CommandOutcome::Selected { tower: id })
    }

    /// Deduct the upgrade cost, then advance the tower one level.
    fn upgrade_tower(
        &mut self,
        entity: Entity,
        id: TowerId,
    ) -> Result<CommandOutcome, CommandError> {
        let Ok(mut tower) = self.world.get::<&mut Tower>(entity) else {
            return Err(CommandError::TowerNotFound { tower: id });
        };
        if !upgrades::can_upgrade(&tower) {
            return Err(CommandError::MaxLevel { tower: id });
        }
        let cost = tower.upgrade_cost;
        if !self.session.try_spend(cost) {
            return Err(CommandError::InsufficientGold {
                needed: cost,
                available: self.session.gold,
            });
        }
        let Some(level) = upgrades::upgrade(&mut tower) else {
            return Err(CommandError::MaxLevel { tower: id });
        };
        drop(tower);

        debug!(tower = %id, level, cost, gold = self.session.gold, "tower upgraded");
        self.events.push(GameEvent::TowerUpgraded { tower: id, level });
        Ok(CommandOutcome::Upgraded {
            tower: id,
            level,
            cost,
        })
    }

    fn find_tower(&self, id: TowerId) -> Option<Entity> {
        self.world
            .query::<&Tower>()
            .iter()
            .find(|(_, t)| t.id == id)
            .map(|(e, _)| e)
    }

    /// First tower, in placement order, within click range of `position`.
    fn find_tower_at(&self, position: Position) -> Option<(Entity, TowerId)> {
        self.world
            .query::<(&Tower, &Position)>()
            .iter()
            .filter(|(_, (_, pos))| pos.within(&position, TOWER_HIT_RADIUS))
            .map(|(e, (t, _))| (e, t.id))
            .min_by_key(|(_, id)| *id)
    }

    fn enemy_count(&self) -> usize {
        self.world.query::<&Enemy>().iter().count()
    }

    // --- Tick ---

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        // 1. Deferred actions (staggered spawns, wave starts, highlight timeouts)
        for (timer, action) in self.scheduler.drain_due(self.time.elapsed_secs) {
            self.handle_scheduled(timer, action);
        }
        // 2. Towers: advance + prune projectiles, then target and fire
        systems::fire_control::run(
            &mut self.world,
            &mut self.session,
            &self.rules,
            dt,
            &mut self.despawn_buffer,
        );
        // 3. Floating texts and the level-complete banner
        systems::floating_text::run(&mut self.session.floating_texts, dt);
        if self.session.level_complete_secs > 0.0 {
            self.session.level_complete_secs = (self.session.level_complete_secs - dt).max(0.0);
        }
        // 4. Enemy movement
        systems::movement::run(&mut self.world, &self.path, dt);
        // 5. Reap escaped and dead enemies
        systems::cleanup::run(
            &mut self.world,
            &mut self.session,
            &self.path,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 6. Wave completion and auto-start
        self.update_waves();
        // 7. Game over
        if self.session.castle_health <= 0 {
            self.phase = GamePhase::GameOver;
            info!(wave = self.session.wave, level = self.session.level, "game over");
            self.events.push(GameEvent::GameOver {
                wave: self.session.wave,
                level: self.session.level,
            });
        }
    }

    fn handle_scheduled(&mut self, timer: TimerId, action: ScheduledAction) {
        match action {
            ScheduledAction::SpawnEnemy { wave, base_health } => {
                systems::wave_spawner::spawn_scheduled(
                    &mut self.world,
                    &mut self.session,
                    &self.path,
                    self.rng.as_mut(),
                    wave,
                    base_health,
                    &mut self.events,
                );
            }
            ScheduledAction::StartWave => self.start_wave(),
            ScheduledAction::ClearHighlight { tower } => {
                if let Ok(mut t) = self.world.get::<&mut Tower>(tower) {
                    t.selected = false;
                }
                if self.session.highlight_timer == Some(timer) {
                    self.session.highlight_timer = None;
                }
            }
        }
    }

    fn start_wave(&mut self) {
        systems::wave_spawner::start_wave(
            &mut self.world,
            &mut self.session,
            &mut self.scheduler,
            &self.path,
            self.time.elapsed_secs,
            &mut self.events,
        );
    }

    /// Close out a cleared wave and schedule the next; start the first wave.
    fn update_waves(&mut self) {
        let enemies = self.enemy_count();

        if self.session.wave_in_progress && enemies + self.scheduler.pending_spawns() == 0 {
            let cleared = self.session.wave;
            self.session.wave_in_progress = false;
            self.session.boss_wave = false;
            self.session.current_boss = None;
            self.session.wave += 1;
            self.events.push(GameEvent::WaveCleared { wave: cleared });

            let wave = self.session.wave;
            let delay = if wave % WAVES_PER_LEVEL == 1 && wave > 1 {
                self.session.level += 1;
                self.session.level_complete_secs = LEVEL_COMPLETE_DISPLAY_SECS;
                info!(level = self.session.level, "level complete");
                self.events.push(GameEvent::LevelComplete {
                    level: self.session.level,
                });
                LEVEL_UP_DELAY_SECS
            } else {
                NEXT_WAVE_DELAY_SECS
            };
            info!(wave = cleared, next_in = delay, gold = self.session.gold, "wave cleared");
            self.scheduler
                .schedule(self.time.elapsed_secs + delay, ScheduledAction::StartWave);
        }

        if !self.session.wave_in_progress && enemies == 0 && !self.scheduler.wave_start_pending() {
            self.start_wave();
        }
    }
}
