//! Headless execution: steps the engine as fast as possible, feeding it a
//! command script and writing periodic snapshots as JSON lines.

use std::io::Write;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use rampart_core::enums::GamePhase;
use rampart_core::events::GameEvent;
use rampart_core::state::GameStateSnapshot;
use rampart_sim::SimulationEngine;

use crate::script::Script;

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Seconds per tick.
    pub dt: f64,
    /// Stop once the simulation clock reaches this many seconds.
    pub duration_secs: f64,
    /// Upper bound on ticks, independent of the clock. Paused and
    /// not-started ticks do not advance the clock.
    pub max_ticks: u64,
    /// Emit a snapshot line every this many simulated seconds.
    pub snapshot_every_secs: Option<f64>,
}

/// Final tallies of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub phase: GamePhase,
    pub wave: u32,
    pub level: u32,
    pub gold: u32,
    pub castle_health: i32,
    pub towers: usize,
    pub kills: u32,
    pub escapes: u32,
    pub rejected_commands: u32,
}

/// Run until the duration elapses, the game ends, or `max_ticks` is hit.
pub fn run_headless(
    engine: &mut SimulationEngine,
    script: &mut Script,
    options: &RunOptions,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let mut ticks = 0u64;
    let mut kills = 0u32;
    let mut escapes = 0u32;
    let mut rejected = 0u32;
    let mut next_snapshot = 0.0;
    let mut last: GameStateSnapshot;

    loop {
        let now = engine.time().elapsed_secs;
        engine.queue_commands(script.take_due(now));
        last = engine.tick(options.dt);
        ticks += 1;

        for event in &last.events {
            match event {
                GameEvent::EnemyKilled { .. } => kills += 1,
                GameEvent::EnemyEscaped { .. } => escapes += 1,
                GameEvent::CommandRejected { error } => {
                    rejected += 1;
                    warn!(%error, "scripted command rejected");
                }
                GameEvent::WaveCleared { wave } => {
                    debug!(wave, gold = last.gold, castle = last.castle_health, "wave cleared");
                }
                _ => {}
            }
        }

        if let Some(every) = options.snapshot_every_secs {
            if last.time.elapsed_secs + 1e-9 >= next_snapshot {
                write_snapshot(out, &last)?;
                next_snapshot = last.time.elapsed_secs + every;
            }
        }

        if last.phase == GamePhase::GameOver {
            info!(wave = last.wave, level = last.level, "game over");
            break;
        }
        if last.time.elapsed_secs >= options.duration_secs || ticks >= options.max_ticks {
            break;
        }
    }

    if options.snapshot_every_secs.is_some() {
        write_snapshot(out, &last)?;
    }

    Ok(RunSummary {
        ticks,
        elapsed_secs: last.time.elapsed_secs,
        phase: last.phase,
        wave: last.wave,
        level: last.level,
        gold: last.gold,
        castle_health: last.castle_health,
        towers: last.towers.len(),
        kills,
        escapes,
        rejected_commands: rejected,
    })
}

fn write_snapshot(out: &mut dyn Write, snapshot: &GameStateSnapshot) -> Result<()> {
    serde_json::to_writer(&mut *out, snapshot).context("serializing snapshot")?;
    writeln!(out).context("writing snapshot")?;
    Ok(())
}
