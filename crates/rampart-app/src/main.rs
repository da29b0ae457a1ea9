//! `rampart`: run a tower-defense session headless or in real time.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rampart_app::game_loop;
use rampart_app::runner::{self, RunOptions};
use rampart_app::script::Script;
use rampart_app::state::AppState;
use rampart_core::constants::TICK_RATE;
use rampart_core::enums::GamePhase;
use rampart_sim::{CombatRules, SimConfig, SimulationEngine};

#[derive(Debug, Parser)]
#[command(name = "rampart", version, about = "Path-based tower defense simulation")]
struct Args {
    /// JSON file with a `SimConfig`; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON command script. Without one the game is simply started.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Simulated seconds to run.
    #[arg(long, default_value_t = 120.0)]
    duration: f64,

    /// Ticks per simulated second.
    #[arg(long, default_value_t = TICK_RATE)]
    tick_rate: u32,

    /// Print a JSON snapshot line every N simulated seconds.
    #[arg(long)]
    snapshot_every: Option<f64>,

    /// Pace ticks against the wall clock on a game loop thread.
    #[arg(long)]
    realtime: bool,

    /// Limit towers to their listed fire rate.
    #[arg(long)]
    fire_rate_gating: bool,

    /// Enable freeze, splash and chain on-hit effects.
    #[arg(long)]
    special_effects: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::start_only(),
    };
    info!(
        seed = config.seed,
        gold = config.starting_gold,
        castle = config.castle_health,
        rules = ?config.rules,
        "starting rampart"
    );

    if args.realtime {
        run_realtime(&args, config, script)
    } else {
        run_headless(&args, config, script)
    }
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.rules = CombatRules {
        fire_rate_gating: config.rules.fire_rate_gating || args.fire_rate_gating,
        special_effects: config.rules.special_effects || args.special_effects,
    };
    Ok(config)
}

fn run_headless(args: &Args, config: SimConfig, mut script: Script) -> Result<()> {
    let mut engine = SimulationEngine::new(config);
    let options = RunOptions {
        dt: 1.0 / args.tick_rate.max(1) as f64,
        duration_secs: args.duration,
        max_ticks: (args.duration * args.tick_rate.max(1) as f64).ceil() as u64 * 4 + 1,
        snapshot_every_secs: args.snapshot_every,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = runner::run_headless(&mut engine, &mut script, &options, &mut out)?;
    serde_json::to_writer_pretty(&mut out, &summary).context("writing summary")?;
    writeln!(out)?;
    info!(
        wave = summary.wave,
        gold = summary.gold,
        castle = summary.castle_health,
        kills = summary.kills,
        "run finished"
    );
    Ok(())
}

fn run_realtime(args: &Args, config: SimConfig, mut script: Script) -> Result<()> {
    let state = AppState::new();
    let (tx, handle) =
        game_loop::spawn_game_loop(config, args.tick_rate, Arc::clone(&state.latest_snapshot))
            .context("spawning game loop")?;
    *state.command_tx.lock().map_err(|_| anyhow::anyhow!("command channel poisoned"))? = Some(tx);
    *state.running.lock().map_err(|_| anyhow::anyhow!("running flag poisoned"))? = true;

    let started = Instant::now();
    let mut next_snapshot = 0.0;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    loop {
        let now = started.elapsed().as_secs_f64();
        for command in script.take_due(now) {
            if !state.send(command) {
                warn!("game loop stopped listening");
            }
        }

        if let (Some(every), Some(snapshot)) = (args.snapshot_every, state.snapshot()) {
            if now >= next_snapshot {
                serde_json::to_writer(&mut out, &snapshot).context("writing snapshot")?;
                writeln!(out)?;
                next_snapshot = now + every;
            }
        }

        let over = state
            .snapshot()
            .is_some_and(|s| s.phase == GamePhase::GameOver);
        if over || now >= args.duration {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    state.shutdown();
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;

    if let Some(snapshot) = state.snapshot() {
        info!(
            wave = snapshot.wave,
            gold = snapshot.gold,
            castle = snapshot.castle_health,
            "realtime run finished"
        );
    }
    Ok(())
}
