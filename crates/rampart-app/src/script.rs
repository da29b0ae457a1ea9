//! Timed command scripts.
//!
//! A script is a JSON array of `{ "at_secs": f64, "command": PlayerCommand }`
//! entries. Entries fire once the simulation clock (or, in real-time mode,
//! the wall clock) reaches `at_secs`; ties keep file order.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use rampart_core::commands::PlayerCommand;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedCommand {
    #[serde(default)]
    pub at_secs: f64,
    pub command: PlayerCommand,
}

#[derive(Debug, Clone, Default)]
pub struct Script {
    commands: Vec<ScriptedCommand>,
    cursor: usize,
}

impl Script {
    pub fn new(mut commands: Vec<ScriptedCommand>) -> Result<Self> {
        for (i, c) in commands.iter().enumerate() {
            if !c.at_secs.is_finite() || c.at_secs < 0.0 {
                bail!("script entry {i} has invalid time {}", c.at_secs);
            }
        }
        // Stable: equal times keep file order.
        commands.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        Ok(Self {
            commands,
            cursor: 0,
        })
    }

    /// The usual opening: start the game immediately.
    pub fn start_only() -> Self {
        Self {
            commands: vec![ScriptedCommand {
                at_secs: 0.0,
                command: PlayerCommand::StartGame,
            }],
            cursor: 0,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let commands: Vec<ScriptedCommand> =
            serde_json::from_str(json).context("parsing command script")?;
        Self::new(commands)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("in script {}", path.display()))
    }

    /// Commands due at or before `now`, each returned exactly once.
    pub fn take_due(&mut self, now: f64) -> Vec<PlayerCommand> {
        let start = self.cursor;
        while self
            .commands
            .get(self.cursor)
            .is_some_and(|c| c.at_secs <= now)
        {
            self.cursor += 1;
        }
        self.commands[start..self.cursor]
            .iter()
            .map(|c| c.command.clone())
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.commands.len() - self.cursor
    }

    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }
}
