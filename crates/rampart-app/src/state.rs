//! State shared between the driver thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use rampart_core::commands::PlayerCommand;
use rampart_core::state::GameStateSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles for talking to a running game loop.
///
/// - `command_tx` is `None` until the loop is spawned
/// - `latest_snapshot` is written by the loop after every tick
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a player command. Returns false if no loop is listening.
    pub fn send(&self, command: PlayerCommand) -> bool {
        let Ok(guard) = self.command_tx.lock() else {
            return false;
        };
        match guard.as_ref() {
            Some(tx) => tx.send(GameLoopCommand::PlayerCommand(command)).is_ok(),
            None => false,
        }
    }

    /// Clone of the most recent snapshot, if the loop has ticked yet.
    pub fn snapshot(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }

    /// Ask the loop to stop and forget the sender.
    pub fn shutdown(&self) {
        if let Ok(mut guard) = self.command_tx.lock() {
            if let Some(tx) = guard.take() {
                let _ = tx.send(GameLoopCommand::Shutdown);
            }
        }
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
    }
}
