//! Rampart headless runner.
//!
//! This crate wires the simulation engine to a command script and a
//! snapshot sink, either stepping as fast as possible or paced in real
//! time on a dedicated game loop thread.

pub mod game_loop;
pub mod runner;
pub mod script;
pub mod state;

pub use rampart_core as core;
