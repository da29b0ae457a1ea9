//! Simulation engine for Rampart.
//!
//! Owns the hecs ECS world, runs the per-tick systems, and produces
//! `GameStateSnapshot`s for a renderer.

pub mod components;
pub mod config;
pub mod engine;
pub mod profiles;
pub mod scheduler;
pub mod session;
pub mod systems;
pub mod upgrades;
pub mod world_setup;

pub use config::{CombatRules, SimConfig};
pub use engine::SimulationEngine;
pub use rampart_core as core;
