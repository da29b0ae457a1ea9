//! Core types and definitions for the Rampart tower-defense simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! fundamental types, geometry, commands, state snapshots, events,
//! errors, and constants. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
