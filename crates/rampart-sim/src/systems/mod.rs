//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for
//! read-only). Cross-entity state lives in the engine's `Session`.

pub mod cleanup;
pub mod fire_control;
pub mod floating_text;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
pub mod wave_spawner;
