//! keymaze-core: simulation logic for a tile-based dungeon crawler.
//!
//! This crate contains the whole game model with no I/O dependencies:
//! maze generation, key/door placement, pathfinding and line-of-sight,
//! enemy behavior, and the interpolated grid motion shared by every
//! entity. It is designed to run and be tested headless; a presentation
//! layer only reads its accessors and feeds it move intents.

pub mod action;
pub mod dungeon;
pub mod monster;
pub mod player;

mod consts;
mod errors;
mod gameloop;
mod rng;

pub use consts::*;
pub use errors::ConfigError;
pub use gameloop::{GameEvent, SimConfig, SimStatus, Simulation};
pub use rng::GameRng;
