//! Core game logic module for Snake
//!
//! This module contains all the game rules without any I/O or rendering dependencies.
//! The engine is a plain state machine: a driver feeds it ticks and commands and
//! draws the snapshots it returns.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{ConfigError, FOOD_SCORE, GRID_SIZE, GameConfig, MIN_TICK_FLOOR_MS};
pub use engine::{GameEngine, StepResult, TickOutcome};
pub use state::{CollisionType, GameState, Position, Snake, Snapshot, Status};
