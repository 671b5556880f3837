//! Grid Snake - a fixed-tick snake game
//!
//! This library provides:
//! - Core game logic as a pure state machine (game module)
//! - Terminal rendering (render module)
//! - Keyboard mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive driver that ties them together (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
