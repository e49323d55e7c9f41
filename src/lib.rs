//! Ouroboros - grid snake for the terminal
//!
//! This library provides:
//! - Core game logic: board, clock and controller (game module)
//! - Keyboard and mouse gesture interpretation (input module)
//! - Event-driven TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
