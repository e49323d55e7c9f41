//! Core game logic module for Snake
//!
//! This module contains all the game logic without any terminal or rendering dependencies.
//! A front end drives it through [`GameController`] and observes it through [`GameListener`].

pub mod action;
pub mod board;
pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod listener;
pub mod random;
pub mod vector;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use board::{BoardState, CollisionType, HeadingChange, StepOutcome};
pub use clock::GameClock;
pub use config::GameConfig;
pub use controller::GameController;
pub use error::GameError;
pub use listener::{GameEvent, GameListener};
pub use random::{RandomSource, StdRandom};
pub use vector::Vector;
