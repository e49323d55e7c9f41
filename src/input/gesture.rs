//! Maps raw key presses and pointer drags onto game commands

use crossterm::event::{KeyCode, KeyModifiers};

use crate::game::{Command, Direction, Vector};

/// Stateless translation from raw input to [`Command`]s
pub struct GestureInterpreter;

impl GestureInterpreter {
    /// Space toggles pause; arrows and WASD steer
    ///
    /// Returns `None` for any other key, and for any key pressed together with
    /// Ctrl, Alt, Super, Meta or Hyper. Shift is allowed so that capital
    /// letters still steer.
    pub fn from_key(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        let blocking = KeyModifiers::CONTROL
            | KeyModifiers::ALT
            | KeyModifiers::SUPER
            | KeyModifiers::META
            | KeyModifiers::HYPER;
        if modifiers.intersects(blocking) {
            return None;
        }

        let direction = match code {
            KeyCode::Char(' ') => return Some(Command::Toggle),

            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,

            _ => return None,
        };

        Some(Command::Move(direction))
    }

    /// A short drag is a tap; a longer one steers along its dominant axis
    pub fn from_drag(start: Vector, end: Vector, minimum_distance: f64) -> Command {
        let diff = end - start;

        if diff.length() < minimum_distance {
            return Command::Toggle;
        }

        let direction = if diff.x.abs() > diff.y.abs() {
            if diff.x > 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if diff.y > 0 {
            Direction::Down
        } else {
            Direction::Up
        };

        Command::Move(direction)
    }

    pub fn from_tap() -> Command {
        Command::Toggle
    }
}
