use serde::{Deserialize, Serialize};

use super::vector::Vector;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    /// All four headings, in the order a fresh board samples them from
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
    ];

    /// Unit offset for one step in this direction (y grows downwards)
    pub const fn vector(self) -> Vector {
        match self {
            Direction::Left => Vector::new(-1, 0),
            Direction::Up => Vector::new(0, -1),
            Direction::Right => Vector::new(1, 0),
            Direction::Down => Vector::new(0, 1),
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.vector().is_inverse(other.vector())
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
        }
    }
}

/// A command delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Turn towards a direction
    Move(Direction),
    /// Pause if running, resume if paused
    Toggle,
}

impl Command {
    /// The command as an offset; `Toggle` maps to [`Vector::NONE`]
    pub fn vector(self) -> Vector {
        match self {
            Command::Move(direction) => direction.vector(),
            Command::Toggle => Vector::NONE,
        }
    }
}

impl From<Direction> for Command {
    fn from(direction: Direction) -> Self {
        Command::Move(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Down.is_opposite(Direction::Up));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(Direction::Right.is_opposite(Direction::Left));

        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Up.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Up));

        for direction in Direction::ALL {
            assert!(direction.is_opposite(direction.opposite()));
        }
    }

    #[test]
    fn test_direction_vector() {
        assert_eq!(Direction::Up.vector(), Vector::new(0, -1));
        assert_eq!(Direction::Down.vector(), Vector::new(0, 1));
        assert_eq!(Direction::Left.vector(), Vector::new(-1, 0));
        assert_eq!(Direction::Right.vector(), Vector::new(1, 0));
    }

    #[test]
    fn test_toggle_is_none_vector() {
        assert_eq!(Command::Toggle.vector(), Vector::NONE);
        for direction in Direction::ALL {
            assert_ne!(Command::from(direction).vector(), Vector::NONE);
        }
    }
}
