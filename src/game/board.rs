use std::collections::VecDeque;

use super::action::{Command, Direction};
use super::config::validate_grid_size;
use super::error::GameError;
use super::random::{RandomSource, StdRandom};
use super::vector::Vector;

/// Rejection-sampling attempts per grid cell before target placement
/// falls back to choosing among the free cells directly
const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the grid
    Wall,
    /// Snake ran into its own body
    SelfCollision,
}

/// What a single tick did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Head moved forward and the tail cell was vacated
    Moved { head: Vector, tail: Vector },
    /// Head landed on the target; the body grew by one and a new target was placed
    Grew { head: Vector, target: Vector },
    /// Next head cell was fatal. The board is left exactly as it was.
    Died { cause: CollisionType },
}

/// Result of a heading request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingChange {
    /// Heading now points the requested way
    Changed,
    /// Request was a 180-degree turn and was ignored
    Rejected,
    /// Request carried no direction; the caller should toggle pause
    TogglePause,
}

/// Grid, snake body, heading and target, plus the rules that move them
///
/// The body is ordered tail (front) to head (back). `advance` is a pure step
/// function: it reports death but never restarts the board on its own.
#[derive(Debug, Clone)]
pub struct BoardState<R = StdRandom> {
    grid_size: usize,
    heading: Direction,
    body: VecDeque<Vector>,
    target: Vector,
    rng: R,
}

impl<R: RandomSource> BoardState<R> {
    /// Create a board with a freshly spawned snake and target
    pub fn new(grid_size: usize, rng: R) -> Result<Self, GameError> {
        validate_grid_size(grid_size)?;

        let mut board = Self {
            grid_size,
            heading: Direction::Right,
            body: VecDeque::new(),
            target: Vector::NONE,
            rng,
        };
        board.initialize()?;

        Ok(board)
    }

    /// Build a board from explicit state, e.g. to replay a recorded position
    pub fn from_parts(
        grid_size: usize,
        body: impl IntoIterator<Item = Vector>,
        heading: Direction,
        target: Vector,
        rng: R,
    ) -> Result<Self, GameError> {
        validate_grid_size(grid_size)?;

        let board = Self {
            grid_size,
            heading,
            body: body.into_iter().collect(),
            target,
            rng,
        };

        if board.body.is_empty() {
            return Err(GameError::InvalidConfig("body must not be empty".to_string()));
        }

        for (index, &cell) in board.body.iter().enumerate() {
            if !board.is_in_bounds(cell) {
                return Err(GameError::InvalidConfig(format!(
                    "body cell {cell:?} is outside the grid"
                )));
            }
            if board.body.iter().skip(index + 1).any(|&other| other == cell) {
                return Err(GameError::InvalidConfig(format!(
                    "body cell {cell:?} appears twice"
                )));
            }
        }

        if !board.is_in_bounds(target) || board.is_occupied(target) {
            return Err(GameError::InvalidConfig(format!(
                "target {target:?} must be a free cell inside the grid"
            )));
        }

        Ok(board)
    }

    /// Spawn a fresh three-cell snake through the center with a random heading,
    /// then place a target
    pub fn initialize(&mut self) -> Result<(), GameError> {
        let middle = (self.grid_size / 2) as i32;
        let center = Vector::new(middle, middle);

        self.heading = *self.rng.choice(&Direction::ALL)?;

        let step = self.heading.vector();
        self.body = VecDeque::from([center - step, center, center + step]);
        self.place_target()?;

        Ok(())
    }

    /// Move the target to a random cell not covered by the body
    pub fn place_target(&mut self) -> Result<Vector, GameError> {
        let size = self.grid_size as i32;
        let cells = self.grid_size * self.grid_size;

        if self.body.len() >= cells {
            return Err(GameError::BoardFull);
        }

        for _ in 0..cells * PLACEMENT_ATTEMPTS_PER_CELL {
            let x = self.rng.int_in_range(0, size)?;
            let y = self.rng.int_in_range(0, size)?;
            let candidate = Vector::new(x, y);

            if !self.is_occupied(candidate) {
                self.target = candidate;
                return Ok(candidate);
            }
        }

        // Nearly full board: sampling keeps missing, so pick among what is left
        let free: Vec<Vector> = (0..size)
            .flat_map(|y| (0..size).map(move |x| Vector::new(x, y)))
            .filter(|&cell| !self.is_occupied(cell))
            .collect();

        let target = match self.rng.choice(&free) {
            Ok(&cell) => cell,
            Err(GameError::EmptyOptions) => return Err(GameError::BoardFull),
            Err(e) => return Err(e),
        };
        self.target = target;

        Ok(target)
    }

    /// Request a new heading. A 180-degree turn is ignored.
    pub fn set_heading(&mut self, command: Command) -> HeadingChange {
        match command {
            Command::Toggle => HeadingChange::TogglePause,
            Command::Move(direction) if direction.is_opposite(self.heading) => {
                HeadingChange::Rejected
            }
            Command::Move(direction) => {
                self.heading = direction;
                HeadingChange::Changed
            }
        }
    }

    /// Advance the snake by one cell
    ///
    /// Fails only when growth leaves no free cell for the next target.
    pub fn advance(&mut self) -> Result<StepOutcome, GameError> {
        let next = self.head() + self.heading.vector();

        // The tail still counts: it has not moved out of the way yet
        if self.is_occupied(next) {
            return Ok(StepOutcome::Died {
                cause: CollisionType::SelfCollision,
            });
        }

        if !self.is_in_bounds(next) {
            return Ok(StepOutcome::Died {
                cause: CollisionType::Wall,
            });
        }

        self.body.push_back(next);

        if next == self.target {
            let target = self.place_target()?;
            return Ok(StepOutcome::Grew { head: next, target });
        }

        let tail = self
            .body
            .pop_front()
            .expect("body holds at least the new head");

        Ok(StepOutcome::Moved { head: next, tail })
    }
}

impl<R> BoardState<R> {
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Body cells, tail first
    pub fn body(&self) -> &VecDeque<Vector> {
        &self.body
    }

    pub fn head(&self) -> Vector {
        *self.body.back().expect("body is never empty")
    }

    pub fn tail(&self) -> Vector {
        *self.body.front().expect("body is never empty")
    }

    pub fn target(&self) -> Vector {
        self.target
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the body is empty (never true for a constructed board)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Vector) -> bool {
        let size = self.grid_size as i32;
        pos.x >= 0 && pos.y >= 0 && pos.x < size && pos.y < size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied(&self, pos: Vector) -> bool {
        self.body.contains(&pos)
    }
}
