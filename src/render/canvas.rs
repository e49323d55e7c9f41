use crate::game::{CollisionType, GameListener, Vector};
use crate::metrics::GameMetrics;

/// Contents of one grid cell as last drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Body,
    Target,
}

/// Cell grid kept in sync with the game purely through listener events
///
/// Only the cells named by each event are touched; nothing is redrawn from
/// the board itself.
pub struct Canvas {
    size: usize,
    cells: Vec<Cell>,
    head: Option<Vector>,
    metrics: GameMetrics,
}

impl Canvas {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
            head: None,
            metrics: GameMetrics::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `pos`; anything outside the grid reads as empty
    pub fn cell(&self, pos: Vector) -> Cell {
        self.index(pos).map_or(Cell::Empty, |index| self.cells[index])
    }

    pub fn head(&self) -> Option<Vector> {
        self.head
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }

    fn set(&mut self, pos: Vector, cell: Cell) {
        if let Some(index) = self.index(pos) {
            self.cells[index] = cell;
        }
    }

    fn index(&self, pos: Vector) -> Option<usize> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < self.size && y < self.size).then_some(y * self.size + x)
    }
}

impl GameListener for Canvas {
    fn on_spawn(&mut self, body: &[Vector], target: Vector) {
        self.cells.fill(Cell::Empty);
        for &cell in body {
            self.set(cell, Cell::Body);
        }
        self.set(target, Cell::Target);
        self.head = body.last().copied();
        self.metrics.on_run_start(body.len());
    }

    fn on_move(&mut self, head: Vector, tail: Vector) {
        self.set(tail, Cell::Empty);
        self.set(head, Cell::Body);
        self.head = Some(head);
    }

    fn on_grow(&mut self, head: Vector, target: Vector) {
        self.set(head, Cell::Body);
        self.set(target, Cell::Target);
        self.head = Some(head);
        self.metrics.on_grow();
    }

    fn on_death(&mut self, cause: CollisionType) {
        self.metrics.on_death(cause);
    }
}
