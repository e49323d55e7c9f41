//! Render boundary: typed callbacks fired by the controller

use super::board::CollisionType;
use super::vector::Vector;

/// Receives board changes as they happen
///
/// Every callback carries grid cells, so a renderer can draw or erase exactly
/// what changed without re-deriving any game logic. All methods default to
/// doing nothing.
pub trait GameListener {
    /// A fresh snake was spawned; everything drawn before is stale
    fn on_spawn(&mut self, _body: &[Vector], _target: Vector) {}

    /// Head advanced into `head` and `tail` was vacated
    fn on_move(&mut self, _head: Vector, _tail: Vector) {}

    /// Head advanced onto the old target, which now sits at `target`
    fn on_grow(&mut self, _head: Vector, _target: Vector) {}

    /// The snake died; a spawn follows immediately
    fn on_death(&mut self, _cause: CollisionType) {}
}

/// Ignores every event
impl GameListener for () {}

/// One recorded listener callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Spawn { body: Vec<Vector>, target: Vector },
    Move { head: Vector, tail: Vector },
    Grow { head: Vector, target: Vector },
    Death { cause: CollisionType },
}

/// Records every event in order
impl GameListener for Vec<GameEvent> {
    fn on_spawn(&mut self, body: &[Vector], target: Vector) {
        self.push(GameEvent::Spawn {
            body: body.to_vec(),
            target,
        });
    }

    fn on_move(&mut self, head: Vector, tail: Vector) {
        self.push(GameEvent::Move { head, tail });
    }

    fn on_grow(&mut self, head: Vector, target: Vector) {
        self.push(GameEvent::Grow { head, target });
    }

    fn on_death(&mut self, cause: CollisionType) {
        self.push(GameEvent::Death { cause });
    }
}
