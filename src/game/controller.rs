use tracing::{debug, error, info, trace, warn};

use super::{
    action::Command,
    board::{BoardState, HeadingChange, StepOutcome},
    clock::GameClock,
    config::GameConfig,
    error::GameError,
    listener::GameListener,
    random::{RandomSource, StdRandom},
};

/// Runs one game: owns the board and the clock, and reports every change to a listener
///
/// This is the only type the input and render layers talk to. Death and
/// restart are handled here, not inside the board.
pub struct GameController<R = StdRandom, L = ()> {
    config: GameConfig,
    board: BoardState<R>,
    clock: GameClock,
    listener: L,
    /// Board still holds the spawn made at construction and has not been announced
    fresh: bool,
}

impl<R: RandomSource, L: GameListener> GameController<R, L> {
    /// Validate the configuration and build a game ready to [`start`](Self::start)
    pub fn new(config: GameConfig, rng: R, listener: L) -> Result<Self, GameError> {
        config.validate()?;

        let board = BoardState::new(config.grid_size, rng)?;
        Self::from_board(config, board, listener)
    }

    /// Build a game around a prepared board, e.g. one restored with
    /// [`BoardState::from_parts`]. The first [`start`](Self::start) plays it as is.
    pub fn from_board(
        config: GameConfig,
        board: BoardState<R>,
        listener: L,
    ) -> Result<Self, GameError> {
        config.validate()?;

        if board.grid_size() != config.grid_size {
            return Err(GameError::InvalidConfig(format!(
                "board is {}x{} but grid_size is {}",
                board.grid_size(),
                board.grid_size(),
                config.grid_size
            )));
        }

        let clock = GameClock::new(config.tick_interval());

        Ok(Self {
            config,
            board,
            clock,
            listener,
            fresh: true,
        })
    }

    /// Announce the snake and start ticking
    ///
    /// The first start plays the board built at construction; starting again
    /// after [`dispose`](Self::dispose) spawns a new snake.
    pub fn start(&mut self) -> Result<(), GameError> {
        if !self.clock.is_stopped() {
            return Err(GameError::AlreadyRunning);
        }

        self.clock.start()?;
        if std::mem::take(&mut self.fresh) {
            announce(&self.board, &mut self.listener);
        } else if let Err(e) = respawn(&mut self.board, &mut self.listener) {
            self.clock.stop();
            return Err(e);
        }

        info!(
            grid_size = self.config.grid_size,
            tick_ms = self.clock.period().as_millis() as u64,
            "Game started"
        );
        Ok(())
    }

    /// Wait for the clock and run one tick
    ///
    /// Cancel-safe: if dropped before the clock fires, no tick is lost or run twice.
    pub async fn next_tick(&mut self) {
        self.clock.tick().await;
        self.tick();
    }

    /// Run one simulation step right now. Ignored unless the game is running;
    /// a paused or stopped game does not move.
    pub fn tick(&mut self) {
        if !self.clock.is_running() {
            return;
        }

        if let Err(e) = step(&mut self.board, &mut self.listener) {
            self.fail(e);
        }
    }

    /// Apply a command from the input layer
    ///
    /// `Toggle` pauses or resumes. A turn takes effect with an immediate tick
    /// and restarts the period, so it is never lost to a stale frame.
    pub fn handle_gesture(&mut self, command: Command) {
        if self.clock.is_stopped() {
            return;
        }

        match self.board.set_heading(command) {
            HeadingChange::TogglePause => {
                self.clock.toggle();
                debug!(paused = self.clock.is_paused(), "Pause toggled");
            }
            HeadingChange::Rejected => {
                trace!(?command, "Reverse turn ignored");
            }
            HeadingChange::Changed => {
                debug!(heading = ?self.board.heading(), "Heading changed");

                let board = &mut self.board;
                let listener = &mut self.listener;
                if let Some(Err(e)) = self.clock.restart_immediately(|| step(board, listener)) {
                    self.fail(e);
                }
            }
        }
    }

    /// Stop the clock. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.clock.is_stopped() {
            self.clock.stop();
            info!("Game disposed");
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &BoardState<R> {
        &self.board
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    fn fail(&mut self, e: GameError) {
        error!(error = %e, "Game stopped");
        self.clock.stop();
    }
}

/// Advance the board once and report the outcome, restarting on death
fn step<R: RandomSource, L: GameListener>(
    board: &mut BoardState<R>,
    listener: &mut L,
) -> Result<(), GameError> {
    match board.advance() {
        Ok(StepOutcome::Moved { head, tail }) => {
            trace!(?head, ?tail, "Moved");
            listener.on_move(head, tail);
            Ok(())
        }
        Ok(StepOutcome::Grew { head, target }) => {
            debug!(length = board.len(), ?target, "Grew");
            listener.on_grow(head, target);
            Ok(())
        }
        Ok(StepOutcome::Died { cause }) => {
            info!(?cause, length = board.len(), "Snake died, restarting");
            listener.on_death(cause);
            respawn(board, listener)
        }
        Err(GameError::BoardFull) => {
            warn!(length = board.len(), "Board full, restarting");
            respawn(board, listener)
        }
        Err(e) => Err(e),
    }
}

fn respawn<R: RandomSource, L: GameListener>(
    board: &mut BoardState<R>,
    listener: &mut L,
) -> Result<(), GameError> {
    board.initialize()?;
    announce(board, listener);
    Ok(())
}

fn announce<R, L: GameListener>(board: &BoardState<R>, listener: &mut L) {
    let body: Vec<_> = board.body().iter().copied().collect();
    listener.on_spawn(&body, board.target());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        listener::GameEvent, random::ScriptedRandom, CollisionType, Direction, Vector,
    };
    use std::time::Duration;
    use tokio::time::{self, Instant};

    const PERIOD: Duration = Duration::from_millis(125);

    fn v(x: i32, y: i32) -> Vector {
        Vector::new(x, y)
    }

    /// 11x11 game at 8 ticks per second. The snake spawns heading right from
    /// the center with the target at `target`.
    fn controller(target: (i32, i32)) -> GameController<ScriptedRandom, Vec<GameEvent>> {
        let script = [2, target.0, target.1];
        GameController::new(
            GameConfig::new(11, 8.0),
            ScriptedRandom::new(script),
            Vec::new(),
        )
        .unwrap()
    }

    fn started(target: (i32, i32)) -> GameController<ScriptedRandom, Vec<GameEvent>> {
        let mut game = controller(target);
        game.start().unwrap();
        game.listener_mut().clear();
        game
    }

    #[test]
    fn test_rejects_invalid_config() {
        let configs = [
            GameConfig::new(4, 8.0),
            GameConfig::new(3, 8.0),
            GameConfig::new(11, 0.0),
            GameConfig::new(11, 1e10),
        ];
        for config in configs {
            let result = GameController::new(config, ScriptedRandom::new([]), ());
            assert!(matches!(result, Err(GameError::InvalidConfig(_))));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_emits_spawn() {
        let mut game = controller((0, 0));
        game.start().unwrap();

        assert_eq!(
            game.listener(),
            &vec![GameEvent::Spawn {
                body: vec![v(4, 5), v(5, 5), v(6, 5)],
                target: v(0, 0),
            }]
        );
        assert!(game.is_running());
        assert_eq!(game.start(), Err(GameError::AlreadyRunning));
    }

    #[test]
    fn test_too_fast_speed_fails_before_start() {
        let board = BoardState::new(11, ScriptedRandom::new([2, 0, 0])).unwrap();
        let result = GameController::from_board(GameConfig::new(11, 1e10), board, ());
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_board_grid_size_mismatch() {
        let board = BoardState::new(9, ScriptedRandom::new([2, 0, 0])).unwrap();
        let result = GameController::from_board(GameConfig::new(11, 8.0), board, ());
        assert!(matches!(result, Err(GameError::InvalidConfig(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_start_keeps_constructed_board() {
        let mut game = controller((3, 3));
        let body: Vec<_> = game.board().body().iter().copied().collect();

        game.start().unwrap();
        assert_eq!(
            game.listener(),
            &vec![GameEvent::Spawn {
                body,
                target: v(3, 3),
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_dispose_respawns() {
        let mut game = started((0, 0));
        game.tick();
        game.dispose();
        game.listener_mut().clear();

        game.start().unwrap();
        let [GameEvent::Spawn { body, .. }] = game.listener().as_slice() else {
            panic!("expected a single spawn, got {:?}", game.listener());
        };
        assert_eq!(body.len(), 3);
        assert_eq!(body[1], v(5, 5));
        assert!(game.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_board_full_restarts_without_death() {
        // Snake covers every cell of a 5x5 grid but the target at (4, 4)
        let mut cells: Vec<_> = (0..5)
            .flat_map(|y| (0..5).map(move |x| v(x, y)))
            .collect();
        let target = cells.pop().unwrap();
        let board = BoardState::from_parts(
            5,
            cells,
            Direction::Right,
            target,
            ScriptedRandom::new([]),
        )
        .unwrap();
        let mut game = GameController::from_board(GameConfig::new(5, 8.0), board, Vec::new())
            .unwrap();
        game.start().unwrap();
        game.listener_mut().clear();

        game.tick();

        let [GameEvent::Spawn { body, target }] = game.listener().as_slice() else {
            panic!("expected only a respawn, got {:?}", game.listener());
        };
        assert_eq!(body.len(), 3);
        assert!(!body.contains(target));
        assert_eq!(game.board().len(), 3);
        assert!(game.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_while_paused_is_ignored() {
        let mut game = started((0, 0));
        game.handle_gesture(Command::Toggle);

        game.tick();

        assert!(game.listener().is_empty());
        assert_eq!(game.board().head(), v(6, 5));
        assert!(game.is_paused());
    }

    #[test]
    fn test_tick_before_start_is_ignored() {
        let mut game = controller((0, 0));
        game.tick();
        game.handle_gesture(Command::Move(Direction::Up));

        assert!(game.listener().is_empty());
        assert_eq!(game.board().heading(), Direction::Right);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_tick_moves() {
        let mut game = started((0, 0));
        let begin = Instant::now();

        game.next_tick().await;

        assert_eq!(begin.elapsed(), PERIOD);
        assert_eq!(
            game.listener(),
            &vec![GameEvent::Move {
                head: v(7, 5),
                tail: v(4, 5)
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_grows() {
        let mut game = started((7, 5));

        game.tick();

        let [GameEvent::Grow { head, target }] = game.listener().as_slice() else {
            panic!("expected a single grow event, got {:?}", game.listener());
        };
        assert_eq!(*head, v(7, 5));
        assert_eq!(*target, game.board().target());
        assert_eq!(game.board().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_death_restarts() {
        let mut game = started((0, 0));

        // Head at (6, 5) reaches the right edge in four ticks and dies on the fifth
        for _ in 0..5 {
            game.tick();
        }

        let events = game.listener();
        assert_eq!(events.len(), 6);
        assert!(events[..4]
            .iter()
            .all(|event| matches!(event, GameEvent::Move { .. })));
        assert_eq!(
            events[4],
            GameEvent::Death {
                cause: CollisionType::Wall
            }
        );

        let GameEvent::Spawn { body, target } = &events[5] else {
            panic!("expected a respawn, got {:?}", events[5]);
        };
        assert_eq!(body.len(), 3);
        assert_eq!(body[1], v(5, 5));
        assert!(!body.contains(target));

        // Still running after the restart
        assert!(game.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_ticks_immediately() {
        let mut game = started((0, 0));

        time::advance(Duration::from_millis(100)).await;
        game.handle_gesture(Command::Move(Direction::Up));

        assert_eq!(game.board().heading(), Direction::Up);
        assert_eq!(
            game.listener(),
            &vec![GameEvent::Move {
                head: v(6, 4),
                tail: v(4, 5)
            }]
        );

        // Next periodic tick is a full period after the turn
        let turned_at = Instant::now();
        game.next_tick().await;
        assert_eq!(turned_at.elapsed(), PERIOD);
        assert_eq!(game.listener().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reverse_turn_is_ignored() {
        let mut game = started((0, 0));

        game.handle_gesture(Command::Move(Direction::Left));

        assert_eq!(game.board().heading(), Direction::Right);
        assert!(game.listener().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_pauses_and_resumes() {
        let mut game = started((0, 0));

        game.handle_gesture(Command::Toggle);
        assert!(game.is_paused());

        let paused = time::timeout(Duration::from_secs(10), game.next_tick()).await;
        assert!(paused.is_err());
        assert!(game.listener().is_empty());

        game.handle_gesture(Command::Toggle);
        assert!(game.is_running());
        game.next_tick().await;
        assert_eq!(game.listener().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_resumes_paused_game() {
        let mut game = started((0, 0));

        game.handle_gesture(Command::Toggle);
        game.handle_gesture(Command::Move(Direction::Down));

        assert!(game.is_running());
        assert_eq!(game.listener().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispose() {
        let mut game = started((0, 0));

        game.dispose();
        game.dispose();

        game.tick();
        game.handle_gesture(Command::Move(Direction::Up));
        game.handle_gesture(Command::Toggle);

        assert!(game.listener().is_empty());
        assert!(!game.is_running());
        assert!(!game.is_paused());
    }
}
