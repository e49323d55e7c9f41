use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{GameConfig, GameController, StdRandom};
use crate::input::{InputAction, InputHandler};
use crate::render::{Canvas, Renderer};

type Backend = CrosstermBackend<Stderr>;

pub struct PlayMode {
    game: GameController<StdRandom, Canvas>,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig, rng: StdRandom) -> Result<Self> {
        let canvas = Canvas::new(config.grid_size);
        let input_handler = InputHandler::new(config.swipe_distance);
        let game =
            GameController::new(config, rng, canvas).context("Invalid game configuration")?;

        Ok(Self {
            game,
            renderer: Renderer::new(),
            input_handler,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.game.dispose();
        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Terminal<Backend>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame); game ticks come from the controller's clock
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.game.start().context("Failed to start game")?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(&event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = self.game.next_tick() => {}

                // Render frame
                _ = render_timer.tick() => {
                    self.game.listener_mut().metrics_mut().update();
                    let paused = self.game.is_paused();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.game.listener(), paused);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match self.input_handler.handle_event(event) {
            InputAction::Game(command) => {
                debug!(?command, "Input command");
                self.game.handle_gesture(command);
            }
            InputAction::Quit => {
                self.should_quit = true;
            }
            InputAction::None => {}
        }
    }
}

/// Raw mode, alternate screen and mouse capture. Undone again if any step fails.
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let prepared = (|| {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(stderr)).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    })();

    if prepared.is_err() {
        let _ = execute!(stderr(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }

    prepared
}

fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
