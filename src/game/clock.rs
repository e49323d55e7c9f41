//! Fixed-interval tick source with pause and immediate-restart support

use std::future;
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use super::error::GameError;

#[derive(Debug)]
enum ClockState {
    Stopped,
    Running(Interval),
    Paused,
}

/// Repeating timer that drives the simulation
///
/// The clock does not spawn anything. Its owner awaits [`GameClock::tick`] and
/// runs the tick itself, so two ticks can never overlap.
#[derive(Debug)]
pub struct GameClock {
    period: Duration,
    state: ClockState,
}

impl GameClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: ClockState::Stopped,
        }
    }

    /// Begin ticking; the first tick fires one period from now
    pub fn start(&mut self) -> Result<(), GameError> {
        if !matches!(self.state, ClockState::Stopped) {
            return Err(GameError::AlreadyRunning);
        }

        if self.period.is_zero() {
            return Err(GameError::InvalidConfig(
                "tick period must be non-zero".to_string(),
            ));
        }

        self.state = ClockState::Running(self.schedule());
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.is_running() {
            self.state = ClockState::Paused;
        }
    }

    /// Restart ticking with a full period from now
    pub fn resume(&mut self) {
        if self.is_paused() {
            self.state = ClockState::Running(self.schedule());
        }
    }

    pub fn toggle(&mut self) {
        match self.state {
            ClockState::Running(_) => self.pause(),
            ClockState::Paused => self.resume(),
            ClockState::Stopped => {}
        }
    }

    /// Drop the pending tick, run `on_tick` right now, then restart the period
    ///
    /// A paused clock is resumed. Returns `None` without calling `on_tick` if
    /// the clock is stopped.
    pub fn restart_immediately<T>(&mut self, on_tick: impl FnOnce() -> T) -> Option<T> {
        if matches!(self.state, ClockState::Stopped) {
            return None;
        }

        self.state = ClockState::Paused;
        let output = on_tick();
        self.state = ClockState::Running(self.schedule());

        Some(output)
    }

    /// Stop ticking for good; `start` may be called again afterwards
    pub fn stop(&mut self) {
        self.state = ClockState::Stopped;
    }

    /// Wait for the next tick. Never resolves while paused or stopped.
    pub async fn tick(&mut self) {
        match &mut self.state {
            ClockState::Running(interval) => {
                interval.tick().await;
            }
            ClockState::Paused | ClockState::Stopped => future::pending::<()>().await,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running(_))
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, ClockState::Paused)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.state, ClockState::Stopped)
    }

    fn schedule(&self) -> Interval {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }
}
