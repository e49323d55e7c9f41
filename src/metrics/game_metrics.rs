use std::time::{Duration, Instant};

use crate::game::CollisionType;

/// In-memory statistics for one play session
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub current_length: usize,
    pub best_length: usize,
    pub deaths: u32,
    pub last_death: Option<CollisionType>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            current_length: 0,
            best_length: 0,
            deaths: 0,
            last_death: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// A fresh snake of `length` cells was spawned
    pub fn on_run_start(&mut self, length: usize) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.current_length = length;
        self.best_length = self.best_length.max(length);
    }

    pub fn on_grow(&mut self) {
        self.current_length += 1;
        self.best_length = self.best_length.max(self.current_length);
    }

    pub fn on_death(&mut self, cause: CollisionType) {
        self.deaths += 1;
        self.last_death = Some(cause);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
