use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{GameError, GameResult};
use super::position::Position;

/// Configuration for the game
///
/// Defaults reproduce the classic board: 40x30 cells, a three-cell snake
/// whose head starts at (9, 10), and a tick every 0.2 seconds that shortens
/// by 5ms per food eaten until it reaches 50ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid in cells
    pub grid_width: usize,
    /// Height of the game grid in cells
    pub grid_height: usize,
    /// Head cell of the starting layout; the body extends to the left
    pub start_head: Position,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Seconds between ticks at the start of a session
    pub initial_interval: f64,
    /// Seconds removed from the interval each time food is eaten
    pub interval_decrement: f64,
    /// The interval never drops below this many seconds
    pub interval_floor: f64,
    /// Restore `initial_interval` on game over instead of keeping the speed
    pub reset_speed_on_game_over: bool,

    /// Number of turns that can be queued between two ticks; with 1 the last
    /// accepted press before a tick wins
    pub turn_buffer: usize,
    /// Random samples tried before food placement falls back to a free-cell scan
    pub max_placement_attempts: usize,
    /// Seed for food placement; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            start_head: Position::new(9, 10),
            initial_snake_length: 3,
            initial_interval: 0.20,
            interval_decrement: 0.005,
            interval_floor: 0.05,
            reset_speed_on_game_over: false,
            turn_buffer: 1,
            max_placement_attempts: 1024,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self::default().with_grid(width, height)
    }

    /// Resize the grid
    ///
    /// Keeps the current starting layout when it still fits, otherwise the
    /// snake starts in the middle of the board.
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        let fits = self
            .start_layout()
            .iter()
            .all(|cell| cell.is_within(width, height));
        if !fits {
            self.start_head = Position::new((width / 2) as i32, (height / 2) as i32);
        }
        self
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Cells of the starting layout, head first
    pub fn start_layout(&self) -> Vec<Position> {
        (0..self.initial_snake_length as i32)
            .map(|i| self.start_head.moved_by(-i, 0))
            .collect()
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_width * self.grid_height
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> GameResult<()> {
        let invalid = |msg: String| -> GameResult<()> { Err(GameError::InvalidConfig(msg)) };

        if self.grid_width == 0 || self.grid_height == 0 {
            return invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if i32::try_from(self.grid_width).is_err() || i32::try_from(self.grid_height).is_err() {
            return invalid("grid dimensions do not fit in i32".to_string());
        }

        if self.initial_snake_length == 0 {
            return invalid("initial_snake_length must be at least 1".to_string());
        }

        if let Some(cell) = self
            .start_layout()
            .into_iter()
            .find(|cell| !cell.is_within(self.grid_width, self.grid_height))
        {
            return invalid(format!(
                "starting snake cell ({}, {}) is outside the {}x{} grid",
                cell.x, cell.y, self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length >= self.cell_count() {
            return invalid(format!(
                "a {}-cell snake leaves no room for food on a {}x{} grid",
                self.initial_snake_length, self.grid_width, self.grid_height
            ));
        }

        for (name, value) in [
            ("initial_interval", self.initial_interval),
            ("interval_decrement", self.interval_decrement),
            ("interval_floor", self.interval_floor),
        ] {
            if !value.is_finite() {
                return invalid(format!("{name} must be a finite number, got {value}"));
            }
        }

        if self.initial_interval <= 0.0 {
            return invalid(format!(
                "initial_interval must be positive, got {}",
                self.initial_interval
            ));
        }

        if self.interval_decrement < 0.0 {
            return invalid(format!(
                "interval_decrement must be non-negative, got {}",
                self.interval_decrement
            ));
        }

        if self.interval_floor <= 0.0 || self.interval_floor > self.initial_interval {
            return invalid(format!(
                "interval_floor must be in (0, {}], got {}",
                self.initial_interval, self.interval_floor
            ));
        }

        if self.turn_buffer == 0 {
            return invalid("turn_buffer must be at least 1".to_string());
        }

        Ok(())
    }
}
