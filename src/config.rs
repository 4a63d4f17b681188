use std::time::Duration;

use thiserror::Error;

use crate::grid::Grid;
use crate::snake::INITIAL_LENGTH;

pub const DEFAULT_COLS: i32 = 30;
pub const DEFAULT_ROWS: i32 = 20;
pub const DEFAULT_SPEED: f64 = 10.0;
pub const DEFAULT_SPEED_INCREMENT: f64 = 0.5;
pub const DEFAULT_MAX_SPEED: f64 = 30.0;

/// Everything that can go wrong before the first tick.
///
/// Once a `Snake` or `Session` exists, play never produces one of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {cols}x{rows}")]
    NonPositiveDimensions { cols: i32, rows: i32 },
    #[error("a {cols}x{rows} grid cannot hold the initial {len}-cell snake")]
    GridTooSmall { cols: i32, rows: i32, len: usize },
    #[error("invalid snake body: {0}")]
    InvalidBody(&'static str),
    #[error("invalid speed settings: {0}")]
    InvalidSpeed(&'static str),
}

/// Tunables consumed by a `Session`. Speeds are in ticks per second.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub cols: i32,
    pub rows: i32,
    pub initial_speed: f64,
    pub speed_increment: f64,
    pub max_speed: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            initial_speed: DEFAULT_SPEED,
            speed_increment: DEFAULT_SPEED_INCREMENT,
            max_speed: DEFAULT_MAX_SPEED,
        }
    }
}

impl GameConfig {
    /// Default speeds on a custom grid.
    pub fn new(cols: i32, rows: i32) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::new(self.cols, self.rows)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = self.grid()?;
        // The initial layout is horizontal and centered: head at cols / 2,
        // tail two cells to its left.
        if grid.cols() / 2 < INITIAL_LENGTH as i32 - 1 {
            return Err(ConfigError::GridTooSmall {
                cols: self.cols,
                rows: self.rows,
                len: INITIAL_LENGTH,
            });
        }

        if !self.initial_speed.is_finite() || self.initial_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed("initial speed must be positive"));
        }
        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed("maximum speed must be positive"));
        }
        if !self.speed_increment.is_finite() || self.speed_increment < 0.0 {
            return Err(ConfigError::InvalidSpeed(
                "speed increment must not be negative",
            ));
        }
        if self.initial_speed > self.max_speed {
            return Err(ConfigError::InvalidSpeed(
                "initial speed exceeds the maximum speed",
            ));
        }
        Ok(())
    }

    /// Speed after one more eat, capped at `max_speed`.
    pub fn next_speed(&self, speed: f64) -> f64 {
        (speed + self.speed_increment).min(self.max_speed)
    }

    /// Wall-clock time between two ticks at `speed`.
    pub fn tick_interval(speed: f64) -> Duration {
        Duration::from_secs_f64(1.0 / speed)
    }
}
