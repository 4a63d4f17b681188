//! One game from start to finish: the per-tick rules a front-end applies
//! around the snake and its food.

use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GameConfig};
use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    HitWall,
    HitSelf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver(GameOverReason),
    /// The snake covers the whole board, so there is nowhere to put food.
    Stalemate,
}

impl Status {
    pub fn is_running(self) -> bool {
        self == Status::Running
    }
}

/// What a single call to [`Session::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session was already over; nothing moved.
    Idle,
    Moved,
    Ate,
    Ended(Status),
}

pub struct Session {
    config: GameConfig,
    grid: Grid,
    initial_snake: Snake,
    snake: Snake,
    food: Food,
    rng: StdRng,
    seed: u64,
    score: u32,
    speed: f64,
    status: Status,
}

impl Session {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let seed: u64 = rand::thread_rng().gen();
        Self::with_seed(config, seed)
    }

    /// Deterministic session: the same seed and inputs replay the same game.
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let snake = Snake::new(grid)?;
        let food = Food::new(grid, snake.occupied(), &mut rng);

        info!(
            "session started: {}x{} grid, seed {}",
            grid.cols(),
            grid.rows(),
            seed
        );

        Ok(Self {
            speed: config.initial_speed,
            config,
            grid,
            initial_snake: snake.clone(),
            snake,
            food,
            rng,
            seed,
            score: 0,
            status: Status::Running,
        })
    }

    /// Replaces the snake and food with scripted ones. Status, score and
    /// speed are left alone.
    pub fn with_layout(mut self, snake: Snake, food: Food) -> Self {
        self.snake = snake;
        self.food = food;
        self
    }

    /// Starts over with a fresh snake and food, keeping the RNG stream.
    pub fn restart(&mut self) {
        self.snake = self.initial_snake.clone();
        self.food = Food::new(self.grid, self.snake.occupied(), &mut self.rng);
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.status = Status::Running;
        info!("session restarted");
    }

    /// Queues a turn for the next tick. Ignored once the game is over.
    pub fn steer(&mut self, direction: Direction) {
        if self.status.is_running() {
            self.snake.try_set_direction(direction);
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.status.is_running() {
            return TickOutcome::Idle;
        }

        let collided = self.snake.move_forward();
        if self.snake.hits_wall() {
            return self.end(Status::GameOver(GameOverReason::HitWall));
        }
        if collided {
            return self.end(Status::GameOver(GameOverReason::HitSelf));
        }

        if !self.food.is_at(self.snake.head()) {
            return TickOutcome::Moved;
        }

        self.snake.grow(1);
        self.score += 1;
        self.speed = self.config.next_speed(self.speed);
        debug!(
            "ate at {:?}: score {}, speed {:.1}",
            self.snake.head(),
            self.score,
            self.speed
        );

        if self.food.relocate(self.snake.occupied(), &mut self.rng).is_none() {
            warn!("no free cell left for food");
            return self.end(Status::Stalemate);
        }
        TickOutcome::Ate
    }

    fn end(&mut self, status: Status) -> TickOutcome {
        self.status = status;
        info!("game over ({:?}) with score {}", status, self.score);
        TickOutcome::Ended(status)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn food_position(&self) -> Option<Cell> {
        self.food.position()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tick_interval(&self) -> Duration {
        GameConfig::tick_interval(self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(cols: i32, rows: i32) -> Session {
        Session::with_seed(GameConfig::new(cols, rows), 42).unwrap()
    }

    #[test]
    fn test_new_session_state() {
        let s = session(10, 10);
        assert_eq!(s.status(), Status::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.speed(), 10.0);
        assert_eq!(s.seed(), 42);
        let food = s.food_position().unwrap();
        assert!(!s.snake().contains(food));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(Session::with_seed(GameConfig::new(2, 10), 0).is_err());
    }

    #[test]
    fn test_wall_ends_game() {
        let mut s = session(10, 10);
        let grid = s.grid();
        let food = Food::at(grid, Cell::new(0, 9));
        s = s.with_layout(Snake::new(grid).unwrap(), food);
        // Head starts at x = 5 facing right; x = 10 is the wall.
        for _ in 0..4 {
            assert_eq!(s.tick(), TickOutcome::Moved);
        }
        assert_eq!(
            s.tick(),
            TickOutcome::Ended(Status::GameOver(GameOverReason::HitWall))
        );
        assert_eq!(s.tick(), TickOutcome::Idle);

        s.steer(Direction::Up);
        assert_eq!(s.snake().pending_direction(), Direction::Right);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = session(10, 10);
        let food = Food::at(s.grid(), Cell::new(6, 5));
        let snake = Snake::new(s.grid()).unwrap();
        s = s.with_layout(snake, food);
        assert_eq!(s.tick(), TickOutcome::Ate);
        assert_eq!(s.score(), 1);
        assert_eq!(s.speed(), 10.5);

        s.restart();
        assert_eq!(s.status(), Status::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.speed(), 10.0);
        assert_eq!(s.snake().len(), 3);
        assert_eq!(s.snake().head(), Cell::new(5, 5));
    }

    #[test]
    fn test_restart_restores_starting_snake() {
        let mut s = session(10, 10);
        let start: Vec<Cell> = s.snake().body().collect();
        let grid = s.grid();
        let food = Food::at(grid, Cell::new(5, 4));
        s = s.with_layout(Snake::new(grid).unwrap(), food);

        s.steer(Direction::Up);
        assert_eq!(s.tick(), TickOutcome::Ate);
        assert_eq!(s.snake().growth_credits(), 1);

        s.restart();
        assert_eq!(s.snake().body().collect::<Vec<_>>(), start);
        assert_eq!(s.snake().direction(), Direction::Right);
        assert_eq!(s.snake().pending_direction(), Direction::Right);
        assert_eq!(s.snake().growth_credits(), 0);
        assert_eq!(s.snake().occupied().len(), 3);
        let food = s.food_position().unwrap();
        assert!(!s.snake().contains(food));
    }
}
