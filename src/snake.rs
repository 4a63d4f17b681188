use std::collections::{HashSet, VecDeque};

use crate::config::ConfigError;
use crate::grid::{Cell, Grid};

/// Body length of a freshly constructed snake.
pub const INITIAL_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector in screen coordinates (y grows downwards).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The snake: an ordered head-first body plus a set mirror of it.
///
/// `body` gives ordering (rendering, tail) and `occupied` gives O(1)
/// membership. Both are private and only mutated together, so outside of
/// `move_forward` they always hold exactly the same cells.
#[derive(Debug, Clone)]
pub struct Snake {
    grid: Grid,
    body: VecDeque<Cell>,
    occupied: HashSet<Cell>,
    direction: Direction,
    pending_direction: Direction,
    growth_credits: u32,
}

impl Snake {
    /// Three cells centered on the board, facing right.
    pub fn new(grid: Grid) -> Result<Self, ConfigError> {
        let (cx, cy) = (grid.cols() / 2, grid.rows() / 2);
        let body = (0..INITIAL_LENGTH as i32).map(|i| Cell::new(cx - i, cy));
        Self::from_body(grid, body, Direction::Right).map_err(|_| ConfigError::GridTooSmall {
            cols: grid.cols(),
            rows: grid.rows(),
            len: INITIAL_LENGTH,
        })
    }

    /// Builds a snake from an explicit head-first layout.
    ///
    /// The body must be non-empty, in bounds and free of duplicates.
    /// Segments are not required to be adjacent.
    pub fn from_body<I>(grid: Grid, body: I, direction: Direction) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let body: VecDeque<Cell> = body.into_iter().collect();
        if body.is_empty() {
            return Err(ConfigError::InvalidBody("body must not be empty"));
        }
        if !body.iter().all(|&cell| grid.in_bounds(cell)) {
            return Err(ConfigError::InvalidBody("body leaves the grid"));
        }

        let occupied: HashSet<Cell> = body.iter().copied().collect();
        if occupied.len() != body.len() {
            return Err(ConfigError::InvalidBody("body overlaps itself"));
        }

        Ok(Self {
            grid,
            body,
            occupied,
            direction,
            pending_direction: direction,
            growth_credits: 0,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Segments from head to tail.
    pub fn body(&self) -> impl ExactSizeIterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupied(&self) -> &HashSet<Cell> {
        &self.occupied
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.occupied.contains(&cell)
    }

    /// Direction used by the most recent move.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next move will use.
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn growth_credits(&self) -> u32 {
        self.growth_credits
    }

    /// Queues `direction` for the next move, replacing any earlier request.
    /// Reversing straight into the current direction is silently ignored.
    pub fn try_set_direction(&mut self, direction: Direction) {
        if direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = direction;
    }

    /// Advances one cell and reports whether the new head ran into the body.
    ///
    /// The tail is vacated in the same tick unless growth is pending, so
    /// stepping onto the current tail is not a collision. Walls are not
    /// checked here; see [`Snake::hits_wall`].
    pub fn move_forward(&mut self) -> bool {
        self.direction = self.pending_direction;
        let new_head = self.head().step(self.direction);

        let tail = if self.growth_credits > 0 {
            None
        } else {
            self.body.back().copied()
        };

        // Must read `occupied` before the new head is inserted.
        let collided = self.occupied.contains(&new_head) && Some(new_head) != tail;

        self.body.push_front(new_head);
        self.occupied.insert(new_head);

        match tail {
            None => self.growth_credits -= 1,
            Some(tail) => {
                self.body.pop_back();
                // On tail re-entry the head and the tail are the same cell,
                // which must stay in the set.
                if tail != new_head {
                    self.occupied.remove(&tail);
                }
            }
        }

        collided
    }

    /// Adds `n` segments, one per following move.
    pub fn grow(&mut self, n: u32) {
        self.growth_credits = self.growth_credits.saturating_add(n);
    }

    pub fn hits_wall(&self) -> bool {
        !self.grid.in_bounds(self.head())
    }

    /// Consistency check between the body and its set mirror. A collision
    /// reported by `move_forward` leaves a duplicate in `body`, which this
    /// also detects.
    pub fn hits_self(&self) -> bool {
        self.occupied.len() != self.body.len()
    }
}
