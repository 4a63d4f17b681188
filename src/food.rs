use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::grid::{Cell, Grid};

/// Picks a uniformly random free cell, or `None` when the board is full.
///
/// While fewer than a third of the cells are taken, cells are drawn at
/// random until a free one comes up. Past that, the free cells are listed
/// in row-major order and one is chosen from the list, which bounds the
/// cost when the board is nearly full.
pub fn place<R>(grid: Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell>
where
    R: Rng + ?Sized,
{
    let total = grid.cell_count();
    // A head that just crossed a wall is in the set but takes no board cell.
    let taken = occupied.iter().filter(|&&cell| grid.in_bounds(cell)).count();
    if taken >= total {
        return None;
    }

    if taken < total / 3 {
        loop {
            let candidate = Cell::new(
                rng.gen_range(0..grid.cols()),
                rng.gen_range(0..grid.rows()),
            );
            if !occupied.contains(&candidate) {
                return Some(candidate);
            }
        }
    }

    let free: Vec<Cell> = grid.cells().filter(|cell| !occupied.contains(cell)).collect();
    free.choose(rng).copied()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    grid: Grid,
    position: Option<Cell>,
}

impl Food {
    pub fn new<R>(grid: Grid, occupied: &HashSet<Cell>, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self {
            grid,
            position: place(grid, occupied, rng),
        }
    }

    /// Food at a fixed cell, for scripted scenarios.
    pub fn at(grid: Grid, position: Cell) -> Self {
        Self {
            grid,
            position: Some(position),
        }
    }

    /// `None` once the board has no free cell left.
    pub fn position(&self) -> Option<Cell> {
        self.position
    }

    pub fn is_at(&self, cell: Cell) -> bool {
        self.position == Some(cell)
    }

    /// Moves to a new free cell given the snake's post-growth occupancy.
    /// Returns the new position.
    pub fn relocate<R>(&mut self, occupied: &HashSet<Cell>, rng: &mut R) -> Option<Cell>
    where
        R: Rng + ?Sized,
    {
        self.position = place(self.grid, occupied, rng);
        self.position
    }
}
