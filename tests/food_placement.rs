//! Food placement in both occupancy regimes.

use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::SeedableRng;

use gridsnake::{place, Cell, Food, Grid, Snake};

#[test]
fn test_sparse_board_never_places_on_snake() {
    let grid = Grid::new(10, 10).unwrap();
    let snake = Snake::new(grid).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..1_000 {
        let cell = place(grid, snake.occupied(), &mut rng).unwrap();
        assert!(grid.in_bounds(cell));
        assert!(!snake.contains(cell));
    }
}

#[test]
fn test_dense_board_is_uniform_over_free_cells() {
    let grid = Grid::new(4, 4).unwrap();
    let free: Vec<Cell> = [(0, 0), (3, 0), (1, 1), (2, 2), (0, 3), (3, 3)]
        .into_iter()
        .map(Cell::from)
        .collect();
    let occupied: HashSet<Cell> = grid.cells().filter(|c| !free.contains(c)).collect();
    assert_eq!(occupied.len(), 10);

    let mut rng = StdRng::seed_from_u64(99);
    let trials = 60_000;
    let mut counts: HashMap<Cell, u32> = HashMap::new();
    for _ in 0..trials {
        let cell = place(grid, &occupied, &mut rng).unwrap();
        assert!(!occupied.contains(&cell));
        *counts.entry(cell).or_default() += 1;
    }

    assert_eq!(counts.len(), free.len());
    let expected = trials / free.len() as u32;
    for cell in &free {
        let seen = counts[cell];
        assert!(
            seen.abs_diff(expected) < 600,
            "{:?} drawn {} times, expected about {}",
            cell,
            seen,
            expected
        );
    }
}

#[test]
fn test_nearly_full_board_still_terminates() {
    let grid = Grid::new(30, 20).unwrap();
    let hole = Cell::new(17, 11);
    let occupied: HashSet<Cell> = grid.cells().filter(|&c| c != hole).collect();
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(place(grid, &occupied, &mut rng), Some(hole));
}

#[test]
fn test_food_starts_off_the_snake() {
    let grid = Grid::new(4, 1).unwrap();
    let snake = Snake::new(grid).unwrap();
    let mut rng = StdRng::seed_from_u64(8);
    let food = Food::new(grid, snake.occupied(), &mut rng);
    assert_eq!(food.position(), Some(Cell::new(3, 0)));
}
