use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::error::BoardFull;
use crate::grid::Grid;
use crate::snake::{Cell, SnakeBody};

/// Chooses where the next goal appears.
///
/// Owns its own seeded generator so goal placement replays identically for a
/// given seed.
#[derive(Debug, Clone)]
pub struct GoalSpawner {
    rng: StdRng,
}

impl GoalSpawner {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks an empty cell for the next goal, preferring the inner region.
    ///
    /// Returns `BoardFull` when the snake covers every cell.
    pub fn place(&mut self, grid: Grid, snake: &SnakeBody) -> Result<Cell, BoardFull> {
        let occupied = snake.cell_set();
        let cell = grid.random_empty_inner_cell(&mut self.rng, &occupied)?;
        debug!(x = cell.x, y = cell.y, "goal placed");
        Ok(cell)
    }
}
