use rand::{Rng, rngs::StdRng};

use crate::error::Result;
use crate::generators::{MazeGenerator, get_rng};
use crate::maze::Grid;

/// Uniform spanning tree from an unbiased random walk.
///
/// The walk links into a cell the first time it enters it and stops once every cell has been
/// entered. It always terminates but can take a long time on large or narrow grids.
pub struct AldousBroder {
    rng: StdRng,
}

impl AldousBroder {
    pub fn new(seed: Option<u64>) -> Self {
        AldousBroder {
            rng: get_rng(seed),
        }
    }
}

impl MazeGenerator for AldousBroder {
    fn init(&mut self, grid: &mut Grid) -> Result<()> {
        // Initialize the starting point
        let row = self.rng.random_range(0..grid.rows());
        let col = self.rng.random_range(0..grid.cols());
        let mut current = grid.id_at(col, row)?;

        let mut visited = vec![false; grid.len()];
        visited[current.index()] = true;
        let mut num_visited = 1;
        let mut steps = 0usize;

        while num_visited < grid.len() {
            let neighbor = grid[current].random_neighbor(&mut self.rng)?;
            if !visited[neighbor.index()] {
                grid.link(current, neighbor)?;
                visited[neighbor.index()] = true;
                num_visited += 1;
            }
            current = neighbor;
            steps += 1;
        }

        tracing::debug!(
            "[aldous-broder] visited {} cells in {} steps",
            num_visited,
            steps
        );
        Ok(())
    }
}
