use rand::{Rng, rngs::StdRng};

use crate::error::Result;
use crate::generators::{MazeGenerator, get_rng, unvisited_neighbors};
use crate::maze::Grid;

/// Depth-first carving where the stack top is always the current cell.
///
/// Each step pops a cell. If it still has unvisited neighbors it is pushed back before the
/// carved neighbor, so it is revisited once that branch is exhausted.
pub struct Iterative {
    rng: StdRng,
}

impl Iterative {
    pub fn new(seed: Option<u64>) -> Self {
        Iterative {
            rng: get_rng(seed),
        }
    }
}

impl MazeGenerator for Iterative {
    fn init(&mut self, grid: &mut Grid) -> Result<()> {
        // Initialize the starting point
        let row = self.rng.random_range(0..grid.rows());
        let col = self.rng.random_range(0..grid.cols());
        let start = grid.id_at(col, row)?;

        let mut visited = vec![false; grid.len()];
        visited[start.index()] = true;

        // The stack keeps only carved cells
        let mut stack = vec![start];

        while let Some(cell) = stack.pop() {
            let neighbors = unvisited_neighbors(grid, cell, &visited);

            if !neighbors.is_empty() {
                let neighbor = neighbors[self.rng.random_range(0..neighbors.len())];
                grid.link(cell, neighbor)?;
                visited[neighbor.index()] = true;
                // Put the cell back first so we can look at another neighbor of this cell later
                stack.push(cell);
                // Put the neighbor to carve the maze in that neighbor's direction
                stack.push(neighbor);
            }
        }

        Ok(())
    }
}
