use rand::{Rng, rngs::StdRng};

use crate::error::Result;
use crate::generators::{MazeGenerator, get_rng, unvisited_neighbors};
use crate::maze::Grid;

/// Depth-first carving with an explicit stack.
///
/// The current cell is tracked apart from the stack and is always its top: carving pushes the
/// new cell and moves on, a dead end pops it and continues from the cell below without popping
/// and pushing that one again.
pub struct RecurBacktrack {
    rng: StdRng,
}

impl RecurBacktrack {
    pub fn new(seed: Option<u64>) -> Self {
        RecurBacktrack {
            rng: get_rng(seed),
        }
    }
}

impl MazeGenerator for RecurBacktrack {
    fn init(&mut self, grid: &mut Grid) -> Result<()> {
        // Initialize the starting point
        let row = self.rng.random_range(0..grid.rows());
        let col = self.rng.random_range(0..grid.cols());
        let mut current = grid.id_at(col, row)?;

        let mut visited = vec![false; grid.len()];
        visited[current.index()] = true;

        let mut stack = vec![current];
        let mut max_depth = 1;

        while !stack.is_empty() {
            let neighbors = unvisited_neighbors(grid, current, &visited);

            if neighbors.is_empty() {
                // Dead end, drop it and backtrack to the previously discovered cell
                stack.pop();
                if let Some(&previous) = stack.last() {
                    current = previous;
                }
            } else {
                let neighbor = neighbors[self.rng.random_range(0..neighbors.len())];
                grid.link(current, neighbor)?;
                visited[neighbor.index()] = true;
                stack.push(neighbor);
                max_depth = max_depth.max(stack.len());
                current = neighbor;
            }
        }

        tracing::debug!("[backtracking] done, max stack depth {}", max_depth);
        Ok(())
    }
}
