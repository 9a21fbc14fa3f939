use rand::{Rng, rngs::StdRng};

use crate::error::Result;
use crate::generators::{MazeGenerator, get_rng};
use crate::maze::{CellId, Grid};

/// Uniform spanning tree from loop-erased random walks.
///
/// One random cell starts as the maze. Every walk starts from a cell that is still free and
/// ends on the first cell that already belongs to the maze. Loops are erased as the walk goes,
/// so the walk that remains is a simple path and can be linked in whole.
pub struct Wilson {
    rng: StdRng,
}

impl Wilson {
    pub fn new(seed: Option<u64>) -> Self {
        Wilson {
            rng: get_rng(seed),
        }
    }

    /// Random walk from a random free cell up to the first absorbed cell, loops erased.
    fn walk(&mut self, grid: &Grid, free: &FreeSet, capacity: usize) -> Result<Vec<CellId>> {
        let mut path = Vec::with_capacity(capacity);
        let Some(mut cell) = free.pick(&mut self.rng) else {
            return Ok(path);
        };
        path.push(cell);

        while free.contains(cell) {
            let next = grid[cell].random_neighbor(&mut self.rng)?;
            extend_walk(&mut path, next);
            cell = next;
        }
        Ok(path)
    }
}

/// Append `next` to a random walk, erasing the loop if `next` was already on it.
///
/// When `next` is already on the path, everything after its first occurrence is dropped, so
/// the path `A B C` followed by `B` becomes `A B`.
pub fn extend_walk<T: PartialEq>(path: &mut Vec<T>, next: T) {
    match path.iter().position(|step| *step == next) {
        Some(at) => path.truncate(at + 1),
        None => path.push(next),
    }
}

impl MazeGenerator for Wilson {
    fn init(&mut self, grid: &mut Grid) -> Result<()> {
        let mut free = FreeSet::full(grid.len());
        if let Some(first) = free.pick(&mut self.rng) {
            free.remove(first);
        }

        // Running mean of walk lengths, used to size the next path buffer
        let mut mean_len = 1usize;
        let mut walks = 0usize;

        while !free.is_empty() {
            let path = self.walk(grid, &free, mean_len)?;
            for pair in path.windows(2) {
                grid.link(pair[0], pair[1])?;
                free.remove(pair[0]);
            }

            walks += 1;
            mean_len = (mean_len * (walks - 1) + path.len()).div_ceil(walks);
        }

        tracing::debug!("[wilson] {} walks, mean path length {}", walks, mean_len);
        Ok(())
    }
}

/// Cells not yet absorbed into the maze, with O(1) membership, removal and random pick.
struct FreeSet {
    cells: Vec<CellId>,
    /// Position of each cell in `cells`, `None` once removed
    slots: Vec<Option<usize>>,
}

impl FreeSet {
    fn full(len: usize) -> Self {
        FreeSet {
            cells: (0..len).map(CellId).collect(),
            slots: (0..len).map(Some).collect(),
        }
    }

    fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn contains(&self, id: CellId) -> bool {
        self.slots[id.index()].is_some()
    }

    fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<CellId> {
        if self.cells.is_empty() {
            return None;
        }
        Some(self.cells[rng.random_range(0..self.cells.len())])
    }

    fn remove(&mut self, id: CellId) -> bool {
        let Some(slot) = self.slots[id.index()].take() else {
            return false;
        };
        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.slots[moved.index()] = Some(slot);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{carve, check_corridors, check_generator};
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_wilson_perfect_and_reproducible() {
        check_generator(|seed| Wilson::new(Some(seed)));
    }

    #[test]
    fn test_wilson_corridors() {
        check_corridors(|seed| Wilson::new(Some(seed)));
    }

    #[test]
    fn test_loop_erasure() {
        let mut path = vec!['A'];
        for step in ['B', 'C', 'B', 'D'] {
            extend_walk(&mut path, step);
        }
        assert_eq!(path, vec!['A', 'B', 'D']);
    }

    #[test]
    fn test_loop_erasure_back_to_start() {
        let mut path = vec![1, 2, 3, 4];
        extend_walk(&mut path, 1);
        assert_eq!(path, vec![1]);
        extend_walk(&mut path, 5);
        assert_eq!(path, vec![1, 5]);
    }

    #[test]
    fn test_loop_erasure_on_cells() {
        let grid = Grid::new(2, 2).unwrap();
        let [a, b, c, d] =
            [(0, 0), (1, 0), (1, 1), (0, 1)].map(|(col, row)| grid.id_at(col, row).unwrap());
        let mut path = vec![a];
        for step in [b, c, b, d] {
            extend_walk(&mut path, step);
        }
        assert_eq!(path, vec![a, b, d]);
    }

    #[test]
    fn test_free_set() {
        let mut free = FreeSet::full(4);
        assert!(free.remove(CellId(1)));
        assert!(!free.remove(CellId(1)));
        assert!(!free.contains(CellId(1)));
        assert!(free.contains(CellId(3)));

        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..50 {
            assert_ne!(free.pick(&mut rng), Some(CellId(1)));
        }

        for id in [0, 2, 3] {
            assert!(free.remove(CellId(id)));
        }
        assert!(free.is_empty());
        assert_eq!(free.pick(&mut rng), None);
    }

    #[test]
    fn test_single_cell_has_no_passages() {
        let grid = carve(&mut Wilson::new(Some(3)), 1, 1);
        assert_eq!(grid.passage_count(), 0);
    }
}
