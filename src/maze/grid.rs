use std::collections::VecDeque;
use std::fmt;

use super::cell::Cell;
use super::{CellId, Direction};
use crate::error::{MazeError, Result};

/// A rectangular arena of cells.
///
/// The neighbor mesh is built once in [`Grid::new`] and never changes afterwards. Generators only
/// open passages through [`Grid::link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Box<[Cell]>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Creates a `rows` x `cols` grid with every wall standing.
    ///
    /// Fails with [`MazeError::InvalidDimensions`] if either dimension is 0, or if the cells
    /// cannot be allocated.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let invalid = MazeError::InvalidDimensions { rows, cols };
        if rows == 0 || cols == 0 {
            return Err(invalid);
        }
        let len = rows.checked_mul(cols).ok_or_else(|| invalid.clone())?;

        // Reserve up front so an oversized grid is an error rather than an allocation abort
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.extend((0..rows).flat_map(|row| (0..cols).map(move |col| Cell::new(row, col))));

        // Missing directions stay `None`, there is no wraparound
        for cell in cells.iter_mut() {
            let (row, col) = (cell.row(), cell.col());
            let index = |r: usize, c: usize| CellId(r * cols + c);
            cell.set_neighbor(Direction::North, row.checked_sub(1).map(|r| index(r, col)));
            cell.set_neighbor(
                Direction::South,
                (row + 1 < rows).then(|| index(row + 1, col)),
            );
            cell.set_neighbor(Direction::West, col.checked_sub(1).map(|c| index(row, c)));
            cell.set_neighbor(
                Direction::East,
                (col + 1 < cols).then(|| index(row, col + 1)),
            );
        }

        Ok(Grid {
            cells: cells.into_boxed_slice(),
            rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false, a grid holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Checks if the given coordinate is strictly inside the grid.
    pub fn is_in_bounds(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    fn ravel_index(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    /// Handle of the cell at column `col` and row `row`.
    ///
    /// Any coordinate equal to or above the extent is reported as [`MazeError::OutOfRange`].
    pub fn id_at(&self, col: usize, row: usize) -> Result<CellId> {
        if !self.is_in_bounds(col, row) {
            return Err(MazeError::OutOfRange {
                col,
                row,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(CellId(self.ravel_index(col, row)))
    }

    /// The cell at column `col` and row `row`.
    pub fn cell_at(&self, col: usize, row: usize) -> Result<&Cell> {
        let id = self.id_at(col, row)?;
        Ok(&self[id])
    }

    pub fn cell(&self, id: CellId) -> &Cell {
        &self[id]
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// All cell handles in row-major order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> + use<> {
        (0..self.cells.len()).map(CellId)
    }

    /// Opens the passage between two neighboring cells, on both sides.
    /// Linking an already linked pair does nothing.
    pub fn link(&mut self, a: CellId, b: CellId) -> Result<()> {
        self.set_passage(a, b, true)
    }

    /// Closes the passage between two neighboring cells, on both sides.
    /// Unlinking a pair without a passage does nothing.
    pub fn unlink(&mut self, a: CellId, b: CellId) -> Result<()> {
        self.set_passage(a, b, false)
    }

    fn set_passage(&mut self, a: CellId, b: CellId, open: bool) -> Result<()> {
        let direction = self[a]
            .direction_to(b)
            .ok_or_else(|| MazeError::NotAdjacent {
                from: (self[a].col(), self[a].row()),
                to: (self[b].col(), self[b].row()),
            })?;
        self.cells[a.0].set_link(direction, open);
        self.cells[b.0].set_link(direction.opposite(), open);
        Ok(())
    }

    /// Number of undirected passages in the grid.
    pub fn passage_count(&self) -> usize {
        // Only east and south are counted so every passage is seen once
        self.cells
            .iter()
            .map(|cell| usize::from(cell.can_move_east()) + usize::from(cell.can_move_south()))
            .sum()
    }

    /// Whether the passages form a spanning tree: every cell is reachable from every other and
    /// there are exactly `len - 1` passages.
    pub fn is_perfect(&self) -> bool {
        if self.passage_count() != self.len() - 1 {
            return false;
        }

        let mut visited = vec![false; self.len()];
        let mut queue = VecDeque::from([CellId(0)]);
        visited[0] = true;
        let mut reached = 1;
        while let Some(id) = queue.pop_front() {
            for next in self[id].links() {
                if !visited[next.0] {
                    visited[next.0] = true;
                    reached += 1;
                    queue.push_back(next);
                }
            }
        }
        reached == self.len()
    }

    /// Renders the grid as a text diagram, walls drawn as `|` and `---`.
    ///
    /// `body` supplies the three columns drawn inside each cell. Cells are visited in row-major
    /// order and only their east and south sides are drawn, the north and west sides coming from
    /// the previous row or column (or the outer frame).
    pub fn diagram<F>(&self, mut body: F) -> String
    where
        F: FnMut(CellId, &Cell) -> String,
    {
        let mut out = String::with_capacity((self.rows * 2 + 1) * (self.cols * 4 + 2));
        out.push('+');
        for _ in 0..self.cols {
            out.push_str("---+");
        }
        out.push('\n');

        for row in 0..self.rows {
            let mut top = String::from("|");
            let mut bottom = String::from("+");
            for col in 0..self.cols {
                let id = CellId(self.ravel_index(col, row));
                let cell = &self[id];
                top.push_str(&body(id, cell));
                top.push(if cell.can_move_east() { ' ' } else { '|' });
                bottom.push_str(if cell.can_move_south() { "   " } else { "---" });
                bottom.push('+');
            }
            out.push_str(&top);
            out.push('\n');
            out.push_str(&bottom);
            out.push('\n');
        }
        out
    }
}

impl std::ops::Index<CellId> for Grid {
    type Output = Cell;

    fn index(&self, index: CellId) -> &Self::Output {
        &self.cells[index.0]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagram(|_, _| String::from("   ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 3),
            Err(MazeError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(MazeError::InvalidDimensions {
                rows: usize::MAX,
                cols: 2
            })
        );
        // The product fits in a usize but the cells cannot be allocated
        assert!(Grid::new(usize::MAX / 2, 2).is_err());
    }

    #[test]
    fn test_sizes() {
        let grid = Grid::new(3, 5).unwrap();
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.len(), 15);
        assert_eq!(grid.cells().count(), 15);
        assert!(!grid.is_empty());
    }

    #[test]
    fn test_cell_at_uses_col_row_order() {
        let grid = Grid::new(3, 5).unwrap();
        let cell = grid.cell_at(4, 2).unwrap();
        assert_eq!((cell.col(), cell.row()), (4, 2));
        assert_eq!(grid.id_at(4, 2).unwrap().index(), 14);
    }

    #[test]
    fn test_out_of_range_at_extent() {
        let grid = Grid::new(3, 5).unwrap();
        // Column equal to cols must not clamp or wrap into the next row
        assert_eq!(
            grid.cell_at(5, 0),
            Err(MazeError::OutOfRange {
                col: 5,
                row: 0,
                rows: 3,
                cols: 5
            })
        );
        assert!(grid.cell_at(0, 3).is_err());
        assert!(grid.cell_at(5, 3).is_err());
        assert!(grid.cell_at(4, 2).is_ok());
    }

    #[test]
    fn test_neighbor_mesh() {
        let grid = Grid::new(3, 3).unwrap();
        let centre = grid.cell_at(1, 1).unwrap();
        assert_eq!(centre.neighbors().count(), 4);
        assert_eq!(centre.north(), Some(grid.id_at(1, 0).unwrap()));
        assert_eq!(centre.south(), Some(grid.id_at(1, 2).unwrap()));
        assert_eq!(centre.east(), Some(grid.id_at(2, 1).unwrap()));
        assert_eq!(centre.west(), Some(grid.id_at(0, 1).unwrap()));

        let corner = grid.cell_at(0, 0).unwrap();
        assert_eq!(corner.north(), None);
        assert_eq!(corner.west(), None);
        assert_eq!(corner.neighbors().count(), 2);

        let edge = grid.cell_at(2, 1).unwrap();
        assert_eq!(edge.east(), None);
        assert_eq!(edge.neighbors().count(), 3);
    }

    #[test]
    fn test_mesh_is_symmetric() {
        let grid = Grid::new(4, 6).unwrap();
        for id in grid.ids() {
            for dir in Direction::ALL {
                if let Some(other) = grid[id].neighbor(dir) {
                    assert_eq!(grid[other].neighbor(dir.opposite()), Some(id));
                    assert_ne!(other, id);
                }
            }
        }
    }

    #[test]
    fn test_link_is_symmetric() {
        let mut grid = Grid::new(2, 2).unwrap();
        let a = grid.id_at(0, 0).unwrap();
        let b = grid.id_at(1, 0).unwrap();

        grid.link(a, b).unwrap();
        assert!(grid[a].linked(b));
        assert!(grid[b].linked(a));
        assert!(grid[a].can_move_east());
        assert!(grid[b].can_move_west());

        // Linking twice is harmless
        grid.link(b, a).unwrap();
        assert_eq!(grid.passage_count(), 1);

        grid.unlink(a, b).unwrap();
        assert!(!grid[a].linked(b));
        assert!(!grid[b].linked(a));
        grid.unlink(a, b).unwrap();
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_link_rejects_non_neighbors() {
        let mut grid = Grid::new(2, 2).unwrap();
        let a = grid.id_at(0, 0).unwrap();
        let d = grid.id_at(1, 1).unwrap();
        assert_eq!(
            grid.link(a, d),
            Err(MazeError::NotAdjacent {
                from: (0, 0),
                to: (1, 1)
            })
        );
        assert!(grid.link(a, a).is_err());
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn test_is_perfect() {
        let mut grid = Grid::new(2, 2).unwrap();
        let ids = grid.ids().collect::<Vec<_>>();
        assert!(!grid.is_perfect());

        grid.link(ids[0], ids[1]).unwrap();
        grid.link(ids[1], ids[3]).unwrap();
        grid.link(ids[3], ids[2]).unwrap();
        assert!(grid.is_perfect());

        // A fourth passage closes a cycle
        grid.link(ids[2], ids[0]).unwrap();
        assert!(!grid.is_perfect());

        assert!(Grid::new(1, 1).unwrap().is_perfect());
    }

    #[test]
    fn test_display_draws_walls_and_passages() {
        let mut grid = Grid::new(2, 2).unwrap();
        let ids = grid.ids().collect::<Vec<_>>();
        grid.link(ids[0], ids[1]).unwrap();
        grid.link(ids[1], ids[3]).unwrap();
        grid.link(ids[3], ids[2]).unwrap();

        let expected = "\
+---+---+
|       |
+---+   +
|       |
+---+---+
";
        assert_eq!(grid.to_string(), expected);
    }

    #[test]
    fn test_display_closed_grid() {
        let grid = Grid::new(1, 2).unwrap();
        assert_eq!(grid.to_string(), "+---+---+\n|   |   |\n+---+---+\n");
    }
}
