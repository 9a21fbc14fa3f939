use rand::Rng;

use crate::error::{MazeError, Result};
use crate::maze::{CellId, Direction};

/// A single node of the grid.
///
/// Neighbors are fixed when the [`Grid`](crate::maze::Grid) is built. The only mutable state is the
/// set of open passages, which is indexed by direction since a passage can only lead to a neighbor.
/// Passages are opened and closed through [`Grid::link`](crate::maze::Grid::link) so that both
/// ends always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    neighbors: [Option<CellId>; 4],
    links: [bool; 4],
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            neighbors: [None; 4],
            links: [false; 4],
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn north(&self) -> Option<CellId> {
        self.neighbor(Direction::North)
    }

    pub fn south(&self) -> Option<CellId> {
        self.neighbor(Direction::South)
    }

    pub fn east(&self) -> Option<CellId> {
        self.neighbor(Direction::East)
    }

    pub fn west(&self) -> Option<CellId> {
        self.neighbor(Direction::West)
    }

    /// The neighbor in the given direction, or `None` at the grid boundary.
    pub fn neighbor(&self, direction: Direction) -> Option<CellId> {
        self.neighbors[direction.slot()]
    }

    /// All existing neighbors in north, south, east, west order.
    pub fn neighbors(&self) -> impl Iterator<Item = CellId> + '_ {
        self.neighbors.iter().flatten().copied()
    }

    /// Whether a passage is open in the given direction.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.links[direction.slot()]
    }

    pub fn can_move_north(&self) -> bool {
        self.can_move(Direction::North)
    }

    pub fn can_move_south(&self) -> bool {
        self.can_move(Direction::South)
    }

    pub fn can_move_east(&self) -> bool {
        self.can_move(Direction::East)
    }

    pub fn can_move_west(&self) -> bool {
        self.can_move(Direction::West)
    }

    /// Whether there is an open passage between this cell and `other`.
    pub fn linked(&self, other: CellId) -> bool {
        self.direction_to(other)
            .is_some_and(|direction| self.can_move(direction))
    }

    /// Cells reachable through an open passage from this cell.
    pub fn links(&self) -> impl Iterator<Item = CellId> + '_ {
        Direction::ALL
            .into_iter()
            .filter(|&direction| self.can_move(direction))
            .filter_map(|direction| self.neighbor(direction))
    }

    /// Pick one of the four directional slots uniformly at random, drawing again until a slot
    /// holding a neighbor comes up.
    ///
    /// Returns [`MazeError::NoNeighbors`] when the cell has no neighbor at all, which only happens
    /// on a 1x1 grid.
    pub fn random_neighbor<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CellId> {
        if self.neighbors.iter().all(Option::is_none) {
            return Err(MazeError::NoNeighbors {
                col: self.col,
                row: self.row,
            });
        }
        loop {
            let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
            if let Some(neighbor) = self.neighbor(direction) {
                return Ok(neighbor);
            }
        }
    }

    /// Direction in which `other` is a neighbor of this cell.
    pub fn direction_to(&self, other: CellId) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&direction| self.neighbor(direction) == Some(other))
    }

    pub(crate) fn set_neighbor(&mut self, direction: Direction, neighbor: Option<CellId>) {
        self.neighbors[direction.slot()] = neighbor;
    }

    pub(crate) fn set_link(&mut self, direction: Direction, open: bool) {
        self.links[direction.slot()] = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_isolated_cell_has_no_random_neighbor() {
        let cell = Cell::new(0, 0);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            cell.random_neighbor(&mut rng),
            Err(MazeError::NoNeighbors { col: 0, row: 0 })
        );
    }

    #[test]
    fn test_random_neighbor_only_returns_populated_slots() {
        let mut cell = Cell::new(0, 0);
        cell.set_neighbor(Direction::East, Some(CellId(1)));
        cell.set_neighbor(Direction::South, Some(CellId(4)));
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 2];
        for _ in 0..200 {
            match cell.random_neighbor(&mut rng) {
                Ok(CellId(1)) => seen[0] = true,
                Ok(CellId(4)) => seen[1] = true,
                other => panic!("unexpected pick {other:?}"),
            }
        }
        assert!(seen[0] && seen[1], "both neighbors should be picked eventually");
    }

    #[test]
    fn test_links_follow_open_directions() {
        let mut cell = Cell::new(1, 1);
        cell.set_neighbor(Direction::North, Some(CellId(1)));
        cell.set_neighbor(Direction::West, Some(CellId(3)));
        assert_eq!(cell.links().count(), 0);

        cell.set_link(Direction::West, true);
        assert!(cell.can_move_west());
        assert!(!cell.can_move_north());
        assert!(cell.linked(CellId(3)));
        assert!(!cell.linked(CellId(1)));
        assert!(!cell.linked(CellId(99)));
        assert_eq!(cell.links().collect::<Vec<_>>(), vec![CellId(3)]);
    }
}
