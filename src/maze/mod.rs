pub mod cell;
pub mod grid;

pub use cell::Cell;
pub use grid::Grid;

/// Handle to a cell inside the [`Grid`] that created it.
/// This is the row-major index `row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    /// Row-major index of the cell in its grid.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The four compass directions a cell can have a neighbor in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// All directions, in the order random neighbor picks draw from.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Slot of this direction in a cell's neighbor table.
    pub(crate) fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::East => 2,
            Direction::West => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_round_trip() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
    }

    #[test]
    fn test_slots_match_order() {
        for (i, dir) in Direction::ALL.iter().enumerate() {
            assert_eq!(dir.slot(), i);
        }
    }
}
