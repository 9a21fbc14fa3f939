use thiserror::Error;

/// Errors reported by grid construction, generation and the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("invalid grid dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    /// A coordinate was not strictly below the grid extent.
    #[error("cell (col {col}, row {row}) is out of range for a {rows}x{cols} grid")]
    OutOfRange {
        col: usize,
        row: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cell (col {col}, row {row}) has no neighboring cells")]
    NoNeighbors { col: usize, row: usize },

    #[error("unknown binary tree bias {0:?}, expected one of nw, ne, sw, se")]
    UnknownBias(String),

    #[error("cells {from:?} and {to:?} are not grid neighbors")]
    NotAdjacent {
        from: (usize, usize),
        to: (usize, usize),
    },

    #[error("invalid action {action}, expected a value in [0, {count})")]
    InvalidAction { action: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;

/// Errors surfaced by the binaries: terminal I/O or a maze failure.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Maze(#[from] MazeError),
}
