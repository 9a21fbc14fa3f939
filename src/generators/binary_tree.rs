use std::str::FromStr;

use rand::{Rng, rngs::StdRng};

use crate::error::{MazeError, Result};
use crate::generators::{MazeGenerator, get_rng};
use crate::maze::{Direction, Grid};

/// The corner a binary tree maze leans towards.
///
/// Every cell links towards one of the two directions of its bias, so the two outer edges on
/// that side end up as single unbroken corridors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bias {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Bias {
    pub const ALL: [Bias; 4] = [
        Bias::NorthWest,
        Bias::NorthEast,
        Bias::SouthWest,
        Bias::SouthEast,
    ];

    /// Pick one of the four biases uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Bias::ALL[rng.random_range(0..Bias::ALL.len())]
    }

    /// The two directions a cell may link towards.
    pub fn directions(self) -> (Direction, Direction) {
        match self {
            Bias::NorthWest => (Direction::North, Direction::West),
            Bias::NorthEast => (Direction::North, Direction::East),
            Bias::SouthWest => (Direction::South, Direction::West),
            Bias::SouthEast => (Direction::South, Direction::East),
        }
    }
}

impl std::fmt::Display for Bias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bias::NorthWest => write!(f, "north-west"),
            Bias::NorthEast => write!(f, "north-east"),
            Bias::SouthWest => write!(f, "south-west"),
            Bias::SouthEast => write!(f, "south-east"),
        }
    }
}

impl FromStr for Bias {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nw" | "north-west" | "northwest" => Ok(Bias::NorthWest),
            "ne" | "north-east" | "northeast" => Ok(Bias::NorthEast),
            "sw" | "south-west" | "southwest" => Ok(Bias::SouthWest),
            "se" | "south-east" | "southeast" => Ok(Bias::SouthEast),
            _ => Err(MazeError::UnknownBias(s.to_string())),
        }
    }
}

/// Numeric bias codes: 0 = NW, 1 = NE, 2 = SW, 3 = SE.
impl TryFrom<u8> for Bias {
    type Error = MazeError;

    fn try_from(code: u8) -> Result<Self> {
        Bias::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| MazeError::UnknownBias(code.to_string()))
    }
}

/// Single pass carving: every cell links to one of its up to two neighbors in the bias
/// directions.
pub struct BinaryTree {
    rng: StdRng,
    bias: Bias,
}

impl BinaryTree {
    /// Binary tree with a bias drawn from the generator's own random source.
    pub fn new(seed: Option<u64>) -> Self {
        let mut rng = get_rng(seed);
        let bias = Bias::random(&mut rng);
        BinaryTree { rng, bias }
    }

    pub fn with_bias(seed: Option<u64>, bias: Bias) -> Self {
        BinaryTree {
            rng: get_rng(seed),
            bias,
        }
    }

    /// Binary tree from a numeric bias code, failing on codes other than 0 to 3.
    pub fn with_bias_code(seed: Option<u64>, code: u8) -> Result<Self> {
        Ok(BinaryTree::with_bias(seed, Bias::try_from(code)?))
    }

    pub fn bias(&self) -> Bias {
        self.bias
    }
}

impl MazeGenerator for BinaryTree {
    fn init(&mut self, grid: &mut Grid) -> Result<()> {
        let (first, second) = self.bias.directions();
        tracing::debug!("[binary-tree] carving with {} bias", self.bias);

        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let id = grid.id_at(col, row)?;
                let cell = &grid[id];
                let candidates = [cell.neighbor(first), cell.neighbor(second)]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>();

                if !candidates.is_empty() {
                    let neighbor = candidates[self.rng.random_range(0..candidates.len())];
                    grid.link(id, neighbor)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::{carve, check_corridors, check_generator};

    #[test]
    fn test_binary_tree_perfect_and_reproducible() {
        check_generator(|seed| BinaryTree::new(Some(seed)));
        for bias in Bias::ALL {
            check_generator(|seed| BinaryTree::with_bias(Some(seed), bias));
        }
    }

    #[test]
    fn test_binary_tree_corridors() {
        check_corridors(|seed| BinaryTree::new(Some(seed)));
    }

    #[test]
    fn test_north_west_bias_corridors() {
        let grid = carve(&mut BinaryTree::with_bias(Some(7), Bias::NorthWest), 8, 11);

        for col in 1..grid.cols() {
            let cell = grid.cell_at(col, 0).unwrap();
            assert!(cell.can_move_west(), "top row broken at column {col}");
        }
        for row in 1..grid.rows() {
            let cell = grid.cell_at(0, row).unwrap();
            assert!(cell.can_move_north(), "left column broken at row {row}");
        }
    }

    #[test]
    fn test_south_east_bias_corridors() {
        let grid = carve(&mut BinaryTree::with_bias(Some(7), Bias::SouthEast), 6, 9);
        let (last_row, last_col) = (grid.rows() - 1, grid.cols() - 1);

        for col in 0..last_col {
            assert!(grid.cell_at(col, last_row).unwrap().can_move_east());
        }
        for row in 0..last_row {
            assert!(grid.cell_at(last_col, row).unwrap().can_move_south());
        }
    }

    #[test]
    fn test_cells_only_link_towards_bias() {
        let grid = carve(&mut BinaryTree::with_bias(Some(1), Bias::NorthEast), 7, 7);
        // Each cell opens at most one passage towards its bias, so none opens both
        for cell in grid.cells() {
            assert!(!(cell.can_move_north() && cell.can_move_east()));
        }
    }

    #[test]
    fn test_bias_parsing() {
        assert_eq!("nw".parse::<Bias>(), Ok(Bias::NorthWest));
        assert_eq!("South-East".parse::<Bias>(), Ok(Bias::SouthEast));
        assert_eq!(
            "up".parse::<Bias>(),
            Err(MazeError::UnknownBias("up".to_string()))
        );

        assert_eq!(Bias::try_from(1), Ok(Bias::NorthEast));
        assert_eq!(Bias::try_from(4), Err(MazeError::UnknownBias("4".to_string())));
        assert!(BinaryTree::with_bias_code(Some(0), 9).is_err());
        assert_eq!(
            BinaryTree::with_bias_code(Some(0), 2).unwrap().bias(),
            Bias::SouthWest
        );
    }

    #[test]
    fn test_random_bias_is_reproducible() {
        let a = BinaryTree::new(Some(31));
        let b = BinaryTree::new(Some(31));
        assert_eq!(a.bias(), b.bias());
    }
}
