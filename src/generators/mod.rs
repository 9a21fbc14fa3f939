use rand::{SeedableRng, rngs::StdRng};

mod aldous_broder;
mod binary_tree;
mod iterative;
mod recur_backtrack;
mod wilson;

pub use aldous_broder::AldousBroder;
pub use binary_tree::{Bias, BinaryTree};
pub use iterative::Iterative;
pub use recur_backtrack::RecurBacktrack;
pub use wilson::{Wilson, extend_walk};

use crate::error::Result;
use crate::maze::{CellId, Grid};

/// Get a random number generator, optionally seeded for reproducibility.
/// Entropy is only drawn here, never while a maze is being carved.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => {
            tracing::debug!("[generate] no seed given, seeding from the OS");
            StdRng::from_os_rng()
        }
    }
}

/// Neighbors of `id` that have not been visited yet, in north, south, east, west order.
fn unvisited_neighbors(grid: &Grid, id: CellId, visited: &[bool]) -> Vec<CellId> {
    grid[id]
        .neighbors()
        .filter(|n| !visited[n.index()])
        .collect()
}

/// A randomized spanning tree construction.
///
/// `init` expects a grid with every wall standing and carves passages so that they form a spanning
/// tree of the grid. If it fails the grid is left partially carved and should be thrown away.
pub trait MazeGenerator {
    fn init(&mut self, grid: &mut Grid) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Generator {
    AldousBroder,
    Wilson,
    #[value(name = "backtracking")]
    RecurBacktrack,
    Iterative,
    BinaryTree,
}

impl Generator {
    pub const ALL: [Generator; 5] = [
        Generator::AldousBroder,
        Generator::Wilson,
        Generator::RecurBacktrack,
        Generator::Iterative,
        Generator::BinaryTree,
    ];

    /// Build the generator. `bias` is only used by [`Generator::BinaryTree`]; when absent the
    /// bias is drawn from the generator's own random source.
    pub fn build(self, seed: Option<u64>, bias: Option<Bias>) -> Box<dyn MazeGenerator> {
        match self {
            Generator::AldousBroder => Box::new(AldousBroder::new(seed)),
            Generator::Wilson => Box::new(Wilson::new(seed)),
            Generator::RecurBacktrack => Box::new(RecurBacktrack::new(seed)),
            Generator::Iterative => Box::new(Iterative::new(seed)),
            Generator::BinaryTree => Box::new(match bias {
                Some(bias) => BinaryTree::with_bias(seed, bias),
                None => BinaryTree::new(seed),
            }),
        }
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::AldousBroder => write!(f, "Aldous-Broder"),
            Generator::Wilson => write!(f, "Wilson's Algorithm"),
            Generator::RecurBacktrack => write!(f, "Recursive Backtracking"),
            Generator::Iterative => write!(f, "Iterative Depth-First Search"),
            Generator::BinaryTree => write!(f, "Binary Tree"),
        }
    }
}

pub fn generate_maze(grid: &mut Grid, generator: Generator, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "[generate] carving {}x{} grid with {}",
        grid.rows(),
        grid.cols(),
        generator
    );
    generator.build(seed, None).init(grid)?;
    tracing::debug!("[generate] done, {} passages", grid.passage_count());
    Ok(())
}
