use std::time::Instant;

use mazeworld::{
    AppError,
    generators::{Generator, generate_maze},
    maze::Grid,
};

const SIZE: usize = 128;

fn main() -> Result<(), AppError> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    for generator in Generator::ALL {
        let started = Instant::now();
        for seed in 0..num_iters as u64 {
            let mut grid = Grid::new(SIZE, SIZE)?;
            generate_maze(&mut grid, generator, Some(seed))?;
        }
        let elapsed = started.elapsed();
        println!(
            "{:<30} {} runs of {}x{}: {:?} total, {:?} per run",
            generator.to_string(),
            num_iters,
            SIZE,
            SIZE,
            elapsed,
            elapsed / num_iters.max(1) as u32
        );
    }
    Ok(())
}
