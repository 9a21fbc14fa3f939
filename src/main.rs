use clap::Parser;
use mazeworld::{
    AppError, app,
    env::{EnvConfig, Environment},
    generators::{Bias, Generator},
    maze::Grid,
};
use tracing::Level;

/// Generate a random perfect maze and walk it in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Number of columns
    #[arg(long, default_value_t = 15)]
    cols: usize,

    /// Maze generation algorithm
    #[arg(long, value_enum, default_value_t = Generator::Wilson)]
    generator: Generator,

    /// Random seed, drawn from the OS when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Corner bias for the binary tree generator (nw, ne, sw, se), random when omitted
    #[arg(long)]
    bias: Option<Bias>,

    /// Starting cell as COL,ROW (default: top left)
    #[arg(long, value_parser = parse_coord)]
    start: Option<(usize, usize)>,

    /// Goal cell as COL,ROW (default: bottom right)
    #[arg(long, value_parser = parse_coord)]
    goal: Option<(usize, usize)>,

    /// Print the maze and exit instead of playing it
    #[arg(long)]
    print: bool,

    /// Log level written to mazeworld.log
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn parse_coord(s: &str) -> Result<(usize, usize), String> {
    let (col, row) = s
        .split_once(',')
        .ok_or_else(|| format!("expected COL,ROW, got {s:?}"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid coordinate {v:?}: {e}"))
    };
    Ok((parse(col)?, parse(row)?))
}

/// Whether `--bias` was given to a generator that has no use for it.
fn bias_ignored(generator: Generator, bias: Option<Bias>) -> bool {
    bias.is_some() && generator != Generator::BinaryTree
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The terminal belongs to the player, so logs go to a file
    let file_appender = tracing_appender::rolling::never(".", "mazeworld.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(args.log_level)
        .init();

    let mut grid = Grid::new(args.rows, args.cols)?;
    tracing::info!(
        "Generating {}x{} maze with {} (seed {:?}, bias {:?})",
        args.rows,
        args.cols,
        args.generator,
        args.seed,
        args.bias
    );
    if bias_ignored(args.generator, args.bias) {
        tracing::warn!(
            "--bias only applies to the binary tree generator, ignoring it for {}",
            args.generator
        );
        eprintln!("Warning: --bias is ignored by {}", args.generator);
    }
    let mut generator = args.generator.build(args.seed, args.bias);
    if let Err(e) = generator.init(&mut grid) {
        tracing::error!("Maze generation failed: {}", e);
        return Err(e.into());
    }

    let config = EnvConfig {
        start: args.start,
        goal: args.goal,
        one_hot: false,
    };
    let mut env = Environment::new(grid, config)?;

    if args.print {
        print!("{env}");
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    app::setup_terminal(&mut stdout)?;
    let outcome = app::play(&mut stdout, &mut env);
    app::restore_terminal(&mut stdout)?;

    match outcome? {
        app::PlayOutcome::Won { steps } => println!("You won in {steps} moves!"),
        app::PlayOutcome::Quit { steps } => println!("Gave up after {steps} moves."),
    }
    Ok(())
}
