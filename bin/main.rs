use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;

use mazeroute::{solve_file, Algorithm};

/// Solve a bitmap maze and draw the shortest route onto a copy of it.
///
/// Walls are black pixels, passages are anything brighter. The entrance is
/// the first open pixel of the top row, the exit the first open pixel of the
/// bottom row.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Source maze image
    input: PathBuf,

    /// Where the traced copy is written
    output: PathBuf,

    /// Search algorithm to run (available: dijkstra)
    #[arg(default_value_t = Algorithm::Dijkstra)]
    algorithm: Algorithm,

    /// Report where the traced image was written once solving is done
    #[arg(long)]
    show: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let started = Instant::now();
    let summary = solve_file(&args.input, &args.output, args.algorithm)
        .with_context(|| format!("failed to solve {}", args.input.display()))?;
    info!(
        "complete operation finished in {:.5} s",
        started.elapsed().as_secs_f64()
    );

    println!(
        "solved {} node maze, shortest route is {} pixels",
        summary.node_count, summary.distance
    );
    if args.show {
        println!("traced maze written to {}", args.output.display());
    }

    Ok(())
}
