//! Solve bitmap mazes: compact the bitmap into a graph of decision points,
//! search it for the shortest route from the top-row entrance to the
//! bottom-row exit, and draw that route onto a copy of the source image.

use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

use log::info;

pub mod error;
pub mod find;
pub mod graph;
pub mod grid;
pub mod trace;
pub mod util;

pub use error::MazeError;
pub use find::{solve, Settled, Solution};
pub use graph::{Direction, MazeGraph, Node, NodeId};
pub use grid::{Cell, Grid, Point};
pub use trace::{paint_route, trace_to_file, TRACE_COLOR};
pub use util::parse_img;

/// The available search algorithms.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Algorithm {
    Dijkstra,
}

impl Algorithm {
    pub const ALL: [Algorithm; 1] = [Algorithm::Dijkstra];
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::Dijkstra => "dijkstra",
            }
        )
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dijkstra" => Ok(Algorithm::Dijkstra),
            _ => Err(anyhow::anyhow!("unknown algorithm: {}", s)),
        }
    }
}

/// What a completed solve produced.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    pub node_count: usize,
    /// Length in pixels of the shortest route from start to finish.
    pub distance: usize,
}

/// Run the whole pipeline: decode the maze at `input`, copy it byte-for-byte
/// to `output`, then trace the shortest route onto the copy.
///
/// Every stage owns its state exclusively; concurrent calls on different
/// inputs do not interfere.
pub fn solve_file(input: &Path, output: &Path, algorithm: Algorithm) -> Result<Summary, MazeError> {
    let img = image::open(input).map_err(|source| MazeError::InputNotFound {
        path: input.to_path_buf(),
        source,
    })?;
    let grid = parse_img(&img)?;

    // the output canvas starts as an exact copy of the input file
    fs::copy(input, output).map_err(MazeError::CopyFailure)?;

    let started = Instant::now();
    let graph = MazeGraph::build(&grid)?;
    info!(
        "created node map: {} nodes in {:.5} s",
        graph.node_count(),
        started.elapsed().as_secs_f64()
    );

    let started = Instant::now();
    let solution = match algorithm {
        Algorithm::Dijkstra => find::solve(&graph),
    };
    info!(
        "finalized nodes in {:.5} s",
        started.elapsed().as_secs_f64()
    );

    let started = Instant::now();
    trace::trace_to_file(&graph, &solution, output)?;
    info!(
        "traced node path in {:.5} s",
        started.elapsed().as_secs_f64()
    );

    let distance = solution
        .get(graph.finish())
        .map(|s| s.dist)
        .ok_or(MazeError::UnreachableFinish)?;

    Ok(Summary {
        node_count: graph.node_count(),
        distance,
    })
}
