use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the maze pipeline. None of these are retried; each is
/// terminal for the current solve.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("input image {path} could not be opened: {source}")]
    InputNotFound {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("input image contains no pixel data")]
    EmptyImage,

    #[error("could not initialize the output canvas: {0}")]
    CopyFailure(#[source] std::io::Error),

    #[error("no open pixel on the top row to use as the start")]
    MissingEntrance,

    #[error("no open pixel on the bottom row to use as the finish")]
    MissingExit,

    #[error("the finish is not reachable from the start")]
    UnreachableFinish,

    #[error("could not save the traced output: {0}")]
    WriteFailure(#[source] image::ImageError),
}
