use std::path::Path;

use image::{Rgba, RgbaImage};
use log::debug;

use crate::error::MazeError;
use crate::find::Solution;
use crate::graph::MazeGraph;

/// The fixed highlight color the route is drawn in.
pub const TRACE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Rasterize the shortest route onto `canvas` by walking settled
/// predecessors backward from the finish node.
///
/// Each hop paints the axis-aligned run of pixels from the current node's
/// coordinate toward its predecessor's, inclusive of the current endpoint and
/// exclusive of the predecessor (which the next hop paints). The start pixel
/// is painted up front, so both endpoints end up covered. Termination
/// compares positions, never arena identity.
///
/// A finish with no settled predecessor chain back to the start means the
/// frontier was exhausted before the finish settled; that surfaces as
/// [`MazeError::UnreachableFinish`].
pub fn paint_route(
    graph: &MazeGraph,
    solution: &Solution,
    canvas: &mut RgbaImage,
) -> Result<(), MazeError> {
    let start_pos = graph.node(graph.start()).pos;
    canvas.put_pixel(start_pos.x as u32, start_pos.y as u32, TRACE_COLOR);

    let mut cur = graph.finish();

    while graph.node(cur).pos != start_pos {
        let settled = solution.get(cur).ok_or(MazeError::UnreachableFinish)?;
        let pred = settled.pred.ok_or(MazeError::UnreachableFinish)?;

        let cp = graph.node(cur).pos;
        let pp = graph.node(pred).pos;

        if cp.x == pp.x {
            // vertical segment
            if cp.y > pp.y {
                for y in (pp.y + 1)..=cp.y {
                    canvas.put_pixel(cp.x as u32, y as u32, TRACE_COLOR);
                }
            } else {
                for y in cp.y..pp.y {
                    canvas.put_pixel(cp.x as u32, y as u32, TRACE_COLOR);
                }
            }
        } else {
            // horizontal segment
            if cp.x > pp.x {
                for x in (pp.x + 1)..=cp.x {
                    canvas.put_pixel(x as u32, cp.y as u32, TRACE_COLOR);
                }
            } else {
                for x in cp.x..pp.x {
                    canvas.put_pixel(x as u32, cp.y as u32, TRACE_COLOR);
                }
            }
        }

        cur = pred;
    }

    Ok(())
}

/// Paint the route onto the output canvas file produced by the initial copy,
/// then save it back in place.
pub fn trace_to_file(
    graph: &MazeGraph,
    solution: &Solution,
    out_path: &Path,
) -> Result<(), MazeError> {
    let canvas = image::open(out_path).map_err(|e| {
        MazeError::CopyFailure(std::io::Error::new(std::io::ErrorKind::Other, e))
    })?;
    let mut canvas = canvas.to_rgba8();

    paint_route(graph, solution, &mut canvas)?;

    debug!("saving traced canvas to {}", out_path.display());
    canvas.save(out_path).map_err(MazeError::WriteFailure)?;

    Ok(())
}
