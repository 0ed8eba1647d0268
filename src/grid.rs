use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single pixel of the maze bitmap: either a wall or an open passage.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Open,
}

impl Default for Cell {
    fn default() -> Self {
        Self::Wall
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Wall => "X",
                Cell::Open => " ",
            }
        )
    }
}

/// An (x, y) pixel position in the maze bitmap.
///
/// Used as the composite key wherever a structure is addressed by position,
/// so that e.g. (1, 23) and (12, 3) can never collide.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The passability grid decoded from the source image.
///
/// Immutable once loaded; cells are stored row-major, indexed `[y][x]`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::Wall; width]; height],
        }
    }

    /// Whether the cell at (x, y) is an open passage.
    /// Out-of-range coordinates count as walls.
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y][x] == Cell::Open
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Build a grid from rows of `#` (wall) and `.` (open). Test helper.
#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> Grid {
    let height = rows.len();
    let width = rows[0].len();
    let mut grid = Grid::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len(), width);
        for (x, c) in row.chars().enumerate() {
            grid.cells[y][x] = match c {
                '#' => Cell::Wall,
                '.' => Cell::Open,
                _ => panic!("unexpected grid char {c:?}"),
            };
        }
    }
    grid
}
