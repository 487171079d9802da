#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic maze generation via randomized wall clustering.
//!
//! Given odd row and column counts and a caller-supplied random source, the
//! generator produces a spanning tree over the room cells: every room is
//! reachable from every other room, and no two rooms are connected by more
//! than one path. The random source decides which walls fall, so a fixed
//! seed reproduces the same maze.

use rand::seq::SliceRandom;
use rand::Rng;
use tower_climb_core::{GameError, GridPos};

/// Content of a single cell while a maze is being generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MazeCellContent {
    /// A traversable room or a wall that has been broken through.
    EmptyRoom,
    /// An interior wall segment that may still be removed.
    BreakableWall,
    /// A permanent wall segment, including the outer border.
    UnbreakableWall,
}

/// A single cell of a generated maze.
///
/// The cluster index is an artifact of generation and stays private; once
/// the grid is returned it carries no meaning beyond the content layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeCell {
    content: MazeCellContent,
    cluster_index: usize,
    position: GridPos,
}

impl MazeCell {
    /// Content the cell settled on after generation.
    #[must_use]
    pub const fn content(&self) -> MazeCellContent {
        self.content
    }

    /// Position of the cell within the maze grid.
    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.position
    }
}

/// An owned, contiguous grid of maze cells addressed by row and column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    rows: u32,
    columns: u32,
    cells: Vec<MazeCell>,
}

impl MazeGrid {
    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the content at the given position, if it exists.
    #[must_use]
    pub fn content_at(&self, position: GridPos) -> Option<MazeCellContent> {
        self.index(position).map(|index| self.cells[index].content)
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[MazeCell] {
        &self.cells
    }

    fn index(&self, position: GridPos) -> Option<usize> {
        if !position.is_within(self.rows, self.columns) {
            return None;
        }
        let row = usize::try_from(position.row()).ok()?;
        let column = usize::try_from(position.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Generates a maze over a `rows` x `columns` grid using the clustering
/// method: break randomly chosen walls whenever the rooms on either side
/// belong to different clusters, merging the clusters as you go.
///
/// Both dimensions must be odd and at least 3; room cells sit at odd
/// coordinate pairs, so even dimensions would leave the bottom or right
/// edge without its border wall.
///
/// # Errors
///
/// Returns [`GameError::InvalidMazeDimensions`] when the preconditions on
/// `rows` and `columns` are violated. Generation itself cannot fail.
pub fn generate_maze<R: Rng + ?Sized>(
    rows: u32,
    columns: u32,
    rng: &mut R,
) -> Result<MazeGrid, GameError> {
    let mut grid = raw_maze_grid(rows, columns)?;

    let mut breakable_walls: Vec<usize> = grid
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.content == MazeCellContent::BreakableWall)
        .map(|(index, _)| index)
        .collect();
    breakable_walls.shuffle(rng);

    let width = columns as usize;
    for wall_index in breakable_walls {
        // Breakable walls never touch the border, so all four neighbors
        // exist. A room directly above makes this a vertical connector;
        // otherwise the connected rooms sit left and right.
        let above = wall_index - width;
        let (a, b) = if grid.cells[above].content == MazeCellContent::EmptyRoom {
            (above, wall_index + width)
        } else {
            (wall_index + 1, wall_index - 1)
        };

        let adopted = grid.cells[a].cluster_index;
        let abandoned = grid.cells[b].cluster_index;
        if adopted == abandoned {
            // The rooms are already connected; removing this wall would
            // introduce a second path between them.
            grid.cells[wall_index].content = MazeCellContent::UnbreakableWall;
            continue;
        }

        grid.cells[wall_index].content = MazeCellContent::EmptyRoom;
        grid.cells[wall_index].cluster_index = adopted;
        for cell in &mut grid.cells {
            if cell.cluster_index == abandoned {
                cell.cluster_index = adopted;
            }
        }
    }

    Ok(grid)
}

/// Builds the unsolved grid: border and even/even intersections are
/// permanent walls, odd/odd cells are rooms, and the rest of the interior
/// is breakable. Every cell receives a unique cluster index.
fn raw_maze_grid(rows: u32, columns: u32) -> Result<MazeGrid, GameError> {
    if rows < 3 || columns < 3 || rows % 2 != 1 || columns % 2 != 1 {
        return Err(GameError::InvalidMazeDimensions { rows, columns });
    }

    let capacity = rows as usize * columns as usize;
    let mut cells = Vec::with_capacity(capacity);
    let mut cluster_index = 0;
    for row in 0..rows {
        for column in 0..columns {
            let on_border = row == 0 || row == rows - 1 || column == 0 || column == columns - 1;
            let content = if row % 2 == 1 && column % 2 == 1 {
                MazeCellContent::EmptyRoom
            } else if !on_border && (row % 2 == 0) != (column % 2 == 0) {
                MazeCellContent::BreakableWall
            } else {
                MazeCellContent::UnbreakableWall
            };
            cells.push(MazeCell {
                content,
                cluster_index,
                position: GridPos::new(row, column),
            });
            cluster_index += 1;
        }
    }

    Ok(MazeGrid {
        rows,
        columns,
        cells,
    })
}
