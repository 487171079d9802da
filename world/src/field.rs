//! The mutable cell grid a single tower floor is played on.

use rand::Rng;
use tower_climb_core::{FloorClass, GameError, GridPos, ObjectClass};
use tower_climb_system_maze_generation::{generate_maze, MazeCellContent};

use crate::UPSTAIRS_POSITION;

/// A single field cell: at most one object plus an independent floor
/// marking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldCell {
    object: ObjectClass,
    floor: FloorClass,
    position: GridPos,
}

impl FieldCell {
    const fn new(position: GridPos) -> Self {
        Self {
            object: ObjectClass::Empty,
            floor: FloorClass::Empty,
            position,
        }
    }

    /// Object currently occupying the cell.
    #[must_use]
    pub const fn object(&self) -> ObjectClass {
        self.object
    }

    /// Floor marking carried by the cell.
    #[must_use]
    pub const fn floor(&self) -> FloorClass {
        self.floor
    }

    /// Position of the cell within its field.
    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.position
    }

    /// Reports whether the cell holds no object.
    #[must_use]
    pub const fn is_object_empty(&self) -> bool {
        self.object.is_empty()
    }
}

/// Rectangular grid of field cells with fixed dimensions.
///
/// The grid is created once and mutated in place; it is never resized.
/// All mutation goes through the reducer in the crate root, so external
/// callers only ever observe a field, never reshape one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    rows: u32,
    columns: u32,
    cells: Vec<FieldCell>,
}

impl Field {
    pub(crate) fn new(rows: u32, columns: u32) -> Self {
        let capacity = rows as usize * columns as usize;
        let mut cells = Vec::with_capacity(capacity);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(FieldCell::new(GridPos::new(row, column)));
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows on the field.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns on the field.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Returns the cell at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] when the position lies outside
    /// the field.
    pub fn at(&self, position: GridPos) -> Result<&FieldCell, GameError> {
        self.index(position)
            .map(|index| &self.cells[index])
            .ok_or(GameError::OutOfBounds { position })
    }

    fn at_mut(&mut self, position: GridPos) -> Result<&mut FieldCell, GameError> {
        match self.index(position) {
            Some(index) => Ok(&mut self.cells[index]),
            None => Err(GameError::OutOfBounds { position }),
        }
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

    /// Moves the object at `from` onto `to`, leaving `from` empty. Floor
    /// markings are untouched on both cells.
    pub(crate) fn move_object(&mut self, from: GridPos, to: GridPos) -> Result<(), GameError> {
        let source = self.at(from)?;
        if source.is_object_empty() {
            return Err(GameError::ObjectAbsent { position: from });
        }
        let object = source.object;

        let destination = self.at(to)?;
        if !destination.is_object_empty() {
            return Err(GameError::ObjectAlreadyPresent { position: to });
        }

        self.at_mut(to)?.object = object;
        self.at_mut(from)?.object = ObjectClass::Empty;
        Ok(())
    }

    /// Scans for the unique hero cell.
    ///
    /// Zero or multiple matches indicate corrupted state and are reported
    /// as errors rather than papered over.
    pub(crate) fn find_hero(&self) -> Result<GridPos, GameError> {
        let mut heroes = self
            .cells
            .iter()
            .filter(|cell| cell.object == ObjectClass::Hero);
        let Some(first) = heroes.next() else {
            return Err(GameError::HeroNotFound);
        };
        let extras = heroes.count();
        if extras > 0 {
            return Err(GameError::MultipleHeroesFound { count: extras + 1 });
        }
        Ok(first.position)
    }

    /// Seats the hero on the given cell, which must be empty.
    pub(crate) fn place_hero(&mut self, position: GridPos) -> Result<(), GameError> {
        let cell = self.at_mut(position)?;
        if !cell.is_object_empty() {
            return Err(GameError::ObjectAlreadyPresent { position });
        }
        cell.object = ObjectClass::Hero;
        Ok(())
    }

    /// Replaces the whole grid with a freshly generated maze.
    ///
    /// Rooms become empty cells and every remaining wall becomes a wall
    /// object. Any previous hero placement is wiped — a fresh maze has no
    /// hero — and the upstairs marking is re-applied at the fixed exit.
    /// The field dimensions must satisfy the maze generator's odd-and-
    /// at-least-3 precondition.
    pub(crate) fn reset_maze<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        let maze = generate_maze(self.rows, self.columns, rng)?;
        for (cell, maze_cell) in self.cells.iter_mut().zip(maze.cells()) {
            cell.object = match maze_cell.content() {
                MazeCellContent::EmptyRoom => ObjectClass::Empty,
                MazeCellContent::BreakableWall | MazeCellContent::UnbreakableWall => {
                    ObjectClass::Wall
                }
            };
            cell.floor = FloorClass::Empty;
        }
        self.at_mut(UPSTAIRS_POSITION)?.floor = FloorClass::Upstairs;
        Ok(())
    }
}
