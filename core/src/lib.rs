#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tower Climb crates.
//!
//! This crate defines the message surface that connects the drivers, the
//! authoritative world, and the presentation adapters. Drivers submit
//! [`Command`] values describing desired transitions, the world executes
//! those commands via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what actually happened. Failures surface as
//! [`GameError`] values; the reducer decides which of them are ordinary
//! game events and which indicate corrupted state.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single field cell expressed as row and column indices.
///
/// Rows grow downward and columns grow rightward, matching the terminal
/// layout the game is presented on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    row: u32,
    column: u32,
}

impl GridPos {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the position.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the position.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Reports whether the position lies inside a grid of the given extents.
    #[must_use]
    pub const fn is_within(&self, rows: u32, columns: u32) -> bool {
        self.row < rows && self.column < columns
    }

    /// Returns the position one unit step away in the given direction.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant;
    /// the upper bounds are the caller's responsibility because only the
    /// caller knows the grid extents.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Option<Self> {
        let (row, column) = match direction {
            Direction::Up => (self.row.checked_sub(1)?, self.column),
            Direction::Right => (self.row, self.column.checked_add(1)?),
            Direction::Down => (self.row.checked_add(1)?, self.column),
            Direction::Left => (self.row, self.column.checked_sub(1)?),
        };
        Some(Self { row, column })
    }
}

/// Cardinal movement directions available to the hero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

/// Object occupying a field cell. At most one object exists per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectClass {
    /// Nothing occupies the cell.
    Empty,
    /// The player character.
    Hero,
    /// An impassable maze wall.
    Wall,
}

impl ObjectClass {
    /// Reports whether the cell holds no object.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Floor marking carried by a field cell, independent of its object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorClass {
    /// Plain floor.
    Empty,
    /// The stairs leading to the next tower floor.
    Upstairs,
}

/// Commands that express all permissible state transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Begins a fresh run on floor 1, regardless of prior state.
    StartOrRestart,
    /// Requests that the hero take a single step.
    WalkHero {
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Advances the simulation clock by the provided delta time.
    AdvanceTime {
        /// Duration of simulated time that elapsed since the previous tick.
        delta: Duration,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// A run began; the countdown is anchored at the given execution time.
    GameStarted {
        /// Execution-time snapshot the countdown is measured from.
        started_at: Duration,
    },
    /// The hero moved between two cells.
    HeroMoved {
        /// Cell the hero occupied before moving.
        from: GridPos,
        /// Cell the hero occupies after the move.
        to: GridPos,
    },
    /// The hero reached the stairs and advanced to a new floor.
    FloorClimbed {
        /// Floor number now being played.
        floor_number: u32,
    },
    /// The simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// The countdown ran out and the run ended.
    GameFinished {
        /// Floor number the run ended on.
        floor_number: u32,
    },
}

/// Failures surfaced by the world and the maze generator.
///
/// `ObjectAbsent` and `ObjectAlreadyPresent` occur during ordinary play and
/// are absorbed by the reducer's speculative movement checks. The remaining
/// variants indicate caller bugs or corrupted state and always propagate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The requested maze dimensions are not odd values of at least 3.
    #[error("maze dimensions must be odd and at least 3, got {rows} rows and {columns} columns")]
    InvalidMazeDimensions {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        columns: u32,
    },
    /// The position does not exist on the field.
    #[error(
        "position (row {}, column {}) does not exist on the field",
        .position.row(),
        .position.column()
    )]
    OutOfBounds {
        /// Position that failed the bounds check.
        position: GridPos,
    },
    /// The object to be moved does not exist.
    #[error(
        "no object exists at (row {}, column {})",
        .position.row(),
        .position.column()
    )]
    ObjectAbsent {
        /// Source position of the failed move.
        position: GridPos,
    },
    /// An object already occupies the destination.
    #[error(
        "an object already exists at (row {}, column {})",
        .position.row(),
        .position.column()
    )]
    ObjectAlreadyPresent {
        /// Destination position of the failed move.
        position: GridPos,
    },
    /// No cell on the field holds the hero.
    #[error("the hero does not exist on the field")]
    HeroNotFound,
    /// More than one cell on the field holds a hero.
    #[error("there are {count} heroes on the field")]
    MultipleHeroesFound {
        /// Number of hero cells found.
        count: usize,
    },
}
