#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Tower Climb.
//!
//! The crate owns the [`State`] aggregate — execution clock, field and
//! game — and exposes exactly one mutation path: the [`apply`] reducer.
//! Drivers feed [`Command`] values in, observe [`Event`] values out, and
//! read through the [`query`] module. Reducer calls against one state
//! must be serialized by the caller; the reducer itself never blocks,
//! retries or spawns, so a single owning thread (or a lock) is enough.

mod field;

pub use field::{Field, FieldCell};

use std::time::Duration;

use rand::Rng;
use tower_climb_core::{Command, Event, FloorClass, GameError, GridPos};

/// Number of rows on the field. Odd, as the maze generator requires.
pub const FIELD_ROWS: u32 = 13;

/// Number of columns on the field. Odd, as the maze generator requires.
pub const FIELD_COLUMNS: u32 = 21;

/// Fixed cell the hero enters every floor on.
pub const ENTRANCE_POSITION: GridPos = GridPos::new(1, 1);

/// Fixed cell carrying the upstairs marking on every floor.
pub const UPSTAIRS_POSITION: GridPos = GridPos::new(11, 19);

/// Total simulated time a run is allowed to take.
pub const TIME_ALLOWANCE: Duration = Duration::from_secs(30);

/// Progress of a single run: floor counter, finish flag and the countdown
/// anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Game {
    floor_number: u32,
    is_finished: bool,
    started_at: Duration,
}

impl Game {
    const fn new() -> Self {
        Self {
            floor_number: 1,
            is_finished: false,
            started_at: Duration::ZERO,
        }
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn start(&mut self, execution_time: Duration) {
        self.started_at = execution_time;
    }

    fn finish(&mut self) {
        self.is_finished = true;
    }

    fn increment_floor_number(&mut self) {
        self.floor_number += 1;
    }

    /// Floor the run currently plays on; doubles as the final score.
    #[must_use]
    pub const fn floor_number(&self) -> u32 {
        self.floor_number
    }

    /// Reports whether a run is underway.
    ///
    /// A zero `started_at` is the "not started" sentinel, so a run whose
    /// anchor legitimately equals zero is indistinguishable from one that
    /// never began. The drivers tick the clock before any key can be
    /// handled, which keeps the ambiguity out of reach in practice.
    #[must_use]
    pub const fn is_started(&self) -> bool {
        !self.started_at.is_zero()
    }

    /// Reports whether the countdown has run out.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Time left on the countdown as observed at `execution_time`.
    ///
    /// A game that has not started always has the full allowance left.
    /// The result is floored at zero, never negative.
    #[must_use]
    pub fn calculate_remaining_time(&self, execution_time: Duration) -> Duration {
        if !self.is_started() {
            return TIME_ALLOWANCE;
        }
        let elapsed = execution_time.saturating_sub(self.started_at);
        TIME_ALLOWANCE.saturating_sub(elapsed)
    }
}

/// Aggregate simulation state: the execution clock, the field, the game.
///
/// Exclusively owns its field and game; nothing outside the reducer holds
/// references into it. Callers treat each reducer call as producing the
/// next state and must not keep mutating a stale copy alongside it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    execution_time: Duration,
    field: Field,
    game: Game,
}

impl State {
    /// Creates the initial state with an empty field and an idle game.
    #[must_use]
    pub fn new() -> Self {
        Self {
            execution_time: Duration::ZERO,
            field: Field::new(FIELD_ROWS, FIELD_COLUMNS),
            game: Game::new(),
        }
    }

    /// Fills the field with a welcome maze and seats the hero on the
    /// entrance without starting the countdown, so the title screen shows
    /// a walkable floor.
    ///
    /// # Errors
    ///
    /// Propagates field errors; with the fixed field dimensions these are
    /// unreachable.
    pub fn prepare_welcome_floor<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.field.reset_maze(rng)?;
        self.field.place_hero(ENTRANCE_POSITION)?;
        self.game.reset();
        Ok(())
    }

    /// Read access to the field.
    #[must_use]
    pub const fn field(&self) -> &Field {
        &self.field
    }

    /// Read access to the game progress.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Accumulated simulated time, distinct from wall-clock time.
    #[must_use]
    pub const fn execution_time(&self) -> Duration {
        self.execution_time
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the state, mutating it deterministically
/// given the random source, and records what happened in `out_events`.
///
/// Movement into walls, edges or occupied cells is a normal game event and
/// resolves to a silent no-op. Errors signal corrupted state or caller
/// bugs and leave the game unplayable; drivers should treat them as fatal.
///
/// # Errors
///
/// Returns [`GameError::HeroNotFound`] or
/// [`GameError::MultipleHeroesFound`] when the one-hero invariant is
/// broken, and propagates field lookup failures that the reducer's own
/// bounds checks should have made impossible.
pub fn apply<R: Rng + ?Sized>(
    state: &mut State,
    command: Command,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) -> Result<(), GameError> {
    match command {
        Command::StartOrRestart => {
            state.field.reset_maze(rng)?;
            state.field.place_hero(ENTRANCE_POSITION)?;
            state.game.reset();
            state.game.start(state.execution_time);
            out_events.push(Event::GameStarted {
                started_at: state.execution_time,
            });
        }
        Command::WalkHero { direction } => {
            if state.game.is_finished() {
                return Ok(());
            }
            let hero = state.field.find_hero()?;
            let Some(candidate) = hero.stepped(direction) else {
                return Ok(());
            };
            if !candidate.is_within(state.field.rows(), state.field.columns()) {
                return Ok(());
            }
            if !state.field.at(candidate)?.is_object_empty() {
                return Ok(());
            }
            state.field.move_object(hero, candidate)?;
            out_events.push(Event::HeroMoved {
                from: hero,
                to: candidate,
            });
        }
        Command::AdvanceTime { delta } => {
            // The accumulator advances even before a run starts so that a
            // later start anchors against the true simulated time.
            state.execution_time = state.execution_time.saturating_add(delta);
            out_events.push(Event::TimeAdvanced { dt: delta });

            if state.game.is_started() && !state.game.is_finished() {
                let hero = state.field.find_hero()?;
                if state.field.at(hero)?.floor() == FloorClass::Upstairs {
                    state.field.reset_maze(rng)?;
                    state.game.increment_floor_number();
                    state.field.place_hero(ENTRANCE_POSITION)?;
                    out_events.push(Event::FloorClimbed {
                        floor_number: state.game.floor_number(),
                    });
                }

                if state
                    .game
                    .calculate_remaining_time(state.execution_time)
                    .is_zero()
                {
                    state.game.finish();
                    out_events.push(Event::GameFinished {
                        floor_number: state.game.floor_number(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Query functions that provide read-only access to the state.
pub mod query {
    use std::time::Duration;

    use tower_climb_core::{FloorClass, GameError, GridPos, ObjectClass};

    use super::State;

    /// Number of rows on the field.
    #[must_use]
    pub fn field_rows(state: &State) -> u32 {
        state.field.rows()
    }

    /// Number of columns on the field.
    #[must_use]
    pub fn field_columns(state: &State) -> u32 {
        state.field.columns()
    }

    /// Object class of the cell at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] for positions outside the field.
    pub fn object_class_at(state: &State, position: GridPos) -> Result<ObjectClass, GameError> {
        state.field.at(position).map(|cell| cell.object())
    }

    /// Floor marking of the cell at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfBounds`] for positions outside the field.
    pub fn floor_class_at(state: &State, position: GridPos) -> Result<FloorClass, GameError> {
        state.field.at(position).map(|cell| cell.floor())
    }

    /// Position of the unique hero cell.
    ///
    /// # Errors
    ///
    /// Returns the invariant-violation errors of
    /// [`GameError::HeroNotFound`] and [`GameError::MultipleHeroesFound`].
    pub fn hero_position(state: &State) -> Result<GridPos, GameError> {
        state.field.find_hero()
    }

    /// Floor the run currently plays on.
    #[must_use]
    pub fn floor_number(state: &State) -> u32 {
        state.game.floor_number()
    }

    /// Reports whether a run is underway.
    #[must_use]
    pub fn is_started(state: &State) -> bool {
        state.game.is_started()
    }

    /// Reports whether the run has ended.
    #[must_use]
    pub fn is_finished(state: &State) -> bool {
        state.game.is_finished()
    }

    /// Time left on the countdown at the state's current execution time.
    #[must_use]
    pub fn remaining_time(state: &State) -> Duration {
        state.game.calculate_remaining_time(state.execution_time)
    }

    /// Accumulated simulated time.
    #[must_use]
    pub fn execution_time(state: &State) -> Duration {
        state.execution_time
    }
}
