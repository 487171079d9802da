#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that runs the Tower Climb terminal game.
//!
//! The driver owns the single [`State`] and is the only caller of the
//! reducer. An input thread translates key presses into intents on an
//! mpsc channel; the main thread drains that channel and fires a tick
//! whenever the scheduler's deadline passes. Funneling both stimulus
//! paths through one consumer is what serializes reducer calls.

mod input;
mod scheduler;
mod terminal;

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event as TermEvent, KeyEventKind};
use log::{debug, error};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tower_climb_core::{Command, Event, FloorClass, GridPos, ObjectClass};
use tower_climb_rendering::{FieldCellProps, Screen, ScreenProps};
use tower_climb_world::{self as world, query, State};

use crate::input::{intent_for, Intent};
use crate::scheduler::{TickScheduler, FRAME_INTERVAL};
use crate::terminal::Terminal;

/// Climb as many maze floors as you can within 30 seconds.
#[derive(Debug, Parser)]
#[command(name = "tower-climb")]
struct Cli {
    /// Seed for the maze random source; drawn from OS entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the welcome screen as plain text and exit.
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let mut state = State::new();
    state
        .prepare_welcome_floor(&mut rng)
        .context("failed to prepare the welcome floor")?;

    let mut screen = Screen::new();
    screen.render(&screen_props(&state));

    if cli.dump {
        println!("{}", screen.as_text());
        return Ok(());
    }

    let outcome = run(&mut state, &mut rng, &mut screen);
    if let Err(error) = &outcome {
        error!("game loop aborted: {error:#}");
    }
    outcome
}

/// Runs the terminal session until the player quits or the state breaks.
fn run(state: &mut State, rng: &mut ChaCha8Rng, screen: &mut Screen) -> Result<()> {
    let mut terminal = Terminal::new().context("failed to initialize the terminal")?;
    terminal.draw(screen)?;

    let (sender, receiver) = mpsc::channel();
    spawn_input_thread(sender);

    let mut scheduler = TickScheduler::default();
    let mut deadline = Instant::now() + scheduler.interval_to_next_tick(Instant::now());
    let mut events: Vec<Event> = Vec::new();

    loop {
        let timeout = deadline.saturating_duration_since(Instant::now());
        let command = match receiver.recv_timeout(timeout) {
            Ok(Intent::Quit) => return Ok(()),
            Ok(Intent::Dispatch(command)) => command,
            Err(RecvTimeoutError::Timeout) => {
                let now = Instant::now();
                deadline = now + scheduler.interval_to_next_tick(now);
                Command::AdvanceTime {
                    delta: FRAME_INTERVAL,
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(anyhow::anyhow!("the input thread stopped unexpectedly"));
            }
        };

        events.clear();
        world::apply(state, command, rng, &mut events)
            .context("the game state is no longer consistent")?;
        for event in &events {
            debug!("{event:?}");
        }

        screen.render(&screen_props(state));
        terminal.draw(screen)?;
    }
}

/// Reads terminal events on a dedicated thread and forwards the mapped
/// intents. Stops as soon as the consumer hangs up.
fn spawn_input_thread(sender: Sender<Intent>) {
    let _ = thread::spawn(move || loop {
        match event::read() {
            Ok(TermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(intent) = intent_for(&key) {
                    if sender.send(intent).is_err() {
                        break;
                    }
                }
            }
            Ok(_) => {}
            Err(_) => break,
        }
    });
}

/// Projects the state into the per-frame update query of the screen.
fn screen_props(state: &State) -> ScreenProps {
    let rows = query::field_rows(state);
    let columns = query::field_columns(state);
    let mut field_cells = Vec::with_capacity(rows as usize);
    for row in 0..rows {
        let mut cells_row = Vec::with_capacity(columns as usize);
        for column in 0..columns {
            let position = GridPos::new(row, column);
            let object = query::object_class_at(state, position).unwrap_or(ObjectClass::Empty);
            let floor = query::floor_class_at(state, position).unwrap_or(FloorClass::Empty);
            cells_row.push(FieldCellProps::new(object, floor));
        }
        field_cells.push(cells_row);
    }

    ScreenProps {
        field_cells,
        remaining_time: query::remaining_time(state),
        floor_number: query::floor_number(state),
        is_finished: query::is_finished(state),
    }
}
